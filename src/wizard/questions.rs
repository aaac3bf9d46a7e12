use serde::Serialize;

use crate::{
    constants::screens::{
        owned, ACCURACY_SCALE, DEFAULT_APPLICATION, DEFAULT_FACTUAL_TEXT, DEFAULT_HUMAN_TEXT,
        DEFAULT_PART2_STYLE_TEXT, DEFAULT_STYLE_TEXT, DEFAULT_TONE_TEXT, DEFAULT_USEFULNESS_TEXT,
        HUMAN_LIKENESS_SCALE, PART1_QUESTION_IDS, PART2_OPTIONS, PART3_FACTUAL_TEXT,
        PART3_MISSING_TEMPLATE, STRENGTH_SCALE, USEFULNESS_SCALE, YES_NO,
    },
    models::domain::{
        templates::fill_placeholder, ComparisonItem, IntensityChangeItem, QuestionTemplates,
        QuizPart, QuizPartKind, QuizQuestion, QuizSample, RatingCaption,
    },
    wizard::cursor::CurrentItem,
};

/// A study question as asked and as recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StudyQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    /// Trait names the client highlights inside `text`.
    pub highlights: Vec<String>,
}

/// The quiz question currently asked for a sample.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizPrompt {
    pub title: String,
    pub text: String,
    pub question: QuizQuestion,
    /// Question text written to the response row.
    pub record_text: String,
    /// Terms shown in the reference box.
    pub terms: Vec<String>,
}

pub fn study_questions(item: &CurrentItem, templates: &QuestionTemplates) -> Vec<StudyQuestion> {
    match item {
        CurrentItem::Rating { caption, .. } => rating_questions(caption, templates),
        CurrentItem::Comparison { item, .. } => comparison_questions(item, templates),
        CurrentItem::Change { item, .. } => intensity_questions(item, templates),
        CurrentItem::Quiz { .. } => Vec::new(),
    }
}

/// Terms for the reference box under a study item's questions.
pub fn study_terms(item: &CurrentItem) -> Vec<String> {
    let mut terms = match item {
        CurrentItem::Rating { caption, .. } => {
            let scores = &caption.control_scores;
            let mut terms: Vec<String> = scores.tone_traits().into_iter().take(2).collect();
            terms.extend(scores.main_style_trait());
            terms.extend(caption.application.clone());
            terms
        }
        CurrentItem::Comparison { item, .. } => {
            let mut terms = item.control_scores.tone_traits();
            terms.extend(item.control_scores.style_traits());
            terms
        }
        CurrentItem::Change { item, .. } => item
            .changed_field()
            .and_then(|(_, value)| value)
            .into_iter()
            .collect(),
        CurrentItem::Quiz { .. } => Vec::new(),
    };
    dedup_in_order(&mut terms);
    terms
}

fn dedup_in_order(terms: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    terms.retain(|term| seen.insert(term.clone()));
}

fn template_text<'t>(templates: &'t QuestionTemplates, id: &str) -> Option<&'t str> {
    templates.part1(id).and_then(|t| t.text.as_deref())
}

/// Part 1: five slider questions in a fixed order.
pub fn rating_questions(caption: &RatingCaption, templates: &QuestionTemplates) -> Vec<StudyQuestion> {
    let scores = &caption.control_scores;
    let tone_traits: Vec<String> = scores.tone_traits().into_iter().take(2).collect();
    let tone_str = tone_traits.join(" and ");
    let main_style = scores.main_style_trait();
    let application = caption
        .application
        .clone()
        .unwrap_or_else(|| DEFAULT_APPLICATION.to_string());

    let style_template = templates.part1("style_relevance");
    let default_text = style_template
        .and_then(|t| t.default_text.as_deref())
        .unwrap_or(DEFAULT_STYLE_TEXT);
    let default_options = style_template
        .and_then(|t| t.default_options.clone())
        .unwrap_or_else(|| owned(&STRENGTH_SCALE));
    let style_override = main_style
        .as_ref()
        .and_then(|style| style_template.and_then(|t| t.overrides.get(style)));
    let style_options = style_override
        .and_then(|o| o.options.clone())
        .unwrap_or(default_options);
    let style_text = match style_override.and_then(|o| o.text.as_deref()) {
        Some(text) if !text.contains("{}") => text.to_string(),
        _ => fill_placeholder(default_text, main_style.as_deref().unwrap_or("")),
    };

    PART1_QUESTION_IDS
        .iter()
        .map(|id| {
            let (text, options, highlights) = match *id {
                "tone_relevance" => (
                    fill_placeholder(
                        template_text(templates, id).unwrap_or(DEFAULT_TONE_TEXT),
                        &tone_str,
                    ),
                    owned(&STRENGTH_SCALE),
                    tone_traits.clone(),
                ),
                "style_relevance" => (
                    style_text.clone(),
                    style_options.clone(),
                    main_style.clone().into_iter().collect(),
                ),
                "factual_consistency" => (
                    template_text(templates, id)
                        .unwrap_or(DEFAULT_FACTUAL_TEXT)
                        .to_string(),
                    owned(&ACCURACY_SCALE),
                    Vec::new(),
                ),
                "usefulness" => (
                    fill_placeholder(
                        template_text(templates, id).unwrap_or(DEFAULT_USEFULNESS_TEXT),
                        &application,
                    ),
                    owned(&USEFULNESS_SCALE),
                    vec![application.clone()],
                ),
                _ => (
                    template_text(templates, id)
                        .unwrap_or(DEFAULT_HUMAN_TEXT)
                        .to_string(),
                    owned(&HUMAN_LIKENESS_SCALE),
                    Vec::new(),
                ),
            };
            StudyQuestion {
                id: id.to_string(),
                text,
                options,
                highlights,
            }
        })
        .collect()
}

/// Part 2: every configured template, answered with caption A or B.
pub fn comparison_questions(
    item: &ComparisonItem,
    templates: &QuestionTemplates,
) -> Vec<StudyQuestion> {
    let scores = &item.control_scores;
    let tone_traits = scores.tone_traits();
    let style_traits = scores.style_traits();
    let tone_str = tone_traits.join(" and ");
    let style_str = style_traits.join(" and ");

    templates
        .part2_questions
        .iter()
        .map(|template| {
            let (text, highlights) = match template.id.as_str() {
                "q2_style" => {
                    let default_text = template
                        .default_text
                        .as_deref()
                        .unwrap_or(DEFAULT_PART2_STYLE_TEXT);
                    let text = scores
                        .main_style_trait()
                        .and_then(|style| template.overrides.get(&style))
                        .and_then(|o| o.text.as_deref())
                        .unwrap_or(default_text);
                    (fill_placeholder(text, &style_str), style_traits.clone())
                }
                "q1_tone" => (
                    fill_placeholder(template.text.as_deref().unwrap_or(""), &tone_str),
                    tone_traits.clone(),
                ),
                _ => (template.text.clone().unwrap_or_default(), Vec::new()),
            };
            StudyQuestion {
                id: template.id.clone(),
                text,
                options: owned(&PART2_OPTIONS),
                highlights,
            }
        })
        .collect()
}

/// Part 3: did the trait change as described, and did the facts stay put.
pub fn intensity_questions(
    item: &IntensityChangeItem,
    templates: &QuestionTemplates,
) -> Vec<StudyQuestion> {
    let Some((field_type, trait_name)) = item.changed_field() else {
        return Vec::new();
    };
    let key = if field_type == "writing_style" {
        "Style".to_string()
    } else {
        title_case(&field_type)
    };
    let trait_name = trait_name.unwrap_or_else(|| "trait".to_string());
    let change_type = item.change_type.as_deref().unwrap_or("changed");

    let template = templates
        .part3_questions
        .get(&key)
        .map(String::as_str)
        .unwrap_or(PART3_MISSING_TEMPLATE);
    let text = fill_placeholder(&template.replace("{change_type}", change_type), &trait_name);

    vec![
        StudyQuestion {
            id: "q_intensity".to_string(),
            text,
            options: owned(&YES_NO),
            highlights: vec![trait_name],
        },
        StudyQuestion {
            id: "q_factual".to_string(),
            text: PART3_FACTUAL_TEXT.to_string(),
            options: owned(&YES_NO),
            highlights: Vec::new(),
        },
    ]
}

/// Uppercases the first letter of every word and lowercases the rest.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn quiz_prompt(part: &QuizPart, sample: &QuizSample, rating_index: usize) -> Option<QuizPrompt> {
    let category = title_case(&sample.category_or_tone());
    match part.kind {
        QuizPartKind::Identification => {
            let text = match sample.category_or_tone().to_lowercase().as_str() {
                "tone" => "What is the most dominant tone in the caption?".to_string(),
                "style" => "What is the most dominant style in the caption?".to_string(),
                other => format!("Identify the most dominant {} in the caption", other),
            };
            Some(QuizPrompt {
                title: format!("{} Identification", category),
                text,
                question: sample.question.clone(),
                record_text: format!("Identify dominant {}", category),
                terms: sample.question.options.clone(),
            })
        }
        QuizPartKind::Controllability => {
            let tone = sample.tone_to_compare.clone().unwrap_or_default();
            let comparison = sample
                .comparison_type
                .clone()
                .unwrap_or_else(|| "changed".to_string());
            let mut question = sample.question.clone();
            if question.options.is_empty() {
                question.options = owned(&YES_NO);
            }
            Some(QuizPrompt {
                title: format!("{} Comparison", category),
                text: format!("From Caption A to B, has the level of {} {}?", tone, comparison),
                question,
                record_text: format!("Intensity of '{}' has {}", tone, comparison),
                terms: vec![tone],
            })
        }
        QuizPartKind::QualityRating => {
            let question = sample.questions.get(rating_index)?.clone();
            let raw = question.question_text.clone().unwrap_or_default();
            let text = match &sample.application {
                Some(application) => fill_placeholder(&raw, application),
                None => raw.clone(),
            };
            Some(QuizPrompt {
                title: "Caption Quality Rating".to_string(),
                text,
                question,
                record_text: raw,
                terms: sample.application.clone().into_iter().collect(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{templates::QuestionTemplate, ControlScores, QuizBank};
    use serde_json::json;

    fn scores(tones: &[&str], styles: &[&str]) -> ControlScores {
        let mut scores = ControlScores::default();
        for (i, tone) in tones.iter().enumerate() {
            scores.tone.insert(tone.to_string(), json!(tones.len() - i));
        }
        for (i, style) in styles.iter().enumerate() {
            scores.writing_style.insert(style.to_string(), json!(styles.len() - i));
        }
        scores
    }

    fn caption(tones: &[&str], styles: &[&str], application: Option<&str>) -> RatingCaption {
        RatingCaption {
            caption_id: "cap_1".to_string(),
            text: "A car stops.".to_string(),
            application: application.map(str::to_string),
            control_scores: scores(tones, styles),
        }
    }

    fn templates() -> QuestionTemplates {
        serde_json::from_value(json!({
            "part1_questions": [
                {"id": "tone_relevance", "text": "How {} does it sound?"},
                {"id": "style_relevance", "default_text": "How {} is the style?",
                 "default_options": ["Low", "High"],
                 "overrides": {"Rhetorical Question": {"text": "Does it ask a question?", "options": ["No", "Yes"]}}},
                {"id": "usefulness", "text": "Useful for {}?"}
            ],
            "part2_questions": [
                {"id": "q1_tone", "text": "Which is more {}?"},
                {"id": "q2_style", "default_text": "Which reads more {}?",
                 "overrides": {"Factual": {"text": "Which is more factual?"}}},
                {"id": "q3_fact", "text": "Which is more accurate?"}
            ],
            "part3_questions": {"Tone": "Has {} been {change_type}?", "Style": "Is the {} style {change_type}?"}
        }))
        .expect("templates")
    }

    #[test]
    fn test_rating_questions_use_first_two_tones() {
        let questions = rating_questions(
            &caption(&["Sarcastic", "Angry", "Caring"], &["Factual"], Some("Traffic Awareness")),
            &templates(),
        );

        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, PART1_QUESTION_IDS.to_vec());
        assert_eq!(questions[0].text, "How Sarcastic and Angry does it sound?");
        assert_eq!(questions[0].highlights, vec!["Sarcastic", "Angry"]);
        assert_eq!(questions[1].text, "How Factual is the style?");
        assert_eq!(questions[1].options, vec!["Low", "High"]);
        assert_eq!(questions[2].options, owned(&ACCURACY_SCALE));
        assert_eq!(questions[3].text, "Useful for Traffic Awareness?");
        assert_eq!(questions[4].text, DEFAULT_HUMAN_TEXT);
    }

    #[test]
    fn test_style_override_replaces_text_and_options() {
        let questions = rating_questions(
            &caption(&["Angry"], &["Rhetorical Question"], None),
            &templates(),
        );

        assert_eq!(questions[1].text, "Does it ask a question?");
        assert_eq!(questions[1].options, vec!["No", "Yes"]);
        assert_eq!(questions[3].text, "Useful for the intended application?");
    }

    #[test]
    fn test_rating_questions_fall_back_to_defaults_without_templates() {
        let questions = rating_questions(&caption(&["Caring"], &[], None), &QuestionTemplates::default());

        assert_eq!(questions[0].text, "How Caring does the caption sound?");
        assert_eq!(questions[1].options, owned(&STRENGTH_SCALE));
    }

    #[test]
    fn test_comparison_questions_follow_template_order() {
        let item = ComparisonItem {
            comparison_id: "cmp_1".to_string(),
            control_scores: scores(&["Angry", "Sarcastic"], &["Advisory", "Factual"]),
            ..ComparisonItem::default()
        };

        let questions = comparison_questions(&item, &templates());

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].text, "Which is more Angry and Sarcastic?");
        assert_eq!(questions[1].text, "Which reads more Advisory and Factual?");
        assert_eq!(questions[2].text, "Which is more accurate?");
        assert!(questions.iter().all(|q| q.options == owned(&PART2_OPTIONS)));
    }

    #[test]
    fn test_intensity_questions_fill_trait_and_change_type() {
        let mut item = IntensityChangeItem {
            change_id: "ch_1".to_string(),
            change_type: Some("increased".to_string()),
            ..IntensityChangeItem::default()
        };
        item.field_to_change
            .insert("writing_style".to_string(), json!("Advisory"));

        let questions = intensity_questions(&item, &templates());

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text, "Is the Advisory style increased?");
        assert_eq!(questions[1].text, PART3_FACTUAL_TEXT);
        assert_eq!(questions[0].options, owned(&YES_NO));
    }

    #[test]
    fn test_intensity_questions_report_missing_template() {
        let mut item = IntensityChangeItem::default();
        item.field_to_change.insert("humor".to_string(), json!("Dry"));

        let questions = intensity_questions(&item, &templates());

        assert_eq!(questions[0].text, "Q template missing for Dry");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("tone"), "Tone");
        assert_eq!(title_case("writing STYLE"), "Writing Style");
    }

    #[test]
    fn test_quiz_prompts_per_part_kind() {
        let bank: QuizBank = serde_json::from_value(json!({
            "Part 1: Tone Identification": [{"sample_id": "i1", "category": "style", "options": ["Factual", "Advisory"], "correct_answer": "Factual"}],
            "Part 2: Tone Controllability": [{"sample_id": "c1", "tone_to_compare": "Angry", "comparison_type": "increased", "correct_answer": "Yes"}],
            "Part 3: Caption Quality": [{"sample_id": "q1", "application": "Driver Assistance",
                "questions": [{"question_text": "Is it useful for {}?", "options": ["Yes", "No"], "correct_answer": "Yes"}]}]
        }))
        .expect("quiz");

        let (part, sample) = bank.sample(0, 0).expect("identification");
        let prompt = quiz_prompt(part, sample, 0).expect("prompt");
        assert_eq!(prompt.title, "Style Identification");
        assert_eq!(prompt.text, "What is the most dominant style in the caption?");
        assert_eq!(prompt.record_text, "Identify dominant Style");

        let (part, sample) = bank.sample(1, 0).expect("controllability");
        let prompt = quiz_prompt(part, sample, 0).expect("prompt");
        assert_eq!(prompt.text, "From Caption A to B, has the level of Angry increased?");
        assert_eq!(prompt.record_text, "Intensity of 'Angry' has increased");
        assert_eq!(prompt.question.options, owned(&YES_NO));

        let (part, sample) = bank.sample(2, 0).expect("quality");
        let prompt = quiz_prompt(part, sample, 0).expect("prompt");
        assert_eq!(prompt.text, "Is it useful for Driver Assistance?");
        assert_eq!(prompt.record_text, "Is it useful for {}?");
        assert!(quiz_prompt(part, sample, 1).is_none());
    }

    #[test]
    fn test_unused_template_fields_are_ignored() {
        let mut templates = QuestionTemplates::default();
        templates.part1_questions.push(QuestionTemplate {
            id: "overall_relevance".to_string(),
            text: Some("Overall?".to_string()),
            ..QuestionTemplate::default()
        });

        let questions = rating_questions(&caption(&["Angry"], &["Factual"], None), &templates);
        assert!(questions.iter().all(|q| q.id != "overall_relevance"));
    }
}
