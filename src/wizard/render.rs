use serde::Serialize;
use serde_json::Value;

use crate::{
    constants::screens::{
        owned, COMPREHENSION_PROMPT, CONSENT_TEXT, EXAMPLE_VIDEO, FACTUAL_IMAGE, FACTUAL_TITLE,
        GENDER_OPTIONS, MAX_AGE, MIN_AGE, STUDY_TITLE, THANK_YOU_BODY, THANK_YOU_TITLE,
        TONE_BODY, TONE_IMAGE, TONE_TITLE,
    },
    models::domain::{AnswerKey, Orientation, Phase, QuizPartKind, StudyContent, VideoClip},
    wizard::{
        cursor::{current_item, CurrentItem},
        event::Event,
        questions,
        state::{step, ItemViewState, Page, StudyPart, WizardState},
        WizardContext,
    },
};

/// Everything the client needs to draw the current screen.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum View {
    Demographics {
        title: String,
        consent_text: String,
        gender_options: Vec<String>,
        min_age: u8,
        max_age: u8,
        actions: Vec<&'static str>,
    },
    IntroVideo {
        title: String,
        video: String,
        instructions: Value,
        actions: Vec<&'static str>,
    },
    Explainer {
        page: Page,
        title: String,
        paragraphs: Vec<String>,
        media: Vec<String>,
        actions: Vec<&'static str>,
    },
    WatchVideo {
        phase: Phase,
        item_id: String,
        title: String,
        video: VideoView,
        actions: Vec<&'static str>,
        navigation: Vec<NavGroup>,
    },
    Item(ItemScreen),
    QuizResults {
        score: u32,
        total: usize,
        passing_score: u32,
        passed: bool,
        actions: Vec<&'static str>,
    },
    ThankYou {
        title: String,
        message: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemScreen {
    pub phase: Phase,
    pub title: String,
    pub item_id: String,
    pub step: u8,
    pub video: VideoView,
    pub summary: Option<String>,
    pub comprehension: Option<ComprehensionView>,
    pub captions: Vec<CaptionView>,
    pub questions: Vec<QuestionView>,
    pub quiz_feedback: Option<QuizFeedbackView>,
    pub reference: Vec<TermView>,
    pub actions: Vec<&'static str>,
    pub navigation: Vec<NavGroup>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VideoView {
    pub path: Option<String>,
    pub orientation: Orientation,
    pub duration_secs: u64,
}

impl From<&VideoClip> for VideoView {
    fn from(clip: &VideoClip) -> Self {
        VideoView {
            path: clip.video_path.clone(),
            orientation: clip.meta.orientation,
            duration_secs: clip.meta.duration_secs,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComprehensionView {
    pub prompt: String,
    pub options: Vec<String>,
    pub choice: Option<String>,
    /// Filled in once the participant has answered.
    pub correct_answer: Option<String>,
    pub is_correct: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CaptionView {
    pub label: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub number: usize,
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub highlights: Vec<String>,
    pub answer: Option<String>,
    pub multi: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizFeedbackView {
    pub choice: Vec<String>,
    pub is_correct: bool,
    pub correct_answer: Option<AnswerKey>,
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TermView {
    pub term: String,
    pub definition: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    pub title: String,
    pub entries: Vec<NavEntry>,
}

/// A sidebar entry; posting `target` as an event performs the jump.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: String,
    pub current: bool,
    pub target: Event,
}

pub fn render(state: &WizardState, ctx: &WizardContext) -> View {
    let content = ctx.content;
    match state.page {
        Page::Demographics => View::Demographics {
            title: STUDY_TITLE.to_string(),
            consent_text: CONSENT_TEXT.to_string(),
            gender_options: owned(&GENDER_OPTIONS),
            min_age: MIN_AGE,
            max_age: MAX_AGE,
            actions: with_debug(vec!["submit_demographics"], ctx, "debug_skip_to_study"),
        },
        Page::IntroVideo => View::IntroVideo {
            title: "Introductory Video".to_string(),
            video: content.intro_video.clone(),
            instructions: content.instructions.clone(),
            actions: vec!["previous", "next"],
        },
        Page::WhatIsTone => View::Explainer {
            page: Page::WhatIsTone,
            title: TONE_TITLE.to_string(),
            paragraphs: owned(&TONE_BODY),
            media: vec![TONE_IMAGE.to_string()],
            actions: vec!["previous", "next"],
        },
        Page::FactualInfo => View::Explainer {
            page: Page::FactualInfo,
            title: FACTUAL_TITLE.to_string(),
            paragraphs: Vec::new(),
            media: vec![FACTUAL_IMAGE.to_string(), EXAMPLE_VIDEO.to_string()],
            actions: vec!["previous", "next"],
        },
        Page::Quiz | Page::UserStudy => match current_item(state, content) {
            Some(item) => render_item(state, ctx, &item),
            None if state.page == Page::Quiz => results(state, ctx),
            None => thank_you(),
        },
        Page::QuizResults => results(state, ctx),
        Page::ThankYou => thank_you(),
    }
}

fn with_debug(
    mut actions: Vec<&'static str>,
    ctx: &WizardContext,
    debug_action: &'static str,
) -> Vec<&'static str> {
    if ctx.debug_shortcuts {
        actions.push(debug_action);
    }
    actions
}

fn results(state: &WizardState, ctx: &WizardContext) -> View {
    let passed = ctx.passed(state.quiz.score);
    View::QuizResults {
        score: state.quiz.score,
        total: ctx.content.quiz.total_scorable_questions(),
        passing_score: ctx.passing_score,
        passed,
        actions: vec![if passed { "proceed_to_study" } else { "retake_quiz" }],
    }
}

fn thank_you() -> View {
    View::ThankYou {
        title: THANK_YOU_TITLE.to_string(),
        message: THANK_YOU_BODY.to_string(),
    }
}

fn item_title(item: &CurrentItem) -> String {
    match *item {
        CurrentItem::Quiz {
            part,
            sample,
            rating_question_index,
            ..
        } => questions::quiz_prompt(part, sample, rating_question_index)
            .map(|prompt| prompt.title)
            .unwrap_or_else(|| part.name.clone()),
        CurrentItem::Rating {
            video,
            caption_index,
            ..
        } => format!(
            "Part 1: Caption Rating ({} of {})",
            caption_index + 1,
            video.captions.len()
        ),
        CurrentItem::Comparison { .. } => "Part 2: Caption Comparison".to_string(),
        CurrentItem::Change { .. } => "Part 3: Style Intensity Change".to_string(),
    }
}

fn render_item(state: &WizardState, ctx: &WizardContext, item: &CurrentItem) -> View {
    let navigation = navigation(state, ctx.content);
    let gate_pending = item
        .gate_key()
        .map(|gate| !state.watched.contains(&gate))
        .unwrap_or(false);

    if gate_pending {
        let mut actions = vec!["video_finished"];
        if ctx.debug_shortcuts {
            actions.extend(["debug_skip_video", "debug_skip_to_questions"]);
        }
        return View::WatchVideo {
            phase: item.phase(),
            item_id: item.item_id(),
            title: item_title(item),
            video: VideoView::from(item.clip()),
            actions,
            navigation,
        };
    }

    let fallback;
    let view = match state.views.get(&item.key()) {
        Some(view) => view,
        None => {
            fallback = ItemViewState::new(item.entry_step(), 0, Vec::new());
            &fallback
        }
    };

    let clip = item.clip();
    let comprehension = render_comprehension(item, view);
    let (questions, quiz_feedback, terms) = if item.is_quiz() {
        render_quiz_questions(state, item, view)
    } else {
        (render_study_questions(ctx, item, view), None, questions::study_terms(item))
    };
    let reference = if view.step >= step::QUESTIONS {
        terms
            .into_iter()
            .map(|term| TermView {
                definition: ctx.content.definitions.describe(&term).to_string(),
                term,
            })
            .collect()
    } else {
        Vec::new()
    };

    View::Item(ItemScreen {
        phase: item.phase(),
        title: item_title(item),
        item_id: item.item_id(),
        step: view.step,
        video: VideoView::from(clip),
        summary: if view.step >= step::SUMMARY {
            clip.video_summary.clone()
        } else {
            None
        },
        comprehension,
        captions: if view.step >= step::CAPTIONS {
            captions(item)
        } else {
            Vec::new()
        },
        questions,
        quiz_feedback,
        reference,
        actions: item_actions(state, ctx, item, view),
        navigation,
    })
}

fn render_comprehension(item: &CurrentItem, view: &ItemViewState) -> Option<ComprehensionView> {
    let check = item.comprehension();
    if !check.is_present()
        || !(step::COMPREHENSION..=step::COMPREHENSION_FEEDBACK).contains(&view.step)
    {
        return None;
    }
    let answered = view.step == step::COMPREHENSION_FEEDBACK;
    Some(ComprehensionView {
        prompt: COMPREHENSION_PROMPT.to_string(),
        options: view.comprehension_options.clone(),
        choice: view.comprehension_choice.clone(),
        correct_answer: check.road_event_answer.clone().filter(|_| answered),
        is_correct: answered.then(|| view.comprehension_choice == check.road_event_answer),
    })
}

fn captions(item: &CurrentItem) -> Vec<CaptionView> {
    let caption = |label: &str, text: &str| CaptionView {
        label: label.to_string(),
        text: text.to_string(),
    };
    match *item {
        CurrentItem::Quiz { part, sample, .. } => match part.kind {
            QuizPartKind::Controllability => vec![
                caption("Caption A", sample.caption_a.as_deref().unwrap_or("")),
                caption("Caption B", sample.caption_b.as_deref().unwrap_or("")),
            ],
            _ => sample
                .caption
                .iter()
                .map(|text| caption("Caption", text))
                .collect(),
        },
        CurrentItem::Rating {
            caption: rated,
            caption_index,
            ..
        } => vec![caption(&format!("Caption {}", caption_index + 1), &rated.text)],
        CurrentItem::Comparison { item, .. } => vec![
            caption("Caption A", &item.caption_a),
            caption("Caption B", &item.caption_b),
        ],
        CurrentItem::Change { item, .. } => vec![
            caption("Caption A", &item.caption_a),
            caption("Caption B", &item.caption_b),
        ],
    }
}

fn render_study_questions(
    ctx: &WizardContext,
    item: &CurrentItem,
    view: &ItemViewState,
) -> Vec<QuestionView> {
    if view.step < step::QUESTIONS {
        return Vec::new();
    }
    questions::study_questions(item, &ctx.content.questions)
        .into_iter()
        .take(view.visible_questions())
        .enumerate()
        .map(|(i, question)| QuestionView {
            number: i + 1,
            id: question.id,
            text: question.text,
            options: question.options,
            highlights: question.highlights,
            answer: view.answers.get(i).cloned().flatten(),
            multi: false,
        })
        .collect()
}

fn render_quiz_questions(
    state: &WizardState,
    item: &CurrentItem,
    view: &ItemViewState,
) -> (Vec<QuestionView>, Option<QuizFeedbackView>, Vec<String>) {
    let CurrentItem::Quiz {
        part,
        sample,
        rating_question_index,
        ..
    } = *item
    else {
        return (Vec::new(), None, Vec::new());
    };
    let Some(prompt) = questions::quiz_prompt(part, sample, rating_question_index) else {
        return (Vec::new(), None, Vec::new());
    };
    if view.step < step::QUESTIONS {
        return (Vec::new(), None, prompt.terms);
    }

    let feedback = state.quiz.feedback.as_ref().map(|feedback| QuizFeedbackView {
        choice: feedback.choice.clone(),
        is_correct: feedback.is_correct,
        correct_answer: prompt.question.correct_answer.clone(),
        explanation: prompt.question.explanation.clone(),
    });
    let question = QuestionView {
        number: 1,
        id: item.item_id(),
        text: prompt.text,
        options: prompt.question.options.clone(),
        highlights: prompt.terms.clone(),
        answer: None,
        multi: prompt.question.is_multi(),
    };
    (vec![question], feedback, prompt.terms)
}

fn item_actions(
    state: &WizardState,
    ctx: &WizardContext,
    item: &CurrentItem,
    view: &ItemViewState,
) -> Vec<&'static str> {
    let mut actions = match view.step {
        step::COMPREHENSION => vec!["submit_comprehension"],
        s if s < step::QUESTIONS => vec!["proceed"],
        _ if item.is_quiz() => {
            if state.quiz.feedback.is_some() {
                vec!["next_question"]
            } else {
                vec!["submit_quiz_answer"]
            }
        }
        _ if view.all_interacted() => vec!["answer", "submit"],
        _ => vec!["answer"],
    };
    if ctx.debug_shortcuts && view.step < step::QUESTIONS {
        actions.push("debug_skip_to_questions");
    }
    actions
}

fn navigation(state: &WizardState, content: &StudyContent) -> Vec<NavGroup> {
    match state.page {
        Page::Quiz => content
            .quiz
            .parts
            .iter()
            .enumerate()
            .filter(|(_, part)| !part.samples.is_empty())
            .map(|(p, part)| NavGroup {
                title: part.name.clone(),
                entries: part
                    .samples
                    .iter()
                    .enumerate()
                    .map(|(s, sample)| NavEntry {
                        label: sample
                            .sample_id
                            .clone()
                            .unwrap_or_else(|| format!("Sample {}", s + 1)),
                        current: state.quiz.part_index == p && state.quiz.sample_index == s,
                        target: Event::JumpToQuizSample { part: p, sample: s },
                    })
                    .collect(),
            })
            .collect(),
        Page::UserStudy => {
            let study = &state.study;
            let bank = &content.study;
            let ratings = bank
                .part1_ratings
                .iter()
                .enumerate()
                .flat_map(|(v, video)| {
                    video.captions.iter().enumerate().map(move |(c, caption)| NavEntry {
                        label: caption.caption_id.clone(),
                        current: study.part == StudyPart::Ratings
                            && study.video_index == v
                            && study.caption_index == c,
                        target: Event::JumpToStudyItem {
                            part: StudyPart::Ratings,
                            index: v,
                            caption: Some(c),
                        },
                    })
                })
                .collect();
            let comparisons = bank
                .part2_comparisons
                .iter()
                .enumerate()
                .map(|(i, item)| NavEntry {
                    label: item.comparison_id.clone(),
                    current: study.part == StudyPart::Comparisons && study.comparison_index == i,
                    target: Event::JumpToStudyItem {
                        part: StudyPart::Comparisons,
                        index: i,
                        caption: None,
                    },
                })
                .collect();
            let changes = bank
                .part3_intensity_change
                .iter()
                .enumerate()
                .map(|(i, item)| NavEntry {
                    label: item.change_id.clone(),
                    current: study.part == StudyPart::IntensityChange && study.change_index == i,
                    target: Event::JumpToStudyItem {
                        part: StudyPart::IntensityChange,
                        index: i,
                        caption: None,
                    },
                })
                .collect();

            vec![
                NavGroup {
                    title: "Part 1: Caption Rating".to_string(),
                    entries: ratings,
                },
                NavGroup {
                    title: "Part 2: Caption Comparison".to_string(),
                    entries: comparisons,
                },
                NavGroup {
                    title: "Part 3: Style Intensity Change".to_string(),
                    entries: changes,
                },
            ]
        }
        _ => Vec::new(),
    }
}
