use serde_json::json;

use crate::models::{domain::StudyContent, dto::request::DemographicsRequest};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// The intake form of `a@b.com`, 25, Male.
    pub fn demographics() -> DemographicsRequest {
        DemographicsRequest {
            email: "a@b.com".to_string(),
            age: Some(25),
            gender: Some("Male".to_string()),
            consent: true,
        }
    }

    fn quiz_sample(id: &str, correct: &str) -> serde_json::Value {
        json!({
            "sample_id": id,
            "video_id": format!("video_{}", id),
            "video_path": format!("media/{}.mp4", id),
            "video_summary": "A car waits at a red light.",
            "category": "tone",
            "caption": "Ugh, another red light. Fantastic.",
            "options": ["Sarcastic", "Caring", "Angry"],
            "correct_answer": correct,
            "explanation": "The praise is clearly ironic."
        })
    }

    fn templates() -> serde_json::Value {
        json!({
            "part1_questions": [
                {"id": "tone_relevance", "text": "How {} does the caption sound?"},
                {"id": "style_relevance", "default_text": "How {} is the caption's style?",
                 "default_options": ["Not at all", "Weak", "Moderate", "Strong", "Very Strong"]},
                {"id": "factual_consistency", "text": "How factually accurate is the caption?"},
                {"id": "usefulness", "text": "How useful is this caption for {}?"},
                {"id": "human_likeness", "text": "How human-like does this caption sound?"}
            ],
            "part2_questions": [
                {"id": "q1_tone", "text": "Which caption sounds more {}?"},
                {"id": "q2_style", "default_text": "Which caption's style is more {}?"},
                {"id": "q3_fact", "text": "Which caption is more factually accurate?"}
            ],
            "part3_questions": {
                "Tone": "Has the {} tone {change_type} from Caption A to Caption B?",
                "Style": "Has the {} style {change_type} from Caption A to Caption B?"
            }
        })
    }

    /// Quiz with an identification and a quality part, and every study part
    /// populated including an empty rating video.
    pub fn study_content() -> StudyContent {
        let quiz = json!({
            "Part 1: Tone Identification": [quiz_sample("q_id_1", "Sarcastic"), quiz_sample("q_id_2", "Caring")],
            "Part 3: Caption Quality": [{
                "sample_id": "q_quality_1",
                "video_id": "video_quality",
                "caption": "A cyclist crosses ahead; slow down.",
                "application": "Driver Assistance",
                "questions": [
                    {"question_text": "Is this caption useful for {}?", "options": ["Yes", "No"], "correct_answer": "Yes"},
                    {"question_text": "Is the caption accurate?", "options": ["Yes", "No"], "correct_answer": "Yes"}
                ]
            }]
        });
        let study = json!({
            "part1_ratings": [
                {
                    "video_id": "v1",
                    "video_path": "media/v1.mp4",
                    "video_summary": "A truck merges into the left lane.",
                    "distractor_answers": ["A bus stops", "A cyclist turns"],
                    "road_event_answer": "A truck merges left",
                    "captions": [
                        {"caption_id": "v1_c1", "text": "Heads up, a truck is merging!", "application": "Traffic Awareness",
                         "control_scores": {"tone": {"Urgent": 3, "Caring": 2, "Calm": 1}, "writing_style": {"Advisory": 2}}},
                        {"caption_id": "v1_c2", "text": "A truck changes lanes.",
                         "control_scores": {"tone": {"Neutral": 2}, "writing_style": {"Factual": 3}}}
                    ]
                },
                {
                    "video_id": "v2",
                    "video_path": "media/v2.mp4",
                    "captions": [
                        {"caption_id": "v2_c1", "text": "Nice parking job. Really.",
                         "control_scores": {"tone": {"Sarcastic": 3}, "writing_style": {"Conversational": 1}}}
                    ]
                },
                {"video_id": "v3", "captions": []}
            ],
            "part2_comparisons": [{
                "comparison_id": "cmp_1",
                "video_id": "v4",
                "caption_A": "Careful, pedestrians ahead.",
                "caption_B": "Pedestrians are crossing.",
                "control_scores": {"tone": {"Caring": 3}, "writing_style": {"Advisory": 2}}
            }],
            "part3_intensity_change": [
                {"change_id": "ch_1", "video_id": "v5", "caption_A": "Slow down.", "caption_B": "SLOW DOWN NOW!",
                 "field_to_change": {"tone": "Urgent"}, "change_type": "increased"},
                {"change_id": "ch_2", "video_id": "v6", "caption_A": "You should yield.", "caption_B": "Yield.",
                 "field_to_change": {"writing_style": "Advisory"}, "change_type": "decreased"}
            ]
        });
        let definitions = json!({
            "tones": {"Urgent": "Demanding immediate attention.", "Caring": "Showing concern.", "Sarcastic": "Mocking irony."},
            "writing_styles": {"Advisory": "Gives advice.", "Factual": "States facts."},
            "applications": {"Traffic Awareness": "Keeps the driver informed."}
        });

        StudyContent {
            instructions: json!({"intro": "Please watch the video."}),
            quiz: serde_json::from_value(quiz).expect("fixture quiz"),
            study: serde_json::from_value(study).expect("fixture study"),
            questions: serde_json::from_value(templates()).expect("fixture templates"),
            definitions: serde_json::from_value(definitions).expect("fixture definitions"),
            intro_video: "media/intro.mp4".to_string(),
        }
    }

    /// One identification part of five single-choice samples.
    pub fn five_question_quiz() -> StudyContent {
        let answers = ["Sarcastic", "Caring", "Angry", "Sarcastic", "Caring"];
        let samples: Vec<_> = answers
            .iter()
            .enumerate()
            .map(|(i, answer)| quiz_sample(&format!("s{}", i + 1), answer))
            .collect();
        StudyContent {
            quiz: serde_json::from_value(json!({ "Part 1: Tone Identification": samples }))
                .expect("fixture quiz"),
            ..study_content()
        }
    }

    pub fn multi_select_quiz() -> StudyContent {
        let mut sample = quiz_sample("multi_1", "unused");
        sample["question_type"] = json!("multi");
        sample["correct_answer"] = json!(["Angry", "Sarcastic"]);
        StudyContent {
            quiz: serde_json::from_value(json!({ "Part 1: Tone Identification": [sample] }))
                .expect("fixture quiz"),
            ..study_content()
        }
    }

    pub fn content_with_empty_quiz_part() -> StudyContent {
        StudyContent {
            quiz: serde_json::from_value(json!({
                "Part 0: Warm-up": [],
                "Part 1: Tone Identification": [quiz_sample("q_id_1", "Sarcastic")]
            }))
            .expect("fixture quiz"),
            ..study_content()
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    use std::sync::Arc;

    use super::*;
    use crate::{
        app_state::AppState,
        config::Config,
        models::domain::{AnswerKey, Participant},
        repositories::JsonlBackupSink,
        services::ResponseRecorder,
        wizard::{
            apply,
            cursor::{current_item, settle, CurrentItem},
            questions,
            state::step,
            Event, Page, WizardContext, WizardState,
        },
    };

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }

    /// Application state over the fixture content, recording into a fresh
    /// temporary backup file.
    pub fn app_state() -> AppState {
        let backup = std::env::temp_dir().join(format!("responses_{}.jsonl", uuid::Uuid::new_v4()));
        let recorder = ResponseRecorder::new(None, Arc::new(JsonlBackupSink::new(backup)));
        AppState::from_parts(Config::test_config(), fixtures::study_content(), recorder)
    }

    fn state_on(page: Page, content: &StudyContent) -> WizardState {
        let mut state = WizardState::new(42);
        state.participant = Some(Participant::new("a@b.com", 25, "Male"));
        state.page = page;
        settle(&mut state, content);
        state
    }

    /// First quiz sample, video not yet watched.
    pub fn state_at_quiz(content: &StudyContent) -> WizardState {
        state_on(Page::Quiz, content)
    }

    /// First rating caption, video not yet watched.
    pub fn state_at_study(content: &StudyContent) -> WizardState {
        state_on(Page::UserStudy, content)
    }

    /// First rating caption with its first question revealed.
    pub fn state_at_rating_questions(content: &StudyContent) -> WizardState {
        let mut state = state_at_study(content);
        let item = current_item(&state, content).expect("rating item");
        if let Some(gate) = item.gate_key() {
            state.watched.insert(gate);
        }
        if let Some(view) = state.views.get_mut(&item.key()) {
            view.step = step::QUESTIONS;
        }
        state
    }

    /// Answers the first `count` questions of the current study item with
    /// their first option.
    pub fn answer_questions(state: WizardState, content: &StudyContent, count: usize) -> WizardState {
        let ctx = WizardContext {
            content,
            passing_score: 5,
            debug_shortcuts: true,
        };
        let item = current_item(&state, content).expect("study item");
        let asked = questions::study_questions(&item, &content.questions);
        asked
            .into_iter()
            .take(count)
            .enumerate()
            .fold(state, |state, (i, question)| {
                let event = Event::Answer {
                    question: i,
                    value: question.options[0].clone(),
                };
                apply(&state, event, &ctx).expect("answer accepted").state
            })
    }

    fn current_prompt(state: &WizardState, content: &StudyContent) -> questions::QuizPrompt {
        match current_item(state, content).expect("quiz item") {
            CurrentItem::Quiz {
                part,
                sample,
                rating_question_index,
                ..
            } => questions::quiz_prompt(part, sample, rating_question_index).expect("prompt"),
            other => panic!("not a quiz item: {:?}", other),
        }
    }

    pub fn correct_quiz_answer(state: &WizardState, content: &StudyContent) -> Vec<String> {
        match current_prompt(state, content).question.correct_answer {
            Some(AnswerKey::Single(answer)) => vec![answer],
            Some(AnswerKey::Multiple(answers)) => answers,
            None => panic!("quiz sample has no correct answer"),
        }
    }

    pub fn wrong_quiz_answer(state: &WizardState, content: &StudyContent) -> String {
        let correct = correct_quiz_answer(state, content);
        current_prompt(state, content)
            .question
            .options
            .into_iter()
            .find(|option| !correct.contains(option))
            .expect("a wrong option")
    }

    /// Questions asked across all study items that are not skipped.
    pub fn total_study_questions(content: &StudyContent) -> usize {
        let bank = &content.study;
        let captions: usize = bank.part1_ratings.iter().map(|v| v.captions.len()).sum();
        let changes = bank
            .part3_intensity_change
            .iter()
            .filter(|c| c.changed_field().is_some())
            .count();
        captions * 5 + bank.part2_comparisons.len() * content.questions.part2_questions.len() + changes * 2
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixture_content_parses() {
        let content = study_content();
        assert_eq!(content.quiz.parts.len(), 2);
        assert_eq!(content.quiz.total_scorable_questions(), 4);
        assert_eq!(content.study.part1_ratings.len(), 3);
        assert_eq!(content.questions.part2_questions.len(), 3);
    }

    #[test]
    fn test_five_question_quiz() {
        assert_eq!(five_question_quiz().quiz.total_scorable_questions(), 5);
    }

    #[test]
    fn test_multi_select_fixture() {
        let content = multi_select_quiz();
        assert!(content.quiz.parts[0].samples[0].question.is_multi());
    }
}
