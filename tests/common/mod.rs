#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use caption_study_server::{
    errors::{AppError, AppResult},
    models::domain::{Response, StudyContent},
    repositories::ResponseSink,
};
use serde_json::{json, Value};

pub const QUIZ_ANSWERS: [(&str, &str); 5] = [
    ("q1", "Sarcastic"),
    ("q2", "Caring"),
    ("q3", "Angry"),
    ("q4", "Sarcastic"),
    ("q5", "Caring"),
];

/// Five tone identification samples, one rating video with a comprehension
/// check and two captions, one comparison and one intensity change.
pub fn study_content() -> StudyContent {
    let samples: Vec<Value> = QUIZ_ANSWERS
        .iter()
        .map(|(id, answer)| {
            json!({
                "sample_id": id,
                "video_path": format!("media/{}.mp4", id),
                "video_summary": "A car waits at a red light.",
                "category": "tone",
                "caption": "Another red light. Wonderful.",
                "options": ["Sarcastic", "Caring", "Angry"],
                "correct_answer": answer
            })
        })
        .collect();
    let quiz = json!({ "Part 1: Tone Identification": samples });

    let study = json!({
        "part1_ratings": [{
            "video_id": "v1",
            "video_path": "media/v1.mp4",
            "video_summary": "A truck merges into the left lane.",
            "distractor_answers": ["A bus stops", "A cyclist turns"],
            "road_event_answer": "A truck merges left",
            "captions": [
                {"caption_id": "v1_c1", "text": "Heads up, a truck is merging!", "application": "Traffic Awareness",
                 "control_scores": {"tone": {"Urgent": 3}, "writing_style": {"Advisory": 2}}},
                {"caption_id": "v1_c2", "text": "A truck changes lanes.",
                 "control_scores": {"tone": {"Neutral": 2}, "writing_style": {"Factual": 3}}}
            ]
        }],
        "part2_comparisons": [{
            "comparison_id": "cmp_1",
            "video_id": "v2",
            "caption_A": "Careful, pedestrians ahead.",
            "caption_B": "Pedestrians are crossing.",
            "control_scores": {"tone": {"Caring": 3}, "writing_style": {"Advisory": 2}}
        }],
        "part3_intensity_change": [{
            "change_id": "ch_1",
            "video_id": "v3",
            "caption_A": "Slow down.",
            "caption_B": "SLOW DOWN NOW!",
            "field_to_change": {"tone": "Urgent"},
            "change_type": "increased"
        }]
    });

    let questions = json!({
        "part1_questions": [
            {"id": "tone_relevance", "text": "How {} does the caption sound?"},
            {"id": "style_relevance", "default_text": "How {} is the caption's style?"},
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
            "Tone": "Has the {} tone {change_type} from Caption A to Caption B?"
        }
    });

    let definitions = json!({
        "tones": {"Urgent": "Demanding immediate attention.", "Caring": "Showing concern."},
        "writing_styles": {"Advisory": "Gives advice."}
    });

    StudyContent {
        instructions: json!({"intro": "Please watch the video."}),
        quiz: serde_json::from_value(quiz).unwrap(),
        study: serde_json::from_value(study).unwrap(),
        questions: serde_json::from_value(questions).unwrap(),
        definitions: serde_json::from_value(definitions).unwrap(),
        intro_video: "media/intro.mp4".to_string(),
    }
}

/// Rows recorded so far, in order.
#[derive(Default)]
pub struct RecordingSink {
    pub rows: Mutex<Vec<Response>>,
}

impl RecordingSink {
    pub fn rows(&self) -> Vec<Response> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResponseSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn append(&self, response: &Response) -> AppResult<()> {
        self.rows.lock().unwrap().push(response.clone());
        Ok(())
    }
}

pub struct FailingSink;

#[async_trait]
impl ResponseSink for FailingSink {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn append(&self, _response: &Response) -> AppResult<()> {
        Err(AppError::PersistenceError("sink unavailable".to_string()))
    }
}

pub fn demographics_event() -> Value {
    json!({
        "type": "submit_demographics",
        "email": "a@b.com",
        "age": 25,
        "gender": "Male",
        "consent": true
    })
}

fn has_action(view: &Value, action: &str) -> bool {
    view["actions"]
        .as_array()
        .map(|actions| actions.iter().any(|a| a == action))
        .unwrap_or(false)
}

/// The event a participant would send on `view`, answering quiz samples
/// from `quiz_answers` and every study question with its first option.
/// `None` once the study is complete.
pub fn next_event(view: &Value, quiz_answers: &HashMap<&str, &str>) -> Option<Value> {
    let event = match view["screen"].as_str()? {
        "demographics" => demographics_event(),
        "intro_video" | "explainer" => json!({"type": "next"}),
        "watch_video" => json!({"type": "video_finished"}),
        "quiz_results" if view["passed"] == true => json!({"type": "proceed_to_study"}),
        "quiz_results" => json!({"type": "retake_quiz"}),
        "thank_you" => return None,
        "item" if has_action(view, "submit_comprehension") => json!({
            "type": "submit_comprehension",
            "choice": view["comprehension"]["options"][0]
        }),
        "item" if has_action(view, "proceed") => json!({"type": "proceed"}),
        "item" if has_action(view, "next_question") => json!({"type": "next_question"}),
        "item" if has_action(view, "submit_quiz_answer") => {
            let item_id = view["item_id"].as_str()?;
            json!({"type": "submit_quiz_answer", "choice": [quiz_answers.get(item_id)?]})
        }
        "item" if has_action(view, "submit") => json!({"type": "submit"}),
        "item" => {
            let question = view["questions"]
                .as_array()?
                .iter()
                .find(|q| q["answer"].is_null())?;
            json!({
                "type": "answer",
                "question": question["number"].as_u64()? - 1,
                "value": question["options"][0]
            })
        }
        _ => return None,
    };
    Some(event)
}

pub fn correct_answers() -> HashMap<&'static str, &'static str> {
    QUIZ_ANSWERS.iter().copied().collect()
}

/// Always picks an option other than the correct one.
pub fn wrong_answers() -> HashMap<&'static str, &'static str> {
    QUIZ_ANSWERS
        .iter()
        .map(|(id, answer)| (*id, if *answer == "Angry" { "Caring" } else { "Angry" }))
        .collect()
}
