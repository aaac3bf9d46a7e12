use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::domain::Participant;

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^<]+?>").expect("HTML_TAG is a valid regex pattern"));

pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Quiz,
    UserStudyPart1,
    UserStudyPart2,
    UserStudyPart3,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Quiz => write!(f, "quiz"),
            Phase::UserStudyPart1 => write!(f, "user_study_part1"),
            Phase::UserStudyPart2 => write!(f, "user_study_part2"),
            Phase::UserStudyPart3 => write!(f, "user_study_part3"),
        }
    }
}

/// One answer as produced by a wizard transition, before it is attributed to
/// a participant and timestamped.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseDraft {
    pub phase: Phase,
    pub video_id: Option<String>,
    pub sample_id: String,
    pub question_text: String,
    pub choice: String,
    pub was_correct: Option<bool>,
}

/// A recorded row. Field order is the sheet column order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Response {
    pub email: String,
    pub age: u8,
    pub gender: String,
    pub timestamp: String,
    pub study_phase: Phase,
    pub video_id: String,
    pub sample_id: String,
    pub question_text: String,
    pub user_choice: String,
    pub was_correct: String,
    pub attempts_taken: String,
}

impl Response {
    pub const HEADER: [&'static str; 11] = [
        "email",
        "age",
        "gender",
        "timestamp",
        "study_phase",
        "video_id",
        "sample_id",
        "question_text",
        "user_choice",
        "was_correct",
        "attempts_taken",
    ];

    pub fn new(participant: &Participant, draft: &ResponseDraft, timestamp: String) -> Self {
        Response {
            email: participant.email.clone(),
            age: participant.age,
            gender: participant.gender.clone(),
            timestamp,
            study_phase: draft.phase,
            video_id: draft
                .video_id
                .clone()
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            sample_id: draft.sample_id.clone(),
            question_text: strip_html(&draft.question_text),
            user_choice: draft.choice.clone(),
            was_correct: match draft.was_correct {
                Some(true) => "True".to_string(),
                Some(false) => "False".to_string(),
                None => NOT_APPLICABLE.to_string(),
            },
            attempts_taken: if draft.phase == Phase::Quiz {
                "1".to_string()
            } else {
                NOT_APPLICABLE.to_string()
            },
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.email.clone(),
            self.age.to_string(),
            self.gender.clone(),
            self.timestamp.clone(),
            self.study_phase.to_string(),
            self.video_id.clone(),
            self.sample_id.clone(),
            self.question_text.clone(),
            self.user_choice.clone(),
            self.was_correct.clone(),
            self.attempts_taken.clone(),
        ]
    }
}

pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}
