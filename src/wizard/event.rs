use serde::{Deserialize, Serialize};

use crate::{models::dto::request::DemographicsRequest, wizard::state::StudyPart};

/// Every discrete participant interaction, as posted by the client.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SubmitDemographics(DemographicsRequest),
    DebugSkipToStudy,
    Next,
    Previous,
    VideoFinished,
    DebugSkipVideo,
    Proceed,
    SubmitComprehension {
        #[serde(default)]
        choice: Option<String>,
    },
    Answer {
        question: usize,
        value: String,
    },
    Submit,
    SubmitQuizAnswer {
        #[serde(default)]
        choice: Vec<String>,
    },
    NextQuestion,
    ProceedToStudy,
    RetakeQuiz,
    JumpToQuizSample {
        part: usize,
        sample: usize,
    },
    JumpToStudyItem {
        part: StudyPart,
        index: usize,
        #[serde(default)]
        caption: Option<usize>,
    },
    DebugSkipToQuestions,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SubmitDemographics(_) => "submit_demographics",
            Event::DebugSkipToStudy => "debug_skip_to_study",
            Event::Next => "next",
            Event::Previous => "previous",
            Event::VideoFinished => "video_finished",
            Event::DebugSkipVideo => "debug_skip_video",
            Event::Proceed => "proceed",
            Event::SubmitComprehension { .. } => "submit_comprehension",
            Event::Answer { .. } => "answer",
            Event::Submit => "submit",
            Event::SubmitQuizAnswer { .. } => "submit_quiz_answer",
            Event::NextQuestion => "next_question",
            Event::ProceedToStudy => "proceed_to_study",
            Event::RetakeQuiz => "retake_quiz",
            Event::JumpToQuizSample { .. } => "jump_to_quiz_sample",
            Event::JumpToStudyItem { .. } => "jump_to_study_item",
            Event::DebugSkipToQuestions => "debug_skip_to_questions",
        }
    }

    pub fn is_debug(&self) -> bool {
        matches!(
            self,
            Event::DebugSkipToStudy | Event::DebugSkipVideo | Event::DebugSkipToQuestions
        )
    }
}
