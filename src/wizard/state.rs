use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::domain::{Participant, Phase};

/// Sub-steps of one item's screen sequence.
pub mod step {
    pub const VIDEO: u8 = 1;
    pub const SUMMARY: u8 = 2;
    pub const COMPREHENSION: u8 = 3;
    pub const COMPREHENSION_FEEDBACK: u8 = 4;
    pub const CAPTIONS: u8 = 5;
    pub const QUESTIONS: u8 = 6;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Demographics,
    IntroVideo,
    WhatIsTone,
    FactualInfo,
    Quiz,
    QuizResults,
    UserStudy,
    ThankYou,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyPart {
    #[default]
    Ratings,
    Comparisons,
    IntensityChange,
}

impl StudyPart {
    pub fn phase(&self) -> Phase {
        match self {
            StudyPart::Ratings => Phase::UserStudyPart1,
            StudyPart::Comparisons => Phase::UserStudyPart2,
            StudyPart::IntensityChange => Phase::UserStudyPart3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizFeedback {
    pub choice: Vec<String>,
    pub is_correct: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizProgress {
    pub part_index: usize,
    pub sample_index: usize,
    pub rating_question_index: usize,
    pub score: u32,
    pub feedback: Option<QuizFeedback>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudyProgress {
    pub part: StudyPart,
    pub video_index: usize,
    pub caption_index: usize,
    pub comparison_index: usize,
    pub change_index: usize,
}

/// Identifies the item a view state belongs to, e.g. `p1:cap_12`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ItemKey(pub String);

impl ItemKey {
    pub fn new(prefix: &str, id: &str) -> Self {
        ItemKey(format!("{}:{}", prefix, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-item progress. Created when the item becomes current, dropped when the
/// participant moves past it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ItemViewState {
    pub step: u8,
    pub interacted: Vec<bool>,
    pub answers: Vec<Option<String>>,
    pub comprehension_options: Vec<String>,
    pub comprehension_choice: Option<String>,
}

impl ItemViewState {
    pub fn new(step: u8, question_count: usize, comprehension_options: Vec<String>) -> Self {
        ItemViewState {
            step,
            interacted: vec![false; question_count],
            answers: vec![None; question_count],
            comprehension_options,
            comprehension_choice: None,
        }
    }

    pub fn question_count(&self) -> usize {
        self.interacted.len()
    }

    /// One more question than have been interacted with, capped at the total.
    pub fn visible_questions(&self) -> usize {
        let touched = self.interacted.iter().filter(|flag| **flag).count();
        (touched + 1).min(self.question_count())
    }

    pub fn all_interacted(&self) -> bool {
        self.interacted.iter().all(|flag| *flag)
    }

    /// 1-based positions of the questions that were never touched.
    pub fn missing_questions(&self) -> Vec<usize> {
        self.interacted
            .iter()
            .enumerate()
            .filter(|(_, flag)| !**flag)
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// The first interaction with question `index` reveals the next one.
    pub fn record_answer(&mut self, index: usize, value: String) {
        self.answers[index] = Some(value);
        if !self.interacted[index] {
            self.interacted[index] = true;
            let total = self.question_count() as u8;
            self.step = (step::QUESTIONS + total).min(step::QUESTIONS + index as u8 + 1);
        }
    }
}

/// The whole per-participant address: which page, which item, which sub-step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WizardState {
    pub page: Page,
    pub participant: Option<Participant>,
    pub quiz: QuizProgress,
    pub study: StudyProgress,
    pub views: BTreeMap<ItemKey, ItemViewState>,
    /// Video gates already passed; a gate is shown once per video.
    pub watched: BTreeSet<String>,
    /// Seeds the comprehension option shuffle so re-renders stay stable.
    pub seed: u64,
}

impl WizardState {
    pub fn new(seed: u64) -> Self {
        WizardState {
            seed,
            ..WizardState::default()
        }
    }
}
