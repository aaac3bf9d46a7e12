use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::domain::media::VideoClip;

/// Distractors plus the correct road event for the "what happened" check.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ComprehensionCheck {
    #[serde(default)]
    pub distractor_answers: Vec<String>,
    #[serde(default)]
    pub road_event_answer: Option<String>,
}

impl ComprehensionCheck {
    /// A check without distractors or without a correct answer is skipped.
    pub fn is_present(&self) -> bool {
        !self.distractor_answers.is_empty() && self.road_event_answer.is_some()
    }

    /// Unshuffled options: distractors followed by the correct answer.
    pub fn options(&self) -> Vec<String> {
        let mut options = self.distractor_answers.clone();
        if let Some(correct) = &self.road_event_answer {
            options.push(correct.clone());
        }
        options
    }
}

/// Ordered trait scores; only the trait names and their order matter here.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ControlScores {
    #[serde(default)]
    pub tone: Map<String, Value>,
    #[serde(default)]
    pub writing_style: Map<String, Value>,
}

impl ControlScores {
    pub fn tone_traits(&self) -> Vec<String> {
        self.tone.keys().cloned().collect()
    }

    pub fn style_traits(&self) -> Vec<String> {
        self.writing_style.keys().cloned().collect()
    }

    pub fn main_style_trait(&self) -> Option<String> {
        self.writing_style.keys().next().cloned()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RatingCaption {
    pub caption_id: String,
    pub text: String,
    #[serde(default)]
    pub application: Option<String>,
    #[serde(default)]
    pub control_scores: ControlScores,
}

/// Part 1: one video, several captions rated one after the other.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RatingVideo {
    #[serde(flatten)]
    pub clip: VideoClip,
    #[serde(flatten)]
    pub comprehension: ComprehensionCheck,
    #[serde(default)]
    pub captions: Vec<RatingCaption>,
}

/// Part 2: caption A against caption B for one video.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ComparisonItem {
    pub comparison_id: String,
    #[serde(flatten)]
    pub clip: VideoClip,
    #[serde(flatten)]
    pub comprehension: ComprehensionCheck,
    #[serde(default, rename = "caption_A")]
    pub caption_a: String,
    #[serde(default, rename = "caption_B")]
    pub caption_b: String,
    #[serde(default)]
    pub control_scores: ControlScores,
}

/// Part 3: did the intensity of one trait change between the captions.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct IntensityChangeItem {
    pub change_id: String,
    #[serde(flatten)]
    pub clip: VideoClip,
    #[serde(flatten)]
    pub comprehension: ComprehensionCheck,
    #[serde(default, rename = "caption_A")]
    pub caption_a: String,
    #[serde(default, rename = "caption_B")]
    pub caption_b: String,
    #[serde(default)]
    pub field_to_change: Map<String, Value>,
    #[serde(default)]
    pub change_type: Option<String>,
}

impl IntensityChangeItem {
    /// The trait type (`tone`, `writing_style`, ...) and the trait itself.
    pub fn changed_field(&self) -> Option<(String, Option<String>)> {
        self.field_to_change.iter().next().map(|(field, value)| {
            (field.clone(), value.as_str().map(str::to_string))
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct StudyBank {
    #[serde(default)]
    pub part1_ratings: Vec<RatingVideo>,
    #[serde(default)]
    pub part2_comparisons: Vec<ComparisonItem>,
    #[serde(default)]
    pub part3_intensity_change: Vec<IntensityChangeItem>,
}
