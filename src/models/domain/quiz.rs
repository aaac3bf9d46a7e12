use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::domain::{media::VideoClip, study::ComprehensionCheck};

/// How a quiz part is asked and scored, derived from its display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPartKind {
    Identification,
    Controllability,
    QualityRating,
}

impl QuizPartKind {
    pub fn from_part_name(name: &str) -> Self {
        if name.contains("Tone Controllability") {
            QuizPartKind::Controllability
        } else if name.contains("Caption Quality") {
            QuizPartKind::QualityRating
        } else {
            QuizPartKind::Identification
        }
    }
}

/// Either a single correct option or the full set for a multi-select question.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Single(String),
    Multiple(Vec<String>),
}

impl AnswerKey {
    /// Order-insensitive comparison against the participant's selection.
    pub fn is_match(&self, choice: &[String]) -> bool {
        match self {
            AnswerKey::Single(correct) => choice.len() == 1 && &choice[0] == correct,
            AnswerKey::Multiple(correct) => {
                let expected: BTreeSet<&str> = correct.iter().map(String::as_str).collect();
                let given: BTreeSet<&str> = choice.iter().map(String::as_str).collect();
                given.len() == choice.len() && expected == given
            }
        }
    }
}

/// A scorable question, either inline on a sample or nested in a quality sample.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct QuizQuestion {
    #[serde(default)]
    pub question_text: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: Option<AnswerKey>,
    #[serde(default)]
    pub question_type: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl QuizQuestion {
    pub fn is_multi(&self) -> bool {
        self.question_type.as_deref() == Some("multi")
    }

    pub fn is_correct(&self, choice: &[String]) -> bool {
        self.correct_answer
            .as_ref()
            .map(|key| key.is_match(choice))
            .unwrap_or(false)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct QuizSample {
    #[serde(default)]
    pub sample_id: Option<String>,
    #[serde(flatten)]
    pub clip: VideoClip,
    #[serde(flatten)]
    pub comprehension: ComprehensionCheck,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default, rename = "caption_A")]
    pub caption_a: Option<String>,
    #[serde(default, rename = "caption_B")]
    pub caption_b: Option<String>,
    #[serde(default)]
    pub tone_to_compare: Option<String>,
    #[serde(default)]
    pub comparison_type: Option<String>,
    #[serde(default)]
    pub application: Option<String>,
    #[serde(flatten)]
    pub question: QuizQuestion,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

impl QuizSample {
    pub fn category_or_tone(&self) -> String {
        self.category.clone().unwrap_or_else(|| "tone".to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuizPart {
    pub name: String,
    pub kind: QuizPartKind,
    pub samples: Vec<QuizSample>,
}

impl QuizPart {
    /// Quality parts score every nested question, the others one per sample.
    pub fn scorable_questions(&self) -> usize {
        match self.kind {
            QuizPartKind::QualityRating => self.samples.iter().map(|s| s.questions.len()).sum(),
            _ => self.samples.len(),
        }
    }

    /// Number of questions asked for one sample of this part.
    pub fn questions_in_sample(&self, sample: &QuizSample) -> usize {
        match self.kind {
            QuizPartKind::QualityRating => sample.questions.len(),
            _ => 1,
        }
    }
}

/// The quiz file: an ordered object of part name to list of samples.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct QuizBank {
    pub parts: Vec<QuizPart>,
}

impl TryFrom<Map<String, Value>> for QuizBank {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut parts = Vec::with_capacity(map.len());
        for (name, value) in map {
            let samples = match value {
                Value::Array(_) => serde_json::from_value::<Vec<QuizSample>>(value)
                    .map_err(|e| format!("quiz part '{}': {}", name, e))?,
                _ => {
                    log::warn!("Quiz part '{}' is not a list; treating it as empty", name);
                    Vec::new()
                }
            };
            parts.push(QuizPart {
                kind: QuizPartKind::from_part_name(&name),
                name,
                samples,
            });
        }
        Ok(QuizBank { parts })
    }
}

impl QuizBank {
    /// Empty and malformed parts contribute zero.
    pub fn total_scorable_questions(&self) -> usize {
        self.parts.iter().map(QuizPart::scorable_questions).sum()
    }

    pub fn sample(&self, part: usize, sample: usize) -> Option<(&QuizPart, &QuizSample)> {
        let quiz_part = self.parts.get(part)?;
        quiz_part.samples.get(sample).map(|s| (quiz_part, s))
    }
}
