use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

pub const DEFINITION_NOT_FOUND: &str = "Definition not found.";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TemplateOverride {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionTemplate {
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub default_text: Option<String>,
    #[serde(default)]
    pub default_options: Option<Vec<String>>,
    #[serde(default)]
    pub overrides: HashMap<String, TemplateOverride>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionTemplates {
    #[serde(default)]
    pub part1_questions: Vec<QuestionTemplate>,
    #[serde(default)]
    pub part2_questions: Vec<QuestionTemplate>,
    /// Keyed by trait type title: `Tone`, `Style`, ...
    #[serde(default)]
    pub part3_questions: HashMap<String, String>,
}

impl QuestionTemplates {
    pub fn part1(&self, id: &str) -> Option<&QuestionTemplate> {
        self.part1_questions.iter().find(|q| q.id == id)
    }
}

/// Python-style positional fill: replaces the first `{}` only.
pub fn fill_placeholder(template: &str, value: &str) -> String {
    template.replacen("{}", value, 1)
}

#[derive(Clone, Debug, Default, Deserialize)]
struct NestedDefinitions {
    #[serde(default)]
    tones: BTreeMap<String, String>,
    #[serde(default)]
    writing_styles: BTreeMap<String, String>,
    #[serde(default)]
    applications: BTreeMap<String, String>,
}

/// Flattened trait glossary; later groups win on duplicate terms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "NestedDefinitions")]
pub struct Definitions {
    pub terms: BTreeMap<String, String>,
}

impl From<NestedDefinitions> for Definitions {
    fn from(nested: NestedDefinitions) -> Self {
        let mut terms = nested.tones;
        terms.extend(nested.writing_styles);
        terms.extend(nested.applications);
        Definitions { terms }
    }
}

impl Definitions {
    pub fn describe(&self, term: &str) -> &str {
        self.terms
            .get(term)
            .map(String::as_str)
            .unwrap_or(DEFINITION_NOT_FOUND)
    }
}
