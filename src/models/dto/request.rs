use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::screens::{INVALID_AGE, INVALID_EMAIL};

static EMAIL_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("EMAIL_REGEX is a valid regex pattern")
});

/// Intake form. Every field is optional on the wire so that a partially filled
/// form reaches the wizard and gets the participant-facing warning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize, Validate)]
pub struct DemographicsRequest {
    #[serde(default)]
    #[validate(regex(path = *EMAIL_REGEX, message = "Please enter a valid email address."))]
    pub email: String,

    #[serde(default)]
    #[validate(range(min = 18, max = 60, message = "Please select an age between 18 and 60."))]
    pub age: Option<u8>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub consent: bool,
}

impl DemographicsRequest {
    pub fn has_all_fields(&self) -> bool {
        !self.email.trim().is_empty() && self.age.is_some() && self.gender.is_some()
    }

    /// The participant-facing message for the first failing rule, if any.
    pub fn first_violation(&self) -> Option<&'static str> {
        let errors = self.validate().err()?;
        let fields = errors.field_errors();
        if fields.contains_key("email") {
            Some(INVALID_EMAIL)
        } else if fields.contains_key("age") {
            Some(INVALID_AGE)
        } else {
            None
        }
    }
}
