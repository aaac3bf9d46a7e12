use serde::{Deserialize, Serialize};

use crate::models::dto::request::DemographicsRequest;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Participant {
    pub email: String,
    pub age: u8,
    pub gender: String,
}

impl Participant {
    pub fn new(email: &str, age: u8, gender: &str) -> Self {
        Participant {
            email: email.to_string(),
            age,
            gender: gender.to_string(),
        }
    }

    /// Used by the debug shortcut that bypasses the intake form.
    pub fn debug() -> Self {
        Participant::new("debug@test.com", 25, "Prefer not to say")
    }

    /// Builds a participant from an already validated intake request.
    pub fn from_request(request: &DemographicsRequest) -> Option<Self> {
        Some(Participant {
            email: request.email.trim().to_string(),
            age: request.age?,
            gender: request.gender.clone()?,
        })
    }
}
