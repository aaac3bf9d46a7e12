//! The participant's path through the study as a pure state machine: `apply`
//! turns a state and an event into the next state plus the responses to
//! record, `render` turns a state into the screen to show.

pub mod cursor;
pub mod event;
pub mod questions;
pub mod render;
pub mod state;
pub mod transition;

pub use event::Event;
pub use render::{render, View};
pub use state::{ItemKey, ItemViewState, Page, StudyPart, WizardState};
pub use transition::{apply, Transition};

use crate::models::domain::StudyContent;

/// Read-only inputs shared by every transition.
#[derive(Clone, Copy, Debug)]
pub struct WizardContext<'a> {
    pub content: &'a StudyContent,
    pub passing_score: u32,
    pub debug_shortcuts: bool,
}

impl<'a> WizardContext<'a> {
    pub fn passed(&self, score: u32) -> bool {
        score >= self.passing_score
    }
}
