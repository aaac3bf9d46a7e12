use serde::Serialize;
use serde_json::Value;

use crate::models::domain::{
    media::VideoClip, Definitions, QuestionTemplates, QuizBank, StudyBank,
};

/// Everything the wizard reads; loaded once at startup and never mutated.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StudyContent {
    pub instructions: Value,
    pub quiz: QuizBank,
    pub study: StudyBank,
    pub questions: QuestionTemplates,
    pub definitions: Definitions,
    pub intro_video: String,
}

impl StudyContent {
    /// Every video clip in the quiz and the study, for metadata enrichment.
    pub fn clips_mut(&mut self) -> impl Iterator<Item = &mut VideoClip> {
        let quiz = self
            .quiz
            .parts
            .iter_mut()
            .flat_map(|part| part.samples.iter_mut().map(|s| &mut s.clip));
        let ratings = self.study.part1_ratings.iter_mut().map(|v| &mut v.clip);
        let comparisons = self.study.part2_comparisons.iter_mut().map(|c| &mut c.clip);
        let changes = self
            .study
            .part3_intensity_change
            .iter_mut()
            .map(|c| &mut c.clip);

        quiz.chain(ratings).chain(comparisons).chain(changes)
    }
}
