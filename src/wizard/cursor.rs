use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    models::domain::{
        ComparisonItem, ComprehensionCheck, IntensityChangeItem, Phase, QuizPart, QuizSample,
        RatingCaption, RatingVideo, StudyContent, VideoClip,
    },
    wizard::{
        questions,
        state::{step, ItemKey, ItemViewState, Page, StudyPart, WizardState},
    },
};

/// The quiz sample or study item the participant is currently on.
#[derive(Clone, Copy, Debug)]
pub enum CurrentItem<'a> {
    Quiz {
        part: &'a QuizPart,
        sample: &'a QuizSample,
        part_index: usize,
        sample_index: usize,
        rating_question_index: usize,
    },
    Rating {
        video: &'a RatingVideo,
        caption: &'a RatingCaption,
        video_index: usize,
        caption_index: usize,
    },
    Comparison {
        item: &'a ComparisonItem,
        index: usize,
    },
    Change {
        item: &'a IntensityChangeItem,
        index: usize,
    },
}

impl<'a> CurrentItem<'a> {
    /// The id recorded in the `sample_id` column.
    pub fn item_id(&self) -> String {
        match self {
            CurrentItem::Quiz {
                sample,
                part_index,
                sample_index,
                ..
            } => sample
                .sample_id
                .clone()
                .unwrap_or_else(|| format!("quiz_{}_{}", part_index, sample_index)),
            CurrentItem::Rating { caption, .. } => caption.caption_id.clone(),
            CurrentItem::Comparison { item, .. } => item.comparison_id.clone(),
            CurrentItem::Change { item, .. } => item.change_id.clone(),
        }
    }

    pub fn key(&self) -> ItemKey {
        let prefix = match self {
            CurrentItem::Quiz { .. } => "quiz",
            CurrentItem::Rating { .. } => "p1",
            CurrentItem::Comparison { .. } => "p2",
            CurrentItem::Change { .. } => "p3",
        };
        ItemKey::new(prefix, &self.item_id())
    }

    /// Key of the video gate guarding this item; later captions of a part 1
    /// video are not gated.
    pub fn gate_key(&self) -> Option<String> {
        match self {
            CurrentItem::Rating {
                video,
                caption_index,
                video_index,
                ..
            } => {
                if *caption_index > 0 {
                    return None;
                }
                let video_id = video
                    .clip
                    .video_id
                    .clone()
                    .unwrap_or_else(|| format!("video_{}", video_index));
                Some(format!("p1:{}", video_id))
            }
            _ => Some(self.key().0),
        }
    }

    pub fn clip(&self) -> &'a VideoClip {
        match *self {
            CurrentItem::Quiz { sample, .. } => &sample.clip,
            CurrentItem::Rating { video, .. } => &video.clip,
            CurrentItem::Comparison { item, .. } => &item.clip,
            CurrentItem::Change { item, .. } => &item.clip,
        }
    }

    pub fn comprehension(&self) -> &'a ComprehensionCheck {
        match *self {
            CurrentItem::Quiz { sample, .. } => &sample.comprehension,
            CurrentItem::Rating { video, .. } => &video.comprehension,
            CurrentItem::Comparison { item, .. } => &item.comprehension,
            CurrentItem::Change { item, .. } => &item.comprehension,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            CurrentItem::Quiz { .. } => Phase::Quiz,
            CurrentItem::Rating { .. } => Phase::UserStudyPart1,
            CurrentItem::Comparison { .. } => Phase::UserStudyPart2,
            CurrentItem::Change { .. } => Phase::UserStudyPart3,
        }
    }

    pub fn is_quiz(&self) -> bool {
        matches!(self, CurrentItem::Quiz { .. })
    }

    pub fn entry_step(&self) -> u8 {
        match self {
            CurrentItem::Quiz {
                rating_question_index,
                ..
            } => {
                if *rating_question_index > 0 {
                    step::QUESTIONS
                } else {
                    step::SUMMARY
                }
            }
            CurrentItem::Rating { caption_index, .. } if *caption_index > 0 => step::CAPTIONS,
            _ => step::VIDEO,
        }
    }
}

/// Resolves the current item from the state's indices. `None` off the quiz and
/// study pages or when the indices point past the content.
pub fn current_item<'a>(state: &WizardState, content: &'a StudyContent) -> Option<CurrentItem<'a>> {
    match state.page {
        Page::Quiz => {
            let quiz = &state.quiz;
            let (part, sample) = content.quiz.sample(quiz.part_index, quiz.sample_index)?;
            Some(CurrentItem::Quiz {
                part,
                sample,
                part_index: quiz.part_index,
                sample_index: quiz.sample_index,
                rating_question_index: quiz.rating_question_index,
            })
        }
        Page::UserStudy => {
            let study = &state.study;
            match study.part {
                StudyPart::Ratings => {
                    let video = content.study.part1_ratings.get(study.video_index)?;
                    let caption = video.captions.get(study.caption_index)?;
                    Some(CurrentItem::Rating {
                        video,
                        caption,
                        video_index: study.video_index,
                        caption_index: study.caption_index,
                    })
                }
                StudyPart::Comparisons => content
                    .study
                    .part2_comparisons
                    .get(study.comparison_index)
                    .map(|item| CurrentItem::Comparison {
                        item,
                        index: study.comparison_index,
                    }),
                StudyPart::IntensityChange => content
                    .study
                    .part3_intensity_change
                    .get(study.change_index)
                    .map(|item| CurrentItem::Change {
                        item,
                        index: study.change_index,
                    }),
            }
        }
        _ => None,
    }
}

/// Normalises the indices after a transition: skips empty groups, rolls over
/// to the next part or page, and creates the view state of the item that ends
/// up current.
pub fn settle(state: &mut WizardState, content: &StudyContent) {
    match state.page {
        Page::Quiz => settle_quiz(state, content),
        Page::UserStudy => settle_study(state, content),
        _ => return,
    }

    if let Some(item) = current_item(state, content) {
        let key = item.key();
        if !state.views.contains_key(&key) {
            let view = new_view(&item, content, state.seed);
            state.views.insert(key, view);
        }
    }
}

fn settle_quiz(state: &mut WizardState, content: &StudyContent) {
    let quiz = &mut state.quiz;
    loop {
        let Some(part) = content.quiz.parts.get(quiz.part_index) else {
            state.page = Page::QuizResults;
            return;
        };
        match part.samples.get(quiz.sample_index) {
            None => {
                quiz.part_index += 1;
                quiz.sample_index = 0;
                quiz.rating_question_index = 0;
            }
            Some(sample) if quiz.rating_question_index >= part.questions_in_sample(sample) => {
                quiz.sample_index += 1;
                quiz.rating_question_index = 0;
            }
            Some(_) => return,
        }
    }
}

fn settle_study(state: &mut WizardState, content: &StudyContent) {
    let study = &mut state.study;
    let bank = &content.study;
    loop {
        match study.part {
            StudyPart::Ratings => match bank.part1_ratings.get(study.video_index) {
                None => {
                    study.part = StudyPart::Comparisons;
                    study.comparison_index = 0;
                }
                Some(video) if study.caption_index >= video.captions.len() => {
                    study.video_index += 1;
                    study.caption_index = 0;
                }
                Some(_) => return,
            },
            StudyPart::Comparisons => {
                if study.comparison_index < bank.part2_comparisons.len() {
                    return;
                }
                study.part = StudyPart::IntensityChange;
                study.change_index = 0;
            }
            StudyPart::IntensityChange => match bank.part3_intensity_change.get(study.change_index) {
                None => {
                    state.page = Page::ThankYou;
                    return;
                }
                Some(item) if item.changed_field().is_none() => {
                    log::warn!(
                        "Skipping intensity-change item '{}' without field_to_change",
                        item.change_id
                    );
                    study.change_index += 1;
                }
                Some(_) => return,
            },
        }
    }
}

fn new_view(item: &CurrentItem, content: &StudyContent, seed: u64) -> ItemViewState {
    let question_count = if item.is_quiz() {
        0
    } else {
        questions::study_questions(item, &content.questions).len()
    };

    let comprehension = item.comprehension();
    let options = if comprehension.is_present() {
        shuffled(comprehension.options(), seed, &item.key())
    } else {
        Vec::new()
    };

    ItemViewState::new(item.entry_step(), question_count, options)
}

/// Deterministic per session and item, so a re-render never reorders options.
fn shuffled(mut options: Vec<String>, seed: u64, key: &ItemKey) -> Vec<String> {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let mut rng = StdRng::seed_from_u64(seed ^ hasher.finish());
    options.shuffle(&mut rng);
    options
}

/// Moves the quiz past the current question. Rollover into the next sample,
/// part or the results page happens in `settle`.
pub fn advance_quiz(state: &mut WizardState, item: &CurrentItem) {
    state.views.remove(&item.key());
    state.quiz.feedback = None;
    match item {
        CurrentItem::Quiz { part, sample, .. }
            if state.quiz.rating_question_index + 1 < part.questions_in_sample(sample) =>
        {
            state.quiz.rating_question_index += 1;
        }
        _ => {
            state.quiz.sample_index += 1;
            state.quiz.rating_question_index = 0;
        }
    }
}

/// Moves the study past the current item; caption rollover into the next
/// video, part or the thank-you page happens in `settle`.
pub fn advance_study(state: &mut WizardState, item: &CurrentItem) {
    state.views.remove(&item.key());
    let study = &mut state.study;
    match item {
        CurrentItem::Rating { .. } => study.caption_index += 1,
        CurrentItem::Comparison { .. } => study.comparison_index += 1,
        CurrentItem::Change { .. } => study.change_index += 1,
        CurrentItem::Quiz { .. } => {}
    }
}
