use crate::{
    constants::screens::{
        GENDER_OPTIONS, INVALID_GENDER, MISSING_CONSENT, MISSING_FIELDS, MISSING_OPTION,
        MISSING_SELECTION, NEEDS_TWO_OPTIONS,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{Participant, ResponseDraft, StudyContent},
        dto::request::DemographicsRequest,
    },
    wizard::{
        cursor::{self, CurrentItem},
        event::Event,
        questions,
        state::{step, ItemViewState, Page, QuizFeedback, QuizProgress, StudyPart, StudyProgress, WizardState},
        WizardContext,
    },
};

/// The accepted outcome of one event: the next state plus the responses that
/// must be recorded before it is committed.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: WizardState,
    pub responses: Vec<ResponseDraft>,
}

/// Applies one event. A rejection leaves `state` untouched and carries no
/// responses.
pub fn apply(state: &WizardState, event: Event, ctx: &WizardContext) -> AppResult<Transition> {
    if event.is_debug() && !ctx.debug_shortcuts {
        return Err(AppError::BadRequest(format!(
            "Event '{}' requires debug shortcuts",
            event.name()
        )));
    }

    let mut next = state.clone();
    let mut responses = Vec::new();
    let content = ctx.content;

    match event {
        Event::SubmitDemographics(request) => {
            expect_page(state, Page::Demographics, "submit_demographics")?;
            next.participant = Some(validate_demographics(&request)?);
            next.page = Page::IntroVideo;
        }
        Event::DebugSkipToStudy => {
            expect_page(state, Page::Demographics, "debug_skip_to_study")?;
            next.participant = Some(Participant::debug());
            next.page = Page::UserStudy;
        }
        Event::Next => {
            next.page = match state.page {
                Page::IntroVideo => Page::WhatIsTone,
                Page::WhatIsTone => Page::FactualInfo,
                Page::FactualInfo => Page::Quiz,
                _ => return Err(unavailable("next")),
            };
        }
        Event::Previous => {
            next.page = match state.page {
                Page::IntroVideo => Page::Demographics,
                Page::WhatIsTone => Page::IntroVideo,
                Page::FactualInfo => Page::WhatIsTone,
                _ => return Err(unavailable("previous")),
            };
        }
        Event::VideoFinished | Event::DebugSkipVideo => {
            let item = active_item(state, content, "video_finished")?;
            match item.gate_key() {
                Some(gate) if !state.watched.contains(&gate) => {
                    next.watched.insert(gate);
                }
                _ => return Err(unavailable("video_finished")),
            }
        }
        Event::Proceed => {
            let item = gated_item(state, content, "proceed")?;
            let has_check = item.comprehension().is_present();
            let view = view_mut(&mut next, &item)?;
            view.step = match view.step {
                step::VIDEO => step::SUMMARY,
                step::SUMMARY if has_check => step::COMPREHENSION,
                step::SUMMARY => step::CAPTIONS,
                step::COMPREHENSION_FEEDBACK => step::CAPTIONS,
                step::CAPTIONS => step::QUESTIONS,
                _ => return Err(unavailable("proceed")),
            };
        }
        Event::SubmitComprehension { choice } => {
            let item = gated_item(state, content, "submit_comprehension")?;
            let view = view_mut(&mut next, &item)?;
            if view.step != step::COMPREHENSION {
                return Err(unavailable("submit_comprehension"));
            }
            let choice = match choice.filter(|c| !c.trim().is_empty()) {
                Some(choice) => choice,
                None => return Err(AppError::ValidationError(MISSING_SELECTION.to_string())),
            };
            if !view.comprehension_options.contains(&choice) {
                return Err(AppError::BadRequest(format!("Unknown option '{}'", choice)));
            }
            view.comprehension_choice = Some(choice);
            view.step = step::COMPREHENSION_FEEDBACK;
        }
        Event::Answer { question, value } => {
            let item = study_item(state, content, "answer")?;
            let asked = questions::study_questions(&item, &content.questions);
            let view = view_mut(&mut next, &item)?;
            if view.step < step::QUESTIONS {
                return Err(unavailable("answer"));
            }
            let Some(target) = asked.get(question) else {
                return Err(AppError::BadRequest(format!(
                    "Question {} does not exist",
                    question + 1
                )));
            };
            if question >= view.visible_questions() {
                return Err(AppError::BadRequest(format!(
                    "Question {} is not shown yet",
                    question + 1
                )));
            }
            if !target.options.contains(&value) {
                return Err(AppError::BadRequest(format!(
                    "'{}' is not an option of question {}",
                    value,
                    question + 1
                )));
            }
            view.record_answer(question, value);
        }
        Event::Submit => {
            let item = study_item(state, content, "submit")?;
            let view = view_mut(&mut next, &item)?;
            if view.step < step::QUESTIONS {
                return Err(unavailable("submit"));
            }
            let missing = view.missing_questions();
            if !missing.is_empty() {
                let positions: Vec<String> = missing.iter().map(usize::to_string).collect();
                return Err(AppError::ValidationError(format!(
                    "Please answer question(s): {}.",
                    positions.join(", ")
                )));
            }

            let asked = questions::study_questions(&item, &content.questions);
            for (question, answer) in asked.iter().zip(view.answers.iter()) {
                responses.push(ResponseDraft {
                    phase: item.phase(),
                    video_id: item.clip().video_id.clone(),
                    sample_id: item.item_id(),
                    question_text: question.text.clone(),
                    choice: answer.clone().unwrap_or_default(),
                    was_correct: None,
                });
            }
            cursor::advance_study(&mut next, &item);
        }
        Event::SubmitQuizAnswer { choice } => {
            let item = quiz_item(state, content, "submit_quiz_answer")?;
            let prompt = quiz_prompt(&item)?;
            let view = view_mut(&mut next, &item)?;
            if view.step < step::QUESTIONS || state.quiz.feedback.is_some() {
                return Err(unavailable("submit_quiz_answer"));
            }
            if choice.is_empty() {
                return Err(AppError::ValidationError(MISSING_OPTION.to_string()));
            }
            if prompt.question.is_multi() && choice.len() != 2 {
                return Err(AppError::ValidationError(NEEDS_TWO_OPTIONS.to_string()));
            }
            if !prompt.question.is_multi() && choice.len() != 1 {
                return Err(AppError::BadRequest(
                    "Exactly one option must be selected".to_string(),
                ));
            }
            if let Some(unknown) = choice.iter().find(|c| !prompt.question.options.contains(*c)) {
                return Err(AppError::BadRequest(format!("Unknown option '{}'", unknown)));
            }

            let is_correct = prompt.question.is_correct(&choice);
            if is_correct {
                next.quiz.score += 1;
            }
            next.quiz.feedback = Some(QuizFeedback { choice, is_correct });
        }
        Event::NextQuestion => {
            let item = quiz_item(state, content, "next_question")?;
            let Some(feedback) = &state.quiz.feedback else {
                return Err(unavailable("next_question"));
            };
            let prompt = quiz_prompt(&item)?;
            responses.push(ResponseDraft {
                phase: item.phase(),
                video_id: item.clip().video_id.clone(),
                sample_id: item.item_id(),
                question_text: prompt.record_text,
                choice: feedback.choice.join(", "),
                was_correct: Some(feedback.is_correct),
            });
            cursor::advance_quiz(&mut next, &item);
        }
        Event::ProceedToStudy => {
            expect_page(state, Page::QuizResults, "proceed_to_study")?;
            if !ctx.passed(state.quiz.score) {
                return Err(AppError::ValidationError(
                    "The passing score has not been reached.".to_string(),
                ));
            }
            next.page = Page::UserStudy;
            next.study = StudyProgress::default();
        }
        Event::RetakeQuiz => {
            expect_page(state, Page::QuizResults, "retake_quiz")?;
            if ctx.passed(state.quiz.score) {
                return Err(unavailable("retake_quiz"));
            }
            next.page = Page::Quiz;
            next.quiz = QuizProgress::default();
            next.views.clear();
        }
        Event::JumpToQuizSample { part, sample } => {
            expect_page(state, Page::Quiz, "jump_to_quiz_sample")?;
            if content.quiz.sample(part, sample).is_none() {
                return Err(AppError::BadRequest(format!(
                    "No quiz sample at part {}, sample {}",
                    part, sample
                )));
            }
            next.quiz = QuizProgress {
                part_index: part,
                sample_index: sample,
                score: state.quiz.score,
                ..QuizProgress::default()
            };
            next.views.clear();
        }
        Event::JumpToStudyItem {
            part,
            index,
            caption,
        } => {
            expect_page(state, Page::UserStudy, "jump_to_study_item")?;
            let caption = caption.unwrap_or(0);
            let study = &content.study;
            let exists = match part {
                StudyPart::Ratings => study
                    .part1_ratings
                    .get(index)
                    .map(|video| caption < video.captions.len())
                    .unwrap_or(false),
                StudyPart::Comparisons => index < study.part2_comparisons.len(),
                StudyPart::IntensityChange => index < study.part3_intensity_change.len(),
            };
            if !exists {
                return Err(AppError::BadRequest(format!(
                    "No study item at index {} of {:?}",
                    index, part
                )));
            }
            next.study = match part {
                StudyPart::Ratings => StudyProgress {
                    part,
                    video_index: index,
                    caption_index: caption,
                    ..StudyProgress::default()
                },
                StudyPart::Comparisons => StudyProgress {
                    part,
                    comparison_index: index,
                    ..StudyProgress::default()
                },
                StudyPart::IntensityChange => StudyProgress {
                    part,
                    change_index: index,
                    ..StudyProgress::default()
                },
            };
            next.views.clear();
        }
        Event::DebugSkipToQuestions => {
            let item = active_item(state, content, "debug_skip_to_questions")?;
            if let Some(gate) = item.gate_key() {
                next.watched.insert(gate);
            }
            let view = view_mut(&mut next, &item)?;
            if view.step >= step::QUESTIONS {
                return Err(unavailable("debug_skip_to_questions"));
            }
            view.step = step::QUESTIONS;
        }
    }

    cursor::settle(&mut next, content);
    Ok(Transition {
        state: next,
        responses,
    })
}

fn unavailable(event: &str) -> AppError {
    AppError::BadRequest(format!("Event '{}' is not available on this screen", event))
}

fn expect_page(state: &WizardState, page: Page, event: &str) -> AppResult<()> {
    if state.page == page {
        Ok(())
    } else {
        Err(unavailable(event))
    }
}

fn validate_demographics(request: &DemographicsRequest) -> AppResult<Participant> {
    let request = DemographicsRequest {
        email: request.email.trim().to_string(),
        ..request.clone()
    };
    if !request.has_all_fields() {
        return Err(AppError::ValidationError(MISSING_FIELDS.to_string()));
    }
    if !request.consent {
        return Err(AppError::ValidationError(MISSING_CONSENT.to_string()));
    }
    if let Some(message) = request.first_violation() {
        return Err(AppError::ValidationError(message.to_string()));
    }
    let gender_known = request
        .gender
        .as_deref()
        .map(|g| GENDER_OPTIONS.contains(&g))
        .unwrap_or(false);
    if !gender_known {
        return Err(AppError::ValidationError(INVALID_GENDER.to_string()));
    }
    Participant::from_request(&request)
        .ok_or_else(|| AppError::ValidationError(MISSING_FIELDS.to_string()))
}

fn active_item<'a>(
    state: &WizardState,
    content: &'a StudyContent,
    event: &str,
) -> AppResult<CurrentItem<'a>> {
    cursor::current_item(state, content).ok_or_else(|| unavailable(event))
}

/// The current item, once its video gate has been passed.
fn gated_item<'a>(
    state: &WizardState,
    content: &'a StudyContent,
    event: &str,
) -> AppResult<CurrentItem<'a>> {
    let item = active_item(state, content, event)?;
    match item.gate_key() {
        Some(gate) if !state.watched.contains(&gate) => Err(AppError::ValidationError(
            "Please watch the video first.".to_string(),
        )),
        _ => Ok(item),
    }
}

fn study_item<'a>(
    state: &WizardState,
    content: &'a StudyContent,
    event: &str,
) -> AppResult<CurrentItem<'a>> {
    let item = gated_item(state, content, event)?;
    if item.is_quiz() {
        return Err(unavailable(event));
    }
    Ok(item)
}

fn quiz_item<'a>(
    state: &WizardState,
    content: &'a StudyContent,
    event: &str,
) -> AppResult<CurrentItem<'a>> {
    let item = gated_item(state, content, event)?;
    if !item.is_quiz() {
        return Err(unavailable(event));
    }
    Ok(item)
}

fn quiz_prompt(item: &CurrentItem) -> AppResult<questions::QuizPrompt> {
    match *item {
        CurrentItem::Quiz {
            part,
            sample,
            rating_question_index,
            ..
        } => questions::quiz_prompt(part, sample, rating_question_index).ok_or_else(|| {
            AppError::InternalError(format!("No quiz question for '{}'", item.item_id()))
        }),
        _ => Err(unavailable("quiz")),
    }
}

fn view_mut<'s>(state: &'s mut WizardState, item: &CurrentItem) -> AppResult<&'s mut ItemViewState> {
    let key = item.key();
    state
        .views
        .get_mut(&key)
        .ok_or_else(|| AppError::InternalError(format!("No view state for '{}'", key)))
}
