use std::sync::Arc;

use uuid::Uuid;

use crate::{
    constants::screens::SAVE_FAILED,
    errors::{AppError, AppResult},
    models::domain::StudyContent,
    repositories::{SessionHandle, SessionRepository},
    services::response_recorder::ResponseRecorder,
    wizard::{apply, render, Event, Page, View, WizardContext, WizardState},
};

/// Drives one wizard per participant session. Events of a session are applied
/// one at a time; a transition is committed only after all of its responses
/// were recorded.
pub struct SessionService {
    sessions: Arc<dyn SessionRepository>,
    recorder: Arc<ResponseRecorder>,
    content: Arc<StudyContent>,
    passing_score: u32,
    debug_shortcuts: bool,
}

impl SessionService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        recorder: Arc<ResponseRecorder>,
        content: Arc<StudyContent>,
        passing_score: u32,
        debug_shortcuts: bool,
    ) -> Self {
        Self {
            sessions,
            recorder,
            content,
            passing_score,
            debug_shortcuts,
        }
    }

    fn context(&self) -> WizardContext<'_> {
        WizardContext {
            content: &self.content,
            passing_score: self.passing_score,
            debug_shortcuts: self.debug_shortcuts,
        }
    }

    async fn handle(&self, id: Uuid) -> AppResult<SessionHandle> {
        self.sessions
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
    }

    pub async fn start(&self) -> AppResult<(Uuid, View)> {
        let state = WizardState::new(rand::random());
        let view = render(&state, &self.context());
        let id = self.sessions.create(state).await?;
        log::info!("Started session {}", id);
        Ok((id, view))
    }

    pub async fn view(&self, id: Uuid) -> AppResult<View> {
        let handle = self.handle(id).await?;
        let state = handle.lock().await;
        Ok(render(&state, &self.context()))
    }

    pub async fn handle_event(&self, id: Uuid, event: Event) -> AppResult<View> {
        let handle = self.handle(id).await?;
        let mut state = handle.lock().await;
        let ctx = self.context();
        let event_name = event.name();

        let transition = apply(&state, event, &ctx).map_err(|e| {
            log::debug!("Session {} rejected '{}': {}", id, event_name, e);
            e
        })?;

        if !transition.responses.is_empty() {
            let participant = transition
                .state
                .participant
                .as_ref()
                .ok_or_else(|| {
                    AppError::InternalError("Responses produced without a participant".to_string())
                })?;
            for draft in &transition.responses {
                if !self.recorder.record(participant, draft).await {
                    return Err(AppError::PersistenceError(SAVE_FAILED.to_string()));
                }
            }
        }

        log::debug!(
            "Session {} applied '{}' ({} responses), now on {:?}",
            id,
            event_name,
            transition.responses.len(),
            transition.state.page
        );
        *state = transition.state;
        let view = render(&state, &ctx);

        if state.page == Page::ThankYou {
            drop(state);
            self.sessions.remove(id).await?;
            log::info!("Session {} completed", id);
        }
        Ok(view)
    }

    pub async fn active_sessions(&self) -> AppResult<usize> {
        self.sessions.count().await
    }
}
