use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::StudyContent,
    repositories::InMemorySessionRepository,
    services::{ContentLoader, FfprobeMediaProbe, ResponseRecorder, SessionService},
};

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Loads the study content; a content error here must stop startup.
    pub async fn new(config: Config) -> AppResult<Self> {
        let probe = Arc::new(FfprobeMediaProbe::new(config.ffprobe_bin.clone()));
        let content = ContentLoader::new(&config, probe).load().await?;
        let recorder = ResponseRecorder::from_config(&config);

        Ok(Self::from_parts(config, content, recorder))
    }

    pub fn from_parts(config: Config, content: StudyContent, recorder: ResponseRecorder) -> Self {
        let session_repository = Arc::new(InMemorySessionRepository::with_idle_timeout(
            Duration::from_secs(config.session_idle_timeout_secs),
        ));
        let session_service = Arc::new(SessionService::new(
            session_repository,
            Arc::new(recorder),
            Arc::new(content),
            config.passing_score,
            config.debug_shortcuts,
        ));

        Self {
            session_service,
            config: Arc::new(config),
        }
    }
}
