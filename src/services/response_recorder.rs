use std::sync::Arc;

use chrono::Local;

use crate::{
    config::Config,
    models::domain::{Participant, Response, ResponseDraft},
    repositories::{JsonlBackupSink, ResponseSink, SheetsResponseSink},
};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes each response to the remote sheet, falling back to the local backup
/// file when the sheet is unavailable.
pub struct ResponseRecorder {
    remote: Option<Arc<dyn ResponseSink>>,
    backup: Arc<dyn ResponseSink>,
}

impl ResponseRecorder {
    pub fn new(remote: Option<Arc<dyn ResponseSink>>, backup: Arc<dyn ResponseSink>) -> Self {
        Self { remote, backup }
    }

    pub fn from_config(config: &Config) -> Self {
        let remote: Option<Arc<dyn ResponseSink>> =
            match (&config.sheets_values_url, &config.sheets_api_token) {
                (Some(url), Some(token)) => {
                    Some(Arc::new(SheetsResponseSink::new(url.clone(), token.clone())))
                }
                _ => {
                    log::warn!(
                        "Spreadsheet sink not configured; responses go to {} only",
                        config.local_backup_file.display()
                    );
                    None
                }
            };
        let backup = Arc::new(JsonlBackupSink::new(config.local_backup_file.clone()));

        Self::new(remote, backup)
    }

    /// Returns whether the response reached at least one sink.
    pub async fn record(&self, participant: &Participant, draft: &ResponseDraft) -> bool {
        let response = Response::new(participant, draft, timestamp());

        if let Some(remote) = &self.remote {
            match remote.append(&response).await {
                Ok(()) => return true,
                Err(e) => log::warn!(
                    "{} sink failed for {} ({}), using {}: {}",
                    remote.name(),
                    response.sample_id,
                    response.study_phase,
                    self.backup.name(),
                    e
                ),
            }
        }

        match self.backup.append(&response).await {
            Ok(()) => true,
            Err(e) => {
                log::error!(
                    "Response for {} ({}) was not saved: {}",
                    response.sample_id,
                    response.study_phase,
                    e
                );
                false
            }
        }
    }
}

pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::AppError,
        models::domain::Phase,
        repositories::response_sink::MockResponseSink,
    };

    fn draft() -> ResponseDraft {
        ResponseDraft {
            phase: Phase::Quiz,
            video_id: None,
            sample_id: "q1".to_string(),
            question_text: "Identify dominant Tone".to_string(),
            choice: "Angry".to_string(),
            was_correct: Some(true),
        }
    }

    fn participant() -> Participant {
        Participant::new("a@b.com", 25, "Male")
    }

    fn sink(succeeds: bool, calls: usize) -> MockResponseSink {
        let mut sink = MockResponseSink::new();
        sink.expect_name().return_const("mock");
        sink.expect_append().times(calls).returning(move |_| {
            if succeeds {
                Ok(())
            } else {
                Err(AppError::PersistenceError("down".to_string()))
            }
        });
        sink
    }

    #[actix_rt::test]
    async fn test_remote_success_skips_backup() {
        let recorder = ResponseRecorder::new(
            Some(Arc::new(sink(true, 1))),
            Arc::new(sink(true, 0)),
        );

        assert!(recorder.record(&participant(), &draft()).await);
    }

    #[actix_rt::test]
    async fn test_remote_failure_falls_back_to_backup() {
        let recorder = ResponseRecorder::new(
            Some(Arc::new(sink(false, 1))),
            Arc::new(sink(true, 1)),
        );

        assert!(recorder.record(&participant(), &draft()).await);
    }

    #[actix_rt::test]
    async fn test_both_sinks_failing_reports_failure() {
        let recorder = ResponseRecorder::new(
            Some(Arc::new(sink(false, 1))),
            Arc::new(sink(false, 1)),
        );

        assert!(!recorder.record(&participant(), &draft()).await);
    }

    #[actix_rt::test]
    async fn test_backup_only_without_remote() {
        let recorder = ResponseRecorder::new(None, Arc::new(sink(true, 1)));

        assert!(recorder.record(&participant(), &draft()).await);
    }

    #[actix_rt::test]
    async fn test_recorded_response_is_attributed() {
        let mut backup = MockResponseSink::new();
        backup.expect_name().return_const("mock");
        backup
            .expect_append()
            .withf(|r: &Response| {
                r.email == "a@b.com"
                    && r.was_correct == "True"
                    && r.attempts_taken == "1"
                    && r.video_id == "N/A"
            })
            .times(1)
            .returning(|_| Ok(()));
        let recorder = ResponseRecorder::new(None, Arc::new(backup));

        assert!(recorder.record(&participant(), &draft()).await);
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_from_config_without_sheet_uses_backup_only() {
        let recorder = ResponseRecorder::from_config(&Config::test_config());
        assert!(recorder.remote.is_none());
        assert_eq!(recorder.backup.name(), "local_backup");
    }
}
