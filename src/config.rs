use std::{
    env,
    path::{Path, PathBuf},
};
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub content_dir: PathBuf,
    pub intro_video_path: PathBuf,
    pub local_backup_file: PathBuf,
    pub sheets_values_url: Option<String>,
    pub sheets_api_token: Option<SecretString>,
    pub passing_score: u32,
    pub debug_shortcuts: bool,
    pub ffprobe_bin: String,
    pub session_idle_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            content_dir: PathBuf::from(
                env::var("CONTENT_DIR").unwrap_or_else(|_| ".".to_string()),
            ),
            intro_video_path: PathBuf::from(
                env::var("INTRO_VIDEO_PATH")
                    .unwrap_or_else(|_| "media/start_video_slower.mp4".to_string()),
            ),
            local_backup_file: PathBuf::from(
                env::var("LOCAL_BACKUP_FILE")
                    .unwrap_or_else(|_| "responses_backup.jsonl".to_string()),
            ),
            sheets_values_url: env::var("SHEETS_VALUES_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            sheets_api_token: env::var("SHEETS_API_TOKEN")
                .ok()
                .filter(|token| !token.is_empty())
                .map(SecretString::from),
            passing_score: env::var("PASSING_SCORE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            debug_shortcuts: env::var("DEBUG_SHORTCUTS")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            ffprobe_bin: env::var("FFPROBE_BIN").unwrap_or_else(|_| "ffprobe".to_string()),
            session_idle_timeout_secs: env::var("SESSION_IDLE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4 * 60 * 60),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// Validate that production-critical configuration is set
    /// Panics if the study would silently run in a debug or local-only mode
    pub fn validate_for_production(&self) {
        if self.debug_shortcuts {
            panic!(
                "FATAL: DEBUG_SHORTCUTS is enabled! Participants could skip the intake and the quiz."
            );
        }

        if self.sheets_values_url.is_none() {
            panic!(
                "FATAL: SHEETS_VALUES_URL is not set! Responses would only reach the local backup file."
            );
        }

        if self.sheets_api_token.is_none() {
            panic!("FATAL: SHEETS_API_TOKEN is not set! Set it to a token with write access.");
        }
    }

    /// Resolve a content-relative path the way the content files reference media.
    pub fn content_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.content_dir.join(relative)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            content_dir: PathBuf::from("content"),
            intro_video_path: PathBuf::from("media/intro.mp4"),
            local_backup_file: PathBuf::from("responses_backup.jsonl"),
            sheets_values_url: None,
            sheets_api_token: None,
            passing_score: 5,
            debug_shortcuts: true,
            ffprobe_bin: "ffprobe".to_string(),
            session_idle_timeout_secs: 60 * 60,
        }
    }
}
