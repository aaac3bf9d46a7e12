use std::{collections::HashMap, path::Path, sync::Arc};

use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{StudyContent, VideoMeta},
    services::media_probe::MediaProbe,
};

pub const INSTRUCTIONS_FILE: &str = "instructions.json";
pub const QUIZ_FILE: &str = "quiz_data.json";
pub const STUDY_FILE: &str = "study_data.json";
pub const QUESTIONS_FILE: &str = "questions.json";
pub const DEFINITIONS_FILE: &str = "definitions.json";

/// Loads the static study content once at startup. Media paths in the content
/// files are relative to the content directory.
pub struct ContentLoader {
    config: Config,
    probe: Arc<dyn MediaProbe>,
}

impl ContentLoader {
    pub fn new(config: &Config, probe: Arc<dyn MediaProbe>) -> Self {
        Self {
            config: config.clone(),
            probe,
        }
    }

    /// Reads every content file, reporting all missing or corrupt files in one
    /// error, then attaches video metadata to every clip.
    pub async fn load(&self) -> AppResult<StudyContent> {
        let mut errors = Vec::new();

        let instructions = self.read_json(INSTRUCTIONS_FILE, &mut errors).await;
        let quiz = self.read_json(QUIZ_FILE, &mut errors).await;
        let study = self.read_json(STUDY_FILE, &mut errors).await;
        let questions = self.read_json(QUESTIONS_FILE, &mut errors).await;
        let definitions = self.read_json(DEFINITIONS_FILE, &mut errors).await;

        let intro_path = self.config.content_path(&self.config.intro_video_path);
        if !exists(&intro_path).await {
            errors.push(format!("Intro video not found: {}", intro_path.display()));
        }

        let (Some(instructions), Some(quiz), Some(study), Some(questions), Some(definitions)) =
            (instructions, quiz, study, questions, definitions)
        else {
            return Err(AppError::ContentError(errors.join("; ")));
        };
        if !errors.is_empty() {
            return Err(AppError::ContentError(errors.join("; ")));
        }

        let mut content = StudyContent {
            instructions,
            quiz,
            study,
            questions,
            definitions,
            intro_video: self
                .config
                .intro_video_path
                .to_string_lossy()
                .into_owned(),
        };
        self.enrich(&mut content).await;

        log::info!(
            "Loaded study content from {}: {} quiz parts, {} scorable quiz questions",
            self.config.content_dir.display(),
            content.quiz.parts.len(),
            content.quiz.total_scorable_questions()
        );
        Ok(content)
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str, errors: &mut Vec<String>) -> Option<T> {
        let path = self.config.content_path(name);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                errors.push(format!("{} could not be read: {}", path.display(), e));
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                errors.push(format!("{} is not valid: {}", path.display(), e));
                None
            }
        }
    }

    async fn enrich(&self, content: &mut StudyContent) {
        let mut cache: HashMap<String, VideoMeta> = HashMap::new();
        for clip in content.clips_mut() {
            let Some(video_path) = clip.video_path.clone() else {
                continue;
            };
            if let Some(meta) = cache.get(&video_path) {
                clip.meta = *meta;
                continue;
            }
            let meta = self.meta_for(&video_path).await;
            cache.insert(video_path, meta);
            clip.meta = meta;
        }
    }

    /// Probe failures and missing files fall back to landscape / default duration.
    async fn meta_for(&self, video_path: &str) -> VideoMeta {
        let path = self.config.content_path(video_path);
        if !exists(&path).await {
            log::warn!("Video not found: {}", path.display());
            return VideoMeta::default();
        }
        match self.probe.probe(&path).await {
            Ok(meta) => meta,
            Err(e) => {
                log::warn!("Could not probe {}: {}", path.display(), e);
                VideoMeta::default()
            }
        }
    }
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
