pub mod content;
pub mod media;
pub mod participant;
pub mod quiz;
pub mod response;
pub mod study;
pub mod templates;
pub use content::StudyContent;
pub use media::{Orientation, VideoClip, VideoMeta, DEFAULT_VIDEO_DURATION_SECS};
pub use participant::Participant;
pub use quiz::{AnswerKey, QuizBank, QuizPart, QuizPartKind, QuizQuestion, QuizSample};
pub use response::{Phase, Response, ResponseDraft};
pub use study::{
    ComparisonItem, ComprehensionCheck, ControlScores, IntensityChangeItem, RatingCaption,
    RatingVideo, StudyBank,
};
pub use templates::{Definitions, QuestionTemplate, QuestionTemplates};
