pub mod content_loader;
pub mod media_probe;
pub mod response_recorder;
pub mod session_service;

pub use content_loader::ContentLoader;
pub use media_probe::{FfprobeMediaProbe, MediaProbe};
pub use response_recorder::ResponseRecorder;
pub use session_service::SessionService;
