pub mod response_sink;
pub mod session_repository;

pub use response_sink::{JsonlBackupSink, ResponseSink, SheetsResponseSink};
pub use session_repository::{InMemorySessionRepository, SessionHandle, SessionRepository};
