use serde::Serialize;
use uuid::Uuid;

use crate::wizard::View;

/// Every session endpoint answers with the session id and the screen to draw.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub view: View,
}

impl SessionResponse {
    pub fn new(session_id: Uuid, view: View) -> Self {
        SessionResponse { session_id, view }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub active_sessions: usize,
}
