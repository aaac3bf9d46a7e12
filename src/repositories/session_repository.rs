use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{errors::AppResult, wizard::WizardState};

/// A session's state behind its own lock; holding the guard serialises the
/// events of one participant.
pub type SessionHandle = Arc<Mutex<WizardState>>;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, state: WizardState) -> AppResult<Uuid>;
    async fn find(&self, id: Uuid) -> AppResult<Option<SessionHandle>>;
    /// Returns whether the session existed.
    async fn remove(&self, id: Uuid) -> AppResult<bool>;
    async fn count(&self) -> AppResult<usize>;
}

struct StoredSession {
    handle: SessionHandle,
    last_access: Instant,
}

/// Sessions not looked up for `idle_timeout` are evicted on the next `create`.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, StoredSession>>,
    idle_timeout: Option<Duration>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::default(),
            idle_timeout: Some(idle_timeout),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, state: WizardState) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;

        if let Some(idle_timeout) = self.idle_timeout {
            let before = sessions.len();
            sessions.retain(|_, s| s.last_access.elapsed() < idle_timeout);
            let evicted = before - sessions.len();
            if evicted > 0 {
                log::info!("Evicted {} idle sessions", evicted);
            }
        }

        sessions.insert(
            id,
            StoredSession {
                handle: Arc::new(Mutex::new(state)),
                last_access: Instant::now(),
            },
        );
        Ok(id)
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<SessionHandle>> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.get_mut(&id).map(|s| {
            s.last_access = Instant::now();
            s.handle.clone()
        }))
    }

    async fn remove(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.sessions.write().await.remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.sessions.read().await.len())
    }
}
