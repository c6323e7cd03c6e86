//! In-memory registry of live sessions. Each session context sits behind its
//! own mutex, so events for one session are handled one at a time while
//! different sessions never contend.
//!
//! Sessions nobody has touched for longer than the idle TTL are swept.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::conversation::Transcript;
use crate::session::SessionStore;

/// Everything that belongs to one user session.
#[derive(Debug)]
pub struct SessionContext {
    pub store: SessionStore,
    pub transcript: Transcript,
    pub created_at: DateTime<Utc>,
    pub last_used: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(store: SessionStore) -> Self {
        let now = Utc::now();
        Self {
            store,
            transcript: Transcript::default(),
            created_at: now,
            last_used: now,
        }
    }

    /// Marks the session as used just now.
    pub fn touch(&mut self) {
        self.last_used = Utc::now();
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(SessionStore::new())
    }
}

pub type SharedSession = Arc<Mutex<SessionContext>>;

pub const DEFAULT_SESSION_TTL_SECS: u32 = 24 * 60 * 60;

pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
    idle_ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(Duration::seconds(i64::from(DEFAULT_SESSION_TTL_SECS)))
    }
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Registers a new session, sweeping idle ones first.
    pub async fn insert(&self, context: SessionContext) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        Self::sweep(&mut sessions, Utc::now() - self.idle_ttl);
        sessions.insert(id, Arc::new(Mutex::new(context)));
        id
    }

    /// Drops every session idle for longer than the TTL and returns how many
    /// went. A session whose lock is held is in use and always kept.
    pub async fn purge_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let purged = Self::sweep(&mut sessions, Utc::now() - self.idle_ttl);
        if purged > 0 {
            info!("Purged {purged} idle sessions, {} still live", sessions.len());
        }
        purged
    }

    fn sweep(sessions: &mut HashMap<Uuid, SharedSession>, cutoff: DateTime<Utc>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, ctx| match ctx.try_lock() {
            Ok(ctx) => ctx.last_used > cutoff,
            Err(_) => true,
        });
        before - sessions.len()
    }

    pub async fn get(&self, id: Uuid) -> Result<SharedSession, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Returns true if a session was removed.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
