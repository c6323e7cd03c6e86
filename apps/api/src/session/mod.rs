//! Session Store: per-session conversation handle and last submitted profile.
//!
//! Lifecycle of the conversation handle:
//!   Uninitialized → Active   (provider started a chat)
//!   Uninitialized → Failed   (provider refused; terminal, never retried)
//!   Active        → Active   (every send, successful or not)

pub mod handlers;
pub mod registry;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::llm_client::{ChatProvider, ChatSession};
use crate::models::profile::Profile;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to initialize the chat session: {0}")]
pub struct SessionInitError(pub String);

/// Opaque handle to an ongoing provider conversation.
#[derive(Clone)]
pub struct ConversationSession {
    id: Uuid,
    chat: Arc<dyn ChatSession>,
}

impl ConversationSession {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn chat(&self) -> &dyn ChatSession {
        self.chat.as_ref()
    }

    /// True when both handles point at the same provider conversation.
    #[cfg(test)]
    pub fn same_as(&self, other: &ConversationSession) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.chat, &other.chat)
    }
}

impl fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationSession")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    Uninitialized,
    Active,
    Failed,
}

#[derive(Debug, Clone)]
enum ConversationState {
    Uninitialized,
    Active(ConversationSession),
    Failed(SessionInitError),
}

#[derive(Debug)]
pub struct SessionStore {
    conversation: ConversationState,
    profile: Option<Profile>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            conversation: ConversationState::Uninitialized,
            profile: None,
        }
    }

    /// Returns the session's conversation, starting it on first use.
    /// A failed start is remembered and returned on every later call.
    pub async fn get_or_create_session(
        &mut self,
        provider: &dyn ChatProvider,
    ) -> Result<ConversationSession, SessionInitError> {
        match &self.conversation {
            ConversationState::Active(session) => return Ok(session.clone()),
            ConversationState::Failed(err) => return Err(err.clone()),
            ConversationState::Uninitialized => {}
        }

        match provider.start_chat().await {
            Ok(chat) => {
                let session = ConversationSession {
                    id: Uuid::new_v4(),
                    chat,
                };
                info!("Conversation {} started", session.id);
                self.conversation = ConversationState::Active(session.clone());
                Ok(session)
            }
            Err(e) => {
                error!("Chat session initialization failed: {e}");
                let err = SessionInitError(e.to_string());
                self.conversation = ConversationState::Failed(err.clone());
                Err(err)
            }
        }
    }

    pub fn status(&self) -> ConversationStatus {
        match self.conversation {
            ConversationState::Uninitialized => ConversationStatus::Uninitialized,
            ConversationState::Active(_) => ConversationStatus::Active,
            ConversationState::Failed(_) => ConversationStatus::Failed,
        }
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }
}
