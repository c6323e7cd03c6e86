use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A single line of the chat transcript shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// Ordered user/assistant turns for one session. Owned by the HTTP layer,
/// the chat bridge never touches it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    /// Appends a completed exchange. Both turns land together so a failed
    /// send never leaves a dangling user turn behind.
    pub fn record_exchange(&mut self, user_text: &str, reply_text: &str) {
        self.turns.push(ConversationTurn::user(user_text));
        self.turns.push(ConversationTurn::assistant(reply_text));
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
