//! Conversation Bridge: forwards one user utterance through the session's
//! provider conversation and hands back the reply text as-is.
//!
//! No retry: a failed send is reported once. The provider conversation is
//! left as it was, so the next send carries on from the last good turn.

use thiserror::Error;
use tracing::debug;

use crate::llm_client::{ProviderError, ProviderReply};
use crate::session::ConversationSession;

#[derive(Debug, Error)]
#[error("An error occurred while sending the message: {0}")]
pub struct TransportError(#[from] ProviderError);

pub async fn send(
    session: &ConversationSession,
    user_text: &str,
) -> Result<ProviderReply, TransportError> {
    debug!(
        "Forwarding {} chars to conversation {}",
        user_text.len(),
        session.id()
    );
    let reply = session.chat().send_message(user_text).await?;
    Ok(reply)
}
