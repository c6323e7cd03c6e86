//! In-process provider doubles for handler and session tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::llm_client::{ChatProvider, ChatSession, ProviderError, ProviderReply};

/// Provider whose chats echo the user text. `start_chat` can be made to fail,
/// and every chat shares one `fail_sends` switch.
#[derive(Clone, Default)]
pub struct EchoProvider {
    pub reject_start: bool,
    pub fail_sends: Arc<AtomicBool>,
    pub start_calls: Arc<AtomicUsize>,
}

impl EchoProvider {
    pub fn rejecting() -> Self {
        Self {
            reject_start: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ChatProvider for EchoProvider {
    async fn start_chat(&self) -> Result<Arc<dyn ChatSession>, ProviderError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_start {
            return Err(ProviderError::Api {
                status: 403,
                message: "API key not valid.".to_string(),
            });
        }
        Ok(Arc::new(EchoChat {
            fail_sends: self.fail_sends.clone(),
        }))
    }
}

pub struct EchoChat {
    fail_sends: Arc<AtomicBool>,
}

#[async_trait]
impl ChatSession for EchoChat {
    async fn send_message(&self, text: &str) -> Result<ProviderReply, ProviderError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(ProviderError::Api {
                status: 503,
                message: "The model is overloaded.".to_string(),
            });
        }
        Ok(ProviderReply {
            text: format!("echo: {text}"),
        })
    }
}
