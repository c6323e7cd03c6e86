// Free-text chat: the conversation bridge to the provider and its HTTP handler.

pub mod bridge;
pub mod handlers;
