pub mod conversation;
pub mod profile;
