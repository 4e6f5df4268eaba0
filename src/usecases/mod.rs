//! Use case layer: chat list workflows over the chat service.

pub mod bootstrap;
pub mod chats_session;
pub mod context;
pub mod contracts;
pub mod create_chat;
pub mod error;
pub mod list_chats;
pub mod search_chats;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
