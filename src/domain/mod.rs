//! Domain layer: chat entities, the normalized store, search overlay and list projection.

pub mod chat;
pub mod chat_list_view;
pub mod chat_store;
pub mod chats_state;
pub mod error;
pub mod events;
pub mod message;
pub mod search_state;
pub mod timestamp;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
