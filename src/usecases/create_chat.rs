//! Use case for creating a chat from the "new chat" title field.

use crate::domain::{chat::Chat, chats_state::ChatsState};

use super::{contracts::ChatService, error::SyncError};

const CREATE_CHAT_FAILED: &str = "SYNC_CREATE_CHAT_FAILED";

#[derive(Debug, Clone, PartialEq)]
pub enum CreateChatOutcome {
    /// The title field was empty; nothing was sent.
    Skipped,
    Created(Chat),
}

/// Creates a chat titled after the current draft.
///
/// On success the draft is cleared. On failure the draft is kept so the user
/// can retry, and the error is returned instead of being dropped.
pub fn create_new_chat(
    state: &mut ChatsState,
    service: &dyn ChatService,
) -> Result<CreateChatOutcome, SyncError> {
    let title = state.new_chat_title().trim().to_owned();
    if title.is_empty() {
        return Ok(CreateChatOutcome::Skipped);
    }

    let created = service
        .create_chat(&title)
        .map_err(SyncError::from)
        .and_then(|raw_chat| raw_chat.decode().map_err(SyncError::from));

    match created {
        Ok(chat) => {
            state.set_new_chat_title("");
            tracing::info!(chat_id = chat.id, "chat created");
            Ok(CreateChatOutcome::Created(chat))
        }
        Err(error) => {
            tracing::warn!(code = CREATE_CHAT_FAILED, error = %error, "chat creation failed");
            Err(error)
        }
    }
}
