use crate::domain::{
    chat::{Chat, RawChat},
    chats_state::ChatsState,
};

use super::{contracts::ChatService, error::SyncError};

const SEARCH_FAILED: &str = "SYNC_SEARCH_FAILED";
const SEARCH_STALE: &str = "SYNC_SEARCH_STALE";
const SEARCH_RESULT_PAYLOAD_DROPPED: &str = "SYNC_SEARCH_RESULT_PAYLOAD_DROPPED";

/// Identity the search is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchContext {
    pub username: String,
}

impl SearchContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query was empty; overlay reset without contacting the service.
    Cleared,
    Applied { result_count: usize },
    /// A newer search superseded this one before it completed.
    Superseded,
}

pub fn search_chats(
    state: &mut ChatsState,
    service: &dyn ChatService,
    text: &str,
    context: &SearchContext,
) -> Result<SearchOutcome, SyncError> {
    let Some(ticket) = state.begin_search(text) else {
        return Ok(SearchOutcome::Cleared);
    };

    let results = match service.search_chats(text, &context.username) {
        Ok(raw_chats) => decode_results(raw_chats),
        Err(source) => {
            let error = SyncError::from(source);
            state.fail_search(ticket);
            tracing::warn!(code = SEARCH_FAILED, error = %error, "chat search failed");
            return Err(error);
        }
    };

    let result_count = results.len();
    if state.complete_search(ticket, results) {
        tracing::debug!(result_count, "chat search results applied");
        Ok(SearchOutcome::Applied { result_count })
    } else {
        tracing::info!(code = SEARCH_STALE, "chat search superseded before completion");
        Ok(SearchOutcome::Superseded)
    }
}

/// Decodes results one by one; a bad payload drops only that result's last message.
fn decode_results(raw_chats: Vec<RawChat>) -> Vec<Chat> {
    raw_chats
        .into_iter()
        .map(|raw| {
            let (chat, error) = raw.decode_lenient();
            if let Some(error) = error {
                tracing::warn!(
                    code = SEARCH_RESULT_PAYLOAD_DROPPED,
                    chat_id = chat.id,
                    error = %error,
                    "search result last message dropped"
                );
            }
            chat
        })
        .collect()
}
