use thiserror::Error;

use crate::domain::chat::RawChat;

#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatServiceError {
    #[error("not authorized by the chat service")]
    Unauthorized,
    #[error("chat service is unavailable")]
    Unavailable,
    #[error("chat service returned data that does not match the contract")]
    InvalidData,
    #[error("chat service request failed")]
    Unknown,
}

/// Remote chat backend. Implementations own transport and authentication.
pub trait ChatService {
    fn fetch_chats(&self) -> Result<Vec<RawChat>, ChatServiceError>;

    fn fetch_latest_chats(&self, limit: usize) -> Result<Vec<RawChat>, ChatServiceError>;

    /// Chats matching `query`, limited to those visible to `scope_username`.
    fn search_chats(
        &self,
        query: &str,
        scope_username: &str,
    ) -> Result<Vec<RawChat>, ChatServiceError>;

    fn create_chat(&self, title: &str) -> Result<RawChat, ChatServiceError>;
}

impl<T> ChatService for &T
where
    T: ChatService + ?Sized,
{
    fn fetch_chats(&self) -> Result<Vec<RawChat>, ChatServiceError> {
        (*self).fetch_chats()
    }

    fn fetch_latest_chats(&self, limit: usize) -> Result<Vec<RawChat>, ChatServiceError> {
        (*self).fetch_latest_chats(limit)
    }

    fn search_chats(
        &self,
        query: &str,
        scope_username: &str,
    ) -> Result<Vec<RawChat>, ChatServiceError> {
        (*self).search_chats(query, scope_username)
    }

    fn create_chat(&self, title: &str) -> Result<RawChat, ChatServiceError> {
        (*self).create_chat(title)
    }
}

/// Message history subsystem, notified when the user opens a chat.
pub trait MessageLoader {
    fn load_chat_messages(&self, chat_id: i64);
}
