use thiserror::Error;

/// Failures of chat store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("chat {chat_id} is not in the store")]
    UnknownChat { chat_id: i64 },
    #[error("chat {chat_id} carries a malformed message payload: {details}")]
    MalformedPayload { chat_id: i64, details: String },
}
