use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{
    chat::{ChatPatch, ChatType},
    error::StoreError,
    message::{Message, MessageEntities, RawMessage},
};

/// Chat service callbacks applied to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    ChatUpdated(ChatPatch),
    MessagesLoaded {
        chat_id: i64,
        messages: MessageEntities,
    },
    MessageAdded {
        chat_id: i64,
        message: Message,
    },
    MessageEdited {
        chat_id: i64,
        message: Message,
    },
    LastMessageChanged {
        chat_id: i64,
        message: Message,
    },
}

impl ChatEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ChatUpdated(_) => "chat_updated",
            Self::MessagesLoaded { .. } => "messages_loaded",
            Self::MessageAdded { .. } => "message_added",
            Self::MessageEdited { .. } => "message_edited",
            Self::LastMessageChanged { .. } => "last_message_changed",
        }
    }
}

/// Wire form of [`ChatEvent`], message payloads still encoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawChatEvent {
    ChatUpdated {
        id: i64,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        chat_type: Option<ChatType>,
        #[serde(default, deserialize_with = "super::timestamp::deserialize_option")]
        created: Option<DateTime<Utc>>,
        #[serde(default)]
        people: Option<Vec<String>>,
        #[serde(default)]
        last_message: Option<RawMessage>,
    },
    MessagesLoaded {
        chat_id: i64,
        messages: Vec<RawMessage>,
    },
    MessageAdded {
        chat_id: i64,
        message: RawMessage,
    },
    MessageEdited {
        chat_id: i64,
        message: RawMessage,
    },
    LastMessageChanged {
        chat_id: i64,
        message: RawMessage,
    },
}

impl RawChatEvent {
    pub fn decode(self) -> Result<ChatEvent, StoreError> {
        let event = match self {
            Self::ChatUpdated {
                id,
                title,
                chat_type,
                created,
                people,
                last_message,
            } => ChatEvent::ChatUpdated(ChatPatch {
                id,
                title,
                chat_type,
                created,
                people,
                last_message: last_message
                    .map(|raw| decode_message(id, raw))
                    .transpose()?,
            }),
            Self::MessagesLoaded { chat_id, messages } => ChatEvent::MessagesLoaded {
                chat_id,
                messages: messages
                    .into_iter()
                    .map(|raw| decode_message(chat_id, raw))
                    .map(|message| message.map(|message| (message.sending_time(), message)))
                    .collect::<Result<_, _>>()?,
            },
            Self::MessageAdded { chat_id, message } => ChatEvent::MessageAdded {
                chat_id,
                message: decode_message(chat_id, message)?,
            },
            Self::MessageEdited { chat_id, message } => ChatEvent::MessageEdited {
                chat_id,
                message: decode_message(chat_id, message)?,
            },
            Self::LastMessageChanged { chat_id, message } => ChatEvent::LastMessageChanged {
                chat_id,
                message: decode_message(chat_id, message)?,
            },
        };

        Ok(event)
    }
}

fn decode_message(chat_id: i64, raw: RawMessage) -> Result<Message, StoreError> {
    raw.decode()
        .map_err(|source| StoreError::MalformedPayload {
            chat_id,
            details: source.to_string(),
        })
}
