use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{
    error::StoreError,
    message::{Message, RawMessage},
};

/// Kind of conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatType {
    /// 1-to-1 conversation.
    #[default]
    Direct,
    /// Conversation with more than two members.
    Group,
}

impl ChatType {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Direct => "DIRECT",
            Self::Group => "GROUP",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chat {
    pub id: i64,
    pub title: String,
    pub chat_type: ChatType,
    pub created: DateTime<Utc>,
    /// Usernames of the chat members.
    pub people: Vec<String>,
    pub last_message: Option<Message>,
}

impl Chat {
    /// Time the chat list is ordered by: last message time, else creation time.
    pub fn effective_time(&self) -> DateTime<Utc> {
        self.last_message
            .as_ref()
            .map_or(self.created, |message| message.created)
    }
}

/// Chat record as returned by the chat service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawChat {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub chat_type: ChatType,
    #[serde(with = "super::timestamp")]
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub last_message: Option<RawMessage>,
}

impl RawChat {
    pub fn effective_time(&self) -> DateTime<Utc> {
        self.last_message
            .as_ref()
            .map_or(self.created, |message| message.created)
    }

    /// Decodes the nested `last_message.custom_json` payload.
    pub fn decode(self) -> Result<Chat, StoreError> {
        match self.decode_lenient() {
            (_, Some(error)) => Err(error),
            (chat, None) => Ok(chat),
        }
    }

    /// Like [`RawChat::decode`], but an undecodable last message is dropped
    /// and reported next to the chat instead of failing it.
    pub fn decode_lenient(self) -> (Chat, Option<StoreError>) {
        let Self {
            id,
            title,
            chat_type,
            created,
            people,
            last_message,
        } = self;

        let (last_message, error) = match last_message.map(RawMessage::decode) {
            None => (None, None),
            Some(Ok(message)) => (Some(message), None),
            Some(Err(source)) => (
                None,
                Some(StoreError::MalformedPayload {
                    chat_id: id,
                    details: source.to_string(),
                }),
            ),
        };

        let chat = Chat {
            id,
            title,
            chat_type,
            created,
            people,
            last_message,
        };

        (chat, error)
    }
}

/// Decodes a whole batch or nothing.
pub fn decode_all(raw_chats: Vec<RawChat>) -> Result<Vec<Chat>, StoreError> {
    raw_chats.into_iter().map(RawChat::decode).collect()
}

/// Partial chat update; `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatPatch {
    pub id: i64,
    pub title: Option<String>,
    pub chat_type: Option<ChatType>,
    pub created: Option<DateTime<Utc>>,
    pub people: Option<Vec<String>>,
    pub last_message: Option<Message>,
}

#[cfg_attr(not(test), allow(dead_code))]
impl ChatPatch {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(self, chat: &mut Chat) {
        if let Some(title) = self.title {
            chat.title = title;
        }

        if let Some(chat_type) = self.chat_type {
            chat.chat_type = chat_type;
        }

        if let Some(created) = self.created {
            chat.created = created;
        }

        if let Some(people) = self.people {
            chat.people = people;
        }

        if let Some(last_message) = self.last_message {
            chat.last_message = Some(last_message);
        }
    }
}
