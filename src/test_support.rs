use std::sync::Mutex;

use chrono::{TimeZone, Utc};

use crate::{
    domain::{
        chat::{ChatType, RawChat},
        message::{CustomJson, Message, RawMessage},
    },
    usecases::contracts::{ChatService, ChatServiceError, MessageLoader},
};

/// Raw chat created at `created_secs`, optionally carrying a last message sent at `last_message_secs`.
pub fn raw_chat(id: i64, created_secs: i64, last_message_secs: Option<i64>) -> RawChat {
    RawChat {
        id,
        title: format!("chat-{id}"),
        chat_type: ChatType::Direct,
        created: Utc.timestamp_opt(created_secs, 0).unwrap(),
        people: vec![],
        last_message: last_message_secs.map(|secs| RawMessage {
            id: id * 100,
            sender_username: Some("alice".to_owned()),
            text: format!("last in {id}"),
            created: Utc.timestamp_opt(secs, 0).unwrap(),
            custom_json: format!(r#"{{"sending_time": {secs}}}"#),
        }),
    }
}

pub fn message(id: i64, sending_secs: i64, text: &str) -> Message {
    Message {
        id,
        sender_username: Some("alice".to_owned()),
        text: text.to_owned(),
        created: Utc.timestamp_opt(sending_secs, 0).unwrap(),
        custom_json: CustomJson::new(sending_secs),
    }
}

/// Chat service double returning canned results and recording calls.
pub struct StubChatService {
    pub chats: Result<Vec<RawChat>, ChatServiceError>,
    pub search_results: Result<Vec<RawChat>, ChatServiceError>,
    pub created: Result<RawChat, ChatServiceError>,
    pub calls: Mutex<Vec<String>>,
}

impl Default for StubChatService {
    fn default() -> Self {
        Self {
            chats: Ok(vec![]),
            search_results: Ok(vec![]),
            created: Err(ChatServiceError::Unknown),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl StubChatService {
    pub fn with_chats(chats: Vec<RawChat>) -> Self {
        Self {
            chats: Ok(chats),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

impl ChatService for StubChatService {
    fn fetch_chats(&self) -> Result<Vec<RawChat>, ChatServiceError> {
        self.record("fetch_chats".to_owned());
        self.chats.clone()
    }

    fn fetch_latest_chats(&self, limit: usize) -> Result<Vec<RawChat>, ChatServiceError> {
        self.record(format!("fetch_latest_chats:{limit}"));
        self.chats.clone()
    }

    fn search_chats(
        &self,
        query: &str,
        scope_username: &str,
    ) -> Result<Vec<RawChat>, ChatServiceError> {
        self.record(format!("search_chats:{query}:{scope_username}"));
        self.search_results.clone()
    }

    fn create_chat(&self, title: &str) -> Result<RawChat, ChatServiceError> {
        self.record(format!("create_chat:{title}"));
        self.created.clone()
    }
}

#[derive(Default)]
pub struct RecordingMessageLoader {
    pub requested: Mutex<Vec<i64>>,
}

impl MessageLoader for RecordingMessageLoader {
    fn load_chat_messages(&self, chat_id: i64) {
        self.requested.lock().expect("requested lock").push(chat_id);
    }
}
