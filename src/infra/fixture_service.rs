//! File-backed chat service used by the CLI in place of the remote backend.

use std::{fs, path::Path, sync::Mutex};

use chrono::Utc;
use serde::Deserialize;

use crate::{
    domain::chat::{ChatType, RawChat},
    infra::error::AppError,
    usecases::contracts::{ChatService, ChatServiceError},
};

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    chats: Vec<RawChat>,
}

#[derive(Debug, Default)]
pub struct FixtureChatService {
    chats: Mutex<Vec<RawChat>>,
}

impl FixtureChatService {
    pub fn new(chats: Vec<RawChat>) -> Self {
        Self {
            chats: Mutex::new(chats),
        }
    }

    /// Reads `{ "chats": [...] }` from `path`.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|source| AppError::FixtureRead {
            path: path.to_path_buf(),
            source,
        })?;

        let fixture: FixtureFile =
            serde_json::from_str(&raw).map_err(|source| AppError::FixtureParse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            chat_count = fixture.chats.len(),
            "chat fixture loaded"
        );
        Ok(Self::new(fixture.chats))
    }

    fn snapshot(&self) -> Result<Vec<RawChat>, ChatServiceError> {
        self.chats
            .lock()
            .map(|chats| chats.clone())
            .map_err(|_| ChatServiceError::Unavailable)
    }
}

impl ChatService for FixtureChatService {
    fn fetch_chats(&self) -> Result<Vec<RawChat>, ChatServiceError> {
        self.snapshot()
    }

    fn fetch_latest_chats(&self, limit: usize) -> Result<Vec<RawChat>, ChatServiceError> {
        let mut chats = self.snapshot()?;
        chats.sort_by(|left, right| right.effective_time().cmp(&left.effective_time()));
        chats.truncate(limit);
        Ok(chats)
    }

    fn search_chats(
        &self,
        query: &str,
        scope_username: &str,
    ) -> Result<Vec<RawChat>, ChatServiceError> {
        let needle = query.to_lowercase();

        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|chat| {
                chat.people.is_empty() || chat.people.iter().any(|person| person == scope_username)
            })
            .filter(|chat| chat.title.to_lowercase().contains(&needle))
            .collect())
    }

    fn create_chat(&self, title: &str) -> Result<RawChat, ChatServiceError> {
        let mut chats = self
            .chats
            .lock()
            .map_err(|_| ChatServiceError::Unavailable)?;

        let id = chats.iter().map(|chat| chat.id).max().unwrap_or(0) + 1;
        let chat = RawChat {
            id,
            title: title.to_owned(),
            chat_type: ChatType::Group,
            created: Utc::now(),
            people: Vec::new(),
            last_message: None,
        };
        chats.push(chat.clone());

        Ok(chat)
    }
}
