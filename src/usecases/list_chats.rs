use crate::domain::{chats_state::ChatsState, error::StoreError};

use super::{contracts::ChatService, error::SyncError};

const LOAD_CHATS_COMMITTED: &str = "SYNC_LOAD_CHATS_COMMITTED";
const LOAD_CHATS_REJECTED: &str = "SYNC_LOAD_CHATS_REJECTED";

pub const DEFAULT_LATEST_CHATS_LIMIT: usize = 20;
const MAX_LATEST_CHATS_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestChatsQuery {
    pub limit: usize,
}

impl Default for LatestChatsQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LATEST_CHATS_LIMIT,
        }
    }
}

impl LatestChatsQuery {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    fn normalized_limit(&self) -> usize {
        match self.limit {
            0 => DEFAULT_LATEST_CHATS_LIMIT,
            value if value > MAX_LATEST_CHATS_LIMIT => MAX_LATEST_CHATS_LIMIT,
            value => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadChatsOutput {
    pub received: usize,
    pub stored: usize,
}

/// Replaces the whole store with the service's chat list.
pub fn load_chats(
    state: &mut ChatsState,
    service: &dyn ChatService,
) -> Result<LoadChatsOutput, SyncError> {
    let raw_chats = service.fetch_chats()?;
    let received = raw_chats.len();

    commit(state.load_chats(raw_chats), "full")?;

    Ok(LoadChatsOutput {
        received,
        stored: state.store().len(),
    })
}

/// Merges the newest `query.limit` chats into the store.
pub fn load_latest_chats(
    state: &mut ChatsState,
    service: &dyn ChatService,
    query: LatestChatsQuery,
) -> Result<LoadChatsOutput, SyncError> {
    let raw_chats = service.fetch_latest_chats(query.normalized_limit())?;
    let received = raw_chats.len();

    commit(state.load_latest_chats(raw_chats), "latest")?;

    Ok(LoadChatsOutput {
        received,
        stored: state.store().len(),
    })
}

fn commit(result: Result<(), StoreError>, mode: &'static str) -> Result<(), SyncError> {
    match result {
        Ok(()) => {
            tracing::info!(code = LOAD_CHATS_COMMITTED, mode, "chat list committed");
            Ok(())
        }
        Err(error) => {
            tracing::warn!(
                code = LOAD_CHATS_REJECTED,
                mode,
                error = %error,
                "chat list rejected; keeping previous store"
            );
            Err(error.into())
        }
    }
}
