use thiserror::Error;

use crate::domain::error::StoreError;

use super::contracts::ChatServiceError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("network failure: {0}")]
    Network(#[from] ChatServiceError),
}
