//! Port abstraction for the ephemeral password-reset token store.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::user::UserId;

/// Errors raised by token store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenStoreError {
    /// Store connection could not be established.
    #[error("token store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A store command failed during execution.
    #[error("token store command failed: {message}")]
    Command {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl TokenStoreError {
    /// Build a [`TokenStoreError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`TokenStoreError::Command`] error.
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
        }
    }
}

/// Driven port for single-use password-reset tokens.
///
/// Expiry is enforced by the store itself; callers only ever observe absence.
/// All operations are atomic at single-key granularity.
#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    /// Store `token -> user_id` with the given time-to-live.
    async fn set(
        &self,
        token: &str,
        user_id: &UserId,
        ttl: Duration,
    ) -> Result<(), TokenStoreError>;

    /// Resolve a token to its target user, `None` when absent or expired.
    async fn get(&self, token: &str) -> Result<Option<UserId>, TokenStoreError>;

    /// Remove a token so it cannot be consumed again.
    async fn delete(&self, token: &str) -> Result<(), TokenStoreError>;
}
