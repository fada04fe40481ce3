//! Port abstraction for post persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::post::Post;

/// Persistence errors raised by post repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostPersistenceError {
    /// Repository connection could not be established.
    #[error("post repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("post repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl PostPersistenceError {
    /// Build a [`PostPersistenceError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`PostPersistenceError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Driven port for post persistence.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// List all posts, newest first.
    async fn list(&self) -> Result<Vec<Post>, PostPersistenceError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, PostPersistenceError>;

    /// Persist a new post with the given title.
    async fn create(&self, title: String) -> Result<Post, PostPersistenceError>;

    /// Update the title of an existing post, returning the stored record or
    /// `None` when no post has the given identifier.
    async fn update_title(
        &self,
        id: Uuid,
        title: String,
    ) -> Result<Option<Post>, PostPersistenceError>;

    /// Delete the post with the given identifier. Deleting an unknown
    /// identifier is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), PostPersistenceError>;
}
