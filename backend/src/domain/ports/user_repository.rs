//! Port abstraction for credential persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::user::{User, UserCredentials, UserId};

/// Column whose uniqueness constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueColumn {
    /// The `username` column.
    Username,
    /// The `email` column.
    Email,
}

impl UniqueColumn {
    /// Name of the request field the conflict maps back to.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
        }
    }
}

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A write violated the uniqueness invariant on the given column.
    #[error("unique constraint violated on {}", column.field_name())]
    UniqueViolation {
        /// The column whose constraint rejected the write.
        column: UniqueColumn,
    },
}

impl UserPersistenceError {
    /// Build a [`UserPersistenceError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`UserPersistenceError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Build a [`UserPersistenceError::UniqueViolation`] error.
    pub fn unique_violation(column: UniqueColumn) -> Self {
        Self::UniqueViolation { column }
    }
}

/// Fields required to persist a new user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Identifier generated by the caller.
    pub id: UserId,
    /// Requested unique username.
    pub username: String,
    /// Requested unique e-mail address.
    pub email: String,
    /// Already-hashed password; adapters never see plaintext.
    pub password_hash: String,
}

/// Driven port for user persistence.
///
/// Uniqueness of `username` and `email` is detected on write via
/// [`UserPersistenceError::UniqueViolation`], never checked beforehand, so
/// concurrent registrations cannot race past the invariant.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user record.
    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user and stored hash by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Fetch a user and stored hash by e-mail address.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Replace the stored password hash for the given user.
    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserPersistenceError>;
}
