//! User identity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Error raised when a raw string is not a valid user identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user id must be a valid UUID")]
pub struct InvalidUserId;

/// Stable user identifier stored as a UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse and validate a [`UserId`] from raw string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, InvalidUserId> {
        Uuid::parse_str(id.as_ref()).map(Self).map_err(|_| InvalidUserId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Registered account.
///
/// ## Invariants
/// - `username` and `email` are each globally unique; uniqueness is enforced
///   by the credential store on write, never checked-then-written.
/// - The password hash is not part of this type and never serialized; see
///   [`UserCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    /// Unique, case-sensitive login name.
    pub username: String,
    /// Unique contact address, also usable as a login identifier.
    pub email: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A user record paired with its stored password hash.
///
/// Only credential-checking flows see this shape; it deliberately has no
/// serde implementations so the hash cannot leak through a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// The public user record.
    pub user: User,
    /// Hashed password as produced by the configured hasher.
    pub password_hash: String,
}
