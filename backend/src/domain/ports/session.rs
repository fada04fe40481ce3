//! Port abstraction over per-request session state.
//!
//! The session is a small state machine keyed by an opaque cookie value:
//! anonymous until a user id is set, authenticated while one is present, and
//! anonymous again once destroyed or expired. Use-cases receive the handle as
//! an explicit argument; there is no ambient request context.

use crate::domain::user::UserId;

/// Errors raised when session state cannot be read or written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("session state unavailable: {message}")]
pub struct SessionError {
    /// Adapter-supplied failure description.
    pub message: String,
}

impl SessionError {
    /// Build a session error from a failure description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Handle to the session associated with the current request.
pub trait SessionHandle {
    /// The authenticated user id, `None` while anonymous.
    fn user_id(&self) -> Result<Option<UserId>, SessionError>;

    /// Mark the session authenticated as the given user.
    fn set_user_id(&self, user_id: &UserId) -> Result<(), SessionError>;

    /// Destroy the server-side session record.
    ///
    /// Returns `false` when the record could not be removed; the client
    /// cookie must be left untouched in that case.
    fn destroy(&self) -> bool;
}
