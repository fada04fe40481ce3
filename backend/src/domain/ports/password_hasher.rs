//! Port abstraction for one-way credential hashing.

/// Errors raised by password hasher adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    /// Hash computation failed.
    #[error("password hashing failed: {message}")]
    Hash {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A stored hash could not be parsed for verification.
    #[error("stored password hash is malformed: {message}")]
    Parse {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl HashError {
    /// Build a [`HashError::Hash`] error.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    /// Build a [`HashError::Parse`] error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

/// Driven port for credential hashing.
///
/// Implementations must use a memory-hard algorithm with a fresh random salt
/// per call; salting is internal and opaque to callers. A mismatching
/// password is `Ok(false)`, never an error.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, plaintext: &str) -> Result<String, HashError>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, HashError>;
}
