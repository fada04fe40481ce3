//! Credential hashing adapter backed by Argon2id.
//!
//! Argon2id with default parameters and a fresh random salt per call; the
//! salt is embedded in the PHC-format hash string so verification needs no
//! extra state.

use argon2::password_hash::{
    rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher as _,
    PasswordVerifier as _, SaltString,
};
use argon2::Argon2;

use crate::domain::ports::{HashError, PasswordHasher};

/// Argon2id implementation of the [`PasswordHasher`] port.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a new hasher with default Argon2id parameters.
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| HashError::hash(err.to_string()))
    }

    fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(hash).map_err(|err| HashError::parse(err.to_string()))?;
        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(err) => Err(HashError::parse(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("my-secure-password-123!").expect("hashable");

        assert!(hasher
            .verify(&hash, "my-secure-password-123!")
            .expect("verifiable"));
        assert!(!hasher.verify(&hash, "wrong-password").expect("verifiable"));
    }

    #[test]
    fn same_password_hashes_differently_per_call() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("same-password").expect("hashable");
        let second = hasher.hash("same-password").expect("hashable");

        assert_ne!(first, second);
        assert!(hasher.verify(&first, "same-password").expect("verifiable"));
        assert!(hasher.verify(&second, "same-password").expect("verifiable"));
    }

    #[test]
    fn produces_argon2id_phc_strings() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("test").expect("hashable");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn malformed_stored_hash_is_an_error_not_a_mismatch() {
        let hasher = Argon2PasswordHasher::new();
        let err = hasher
            .verify("not-a-phc-string", "anything")
            .expect_err("malformed hash should error");
        assert!(matches!(err, HashError::Parse { .. }));
    }
}
