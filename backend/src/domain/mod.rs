//! Domain primitives, aggregates, and use-cases.
//!
//! Purpose: define the strongly typed entities and account flows used by the
//! API and persistence layers. Types are immutable where possible; invariants
//! and serde contracts live in each type's Rustdoc.

pub mod auth_service;
pub mod error;
pub mod field_error;
pub mod ports;
pub mod post;
pub mod user;
pub mod validation;

pub use self::auth_service::{
    AuthService, ChangePasswordInput, LoginInput, RegisterInput, UserResponse, RESET_TOKEN_TTL,
};
pub use self::error::{Error, ErrorCode};
pub use self::field_error::FieldError;
pub use self::post::Post;
pub use self::user::{InvalidUserId, User, UserCredentials, UserId};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
