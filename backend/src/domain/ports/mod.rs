//! Domain ports and supporting types for the hexagonal boundary.

mod mailer;
mod password_hasher;
mod post_repository;
mod reset_token_store;
mod session;
mod user_repository;

pub use mailer::{MailError, Mailer};
pub use password_hasher::{HashError, PasswordHasher};
pub use post_repository::{PostPersistenceError, PostRepository};
pub use reset_token_store::{ResetTokenStore, TokenStoreError};
pub use session::{SessionError, SessionHandle};
pub use user_repository::{
    NewUser, UniqueColumn, UserPersistenceError, UserRepository,
};
