//! Account and session use-cases: register, login, logout, password reset.
//!
//! Every operation receives its collaborators through the service and the
//! session handle as an explicit argument. Operations answer with either a
//! success payload or a non-empty list of field errors, never both;
//! infrastructure failures surface as domain [`Error`]s only where the
//! contract says so and are otherwise logged and absorbed.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::field_error::FieldError;
use crate::domain::ports::{
    Mailer, NewUser, PasswordHasher, ResetTokenStore, SessionError, SessionHandle,
    TokenStoreError, UserPersistenceError, UserRepository,
};
use crate::domain::user::{User, UserId};
use crate::domain::validation::{validate_new_password, validate_register};

/// Reset tokens stay valid for three days.
pub const RESET_TOKEN_TTL: Duration = Duration::from_secs(3 * 24 * 60 * 60);

/// Registration payload.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    /// Requested unique username.
    pub username: String,
    /// Requested unique e-mail address.
    pub email: String,
    /// Plaintext password; hashed before it reaches any store.
    pub password: String,
}

/// Login payload. The identifier is routed to an e-mail lookup when it
/// contains an `@`, otherwise to a username lookup.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    /// Username or e-mail address.
    pub username_or_email: String,
    /// Plaintext password.
    pub password: String,
}

/// Change-password payload carrying a reset token from the e-mailed link.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordInput {
    /// Single-use reset token.
    pub token: String,
    /// Replacement plaintext password.
    pub new_password: String,
}

/// Outcome envelope for account mutations: a user on success, field errors on
/// rejection, never both.
#[derive(Debug, Clone, PartialEq, serde::Serialize, ToSchema)]
pub struct UserResponse {
    /// The affected user when the operation succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Non-empty field errors when the operation was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl UserResponse {
    /// Success envelope.
    pub fn for_user(user: User) -> Self {
        Self {
            user: Some(user),
            errors: None,
        }
    }

    /// Rejection envelope carrying a single field error.
    pub fn for_error(error: FieldError) -> Self {
        Self {
            user: None,
            errors: Some(vec![error]),
        }
    }
}

/// Orchestrates the account flows against the credential store, token store,
/// hasher, and mailer ports.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    reset_tokens: Arc<dyn ResetTokenStore>,
    hasher: Arc<dyn PasswordHasher>,
    mailer: Arc<dyn Mailer>,
    /// Base URL of the web frontend; reset links point below it.
    reset_link_base: String,
}

impl AuthService {
    /// Build a service from its collaborator ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        reset_tokens: Arc<dyn ResetTokenStore>,
        hasher: Arc<dyn PasswordHasher>,
        mailer: Arc<dyn Mailer>,
        reset_link_base: impl Into<String>,
    ) -> Self {
        Self {
            users,
            reset_tokens,
            hasher,
            mailer,
            reset_link_base: reset_link_base.into(),
        }
    }

    /// Resolve the current session to its user, `None` while anonymous.
    pub async fn me(&self, session: &dyn SessionHandle) -> Result<Option<User>, Error> {
        let Some(user_id) = session.user_id().map_err(map_session_error)? else {
            return Ok(None);
        };
        self.users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_persistence_error)
    }

    /// Register a new account and log the session in as it.
    pub async fn register(
        &self,
        session: &dyn SessionHandle,
        input: RegisterInput,
    ) -> Result<UserResponse, Error> {
        if let Some(violation) = validate_register(&input) {
            return Ok(UserResponse::for_error(violation));
        }

        let password_hash = self.hash_password(&input.password)?;
        let RegisterInput {
            username, email, ..
        } = input;

        let created = self
            .users
            .create(NewUser {
                id: UserId::random(),
                username,
                email,
                password_hash,
            })
            .await;

        let user = match created {
            Ok(user) => user,
            Err(UserPersistenceError::UniqueViolation { column }) => {
                let field = column.field_name();
                return Ok(UserResponse::for_error(FieldError::new(
                    field,
                    format!("{field} already taken"),
                )));
            }
            Err(err) => return Err(map_user_persistence_error(err)),
        };

        session.set_user_id(&user.id).map_err(map_session_error)?;
        Ok(UserResponse::for_user(user))
    }

    /// Authenticate by username or e-mail and log the session in.
    pub async fn login(
        &self,
        session: &dyn SessionHandle,
        input: LoginInput,
    ) -> Result<UserResponse, Error> {
        let identifier = input.username_or_email.as_str();
        let found = if identifier.contains('@') {
            self.users.find_by_email(identifier).await
        } else {
            self.users.find_by_username(identifier).await
        }
        .map_err(map_user_persistence_error)?;

        let Some(credentials) = found else {
            return Ok(UserResponse::for_error(FieldError::new(
                "usernameOrEmail",
                "that username doesn't exist",
            )));
        };

        let valid = self
            .hasher
            .verify(&credentials.password_hash, &input.password)
            .map_err(|err| {
                error!(error = %err, "password verification failed");
                Error::internal("password verification failed")
            })?;
        if !valid {
            return Ok(UserResponse::for_error(FieldError::new(
                "password",
                "incorrect password",
            )));
        }

        session
            .set_user_id(&credentials.user.id)
            .map_err(map_session_error)?;
        Ok(UserResponse::for_user(credentials.user))
    }

    /// Destroy the session record. Reports `false` when the record could not
    /// be removed; the client cookie stays untouched in that case.
    pub fn logout(&self, session: &dyn SessionHandle) -> bool {
        session.destroy()
    }

    /// Start the password-reset flow for the given address.
    ///
    /// Always reports success so callers cannot probe which addresses are
    /// registered; store and mail failures are logged and absorbed.
    pub async fn forgot_password(&self, email: &str) -> bool {
        let found = match self.users.find_by_email(email).await {
            Ok(found) => found,
            Err(err) => {
                error!(error = %err, "password reset lookup failed");
                return true;
            }
        };
        let Some(credentials) = found else {
            return true;
        };

        let token = Uuid::new_v4().to_string();
        if let Err(err) = self
            .reset_tokens
            .set(&token, &credentials.user.id, RESET_TOKEN_TTL)
            .await
        {
            error!(error = %err, "failed to store password reset token");
            return true;
        }

        let link = format!("{}/change-password/{token}", self.reset_link_base);
        let body = format!("<a href=\"{link}\">reset password</a>");
        if let Err(err) = self
            .mailer
            .send(email, "Reset your password", &body)
            .await
        {
            error!(error = %err, "password reset email dispatch failed");
        }
        true
    }

    /// Consume a reset token, store the new password, and log the session in
    /// as the affected user.
    pub async fn change_password(
        &self,
        session: &dyn SessionHandle,
        input: ChangePasswordInput,
    ) -> Result<UserResponse, Error> {
        if let Some(violation) = validate_new_password(&input.new_password) {
            return Ok(UserResponse::for_error(violation));
        }

        let user_id = match self
            .reset_tokens
            .get(&input.token)
            .await
            .map_err(map_token_store_error)?
        {
            Some(user_id) => user_id,
            None => {
                return Ok(UserResponse::for_error(FieldError::new(
                    "token",
                    "token expired",
                )));
            }
        };

        let user = match self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_persistence_error)?
        {
            Some(user) => user,
            None => {
                return Ok(UserResponse::for_error(FieldError::new(
                    "token",
                    "user no longer exists",
                )));
            }
        };

        let password_hash = self.hash_password(&input.new_password)?;
        self.users
            .update_password(&user.id, &password_hash)
            .await
            .map_err(map_user_persistence_error)?;

        // Single use: remove the token so a replayed link reads as expired.
        if let Err(err) = self.reset_tokens.delete(&input.token).await {
            warn!(error = %err, "failed to delete consumed reset token");
        }

        session.set_user_id(&user.id).map_err(map_session_error)?;
        Ok(UserResponse::for_user(user))
    }

    fn hash_password(&self, plaintext: &str) -> Result<String, Error> {
        self.hasher.hash(plaintext).map_err(|err| {
            error!(error = %err, "password hashing failed");
            Error::internal("password hashing failed")
        })
    }
}

fn map_user_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::UniqueViolation { .. } => {
            // Callers that expect conflicts handle this variant before mapping.
            Error::internal("unexpected unique constraint violation")
        }
    }
}

fn map_token_store_error(err: TokenStoreError) -> Error {
    match err {
        TokenStoreError::Connection { message } => Error::service_unavailable(message),
        TokenStoreError::Command { message } => Error::internal(message),
    }
}

fn map_session_error(err: SessionError) -> Error {
    Error::internal(err.to_string())
}
