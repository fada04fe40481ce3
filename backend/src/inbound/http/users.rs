//! Account API handlers.
//!
//! ```text
//! POST /api/v1/register        {"username":"ada","email":"ada@example.com","password":"pw123"}
//! POST /api/v1/login           {"usernameOrEmail":"ada","password":"pw123"}
//! POST /api/v1/logout
//! POST /api/v1/forgot-password {"email":"ada@example.com"}
//! POST /api/v1/change-password {"token":"...","newPassword":"pw456"}
//! GET  /api/v1/me
//! ```
//!
//! Mutations answer with a [`UserResponse`] envelope: a user on success,
//! field errors on rejection. Infrastructure failures are the only thing
//! that becomes a non-2xx response.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{
    ChangePasswordInput, Error, LoginInput, RegisterInput, User, UserResponse,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Forgot-password request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    /// Address to send the reset link to.
    pub email: String,
}

/// Register a new account and log the session in as it.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterInput,
    responses(
        (status = 200, description = "User created, or field errors", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie on success"))),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Credential store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterInput>,
) -> ApiResult<web::Json<UserResponse>> {
    let response = state.auth.register(&session, payload.into_inner()).await?;
    Ok(web::Json(response))
}

/// Authenticate by username or e-mail and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Login success, or field errors", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie on success"))),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Credential store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginInput>,
) -> ApiResult<web::Json<UserResponse>> {
    let response = state.auth.login(&session, payload.into_inner()).await?;
    Ok(web::Json(response))
}

/// Destroy the session. Answers `false` when the session record could not be
/// removed; the cookie is left untouched in that case.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 200, description = "Whether the session record was destroyed", body = bool)
    ),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    let destroyed = state.auth.logout(&session);
    HttpResponse::Ok().json(destroyed)
}

/// Start the password-reset flow. Always answers `true` so callers cannot
/// probe which addresses are registered.
#[utoipa::path(
    post,
    path = "/api/v1/forgot-password",
    request_body = ForgotPasswordRequest,
    responses((status = 200, description = "Always true", body = bool)),
    tags = ["users"],
    operation_id = "forgotPassword",
    security([])
)]
#[post("/forgot-password")]
pub async fn forgot_password(
    state: web::Data<HttpState>,
    payload: web::Json<ForgotPasswordRequest>,
) -> HttpResponse {
    let accepted = state.auth.forgot_password(&payload.email).await;
    HttpResponse::Ok().json(accepted)
}

/// Consume an e-mailed reset token and set a new password.
#[utoipa::path(
    post,
    path = "/api/v1/change-password",
    request_body = ChangePasswordInput,
    responses(
        (status = 200, description = "Password changed, or field errors", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie on success"))),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "changePassword",
    security([])
)]
#[post("/change-password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ChangePasswordInput>,
) -> ApiResult<web::Json<UserResponse>> {
    let response = state
        .auth
        .change_password(&session, payload.into_inner())
        .await?;
    Ok(web::Json(response))
}

/// Resolve the current session to its user; `null` while anonymous.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current user or null", body = Option<User>),
        (status = 503, description = "Credential store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "me"
)]
#[get("/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Option<User>>> {
    let user = state.auth.me(&session).await?;
    Ok(web::Json(user))
}
