//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: account endpoints, posts, and health probes, plus the
//! session-cookie security scheme. Swagger UI serves the document in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    ChangePasswordInput, Error, ErrorCode, FieldError, LoginInput, Post, RegisterInput, User,
    UserResponse,
};
use crate::inbound::http::posts::PostTitleRequest;
use crate::inbound::http::users::ForgotPasswordRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "sid",
                "Session cookie issued by register, login, and change-password.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Forum backend API",
        description = "HTTP interface for session-authenticated forum access."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::forgot_password,
        crate::inbound::http::users::change_password,
        crate::inbound::http::users::me,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Post,
        FieldError,
        UserResponse,
        RegisterInput,
        LoginInput,
        ChangePasswordInput,
        ForgotPasswordRequest,
        PostTitleRequest,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "users", description = "Account and session operations"),
        (name = "posts", description = "Forum post operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
