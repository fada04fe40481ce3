//! Post API handlers.
//!
//! ```text
//! GET    /api/v1/posts
//! POST   /api/v1/posts        {"title":"my first post"}
//! GET    /api/v1/posts/{id}
//! PUT    /api/v1/posts/{id}   {"title":"renamed"}
//! DELETE /api/v1/posts/{id}
//! ```
//!
//! Lookups and updates answer `null` for unknown identifiers; deletion
//! always answers `true`.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::PostPersistenceError;
use crate::domain::{Error, Post};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Create/update request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostTitleRequest {
    /// Title text.
    pub title: String,
}

fn map_post_persistence_error(err: PostPersistenceError) -> Error {
    match err {
        PostPersistenceError::Connection { message } => Error::service_unavailable(message),
        PostPersistenceError::Query { message } => Error::internal(message),
    }
}

/// List all posts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    responses(
        (status = 200, description = "Posts", body = [Post]),
        (status = 503, description = "Post store unavailable", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPosts",
    security([])
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Post>>> {
    let posts = state
        .posts
        .list()
        .await
        .map_err(map_post_persistence_error)?;
    Ok(web::Json(posts))
}

/// Fetch a single post; `null` when absent.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post or null", body = Option<Post>),
        (status = 503, description = "Post store unavailable", body = Error)
    ),
    tags = ["posts"],
    operation_id = "getPost",
    security([])
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Option<Post>>> {
    let post = state
        .posts
        .find_by_id(path.into_inner())
        .await
        .map_err(map_post_persistence_error)?;
    Ok(web::Json(post))
}

/// Create a post.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = PostTitleRequest,
    responses(
        (status = 200, description = "Created post", body = Post),
        (status = 503, description = "Post store unavailable", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost",
    security([])
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<PostTitleRequest>,
) -> ApiResult<web::Json<Post>> {
    let post = state
        .posts
        .create(payload.into_inner().title)
        .await
        .map_err(map_post_persistence_error)?;
    Ok(web::Json(post))
}

/// Update a post's title; `null` when the post does not exist.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post identifier")),
    request_body = PostTitleRequest,
    responses(
        (status = 200, description = "Updated post or null", body = Option<Post>),
        (status = 503, description = "Post store unavailable", body = Error)
    ),
    tags = ["posts"],
    operation_id = "updatePost",
    security([])
)]
#[put("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<PostTitleRequest>,
) -> ApiResult<web::Json<Option<Post>>> {
    let post = state
        .posts
        .update_title(path.into_inner(), payload.into_inner().title)
        .await
        .map_err(map_post_persistence_error)?;
    Ok(web::Json(post))
}

/// Delete a post. Unknown identifiers are not an error.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Always true", body = bool),
        (status = 503, description = "Post store unavailable", body = Error)
    ),
    tags = ["posts"],
    operation_id = "deletePost",
    security([])
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .posts
        .delete(path.into_inner())
        .await
        .map_err(map_post_persistence_error)?;
    Ok(HttpResponse::Ok().json(true))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test as actix_test, web, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::domain::AuthService;
    use crate::outbound::email::LogMailer;
    use crate::outbound::memory::{
        InMemoryPostRepository, InMemoryResetTokenStore, InMemoryUserRepository,
    };
    use crate::outbound::security::Argon2PasswordHasher;

    fn test_state() -> HttpState {
        let auth = AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryResetTokenStore::new()),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(LogMailer),
            "http://localhost:3000",
        );
        HttpState::new(Arc::new(auth), Arc::new(InMemoryPostRepository::new()))
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(list_posts)
                .service(get_post)
                .service(create_post)
                .service(update_post)
                .service(delete_post),
        )
    }

    async fn create_titled(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        title: &str,
    ) -> Value {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/posts")
                .set_json(json!({ "title": title }))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        serde_json::from_slice(&actix_test::read_body(response).await).expect("json body")
    }

    #[actix_web::test]
    async fn create_then_list_round_trips() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let created = create_titled(&app, "my first post").await;
        assert_eq!(created["title"], "my first post");

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/posts")
                .to_request(),
        )
        .await;
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json body");
        assert_eq!(body.as_array().expect("array").len(), 1);
        assert_eq!(body[0]["title"], "my first post");
    }

    #[actix_web::test]
    async fn unknown_post_reads_as_null() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/posts/{}", Uuid::new_v4()))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        assert_eq!(actix_test::read_body(response).await, "null");
    }

    #[actix_web::test]
    async fn update_changes_title_and_null_for_unknown_id() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let created = create_titled(&app, "before").await;
        let id = created["id"].as_str().expect("id string").to_owned();

        let updated = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/v1/posts/{id}"))
                .set_json(json!({ "title": "after" }))
                .to_request(),
        )
        .await;
        let body: Value =
            serde_json::from_slice(&actix_test::read_body(updated).await).expect("json body");
        assert_eq!(body["title"], "after");

        let missing = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/v1/posts/{}", Uuid::new_v4()))
                .set_json(json!({ "title": "after" }))
                .to_request(),
        )
        .await;
        assert_eq!(actix_test::read_body(missing).await, "null");
    }

    #[actix_web::test]
    async fn delete_answers_true_even_for_unknown_ids() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/posts/{}", Uuid::new_v4()))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        assert_eq!(actix_test::read_body(response).await, "true");
    }
}
