//! Server construction and middleware wiring.

mod config;

pub use config::{app_config_from_env, AppConfig, AppConfigError};

use std::net::SocketAddr;

use actix_session::config::PersistentSession;
use actix_session::storage::SessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::posts::{create_post, delete_post, get_post, list_posts, update_post};
use backend::inbound::http::session_config::SessionSettings;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{
    change_password, forgot_password, login, logout, me, register,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Sessions are effectively permanent; explicit logout is the expected exit.
const SESSION_TTL_DAYS: i64 = 3650;

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    /// Cookie and signing-key settings.
    pub session: SessionSettings,
    /// Socket address to bind to.
    pub bind_addr: SocketAddr,
    /// Handler dependency bundle.
    pub state: HttpState,
}

struct AppDependencies<S: SessionStore> {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    store: S,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
    cookie_name: String,
}

fn build_app<S: SessionStore + 'static>(
    deps: AppDependencies<S>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        store,
        key,
        cookie_secure,
        same_site,
        cookie_name,
    } = deps;

    let session = SessionMiddleware::builder(store, key)
        .cookie_name(cookie_name)
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(CookieDuration::days(SESSION_TTL_DAYS)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(register)
        .service(login)
        .service(logout)
        .service(forgot_password)
        .service(change_password)
        .service(me)
        .service(list_posts)
        .service(get_post)
        .service(create_post)
        .service(update_post)
        .service(delete_post);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state,
/// configuration, and session store factory.
///
/// The factory is invoked once per worker; server-backed stores are cheap
/// clones while the cookie store used in development is rebuilt.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server<S, F>(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    store_factory: F,
) -> std::io::Result<Server>
where
    S: SessionStore + 'static,
    F: Fn() -> S + Send + Clone + 'static,
{
    let ServerConfig {
        session,
        bind_addr,
        state,
    } = config;
    let SessionSettings {
        key,
        cookie_secure,
        same_site,
        cookie_name,
    } = session;

    let server_health_state = health_state.clone();
    let http_state = web::Data::new(state);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            store: store_factory(),
            key: key.clone(),
            cookie_secure,
            same_site,
            cookie_name: cookie_name.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
