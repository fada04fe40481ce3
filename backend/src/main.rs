//! Backend entry point: wires configuration, adapters, and the HTTP server.

mod server;

use std::sync::Arc;

use actix_session::storage::{CookieSessionStore, RedisSessionStore};
use actix_web::web;
use mockable::DefaultEnv;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::domain::ports::{Mailer, PostRepository, ResetTokenStore, UserRepository};
use backend::domain::AuthService;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{session_settings_from_env, BuildMode};
use backend::inbound::http::state::HttpState;
use backend::outbound::email::{LogMailer, SmtpMailer};
use backend::outbound::memory::{
    InMemoryPostRepository, InMemoryResetTokenStore, InMemoryUserRepository,
};
use backend::outbound::persistence::{
    DbPool, DieselPostRepository, DieselUserRepository, PoolConfig,
};
use backend::outbound::security::Argon2PasswordHasher;
use backend::outbound::token_store::RedisResetTokenStore;

use server::{app_config_from_env, AppConfig, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::default();
    let mode = BuildMode::from_debug_assertions();
    let session_settings = session_settings_from_env(&env, mode)
        .map_err(|e| std::io::Error::other(format!("session configuration: {e}")))?;
    let config = app_config_from_env(&env, mode)
        .map_err(|e| std::io::Error::other(format!("runtime configuration: {e}")))?;

    let (users, posts) = build_repositories(&config).await?;
    let mailer = build_mailer(&config)?;
    let health_state = web::Data::new(HealthState::new());
    let hasher = Arc::new(Argon2PasswordHasher::new());

    match config.redis_url.clone() {
        Some(redis_url) => {
            let reset_tokens: Arc<dyn ResetTokenStore> = Arc::new(
                RedisResetTokenStore::connect(&redis_url)
                    .await
                    .map_err(|e| std::io::Error::other(format!("token store: {e}")))?,
            );
            let auth = AuthService::new(users, reset_tokens, hasher, mailer, config.web_origin.clone());
            let state = HttpState::new(Arc::new(auth), posts);

            let session_store = RedisSessionStore::new(redis_url)
                .await
                .map_err(|e| std::io::Error::other(format!("redis session store: {e}")))?;
            let server_config = ServerConfig {
                session: session_settings,
                bind_addr: config.bind_addr,
                state,
            };
            server::create_server(health_state, server_config, move || session_store.clone())?
                .await
        }
        None => {
            warn!("REDIS_URL not set; sessions and reset tokens are in-memory (dev only)");
            let reset_tokens: Arc<dyn ResetTokenStore> = Arc::new(InMemoryResetTokenStore::new());
            let auth = AuthService::new(users, reset_tokens, hasher, mailer, config.web_origin.clone());
            let state = HttpState::new(Arc::new(auth), posts);

            let server_config = ServerConfig {
                session: session_settings,
                bind_addr: config.bind_addr,
                state,
            };
            server::create_server(health_state, server_config, CookieSessionStore::default)?
                .await
        }
    }
}

async fn build_repositories(
    config: &AppConfig,
) -> std::io::Result<(Arc<dyn UserRepository>, Arc<dyn PostRepository>)> {
    match &config.database_url {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url.clone()))
                .await
                .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;
            Ok((
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselPostRepository::new(pool)),
            ))
        }
        None => {
            warn!("DATABASE_URL not set; users and posts are in-memory (dev only)");
            Ok((
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryPostRepository::new()),
            ))
        }
    }
}

fn build_mailer(config: &AppConfig) -> std::io::Result<Arc<dyn Mailer>> {
    match config.smtp.clone() {
        Some(smtp) => Ok(Arc::new(
            SmtpMailer::new(smtp)
                .map_err(|e| std::io::Error::other(format!("smtp transport: {e}")))?,
        )),
        None => {
            warn!("SMTP not configured; reset emails are logged only");
            Ok(Arc::new(LogMailer))
        }
    }
}
