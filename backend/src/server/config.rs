//! Runtime configuration for infrastructure endpoints.
//!
//! Parsed from the environment through the same `mockable::Env` abstraction
//! as the session settings: strict in release builds, warn-and-default in
//! debug builds.

use std::net::SocketAddr;

use backend::inbound::http::session_config::BuildMode;
use backend::outbound::email::SmtpConfig;
use mockable::Env;
use tracing::warn;

const BIND_ADDR_ENV: &str = "BIND_ADDR";
const BIND_ADDR_DEFAULT: &str = "0.0.0.0:8080";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const REDIS_URL_ENV: &str = "REDIS_URL";
const WEB_ORIGIN_ENV: &str = "PUBLIC_WEB_ORIGIN";
const WEB_ORIGIN_DEFAULT: &str = "http://localhost:3000";
const SMTP_HOST_ENV: &str = "SMTP_HOST";
const SMTP_USERNAME_ENV: &str = "SMTP_USERNAME";
const SMTP_PASSWORD_ENV: &str = "SMTP_PASSWORD";
const SMTP_FROM_ENV: &str = "SMTP_FROM";

/// Infrastructure endpoints and related settings.
#[derive(Debug)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection URL; absent means in-memory stores (debug only).
    pub database_url: Option<String>,
    /// Redis connection URL for sessions and reset tokens; absent means
    /// in-memory stand-ins (debug only).
    pub redis_url: Option<String>,
    /// Base URL of the web frontend used in password-reset links.
    pub web_origin: String,
    /// SMTP settings; absent means reset e-mails are logged only.
    pub smtp: Option<SmtpConfig>,
}

/// Errors raised while validating runtime configuration.
#[derive(thiserror::Error, Debug)]
pub enum AppConfigError {
    /// A variable is present but cannot be parsed.
    #[error("invalid value for {name}='{value}': {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Parse failure description.
        reason: String,
    },
    /// A variable required in release builds is missing.
    #[error("missing required environment variable in release builds: {name}")]
    Missing {
        /// Variable name.
        name: &'static str,
    },
    /// SMTP was partially configured.
    #[error("incomplete SMTP configuration: {name} is required once SMTP_HOST is set")]
    IncompleteSmtp {
        /// Missing variable name.
        name: &'static str,
    },
}

/// Build the runtime configuration from environment variables.
pub fn app_config_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<AppConfig, AppConfigError> {
    let bind_raw = env
        .string(BIND_ADDR_ENV)
        .unwrap_or_else(|| BIND_ADDR_DEFAULT.to_owned());
    let bind_addr: SocketAddr = bind_raw.parse().map_err(|err| AppConfigError::Invalid {
        name: BIND_ADDR_ENV,
        value: bind_raw.clone(),
        reason: format!("{err}"),
    })?;

    let database_url = backing_url(env, mode, DATABASE_URL_ENV)?;
    let redis_url = backing_url(env, mode, REDIS_URL_ENV)?;

    let web_origin = env
        .string(WEB_ORIGIN_ENV)
        .unwrap_or_else(|| WEB_ORIGIN_DEFAULT.to_owned());

    let smtp = smtp_from_env(env)?;

    Ok(AppConfig {
        bind_addr,
        database_url,
        redis_url,
        web_origin,
        smtp,
    })
}

fn backing_url<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
) -> Result<Option<String>, AppConfigError> {
    match env.string(name) {
        Some(url) => Ok(Some(url)),
        None if mode == BuildMode::Debug => {
            warn!(name, "backing store URL not set; falling back to in-memory (dev only)");
            Ok(None)
        }
        None => Err(AppConfigError::Missing { name }),
    }
}

fn smtp_from_env<E: Env>(env: &E) -> Result<Option<SmtpConfig>, AppConfigError> {
    let Some(host) = env.string(SMTP_HOST_ENV) else {
        return Ok(None);
    };
    let require = |name: &'static str| {
        env.string(name)
            .ok_or(AppConfigError::IncompleteSmtp { name })
    };
    Ok(Some(SmtpConfig {
        host,
        username: require(SMTP_USERNAME_ENV)?,
        password: require(SMTP_PASSWORD_ENV)?,
        from: require(SMTP_FROM_ENV)?,
    }))
}
