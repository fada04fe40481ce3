//! Forum backend library modules.
//!
//! A session-authenticated web backend for a small forum application:
//! account registration and login backed by Redis sessions, password reset
//! via e-mailed single-use tokens, and post CRUD backed by PostgreSQL.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, use-cases,
//! and ports; `inbound` adapts HTTP requests onto the domain; `outbound`
//! implements the ports against PostgreSQL, Redis, SMTP, and in-memory
//! stand-ins for development.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
