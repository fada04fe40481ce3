//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Thin adapters over the domain repository ports, backed by PostgreSQL via
//! `diesel-async` with `bb8` connection pooling. Diesel row structs
//! (`models.rs`) and schema definitions (`schema.rs`) are internal
//! implementation details; all database errors are mapped to the domain's
//! typed persistence errors.

mod diesel_post_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
