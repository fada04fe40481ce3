//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the domain use-cases and ports, and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::PostRepository;
use crate::domain::AuthService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account and session flows.
    pub auth: Arc<AuthService>,
    /// Post persistence.
    pub posts: Arc<dyn PostRepository>,
}

impl HttpState {
    /// Bundle the given use-cases for handler injection.
    pub fn new(auth: Arc<AuthService>, posts: Arc<dyn PostRepository>) -> Self {
        Self { auth, posts }
    }
}
