//! Shared HTTP adapter state.
//!
//! Handlers receive the persistence gateway through `actix_web::web::Data`
//! rather than any ambient lookup, so they stay testable without a live
//! database.

use std::sync::Arc;

use crate::domain::ports::UserRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Persistence gateway owning the authoritative user records.
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    /// Construct state around a user repository implementation.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}
