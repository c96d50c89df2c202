//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::BodyRepository;

/// Shared application state passed to all handlers.
///
/// The repository is the only shared resource and it is read-only at
/// request time, so arbitrary concurrent handler execution is safe without
/// further locking.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for catalog reads
    pub repository: Arc<dyn BodyRepository>,
    /// Host/pod identity from the runtime environment, if provided
    pub pod_name: Option<String>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn BodyRepository>, pod_name: Option<String>) -> Self {
        Self {
            repository,
            pod_name,
        }
    }

    /// Read the host/pod identity from the `POD_NAME` environment variable.
    pub fn from_env(repository: Arc<dyn BodyRepository>) -> Self {
        Self::new(repository, std::env::var("POD_NAME").ok())
    }
}
