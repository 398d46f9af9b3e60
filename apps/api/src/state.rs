use std::sync::Arc;

use crate::analysis::catalog::RoleCatalog;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only role catalog, loaded once at startup.
    pub catalog: Arc<RoleCatalog>,
}
