use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup: every screening run snapshots what it needs from here.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
