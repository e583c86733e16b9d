use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;

/// Shared application state for the view handlers. Holds no cross-request
/// mutable state; every request builds its own pipeline.
pub struct AppState {
    /// Root directory requested files are resolved against.
    pub log_root: PathBuf,
}

impl AppState {
    /// Create `AppState` from configuration settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Arc<AppState> {
        Arc::new(AppState {
            log_root: settings.log_root.clone(),
        })
    }
}
