// Application state module
// Everything a request needs, built once before the server starts

use hyper::header::HeaderValue;
use std::sync::Arc;

use super::types::Config;
use crate::cafe::CafeDirectory;
use crate::logger;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Shared read-only cafe directory
    pub directory: Arc<CafeDirectory>,
    /// Pre-validated `Server` header value
    pub server_header: Option<HeaderValue>,
}

impl AppState {
    /// Create `AppState` with the directory described by `config`
    pub fn new(config: &Config) -> Self {
        Self::with_directory(config, config.directory())
    }

    /// Create `AppState` around an explicit directory
    pub fn with_directory(config: &Config, directory: CafeDirectory) -> Self {
        let server_header = match HeaderValue::from_str(&config.http.server_name) {
            Ok(value) => Some(value),
            Err(e) => {
                logger::log_warning(&format!(
                    "Invalid http.server_name '{}': {e}, Server header disabled",
                    config.http.server_name
                ));
                None
            }
        };

        Self {
            config: config.clone(),
            directory: Arc::new(directory),
            server_header,
        }
    }

    /// Whether per-request access lines are written
    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
