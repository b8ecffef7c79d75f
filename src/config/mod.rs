// Configuration module entry point
// Loads layered configuration and builds the runtime state

mod state;
mod types;

use config::builder::DefaultState;
use config::ConfigBuilder;
use std::net::SocketAddr;

use crate::cafe::CafeDirectory;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig, RoutesConfig,
    ServerConfig,
};

/// Environment variable prefix, e.g. `CAFE_SERVER__PORT=9000`
const ENV_PREFIX: &str = "CAFE";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// A missing file is not an error; defaults and environment still apply
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::with_defaults(
            config::Config::builder()
                .add_source(config::File::with_name(config_path).required(false))
                .add_source(
                    config::Environment::with_prefix(ENV_PREFIX)
                        .prefix_separator("_")
                        .separator("__"),
                ),
        )
    }

    /// Apply built-in defaults on top of `builder` and deserialize
    pub(crate) fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        let settings = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.backlog", 128)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "cafe-server/0.1")?
            .set_default("http.enable_cors", false)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Worker thread count for the runtime, `None` for the runtime default
    pub fn worker_threads(&self) -> Result<Option<usize>, String> {
        match self.server.workers {
            Some(0) => Err("Invalid server.workers: must be at least 1".to_string()),
            workers => Ok(workers),
        }
    }

    /// Cafe directory from the `cafes` table, or the built-in one
    ///
    /// The loader lowercases table keys, so city keys arrive lowercased.
    pub fn directory(&self) -> CafeDirectory {
        self.cafes
            .as_ref()
            .map_or_else(CafeDirectory::builtin, |cities| {
                CafeDirectory::new(cities.clone())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> Config {
        Config::with_defaults(
            config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::with_defaults(config::Config::builder()).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.backlog, 128);
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.routes.health.enabled);
        assert_eq!(cfg.routes.health.liveness_path, "/healthz");
        assert!(cfg.cafes.is_none());
        assert_eq!(cfg.directory(), CafeDirectory::builtin());
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_file_overrides() {
        let cfg = from_toml(
            r#"
            [server]
            port = 9090
            workers = 2

            [logging]
            access_log = false
            access_log_format = "json"

            [routes.health]
            enabled = false
            "#,
        );
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.workers, Some(2));
        assert!(!cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "json");
        assert!(!cfg.routes.health.enabled);
    }

    #[test]
    fn test_worker_threads() {
        let cfg = Config::with_defaults(config::Config::builder()).unwrap();
        assert_eq!(cfg.worker_threads(), Ok(None));

        let cfg = from_toml("[server]\nworkers = 4");
        assert_eq!(cfg.worker_threads(), Ok(Some(4)));

        let cfg = from_toml("[server]\nworkers = 0");
        assert!(cfg.worker_threads().is_err());
    }

    #[test]
    fn test_cafes_table() {
        let cfg = from_toml(
            r#"
            [[cafes.tver]]
            name = "Волжский берег"
            address = "Набережная, 3"

            [[cafes.tver]]
            name = "Пельменная"
            "#,
        );
        let dir = cfg.directory();
        assert_eq!(dir.cities(), vec!["tver"]);
        let cafes = dir.cafes("tver").unwrap();
        assert_eq!(cafes[0].name, "Волжский берег");
        assert_eq!(cafes[0].address.as_deref(), Some("Набережная, 3"));
        assert_eq!(cafes[1].name, "Пельменная");
        assert!(!dir.contains_city("moscow"));
    }

    #[test]
    fn test_cafes_city_keys_lowercased() {
        let cfg = from_toml(
            r#"
            [[cafes.Tver]]
            name = "Волжский берег"
            "#,
        );
        let dir = cfg.directory();
        assert_eq!(dir.cities(), vec!["tver"]);
        assert!(!dir.contains_city("Tver"));
        assert_eq!(
            crate::cafe::lookup(&dir, Some("city=tver")).as_deref(),
            Ok("Волжский берег")
        );
    }

    #[test]
    fn test_invalid_address() {
        let cfg = from_toml(
            r#"
            [server]
            host = "not an address"
            "#,
        );
        assert!(cfg.get_socket_addr().is_err());
    }
}
