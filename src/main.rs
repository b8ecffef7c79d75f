use std::sync::Arc;
use tokio::sync::Notify;

use cafe_server::config::{AppState, Config};
use cafe_server::{logger, server};

/// Config file used when no path is given (extension resolved by the loader)
const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;

    logger::init(&cfg)?;

    // Build the Tokio runtime, honouring the configured worker count
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.worker_threads()? {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr, cfg.server.backlog)?;

    let state = Arc::new(AppState::new(&cfg));
    logger::log_server_start(&addr, &cfg, &state.directory);

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    server::start_server_loop(listener, state, shutdown).await?;
    logger::log_info("Server stopped");
    Ok(())
}
