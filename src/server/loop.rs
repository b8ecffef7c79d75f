// Server loop module
// Accepts connections until shutdown is requested, then waits for in-flight ones

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How often the drain phase re-checks the connection counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop until `shutdown` is notified.
///
/// After the listener is closed, open connections get up to the write
/// timeout to finish before this returns.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => {
                break;
            }
        }
    }

    drop(listener);

    let grace = Duration::from_secs(state.config.performance.write_timeout);
    let remaining = drain_connections(&active_connections, grace).await;
    logger::log_shutdown_complete(remaining);

    Ok(())
}

/// Wait until no connections are active or `grace` elapses; returns the count left
async fn drain_connections(active: &AtomicUsize, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        let count = active.load(Ordering::SeqCst);
        if count == 0 || tokio::time::Instant::now() >= deadline {
            return count;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
