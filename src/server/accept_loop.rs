// Accept loop module
// Hands accepted connections to local tasks until shutdown is signalled

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::ShutdownSignal;
use crate::config::AppState;
use crate::logger;

/// Accept connections on `listener` until `shutdown` fires.
///
/// Must run inside a `LocalSet`; connections are served with `spawn_local`.
/// In-flight connections are left to finish on their own.
#[allow(clippy::ignored_unit_patterns)]
pub async fn run_until_shutdown(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: ShutdownSignal,
) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            _ = shutdown.wait() => break,
        }
    }

    drop(listener);
    logger::log_shutdown(active_connections.load(Ordering::SeqCst));
}
