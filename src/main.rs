use std::sync::Arc;

use nearme_edge::config::{AppState, Config};
use nearme_edge::error::ServerError;
use nearme_edge::logger;
use nearme_edge::server::{self, ShutdownSignal};

/// Config file used when none is given on the command line
const DEFAULT_CONFIG: &str = "config";

fn main() -> Result<(), ServerError> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg.logging)?;

    // Tokio runtime, thread count from `server.workers` when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), ServerError> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(AppState::new(&cfg)?);
    let listener = server::create_reusable_listener(addr)?;

    let shutdown = ShutdownSignal::new();
    server::signal::start_signal_handler(shutdown.clone())?;

    logger::log_server_start(&addr, &cfg, &state.tables);

    // LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::run_until_shutdown(listener, state, shutdown))
        .await;
    Ok(())
}
