// Server module entry point
// Listener setup, the accept loop and per-connection serving

pub mod accept_loop;
pub mod connection;
pub mod listener;
pub mod signal;

pub use accept_loop::run_until_shutdown;
pub use listener::create_reusable_listener;
pub use signal::ShutdownSignal;
