pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod trade;

#[cfg(test)]
mod tests;

pub use api::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use trade::*;

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber. Logs go to stderr so the
/// one-shot commands can print their JSON result on stdout.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
