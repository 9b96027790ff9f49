//! Probe server runner (default binary).
//!
//! Serves the JSON line protocol over TCP, or over stdin/stdout when
//! `BUBBLE_AI_STDIO` is set. Logs go to stderr; filter with `RUST_LOG`.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use bubble_shooter::adapter::{run_server, run_stdio, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(?config, "starting probe");

    if config.stdio {
        run_stdio(config).await
    } else {
        run_server(config, None).await
    }
}
