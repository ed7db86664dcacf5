//! Obsidian MCP Server entry point.
//!
//! ## Usage
//!
//! ```bash
//! # Standard MCP mode (stdin/stdout)
//! obsidian_mcp_server
//!
//! # JSON-RPC over HTTP on 127.0.0.1:8888/mcp
//! obsidian_mcp_server --transport http --port 8888
//! ```
//!
//! The Obsidian endpoints come from `OBSIDIAN_API_KEY`, `OBSIDIAN_BASE_URL`
//! and `OBSIDIAN_OMNI_SEARCH_BASE_URL` (a `.env` file is honored).

use anyhow::Result;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use obsidian_mcp_server::core::transport::{DEFAULT_HOST, DEFAULT_PORT};
use obsidian_mcp_server::core::{Config, TransportConfig, serve};

/// MCP server for the Obsidian Local REST API and Omnisearch
#[derive(Parser, Debug)]
#[command(name = "obsidian_mcp_server")]
#[command(author, version, about)]
struct Cli {
    /// Transport to serve MCP over: stdio, tcp or http
    #[arg(long, short = 't', env = "MCP_TRANSPORT", default_value = "stdio")]
    transport: String,

    /// Address the network transports bind to
    #[arg(long, env = "MCP_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port for the network transports
    #[arg(long, short = 'p', env = "MCP_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log level (trace, debug, info, warn, error); overrides MCP_LOG_LEVEL
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads its env fallbacks.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("MCP_LOG_LEVEL").ok())
        .unwrap_or_else(|| "info".to_string());
    init_logging(&log_level);

    let mut config = Config::from_env();
    config.logging.level = log_level;
    config.transport = TransportConfig::from_cli(&cli.transport, &cli.host, cli.port)?;

    info!("Starting {} v{}", config.server.name, config.server.version);

    serve(config).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the MCP protocol in STDIO mode.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
