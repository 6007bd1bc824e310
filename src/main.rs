use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::net::SocketAddr;
use tradepost::application::Marketplace;
use tradepost::config::{DEFAULT_MAX_FRAME_BYTES, MIN_FRAME_BYTES, ServerConfig};
use tradepost::interfaces::tcp::Server;
use tradepost::telemetry;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:7878")]
    listen: SocketAddr,

    /// Maximum size of a request or response frame, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FRAME_BYTES, value_parser = parse_frame_limit)]
    max_frame_bytes: usize,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn parse_frame_limit(value: &str) -> Result<usize, String> {
    let limit: usize = value.parse().map_err(|e| format!("{e}"))?;
    if limit < MIN_FRAME_BYTES || limit > u32::MAX as usize {
        return Err(format!(
            "must be between {MIN_FRAME_BYTES} and {}",
            u32::MAX
        ));
    }
    Ok(limit)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log_json);

    let config = ServerConfig::default()
        .with_listen_addr(cli.listen)
        .with_max_frame_bytes(cli.max_frame_bytes);

    let server = Server::bind(config, Marketplace::in_memory())
        .await
        .into_diagnostic()?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await
        .into_diagnostic()?;

    Ok(())
}
