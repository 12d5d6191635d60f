//! mu-console - Console test client for the game server
//!
//! Connects to a game server, logs in, selects a character and prints the
//! objects the server reports in scope.

mod config;
mod connection;
mod handlers;
mod output;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use connection::Connection;
use handlers::{ClientOptions, GameClient};
use output::{Console, StdConsole};
use std::net::Shutdown;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDRESS: &str = "127.0.0.1:55901";

#[derive(Parser, Debug)]
#[command(name = "mu-console")]
#[command(version)]
#[command(about = "Logs into a game server and prints what it reports", long_about = None)]
struct Args {
    /// Game server address as host:port
    #[arg(default_value = DEFAULT_ADDRESS)]
    address: String,

    /// Optional configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => config::Config::load(path)?,
        None => config::Config::default(),
    };

    // Initialize logging; stdout belongs to the console output
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let filter = log_filter(&config.logging.level, &env_directives)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("mu-console v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        info!("Loaded configuration from {:?}", path);
    }

    let address = args.address.clone();
    let connection = tokio::task::spawn_blocking(move || Connection::connect(&address))
        .await
        .context("Connect task failed")?
        .with_context(|| format!("Failed to connect to {}", args.address))?;
    let shutdown = connection
        .shutdown_handle()
        .context("Failed to clone socket handle")?;

    let session = tokio::task::spawn_blocking(move || run_session(connection, &config));

    tokio::select! {
        result = session => {
            result.context("Session task failed")??;
            println!("Connection closed");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, closing connection");
            if let Err(e) = shutdown.shutdown(Shutdown::Both) {
                info!("Socket shutdown failed: {}", e);
            }
            // A pending console prompt keeps the session task blocked
            std::process::exit(0);
        }
    }

    Ok(())
}

/// Filter from the `RUST_LOG` directives; the configured level applies only
/// when they are empty
fn log_filter(level: &str, env_directives: &str) -> Result<EnvFilter> {
    let level = level
        .parse::<Directive>()
        .with_context(|| format!("Invalid log level: {}", level))?;
    Ok(EnvFilter::builder()
        .with_default_directive(level)
        .parse_lossy(env_directives))
}

/// Receive loop: one packet at a time, each handled to completion before
/// the next one is read
fn run_session(mut connection: Connection, config: &config::Config) -> Result<()> {
    let mut console = StdConsole::new(config.output.timestamps);
    let mut client = GameClient::new(ClientOptions {
        client_serial: config.login.client_serial.clone(),
        strict_sequence: config.protocol.strict_sequence,
    });

    client.connected();
    console.line(&format!("Connected to {}", connection.peer_addr()));

    while let Some(packet) = connection
        .read_packet()
        .context("Failed to receive packet")?
    {
        client
            .handle_packet(&packet, &mut connection, &mut console)
            .context("Failed to handle packet")?;
    }

    info!(
        state = ?client.state(),
        player_id = ?client.session().player_id(),
        "Server closed the connection"
    );
    Ok(())
}
