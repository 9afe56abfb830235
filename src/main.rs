//! Sysdash Server
//!
//! Run with: cargo run --bin sysdash
//!
//! # Configuration
//!
//! Reads `--config PATH` or the first config file found in the default
//! locations, then applies `SYSDASH_*` environment overrides and finally the
//! command-line flags. `RUST_LOG` takes precedence over the configured level.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use sysdash::{generate_default_config, serve, AppState, Config, LoggingConfig, Renderer, SystemClock};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sysdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analytics dashboard with mock telemetry and an editable system prompt")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Fixed seed for the sample charts
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the dashboard server (default)
    Serve,

    /// Print the default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(Command::Config { output }) = &args.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(seed) = args.seed {
        config.mock.seed = Some(seed);
    }

    init_tracing(&config.logging)?;

    tracing::info!("Starting Sysdash v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        idle_timeout_secs = config.session.idle_timeout_secs,
        max_sessions = config.session.max_sessions,
        "Session store configured"
    );
    if let Some(seed) = config.mock.seed {
        tracing::info!(seed, "Mock data seeded; every render shows the same series");
    }

    let renderer = Renderer::new(Arc::new(SystemClock), config.mock_source());
    let api_config = config.api_config();
    let state = AppState::with_sessions(renderer, api_config.clone(), config.session_config());

    serve(state, &api_config).await?;

    tracing::info!("Sysdash stopped");
    Ok(())
}

/// Install the global subscriber from the logging config
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("sysdash={0},tower_http={0}", logging.level).into()
    });

    let (writer, ansi) = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            (BoxMakeWriter::new(Arc::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stdout), true),
    };

    let registry = tracing_subscriber::registry().with(filter);

    match logging.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init(),
        _ => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .init(),
    }

    Ok(())
}
