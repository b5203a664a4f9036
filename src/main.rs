use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kabar::backend::BackendClient;
use kabar::config::Config;
use kabar::web::DashboardServer;

#[derive(Parser)]
#[command(
    name = "kabar",
    version,
    about = "Server-rendered dashboard for news sentiment analytics",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Configuration file (TOML); environment variables are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard server
    Serve {
        /// Override the bind address (host:port)
        #[arg(short, long)]
        bind: Option<String>,

        /// Override the backend API base URL
        #[arg(long)]
        backend_url: Option<String>,
    },

    /// Check whether the analytics backend is reachable
    CheckBackend,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    kabar::i18n::set_locale(&config.ui.locale);

    match cli.command {
        Commands::Serve { bind, backend_url } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind.parse()?;
            }
            if let Some(url) = backend_url {
                config.backend.base_url = url;
            }

            serve(config).await?;
        }

        Commands::CheckBackend => {
            check_backend(config).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("kabar=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("kabar=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

async fn serve(config: Config) -> Result<()> {
    let server = DashboardServer::new(config)?;
    println!("{}", server.info().display());

    server
        .start_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

async fn check_backend(config: Config) -> Result<()> {
    let client = BackendClient::new(config.client_config())?;

    println!("Checking backend at {}...", client.base_url());
    if client.health().await {
        println!("Backend is reachable");
        Ok(())
    } else {
        println!("Backend is NOT reachable");
        std::process::exit(1);
    }
}
