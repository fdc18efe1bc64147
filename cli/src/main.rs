//! Companies service CLI server
//!
//! ```sh
//! # Run with default config (~/.config/companies-service/config.toml)
//! companies-service
//!
//! # Custom config path
//! companies-service --config /etc/companies-service/config.toml
//!
//! # Override the port
//! companies-service --port 9000
//!
//! # Validate config without starting
//! companies-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use companies_service::config::AppConfig;
use companies_service::server::{init_tracing, ServerHandle, ServerOptions};

/// REST service for company records.
#[derive(Parser, Debug)]
#[command(
    name = "companies-service",
    version,
    about = "Company records over REST with JWT-protected mutations",
    long_about = "Companies service: CRUD over company records, user registration \
                  and sign in, change events on every mutation.\n\n\
                  Default config: ~/.config/companies-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "COMPANIES_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(companies_service::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(e.into());
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Token TTL   : {} min", config.security.token_ttl_minutes);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
