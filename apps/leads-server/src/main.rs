mod config;
mod logging;
mod server;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use leads::LeadsModule;

use crate::config::AppConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Leads Server - lead intake form backend and admin API
#[derive(Parser)]
#[command(name = "leads-server")]
#[command(about = "Leads Server - lead intake form backend and admin API")]
#[command(version)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON, secrets redacted) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.to_string_lossy());
    }

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (LEADS__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port, cli.verbose);

    if cli.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(());
    }

    logging::init(&config.logging);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    LeadsModule::new(&config.leads)?;
    println!("Configuration is valid");
    println!("{}", config.to_pretty_json()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Leads Server starting");
    if config.leads.auth.enabled && config.leads.auth.password_matches("password123") {
        tracing::warn!("Admin account uses the default password; set LEADS__LEADS__AUTH__PASSWORD");
    }

    let module = LeadsModule::new(&config.leads)?;
    let router = server::build_router(&config, &module);
    server::serve(&config, router).await
}
