use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use api_gateway::ApiGateway;
use axum::Router;
use clap::{Parser, Subcommand};
use exprcalc_bootstrap::{AppConfig, CliArgs, cancel_on_shutdown, init_logging};
use mimalloc::MiMalloc;
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// ExprCalc Server - evaluates arithmetic expressions over HTTP
#[derive(Parser)]
#[command(name = "exprcalc-server")]
#[command(about = "ExprCalc Server - evaluates arithmetic expressions over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace); `RUST_LOG` takes precedence
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

    let args = CliArgs {
        config: cli.config,
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    if let Some(path) = args.config.as_deref()
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    config.apply_cli_overrides(&args)?;

    let _logging = init_logging(&config.logging, Path::new(&config.server.home_dir))?;

    if args.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("ExprCalc Server starting");

    let service = Arc::new(calculator::Service::default());
    let routes = calculator::register_routes(Router::new(), service)?;

    let gateway = ApiGateway::new(config.api_gateway)?;
    let router = gateway.finalize(routes);

    let cancel = CancellationToken::new();
    let signals = cancel_on_shutdown(cancel.clone());

    let result = gateway.serve(router, cancel).await;
    signals.abort();

    tracing::info!("ExprCalc Server stopped");
    result
}
