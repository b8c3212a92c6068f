//! svcurls - list reachable service URLs of a local Kubernetes cluster

use anyhow::Result;
use clap::{Parser, Subcommand};
use svcurls::cli::{self, ConfigSubcommand, ServiceSubcommand};
use svcurls::error::EXIT_FAILURE;

/// List reachable NodePort service URLs for locally managed Kubernetes clusters
#[derive(Parser, Debug)]
#[command(name = "svcurls", version)]
#[command(about = "List reachable NodePort service URLs for locally managed Kubernetes clusters", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Profile to use instead of the configured active profile
    #[arg(long, short = 'p', global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Work with services in the cluster
    Service {
        #[command(subcommand)]
        subcommand: ServiceSubcommand,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    cli::init_logging(args.debug);
    tracing::debug!("Parsed arguments: {:?}", args);

    match args.command {
        Command::Service { subcommand } => {
            if let Err(e) = cli::handle_service_command(subcommand, args.profile.as_deref()).await
            {
                cli::report_service_error(&e);
                std::process::exit(e.exit_code());
            }
        }
        Command::Config { subcommand } => {
            if let Err(e) = cli::handle_config_command(subcommand) {
                eprintln!("✗ {:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
    }

    Ok(())
}
