use std::path::PathBuf;

use clap::{Parser, Subcommand};
use property_sync_cli::commands::{import_cmd, schema_cmd, sync_cmd};
use property_sync_cli::config::DEFAULT_CONFIG_FILE;
use property_sync_cli::errors::Error;
use property_sync_cli::state::DEFAULT_STATE_FILE;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// org-props: Keep GitHub organization custom properties in sync with a declaration file
#[derive(Parser)]
#[command(name = "org-props")]
#[command(
    about = "Keep GitHub organization custom properties in sync with a declaration file",
    long_about = None
)]
struct Cli {
    /// Path to the declaration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Path to the state file
    #[arg(long, global = true, default_value = DEFAULT_STATE_FILE)]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the changes apply would make
    Plan,

    /// Create, update and delete properties so GitHub matches the declaration file
    Apply,

    /// Update the state file from GitHub
    Refresh,

    /// Start tracking an existing property, e.g. `acme:environment`
    Import {
        /// Identifier in the form <organization>:<property_name>
        id: String,
    },

    /// Delete every tracked property
    Destroy,

    /// Describe the attributes of a property declaration
    Schema {
        /// Output format (json or pretty)
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Show the CLI version
    Version,
}

async fn run(cli: &Cli) -> Result<(), Error> {
    match &cli.command {
        Commands::Plan => sync_cmd::execute_plan(&cli.config, &cli.state).await,
        Commands::Apply => sync_cmd::execute_apply(&cli.config, &cli.state).await,
        Commands::Refresh => sync_cmd::execute_refresh(&cli.config, &cli.state).await,
        Commands::Import { id } => import_cmd::execute_import(&cli.config, &cli.state, id).await,
        Commands::Destroy => sync_cmd::execute_destroy(&cli.config, &cli.state).await,
        Commands::Schema { format } => schema_cmd::execute(format),
        Commands::Version => {
            println!(
                "org-props version {}",
                option_env!("ORG_PROPS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("ORG_PROPS_LOG"))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli).await {
        error!("Error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
