//! Inventory seed - database seeding tool
//!
//! Running without arguments resets the inventory collections and inserts
//! the demo fixture. Exits with status 0 on success and 1 on any failure.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory_seed::{
    config::{AppConfig, LoggingConfig},
    services::{runner, SeedOptions},
};

#[derive(Debug, Parser)]
#[command(name = "inventory-seed", version, about = "Reset and seed the inventory database")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    seed: SeedArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reset the collections and insert the fixture (default)
    Seed(SeedArgs),
    /// Delete every record of the five collections
    Reset {
        /// Run even if the environment is not in seed.allowed_environments
        #[arg(long)]
        force: bool,
    },
    /// Check the database against the fixture without modifying it
    Verify {
        /// JSON fixture to verify against instead of the built-in one
        #[arg(long, value_name = "PATH")]
        fixture: Option<PathBuf>,
    },
}

#[derive(Debug, Args, Default)]
struct SeedArgs {
    /// Run even if the environment is not in seed.allowed_environments
    #[arg(long)]
    force: bool,
    /// Reset and insert inside a single transaction
    #[arg(long)]
    transactional: bool,
    /// Seed an in-memory store and leave the database alone
    #[arg(long)]
    dry_run: bool,
    /// JSON fixture to seed instead of the built-in one
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,
}

impl From<SeedArgs> for SeedOptions {
    fn from(args: SeedArgs) -> Self {
        Self {
            force: args.force,
            transactional: args.transactional,
            dry_run: args.dry_run,
            fixture: args.fixture,
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("inventory_seed={},sqlx=warn", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Command::Seed(cli.seed)) {
        Command::Seed(args) => {
            let report = runner::seed(&config, &args.into())
                .await
                .context("Error seeding database")?;
            tracing::info!(
                "Database seeding complete: {} users, {} companies, {} locations, {} products, {} history records",
                report.inserted.users,
                report.inserted.companies,
                report.inserted.locations,
                report.inserted.products,
                report.inserted.histories
            );
        }
        Command::Reset { force } => {
            runner::reset(&config, force)
                .await
                .context("Error resetting database")?;
        }
        Command::Verify { fixture } => {
            runner::verify(&config, fixture.as_ref())
                .await
                .context("Error verifying database")?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);
    tracing::info!(
        "Starting inventory seed v{} (environment: {})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
