//! Premia CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run portal database migrations
//! premia-cli migrate
//!
//! # Seed the billing table with sample data
//! premia-cli seed
//!
//! # Seed, wiping existing rows first
//! premia-cli seed --clear
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the billing table with sample records

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "premia-cli")]
#[command(author, version, about = "Premia billing portal CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the billing table with sample records
    Seed {
        /// Delete existing billing records before seeding
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { clear } => commands::seed::run(clear).await?,
    }
    Ok(())
}
