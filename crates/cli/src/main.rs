//! CJ Ice Shopz CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! iceshopz-cli migrate
//!
//! # Seed the database (admin account, starter catalog, content)
//! iceshopz-cli seed
//!
//! # Seed with a specific admin password
//! iceshopz-cli seed --admin-password 's3cure-pass'
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed database with the starter data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "iceshopz-cli")]
#[command(author, version, about = "CJ Ice Shopz CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with the admin account and starter data
    Seed {
        /// Password for the seeded admin account. Falls back to the
        /// `ICESHOPZ_ADMIN_PASSWORD` environment variable, then to the
        /// development default.
        #[arg(long)]
        admin_password: Option<String>,
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
        Commands::Seed { admin_password } => commands::seed::run(admin_password).await?,
    }
    Ok(())
}
