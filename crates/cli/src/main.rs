//! CYNA CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! cyna-cli migrate
//!
//! # Create a back-office user
//! cyna-cli admin create -e admin@cyna.io -p <password> -f Ada -l Lovelace -r super_admin
//!
//! # Seed demo catalog and content
//! cyna-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create` - Create back-office users
//! - `seed` - Seed database with demo data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cyna-cli")]
#[command(author, version, about = "CYNA CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage back-office users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed database with demo catalog and content
    Seed,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new back-office user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (min 8 characters)
        #[arg(short, long)]
        password: String,

        /// First name
        #[arg(short, long)]
        first_name: String,

        /// Last name
        #[arg(short, long)]
        last_name: String,

        /// Role (`client`, `support`, `admin`, `super_admin`)
        #[arg(short, long, default_value = "admin")]
        role: String,
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
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                password,
                first_name,
                last_name,
                role,
            } => {
                commands::admin::create_user(&email, &password, &first_name, &last_name, &role)
                    .await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
