//! CLI administration tool for tinyurl.
//!
//! Provides database diagnostics and direct shorten/resolve operations
//! without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show record count and index status, creating the index if missing
//! cargo run --bin admin -- db info
//!
//! # Shorten a URL
//! cargo run --bin admin -- url shorten https://www.example.com/x
//!
//! # Resolve a short code
//! cargo run --bin admin -- url resolve HH2tynxpYA
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see [`tinyurl::config`]); only the database settings,
//! `BASE_URL` and `URL_TTL_SECONDS` are used. The cache is never touched.

use tinyurl::application::services::UrlService;
use tinyurl::config::{self, Config};
use tinyurl::domain::repositories::UrlRepository;
use tinyurl::infrastructure::cache::NullCache;
use tinyurl::infrastructure::persistence::PgUrlRepository;
use tinyurl::server::connect_database;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinyurl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Shorten or resolve URLs directly against the database
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show record count and index status
    Info,
}

/// URL subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Create (or fetch) the short code for a URL
    Shorten {
        /// URL to shorten, with or without scheme
        url: String,
    },

    /// Look up the URL behind a short code
    Resolve {
        /// 10-character short code
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_database(&config).await?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Url { action } => handle_url_action(action, &config, pool).await?,
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let repo = PgUrlRepository::new(Arc::new(pool.clone()));
            let count = repo.count().await?;
            let had_index = repo.has_short_code_index().await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  URLs:       {}",
                count.to_string().bright_green().bold()
            );

            if had_index {
                println!("  Index:      {}", "present".green());
            } else {
                repo.ensure_indexes().await?;
                println!("  Index:      {}", "created".yellow());
            }
            println!();
        }
    }

    Ok(())
}

/// Runs shorten/resolve through the orchestrator with caching disabled.
async fn handle_url_action(action: UrlAction, config: &Config, pool: PgPool) -> Result<()> {
    let repo = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let service = UrlService::new(repo, Arc::new(NullCache::new()), config.service_settings()?);

    match action {
        UrlAction::Shorten { url } => {
            let record = service.shorten(&url).await?;

            println!("{}", "✅ Short link ready".green().bold());
            println!();
            println!("  Code:     {}", record.short_code.bright_white().bold());
            println!(
                "  Link:     {}",
                service.short_link(&record.short_code).bright_cyan()
            );
            println!("  Target:   {}", record.original_url);
            println!("  Expires:  {}", record.expires_at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        UrlAction::Resolve { code } => match service.resolve(&code).await {
            Ok(record) => {
                println!("  {} -> {}", code.bright_white().bold(), record.original_url.bright_cyan());
                println!(
                    "  Created: {}",
                    record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
            Err(tinyurl::AppError::NotFound { .. }) => {
                println!("{}", format!("❌ Code '{}' not found", code).red());
            }
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}
