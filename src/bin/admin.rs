//! CLI administration tool for the DraftMyForms API.
//!
//! Runs catalog and training maintenance directly against the database, without going
//! through the HTTP guards.
//!
//! # Usage
//!
//! ```bash
//! # Rebuild the template catalog
//! cargo run --bin admin -- catalog seed
//!
//! # Show active templates per tier
//! cargo run --bin admin -- catalog stats
//!
//! # Print the weekly training report
//! cargo run --bin admin -- training report
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; only the database settings are required.

use draftmyforms_api::config;
use draftmyforms_api::domain::catalog;
use draftmyforms_api::server::{build_state, connect_pool};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;

/// CLI tool for managing the DraftMyForms backend.
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
    /// Template catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Quality training
    Training {
        #[command(subcommand)]
        action: TrainingAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Delete and regenerate every template
    Seed {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Count active templates per tier
    Stats,
}

#[derive(Subcommand)]
enum TrainingAction {
    /// Aggregate the last seven days of training runs
    Report,
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Catalog { action } => handle_catalog(action, pool, &config).await?,
        Commands::Training { action } => handle_training(action, pool, &config).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_catalog(action: CatalogAction, pool: PgPool, config: &config::Config) -> Result<()> {
    let state = build_state(pool, config)?;

    match action {
        CatalogAction::Seed { yes } => {
            let breakdown = catalog::breakdown();
            println!("{}", "Regenerate template catalog".bright_blue().bold());
            println!();
            println!(
                "  {} styles x {} document types x {} industries = {} templates",
                breakdown.styles.to_string().cyan(),
                breakdown.doc_types.to_string().cyan(),
                breakdown.industries.to_string().cyan(),
                breakdown.expected.to_string().bright_white().bold()
            );
            println!(
                "{}",
                "  Existing templates will be deleted.".yellow()
            );
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Regenerate the catalog?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "Cancelled".red());
                    return Ok(());
                }
            }

            let report = state
                .catalog_service
                .regenerate()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to regenerate catalog: {}", e))?;

            println!();
            println!(
                "  Generated: {}",
                report.total_generated.to_string().bright_green().bold()
            );
            println!(
                "  Inserted:  {}",
                report.inserted.to_string().bright_green().bold()
            );

            if report.errors.is_empty() {
                println!("{}", "Catalog regenerated".green().bold());
            } else {
                for failed in &report.errors {
                    println!(
                        "  {} batch {}: {}",
                        "failed".red(),
                        failed.batch,
                        failed.error.bright_black()
                    );
                }
                println!(
                    "{}",
                    format!("{} batch(es) failed", report.errors.len())
                        .yellow()
                        .bold()
                );
            }
            println!();
        }
        CatalogAction::Stats => {
            println!("{}", "Active templates".bright_blue().bold());
            println!();

            let counts = state
                .catalog_service
                .tier_counts()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count templates: {}", e))?;

            if counts.is_empty() {
                println!("{}", "  No templates found".yellow());
                println!(
                    "  Create them with: {} admin catalog seed",
                    "cargo run --bin".bright_cyan()
                );
                return Ok(());
            }

            let total: i64 = counts.iter().map(|c| c.count).sum();
            for tier in &counts {
                println!(
                    "  {:<10} {}",
                    tier.tier.cyan(),
                    tier.count.to_string().bright_green().bold()
                );
            }
            println!("  {}", "-".repeat(20).bright_black());
            println!("  {:<10} {}", "total", total.to_string().bright_white().bold());
            println!();
        }
    }

    Ok(())
}

async fn handle_training(
    action: TrainingAction,
    pool: PgPool,
    config: &config::Config,
) -> Result<()> {
    let state = build_state(pool, config)?;

    match action {
        TrainingAction::Report => {
            let report = state
                .training_service
                .weekly_report()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to build report: {}", e))?;

            println!("{}", "Weekly training report".bright_blue().bold());
            println!();
            println!("{}", report.to_text());
            println!();

            if report.quality_warning {
                println!(
                    "{}",
                    "Average quality is below 7, review recent failures"
                        .red()
                        .bold()
                );
                println!();
            }
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
                .fetch_one(pool)
                .await?;
            let documents: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM document_history")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Profiles:   {}", profiles.to_string().bright_green());
            println!("  Documents:  {}", documents.to_string().bright_green());
            println!();
        }
    }

    Ok(())
}
