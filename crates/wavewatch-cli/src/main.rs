mod logs;
mod recommend;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "wavewatch-cli")]
#[command(about = "WaveWatch network telemetry command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Inspect stored network logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
    /// Rank carriers for a location from stored network logs
    Recommend {
        /// Case-insensitive location substring (e.g. "downtown")
        #[arg(long)]
        location: String,
        /// Print the ranking as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Rank carriers from a JSON file of samples without touching the database
    Score {
        /// Path to a JSON array of network samples
        #[arg(long)]
        input: PathBuf,
        /// Case-insensitive location substring; empty matches every sample
        #[arg(long, default_value = "")]
        location: String,
        /// Show the weighted sub-scores behind each carrier's total
        #[arg(long)]
        explain: bool,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("wavewatch-cli: run with --help to list commands");
        return Ok(());
    };

    match command {
        Commands::Db {
            command: DbCommands::Ping,
        } => {
            let pool = connect().await?;
            wavewatch_db::ping(&pool).await?;
            println!("database ok");
        }
        Commands::Db {
            command: DbCommands::Migrate,
        } => {
            let pool = connect().await?;
            let applied = wavewatch_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        Commands::Logs { command } => {
            let pool = connect().await?;
            logs::run(&pool, command).await?;
        }
        Commands::Recommend { location, json } => {
            let pool = connect().await?;
            recommend::run_recommend(&pool, &location, json).await?;
        }
        Commands::Score {
            input,
            location,
            explain,
        } => recommend::run_score(&input, &location, explain)?,
    }

    Ok(())
}

/// Load config and open a pool. Only database-backed commands call this.
async fn connect() -> anyhow::Result<sqlx::PgPool> {
    let config = wavewatch_core::load_app_config()?;
    let pool_config = wavewatch_db::PoolConfig::from_app_config(&config);
    let pool = wavewatch_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests;
