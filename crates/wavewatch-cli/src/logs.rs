//! Read-only network log query handlers.

use clap::Subcommand;

/// Sub-commands available under `logs`.
#[derive(Debug, Subcommand)]
pub enum LogsCommands {
    /// Show the most recently recorded network logs
    List {
        /// Maximum number of logs to show
        #[arg(long, default_value = "20")]
        limit: i64,
        /// Number of newest logs to skip
        #[arg(long, default_value = "0")]
        offset: i64,
    },
}

pub(crate) async fn run(pool: &sqlx::PgPool, command: LogsCommands) -> anyhow::Result<()> {
    match command {
        LogsCommands::List { limit, offset } => run_logs_list(pool, limit, offset).await,
    }
}

/// Print a table of stored network logs, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
async fn run_logs_list(pool: &sqlx::PgPool, limit: i64, offset: i64) -> anyhow::Result<()> {
    let total = wavewatch_db::count_network_logs(pool).await?;
    let rows = wavewatch_db::list_network_logs(pool, limit.max(1), offset.max(0)).await?;

    if rows.is_empty() {
        println!("no network logs found ({total} stored)");
        return Ok(());
    }

    println!(
        "{:<18}{:<16}{:<24}{:>10}{:>10}{:>9}{:>8}",
        "RECORDED", "CARRIER", "LOCATION", "DOWN", "UP", "LAT", "SIGNAL"
    );
    for row in &rows {
        println!(
            "{:<18}{:<16}{:<24}{:>10}{:>10}{:>9}{:>8}",
            row.recorded_at.format("%Y-%m-%d %H:%M"),
            truncate(&row.carrier, 15),
            truncate(&row.location, 23),
            metric(row.download_speed),
            metric(row.upload_speed),
            metric(row.latency),
            metric(row.signal_strength),
        );
    }
    println!("showing {} of {total} logs", rows.len());

    Ok(())
}

fn metric<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let mut out: String = value.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_renders_missing_values_as_dash() {
        assert_eq!(metric::<f64>(None), "-");
        assert_eq!(metric(Some(42)), "42");
    }

    #[test]
    fn truncate_keeps_short_values_and_marks_cut_ones() {
        assert_eq!(truncate("Acme", 15), "Acme");
        assert_eq!(truncate("Downtown Seattle", 8), "Downtow~");
    }
}
