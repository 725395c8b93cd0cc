//! Carrier ranking commands: database-backed `recommend` and offline `score`.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use wavewatch_core::{NetworkSample, Recommendation, ScoreBreakdown};

/// Rank carriers for `location` using every stored sample whose location
/// contains it.
///
/// # Errors
///
/// Returns an error if the location is blank, the query fails, or JSON
/// serialization fails.
pub(crate) async fn run_recommend(
    pool: &sqlx::PgPool,
    location: &str,
    json: bool,
) -> anyhow::Result<()> {
    if location.trim().is_empty() {
        anyhow::bail!("--location must not be blank");
    }

    let samples = wavewatch_db::list_samples_for_location(pool, location).await?;
    let recommendations = wavewatch_core::recommend_providers(&samples);
    tracing::debug!(
        location,
        samples = samples.len(),
        carriers = recommendations.len(),
        "ranked carriers from database"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else if recommendations.is_empty() {
        println!(
            "no carrier has {} or more samples for '{location}' ({} samples matched)",
            wavewatch_core::MIN_SAMPLES,
            samples.len()
        );
    } else {
        print!("{}", RankingTable(&recommendations));
    }

    Ok(())
}

/// Rank carriers from a JSON file of samples.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// samples.
pub(crate) fn run_score(input: &Path, location: &str, explain: bool) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let samples: Vec<NetworkSample> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of samples", input.display()))?;

    let recommendations = wavewatch_core::recommend_for_location(&samples, location);

    if recommendations.is_empty() {
        println!(
            "no carrier has {} or more matching samples ({} samples read)",
            wavewatch_core::MIN_SAMPLES,
            samples.len()
        );
        return Ok(());
    }

    print!("{}", RankingTable(&recommendations));

    if explain {
        let matching = wavewatch_core::filter_by_location(&samples, location);
        let aggregates = wavewatch_core::aggregate_by_carrier(matching);
        println!();
        for rec in &recommendations {
            if let Some(agg) = aggregates.iter().find(|a| a.carrier == rec.carrier) {
                let breakdown = wavewatch_core::score_breakdown(&agg.averages());
                println!("{}", explain_line(&rec.carrier, &breakdown));
            }
        }
    }

    Ok(())
}

/// Column-aligned ranking, one row per carrier, best first.
struct RankingTable<'a>(&'a [Recommendation]);

impl fmt::Display for RankingTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<4}{:<16}{:>8}{:>10}{:>10}{:>9}{:>9}{:>9}  REASON",
            "#", "CARRIER", "SCORE", "DOWN", "UP", "LAT", "SIGNAL", "SAMPLES"
        )?;
        for (rank, rec) in self.0.iter().enumerate() {
            writeln!(
                f,
                "{:<4}{:<16}{:>8.2}{:>10.2}{:>10.2}{:>9.2}{:>9.2}{:>9}  {}",
                rank + 1,
                rec.carrier,
                rec.score,
                rec.avg_download_speed,
                rec.avg_upload_speed,
                rec.avg_latency,
                rec.avg_signal_strength,
                rec.total_samples,
                rec.recommendation_reason,
            )?;
        }
        Ok(())
    }
}

fn explain_line(carrier: &str, breakdown: &ScoreBreakdown) -> String {
    format!(
        "{carrier}: download {:.2}/40 + upload {:.2}/20 + latency {:.2}/25 + signal {:.2}/15 = {:.2}",
        breakdown.download,
        breakdown.upload,
        breakdown.latency,
        breakdown.signal,
        breakdown.total(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommendation(carrier: &str, score: f64) -> Recommendation {
        Recommendation {
            carrier: carrier.to_string(),
            score,
            avg_download_speed: 90.0,
            avg_upload_speed: 40.0,
            avg_latency: 20.0,
            avg_signal_strength: -60.0,
            total_samples: 3,
            recommendation_reason: "Recommended for low latency".to_string(),
        }
    }

    #[test]
    fn ranking_table_numbers_rows_in_rank_order() {
        let recs = [recommendation("A", 87.36), recommendation("B", 10.64)];
        let table = RankingTable(&recs).to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('#'));
        assert!(lines[1].starts_with("1   A"));
        assert!(lines[1].contains("87.36"));
        assert!(lines[2].starts_with("2   B"));
        assert!(lines[2].ends_with("Recommended for low latency"));
    }

    #[test]
    fn ranking_table_for_no_carriers_is_header_only() {
        let table = RankingTable(&[]).to_string();
        assert_eq!(table.lines().count(), 1);
        assert!(table.ends_with("REASON\n"));
    }

    #[test]
    fn explain_line_shows_each_component_and_total() {
        let breakdown = ScoreBreakdown {
            download: 36.0,
            upload: 16.0,
            latency: 22.5,
            signal: 12.857_142,
        };
        let line = explain_line("A", &breakdown);
        assert_eq!(
            line,
            "A: download 36.00/40 + upload 16.00/20 + latency 22.50/25 + signal 12.86/15 = 87.36"
        );
    }

    #[test]
    fn run_score_reports_missing_file() {
        let err = run_score(Path::new("/nonexistent/wavewatch-samples.json"), "", false)
            .expect_err("missing file should fail");
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn run_score_accepts_sample_file() {
        let path = std::env::temp_dir().join(format!(
            "wavewatch-score-{}.json",
            std::process::id()
        ));
        let samples: Vec<NetworkSample> = (0..3)
            .map(|_| {
                let mut s = NetworkSample::new("Acme", "Downtown");
                s.download_speed = Some(60.0);
                s
            })
            .collect();
        std::fs::write(&path, serde_json::to_string(&samples).expect("json")).expect("write");

        let result = run_score(&path, "down", true);
        std::fs::remove_file(&path).ok();
        assert!(result.is_ok());
    }
}
