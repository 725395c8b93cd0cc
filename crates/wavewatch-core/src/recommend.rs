//! Carrier recommendation engine.
//!
//! Groups network samples by carrier, averages each metric, scores the
//! averages on a 0–100 scale, and ranks carriers best first with a short
//! human-readable justification.

use std::collections::HashMap;

use crate::location::location_matches;
use crate::samples::{NetworkSample, Recommendation};

/// Carriers with fewer samples than this are left out of the ranking.
pub const MIN_SAMPLES: usize = 3;

const DEFAULT_DOWNLOAD: f64 = 0.0;
const DEFAULT_UPLOAD: f64 = 0.0;
const DEFAULT_LATENCY: f64 = 999.0;
const DEFAULT_SIGNAL: f64 = -100.0;

const DOWNLOAD_WEIGHT: f64 = 40.0;
const UPLOAD_WEIGHT: f64 = 20.0;
const LATENCY_WEIGHT: f64 = 25.0;
const SIGNAL_WEIGHT: f64 = 15.0;

/// Mbps at which the download sub-score saturates.
const DOWNLOAD_FULL_MBPS: f64 = 100.0;
/// Mbps at which the upload sub-score saturates.
const UPLOAD_FULL_MBPS: f64 = 50.0;
/// Latency (ms) at which the latency sub-score reaches zero.
const LATENCY_ZERO_MS: f64 = 200.0;
/// Signal (dBm) at which the signal sub-score reaches zero.
const SIGNAL_FLOOR_DBM: f64 = -120.0;
const SIGNAL_SPAN_DB: f64 = 70.0;

const FALLBACK_REASON: &str = "basic connectivity";

/// Per-carrier accumulation of metric values within one scoring call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CarrierAggregate {
    pub carrier: String,
    pub download_speeds: Vec<f64>,
    pub upload_speeds: Vec<f64>,
    pub latencies: Vec<f64>,
    pub signal_strengths: Vec<f64>,
    /// Every sample seen for the carrier, whether or not its metrics were set.
    pub total_samples: usize,
}

impl CarrierAggregate {
    #[must_use]
    pub fn new(carrier: impl Into<String>) -> Self {
        Self {
            carrier: carrier.into(),
            ..Self::default()
        }
    }

    /// Count the sample and record each metric that is present and non-zero.
    ///
    /// A measured zero is treated the same as a missing value.
    pub fn push(&mut self, sample: &NetworkSample) {
        self.total_samples += 1;

        if let Some(v) = present(sample.download_speed) {
            self.download_speeds.push(v);
        }
        if let Some(v) = present(sample.upload_speed) {
            self.upload_speeds.push(v);
        }
        if let Some(v) = present(sample.latency) {
            self.latencies.push(v);
        }
        if let Some(v) = present(sample.signal_strength.map(f64::from)) {
            self.signal_strengths.push(v);
        }
    }

    /// Mean of each metric, substituting the conservative default for any
    /// metric that never received a value.
    #[must_use]
    pub fn averages(&self) -> CarrierAverages {
        CarrierAverages {
            download_speed: mean(&self.download_speeds).unwrap_or(DEFAULT_DOWNLOAD),
            upload_speed: mean(&self.upload_speeds).unwrap_or(DEFAULT_UPLOAD),
            latency: mean(&self.latencies).unwrap_or(DEFAULT_LATENCY),
            signal_strength: mean(&self.signal_strengths).unwrap_or(DEFAULT_SIGNAL),
        }
    }
}

/// Unrounded per-carrier metric means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarrierAverages {
    pub download_speed: f64,
    pub upload_speed: f64,
    pub latency: f64,
    pub signal_strength: f64,
}

/// The four weighted components of a carrier score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub download: f64,
    pub upload: f64,
    pub latency: f64,
    pub signal: f64,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.download + self.upload + self.latency + self.signal
    }
}

/// Weighted sub-scores for a set of averages.
///
/// Each normalized ratio is held to `[0, 1]`, so the components never exceed
/// 40/20/25/15 and the total stays within `[0, 100]`.
#[must_use]
pub fn score_breakdown(avg: &CarrierAverages) -> ScoreBreakdown {
    ScoreBreakdown {
        download: unit(avg.download_speed / DOWNLOAD_FULL_MBPS) * DOWNLOAD_WEIGHT,
        upload: unit(avg.upload_speed / UPLOAD_FULL_MBPS) * UPLOAD_WEIGHT,
        latency: unit((LATENCY_ZERO_MS - avg.latency) / LATENCY_ZERO_MS) * LATENCY_WEIGHT,
        signal: unit((avg.signal_strength - SIGNAL_FLOOR_DBM) / SIGNAL_SPAN_DB) * SIGNAL_WEIGHT,
    }
}

/// Build the "Recommended for ..." sentence from unrounded averages.
#[must_use]
pub fn recommendation_reason(avg: &CarrierAverages) -> String {
    let mut reasons: Vec<&str> = Vec::with_capacity(3);

    if avg.download_speed > 50.0 {
        reasons.push("excellent download speeds");
    } else if avg.download_speed > 25.0 {
        reasons.push("good download speeds");
    }

    if avg.latency < 50.0 {
        reasons.push("low latency");
    } else if avg.latency < 100.0 {
        reasons.push("moderate latency");
    }

    if avg.signal_strength > -70.0 {
        reasons.push("strong signal coverage");
    } else if avg.signal_strength > -85.0 {
        reasons.push("decent signal coverage");
    }

    if reasons.is_empty() {
        format!("Recommended for {FALLBACK_REASON}")
    } else {
        format!("Recommended for {}", reasons.join(", "))
    }
}

/// Rank carriers from an already location-filtered set of samples.
///
/// Carriers with fewer than [`MIN_SAMPLES`] samples are dropped. The result is
/// sorted by score, highest first; equal scores keep the order in which each
/// carrier first appeared in `samples`.
pub fn recommend_providers<'a, I>(samples: I) -> Vec<Recommendation>
where
    I: IntoIterator<Item = &'a NetworkSample>,
{
    let aggregates = aggregate_by_carrier(samples);
    if aggregates.is_empty() {
        return Vec::new();
    }

    let carrier_count = aggregates.len();
    let mut recommendations: Vec<Recommendation> = aggregates
        .into_iter()
        .filter(|agg| agg.total_samples >= MIN_SAMPLES)
        .map(|agg| to_recommendation(&agg))
        .collect();

    // Stable sort: ties stay in first-seen order.
    recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));

    tracing::debug!(
        carriers = carrier_count,
        ranked = recommendations.len(),
        "scored carrier recommendations"
    );

    recommendations
}

/// Filter `samples` by case-insensitive location substring, then rank.
#[must_use]
pub fn recommend_for_location(samples: &[NetworkSample], location: &str) -> Vec<Recommendation> {
    recommend_providers(
        samples
            .iter()
            .filter(|s| location_matches(location, &s.location)),
    )
}

/// Group samples by exact carrier name, in first-seen order.
///
/// No sample-count threshold is applied here.
pub fn aggregate_by_carrier<'a, I>(samples: I) -> Vec<CarrierAggregate>
where
    I: IntoIterator<Item = &'a NetworkSample>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut aggregates: Vec<CarrierAggregate> = Vec::new();

    for sample in samples {
        let slot = *index.entry(sample.carrier.as_str()).or_insert_with(|| {
            aggregates.push(CarrierAggregate::new(sample.carrier.as_str()));
            aggregates.len() - 1
        });
        aggregates[slot].push(sample);
    }

    aggregates
}

fn to_recommendation(agg: &CarrierAggregate) -> Recommendation {
    let avg = agg.averages();
    let score = score_breakdown(&avg).total();

    Recommendation {
        carrier: agg.carrier.clone(),
        score: round2(score),
        avg_download_speed: round2(avg.download_speed),
        avg_upload_speed: round2(avg.upload_speed),
        avg_latency: round2(avg.latency),
        avg_signal_strength: round2(avg.signal_strength),
        total_samples: agg.total_samples,
        recommendation_reason: recommendation_reason(&avg),
    }
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn unit(ratio: f64) -> f64 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

/// Round to two decimals from the exact binary value, ties to even.
///
/// `{:.2}` formatting is correctly rounded, so 1.125 becomes 1.12 and 2.675
/// (stored just below the tie) becomes 2.67.
fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
#[path = "recommend_test.rs"]
mod tests;
