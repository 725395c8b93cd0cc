//! Telemetry records consumed by the recommendation engine, the ranked
//! output it produces, and the validated ingest payloads behind them.

use serde::{Deserialize, Serialize};

use crate::CoreError;

const MAX_CARRIER_LEN: usize = 100;
const MAX_LOCATION_LEN: usize = 200;
const MAX_TEXT_LEN: usize = 2000;

/// One network-quality measurement as seen by the engine.
///
/// Extra fields on the source record (timestamps, device metadata) are
/// ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSample {
    pub carrier: String,
    pub location: String,
    /// Mbps.
    #[serde(default)]
    pub download_speed: Option<f64>,
    /// Mbps.
    #[serde(default)]
    pub upload_speed: Option<f64>,
    /// Milliseconds.
    #[serde(default)]
    pub latency: Option<f64>,
    /// dBm, usually negative.
    #[serde(default)]
    pub signal_strength: Option<i32>,
}

impl NetworkSample {
    /// A sample with no metric fields set.
    #[must_use]
    pub fn new(carrier: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            carrier: carrier.into(),
            location: location.into(),
            download_speed: None,
            upload_speed: None,
            latency: None,
            signal_strength: None,
        }
    }
}

/// Ranked carrier recommendation for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub carrier: String,
    pub score: f64,
    pub avg_download_speed: f64,
    pub avg_upload_speed: f64,
    pub avg_latency: f64,
    pub avg_signal_strength: f64,
    pub total_samples: usize,
    pub recommendation_reason: String,
}

/// Ingest payload for a telemetry submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewNetworkLog {
    pub carrier: String,
    pub location: String,
    #[serde(default)]
    pub network_type: Option<String>,
    #[serde(default)]
    pub signal_strength: Option<i32>,
    #[serde(default)]
    pub download_speed: Option<f64>,
    #[serde(default)]
    pub upload_speed: Option<f64>,
    #[serde(default)]
    pub latency: Option<i32>,
    #[serde(default)]
    pub jitter: Option<f64>,
    /// Percentage, 0–100.
    #[serde(default)]
    pub packet_loss: Option<f64>,
    #[serde(default)]
    pub device_info: Option<String>,
    #[serde(default)]
    pub app_version: Option<String>,
}

impl NewNetworkLog {
    /// Check required fields and metric ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`CoreError`] encountered, naming the offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("carrier", &self.carrier, MAX_CARRIER_LEN)?;
        require_text("location", &self.location, MAX_LOCATION_LEN)?;
        optional_text("network_type", self.network_type.as_deref(), MAX_CARRIER_LEN)?;
        optional_text("device_info", self.device_info.as_deref(), MAX_LOCATION_LEN)?;
        optional_text("app_version", self.app_version.as_deref(), MAX_CARRIER_LEN)?;
        non_negative("download_speed", self.download_speed)?;
        non_negative("upload_speed", self.upload_speed)?;
        non_negative("latency", self.latency.map(f64::from))?;
        non_negative("jitter", self.jitter)?;
        if let Some(loss) = self.packet_loss {
            if !(0.0..=100.0).contains(&loss) {
                return Err(CoreError::OutOfRange {
                    field: "packet_loss",
                    reason: format!("expected 0-100 percent, got {loss}"),
                });
            }
        }
        Ok(())
    }
}

/// Ingest payload for user-reported experience feedback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewFeedback {
    pub overall_satisfaction: i16,
    pub response_time: i16,
    pub usability: i16,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub issue_type: Option<String>,
    pub carrier: String,
    #[serde(default)]
    pub network_type: Option<String>,
    pub location: String,
    #[serde(default)]
    pub signal_strength: Option<i32>,
    #[serde(default)]
    pub download_speed: Option<f64>,
    #[serde(default)]
    pub upload_speed: Option<f64>,
    #[serde(default)]
    pub latency: Option<i32>,
}

impl NewFeedback {
    /// Check ratings (1–5), required text, and metric ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`CoreError`] encountered, naming the offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        rating("overall_satisfaction", self.overall_satisfaction)?;
        rating("response_time", self.response_time)?;
        rating("usability", self.usability)?;
        require_text("carrier", &self.carrier, MAX_CARRIER_LEN)?;
        require_text("location", &self.location, MAX_LOCATION_LEN)?;
        optional_text("comments", self.comments.as_deref(), MAX_TEXT_LEN)?;
        optional_text("issue_type", self.issue_type.as_deref(), MAX_CARRIER_LEN)?;
        optional_text("network_type", self.network_type.as_deref(), MAX_CARRIER_LEN)?;
        non_negative("download_speed", self.download_speed)?;
        non_negative("upload_speed", self.upload_speed)?;
        non_negative("latency", self.latency.map(f64::from))?;
        Ok(())
    }
}

fn require_text(field: &'static str, value: &str, max: usize) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::MissingField { field });
    }
    if trimmed.chars().count() > max {
        return Err(CoreError::TooLong { field, max });
    }
    Ok(())
}

fn optional_text(field: &'static str, value: Option<&str>, max: usize) -> Result<(), CoreError> {
    match value {
        Some(v) if v.chars().count() > max => Err(CoreError::TooLong { field, max }),
        _ => Ok(()),
    }
}

fn non_negative(field: &'static str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(CoreError::OutOfRange {
            field,
            reason: format!("expected a non-negative number, got {v}"),
        }),
        _ => Ok(()),
    }
}

fn rating(field: &'static str, value: i16) -> Result<(), CoreError> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::OutOfRange {
            field,
            reason: format!("rating must be 1-5, got {value}"),
        })
    }
}
