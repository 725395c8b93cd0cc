//! Offline unit tests for wavewatch-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use wavewatch_core::{AppConfig, Environment};
use wavewatch_db::{FeedbackRow, NetworkLogRow, PoolConfig};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        rate_limit_per_minute: 120,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`NetworkLogRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn network_log_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = NetworkLogRow {
        id: 1_i64,
        public_id: Uuid::new_v4(),
        carrier: "Acme".to_string(),
        network_type: Some("5G".to_string()),
        signal_strength: Some(-67_i32),
        download_speed: Some(120.5_f64),
        upload_speed: Some(22.0_f64),
        latency: Some(28_i32),
        jitter: Some(3.5_f64),
        packet_loss: Some(0.2_f64),
        location: "Downtown".to_string(),
        device_info: None,
        app_version: Some("1.0.0".to_string()),
        recorded_at: Utc::now(),
    };

    assert_eq!(row.carrier, "Acme");
    assert_eq!(row.latency, Some(28));
    assert!(row.device_info.is_none());
}

/// Compile-time smoke test for [`FeedbackRow`].
#[test]
fn feedback_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = FeedbackRow {
        id: 7_i64,
        public_id: Uuid::new_v4(),
        overall_satisfaction: 4_i16,
        response_time: 3_i16,
        usability: 5_i16,
        comments: None,
        issue_type: Some("slow_data".to_string()),
        carrier: "Acme".to_string(),
        network_type: None,
        location: "Uptown".to_string(),
        signal_strength: None,
        download_speed: None,
        upload_speed: None,
        latency: None,
        submitted_at: Utc::now(),
    };

    assert_eq!(row.usability, 5);
    assert_eq!(row.issue_type.as_deref(), Some("slow_data"));
}
