//! Database operations for the `network_logs` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use wavewatch_core::{NetworkSample, NewNetworkLog};

use crate::DbError;

const NETWORK_LOG_COLUMNS: &str = "id, public_id, carrier, network_type, signal_strength, \
     download_speed, upload_speed, latency, jitter, packet_loss, location, \
     device_info, app_version, recorded_at";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `network_logs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NetworkLogRow {
    pub id: i64,
    pub public_id: Uuid,
    pub carrier: String,
    pub network_type: Option<String>,
    pub signal_strength: Option<i32>,
    pub download_speed: Option<f64>,
    pub upload_speed: Option<f64>,
    pub latency: Option<i32>,
    pub jitter: Option<f64>,
    pub packet_loss: Option<f64>,
    pub location: String,
    pub device_info: Option<String>,
    pub app_version: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// The scoring columns of a `network_logs` row.
#[derive(Debug, Clone, sqlx::FromRow)]
struct SampleRow {
    carrier: String,
    location: String,
    download_speed: Option<f64>,
    upload_speed: Option<f64>,
    latency: Option<i32>,
    signal_strength: Option<i32>,
}

impl From<SampleRow> for NetworkSample {
    fn from(row: SampleRow) -> Self {
        Self {
            carrier: row.carrier,
            location: row.location,
            download_speed: row.download_speed,
            upload_speed: row.upload_speed,
            latency: row.latency.map(f64::from),
            signal_strength: row.signal_strength,
        }
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert a telemetry sample and return the stored row.
///
/// The caller is expected to have run [`NewNetworkLog::validate`]; carrier and
/// location are trimmed before storage.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_network_log(pool: &PgPool, log: &NewNetworkLog) -> Result<NetworkLogRow, DbError> {
    let sql = format!(
        "INSERT INTO network_logs \
             (public_id, carrier, network_type, signal_strength, download_speed, \
              upload_speed, latency, jitter, packet_loss, location, device_info, app_version) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         RETURNING {NETWORK_LOG_COLUMNS}"
    );

    let row = sqlx::query_as::<_, NetworkLogRow>(&sql)
        .bind(Uuid::new_v4())
        .bind(log.carrier.trim())
        .bind(log.network_type.as_deref())
        .bind(log.signal_strength)
        .bind(log.download_speed)
        .bind(log.upload_speed)
        .bind(log.latency)
        .bind(log.jitter)
        .bind(log.packet_loss)
        .bind(log.location.trim())
        .bind(log.device_info.as_deref())
        .bind(log.app_version.as_deref())
        .fetch_one(pool)
        .await?;

    tracing::debug!(
        id = row.id,
        carrier = %row.carrier,
        location = %row.location,
        "stored network log"
    );

    Ok(row)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Fetch a single network log by its public id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has that id, or [`DbError::Sqlx`]
/// if the query fails.
pub async fn get_network_log(pool: &PgPool, public_id: Uuid) -> Result<NetworkLogRow, DbError> {
    let sql = format!("SELECT {NETWORK_LOG_COLUMNS} FROM network_logs WHERE public_id = $1");

    sqlx::query_as::<_, NetworkLogRow>(&sql)
        .bind(public_id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)
}

/// List network logs, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_network_logs(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<NetworkLogRow>, DbError> {
    let sql = format!(
        "SELECT {NETWORK_LOG_COLUMNS} FROM network_logs \
         ORDER BY recorded_at DESC, id DESC \
         LIMIT $1 OFFSET $2"
    );

    let rows = sqlx::query_as::<_, NetworkLogRow>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Total number of stored network logs.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_network_logs(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM network_logs")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Load every sample whose location contains `location`, ignoring case.
///
/// `%`, `_`, and `\` in the query are matched literally. Rows are returned in
/// insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_samples_for_location(
    pool: &PgPool,
    location: &str,
) -> Result<Vec<NetworkSample>, DbError> {
    let rows = sqlx::query_as::<_, SampleRow>(
        "SELECT carrier, location, download_speed, upload_speed, latency, signal_strength \
         FROM network_logs \
         WHERE location ILIKE $1 ESCAPE '\\' \
         ORDER BY id",
    )
    .bind(contains_pattern(location))
    .fetch_all(pool)
    .await?;

    tracing::debug!(location, samples = rows.len(), "loaded samples for location");

    Ok(rows.into_iter().map(NetworkSample::from).collect())
}

/// Build an `ILIKE` pattern matching `needle` anywhere in the column.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_log(carrier: &str, location: &str, download: Option<f64>) -> NewNetworkLog {
        NewNetworkLog {
            carrier: carrier.to_string(),
            location: location.to_string(),
            download_speed: download,
            latency: Some(40),
            signal_strength: Some(-70),
            ..NewNetworkLog::default()
        }
    }

    #[test]
    fn contains_pattern_wraps_and_escapes() {
        assert_eq!(contains_pattern("Downtown"), "%Downtown%");
        assert_eq!(contains_pattern("Downtown "), "%Downtown %");
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn insert_then_get_round_trips(pool: PgPool) {
        let row = insert_network_log(&pool, &new_log(" Acme ", "Downtown", Some(55.5)))
            .await
            .expect("insert");
        assert_eq!(row.carrier, "Acme");
        assert_eq!(row.download_speed, Some(55.5));

        let fetched = get_network_log(&pool, row.public_id).await.expect("get");
        assert_eq!(fetched.id, row.id);
        assert_eq!(fetched.latency, Some(40));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn get_unknown_id_is_not_found(pool: PgPool) {
        let err = get_network_log(&pool, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn list_is_newest_first_and_paginated(pool: PgPool) {
        for i in 0..3 {
            insert_network_log(&pool, &new_log(&format!("Carrier {i}"), "Uptown", None))
                .await
                .expect("insert");
        }

        let first_page = list_network_logs(&pool, 2, 0).await.expect("list");
        assert_eq!(first_page.len(), 2);
        assert_eq!(first_page[0].carrier, "Carrier 2");

        let second_page = list_network_logs(&pool, 2, 2).await.expect("list");
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].carrier, "Carrier 0");

        assert_eq!(count_network_logs(&pool).await.expect("count"), 3);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn samples_match_location_case_insensitively(pool: PgPool) {
        insert_network_log(&pool, &new_log("Acme", "Downtown Seattle", Some(10.0)))
            .await
            .expect("insert");
        insert_network_log(&pool, &new_log("Acme", "Portland", Some(20.0)))
            .await
            .expect("insert");
        insert_network_log(&pool, &new_log("Beta", "seattle airport", Some(30.0)))
            .await
            .expect("insert");

        let samples = list_samples_for_location(&pool, "SEATTLE")
            .await
            .expect("samples");
        let carriers: Vec<&str> = samples.iter().map(|s| s.carrier.as_str()).collect();
        assert_eq!(carriers, vec!["Acme", "Beta"]);
        assert_eq!(samples[0].latency, Some(40.0));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn trailing_space_in_query_is_matched_literally(pool: PgPool) {
        insert_network_log(&pool, &new_log("Acme", "Downtown", None))
            .await
            .expect("insert");
        insert_network_log(&pool, &new_log("Beta", "Downtown Seattle", None))
            .await
            .expect("insert");

        let samples = list_samples_for_location(&pool, "downtown ")
            .await
            .expect("samples");
        let carriers: Vec<&str> = samples.iter().map(|s| s.carrier.as_str()).collect();
        assert_eq!(carriers, vec!["Beta"]);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn wildcard_characters_match_literally(pool: PgPool) {
        insert_network_log(&pool, &new_log("Acme", "Mall 100% Plaza", None))
            .await
            .expect("insert");
        insert_network_log(&pool, &new_log("Acme", "Mall 1000 Plaza", None))
            .await
            .expect("insert");

        let samples = list_samples_for_location(&pool, "100%")
            .await
            .expect("samples");
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].location, "Mall 100% Plaza");
    }
}
