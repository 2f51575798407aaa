use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Row, SqlitePool};

use crate::core::errors::{SyncError, SyncResult};

/// Key under which the site content document is mirrored.
pub const CONTENT_KEY: &str = "site-content";

#[derive(Debug, Clone)]
pub struct StoredSnapshot {
    pub document: Value,
    pub saved_at: DateTime<Utc>,
}

fn parse_timestamp(value: String) -> SyncResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|v| v.with_timezone(&Utc))
        .map_err(|err| SyncError::Cache(format!("invalid timestamp {value}: {err}")))
}

pub async fn save(pool: &SqlitePool, key: &str, document: &Value) -> SyncResult<()> {
    sqlx::query(
        r#"
        INSERT INTO snapshots (key, document, saved_at)
        VALUES (?1, ?2, (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')))
        ON CONFLICT(key) DO UPDATE SET
            document = excluded.document,
            saved_at = excluded.saved_at
        "#,
    )
    .bind(key)
    .bind(document.to_string())
    .execute(pool)
    .await?;
    Ok(())
}

/// `Ok(None)` when no snapshot has ever been saved under `key`. A blob that
/// no longer parses is an error; callers treat it as "no cache".
pub async fn load(pool: &SqlitePool, key: &str) -> SyncResult<Option<StoredSnapshot>> {
    let maybe_row = sqlx::query("SELECT document, saved_at FROM snapshots WHERE key = ?1")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    let Some(row) = maybe_row else {
        return Ok(None);
    };
    let raw: String = row.get("document");
    let document = serde_json::from_str(&raw)
        .map_err(|err| SyncError::Cache(format!("corrupt snapshot under {key}: {err}")))?;
    let saved_at = parse_timestamp(row.get("saved_at"))?;
    Ok(Some(StoredSnapshot { document, saved_at }))
}

pub async fn delete(pool: &SqlitePool, key: &str) -> SyncResult<bool> {
    let affected = sqlx::query("DELETE FROM snapshots WHERE key = ?1")
        .bind(key)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(affected > 0)
}
