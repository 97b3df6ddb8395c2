//! [`SqliteMirror`] — the SQLite implementation of [`MirrorBlob`].

use std::path::Path;

use bizcard_core::store::MirrorBlob;
use chrono::{SecondsFormat, Utc};
use rusqlite::OptionalExtension as _;

use crate::{Result, schema::SCHEMA};

/// A key-value blob mirror backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteMirror {
  conn: tokio_rusqlite::Connection,
}

impl SqliteMirror {
  /// Open (or create) a mirror at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening sqlite mirror");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let mirror = Self { conn };
    mirror.init_schema().await?;
    Ok(mirror)
  }

  /// Open an in-memory mirror. Contents vanish when the last clone drops.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let mirror = Self { conn };
    mirror.init_schema().await?;
    Ok(mirror)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// When `key` was last written, as stored (RFC 3339 UTC).
  pub async fn updated_at(&self, key: &str) -> Result<Option<String>> {
    let key = key.to_owned();
    let at = self
      .conn
      .call(move |conn| {
        let at = conn
          .query_row(
            "SELECT updated_at FROM kv_store WHERE key = ?1",
            rusqlite::params![key],
            |r| r.get(0),
          )
          .optional()?;
        Ok(at)
      })
      .await?;
    Ok(at)
  }
}

// ─── MirrorBlob impl ─────────────────────────────────────────────────────────

impl MirrorBlob for SqliteMirror {
  type Error = crate::Error;

  async fn read(&self, key: &str) -> Result<Option<String>> {
    let key = key.to_owned();
    let value = self
      .conn
      .call(move |conn| {
        let value = conn
          .query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            rusqlite::params![key],
            |r| r.get(0),
          )
          .optional()?;
        Ok(value)
      })
      .await?;
    Ok(value)
  }

  async fn write(&self, key: &str, value: String) -> Result<()> {
    let key = key.to_owned();
    let at  = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    let len = value.len();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
           ON CONFLICT(key) DO UPDATE SET
             value      = excluded.value,
             updated_at = excluded.updated_at",
          rusqlite::params![key, value, at],
        )?;
        Ok(())
      })
      .await?;
    tracing::trace!(bytes = len, "mirror blob written");
    Ok(())
  }
}
