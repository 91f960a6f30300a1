// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and an
//! embedded schema.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use odyssey_core::OdysseyError;
use tracing::debug;

/// Embedded schema, applied idempotently on open.
///
/// Crew lists, success keywords, and conversation histories are stored as
/// JSON documents: they are always read and written wholesale, never
/// queried by element.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    uid             TEXT PRIMARY KEY,
    name            TEXT NOT NULL,
    gender          TEXT NOT NULL,
    avatar_kind     TEXT NOT NULL,
    avatar_color    TEXT NOT NULL,
    current_ship_id TEXT
);

CREATE TABLE IF NOT EXISTS ships (
    id                   TEXT PRIMARY KEY,
    name                 TEXT NOT NULL,
    captain_id           TEXT NOT NULL,
    crew                 TEXT NOT NULL,
    current_mission_id   TEXT NOT NULL,
    conversation_history TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS log_entries (
    id        TEXT PRIMARY KEY,
    ship_id   TEXT NOT NULL,
    timestamp INTEGER NOT NULL,
    author    TEXT NOT NULL,
    content   TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_log_entries_ship ON log_entries (ship_id, timestamp);

CREATE TABLE IF NOT EXISTS assets (
    id              TEXT PRIMARY KEY,
    ship_id         TEXT NOT NULL,
    timestamp       INTEGER NOT NULL,
    kind            TEXT NOT NULL,
    prompt          TEXT NOT NULL,
    image_base64    TEXT NOT NULL,
    image_mime_type TEXT NOT NULL,
    author          TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_assets_ship ON assets (ship_id, timestamp);

CREATE TABLE IF NOT EXISTS missions (
    id                       TEXT PRIMARY KEY,
    story                    TEXT NOT NULL,
    objective                TEXT NOT NULL,
    success_prompt_keywords  TEXT NOT NULL,
    image_prompt             TEXT NOT NULL,
    video_prompt             TEXT NOT NULL
);
";

/// Handle over the single serialized SQLite connection.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (or creates) the database at `path`, configures pragmas, and
    /// applies the embedded schema.
    pub async fn open(path: &str) -> Result<Self, OdysseyError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| map_tr_err(e.into()))?;

        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// The underlying serialized connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoints the WAL. Called on shutdown.
    pub async fn close(&self) -> Result<(), OdysseyError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Maps a tokio-rusqlite error into the shared storage error variant.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> OdysseyError {
    OdysseyError::Storage {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("odyssey.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        assert!(path.exists());

        // Schema application is idempotent: a second open must succeed.
        drop(db);
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn wal_mode_is_active() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wal.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();

        let mode: String = db
            .connection()
            .call(|conn| {
                Ok::<_, rusqlite::Error>(conn.query_row(
                    "PRAGMA journal_mode;",
                    [],
                    |row| row.get(0),
                )?)
            })
            .await
            .unwrap();
        assert_eq!(mode, "wal");
        db.close().await.unwrap();
    }
}
