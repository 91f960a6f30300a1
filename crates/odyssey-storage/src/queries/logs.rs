// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Captain's log operations. The log is append-only.

use odyssey_core::types::CaptainLogEntry;
use odyssey_core::OdysseyError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Append one log entry for a ship.
pub async fn append_log_entry(
    db: &Database,
    ship_id: &str,
    entry: &CaptainLogEntry,
) -> Result<(), OdysseyError> {
    let ship_id = ship_id.to_string();
    let entry = entry.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO log_entries (id, ship_id, timestamp, author, content)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![entry.id, ship_id, entry.timestamp, entry.author, entry.content],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// All log entries for a ship, oldest first.
pub async fn list_log_entries(
    db: &Database,
    ship_id: &str,
) -> Result<Vec<CaptainLogEntry>, OdysseyError> {
    let ship_id = ship_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, timestamp, author, content FROM log_entries
                 WHERE ship_id = ?1 ORDER BY timestamp ASC",
            )?;
            let rows = stmt.query_map(params![ship_id], |row| {
                Ok(CaptainLogEntry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    author: row.get(2)?,
                    content: row.get(3)?,
                })
            })?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn log_entries_append_and_list_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();

        let mut first = CaptainLogEntry::now("Kaptan", "kayıt bir");
        let mut second = CaptainLogEntry::now("HAL", "kayıt iki");
        first.timestamp = 1000;
        second.timestamp = 2000;

        append_log_entry(&db, "s1", &second).await.unwrap();
        append_log_entry(&db, "s1", &first).await.unwrap();
        append_log_entry(&db, "other", &CaptainLogEntry::now("Kaptan", "başka gemi"))
            .await
            .unwrap();

        let entries = list_log_entries(&db, "s1").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "kayıt bir");
        assert_eq!(entries[1].content, "kayıt iki");
        db.close().await.unwrap();
    }
}
