// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ship CRUD, crew membership, and the conversation history document.

use odyssey_core::types::{ConversationEntry, Ship};
use odyssey_core::OdysseyError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};

fn row_to_ship(row: &rusqlite::Row<'_>) -> Result<Ship, rusqlite::Error> {
    let crew_json: String = row.get(3)?;
    let history_json: String = row.get(5)?;
    Ok(Ship {
        id: row.get(0)?,
        name: row.get(1)?,
        captain_id: row.get(2)?,
        crew: serde_json::from_str(&crew_json).unwrap_or_default(),
        current_mission_id: row.get(4)?,
        conversation_history: serde_json::from_str(&history_json).unwrap_or_default(),
    })
}

/// Create a ship.
pub async fn create_ship(db: &Database, ship: &Ship) -> Result<(), OdysseyError> {
    let ship = ship.clone();
    db.connection()
        .call(move |conn| {
            let crew_json = serde_json::to_string(&ship.crew)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            let history_json = serde_json::to_string(&ship.conversation_history)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            conn.execute(
                "INSERT INTO ships
                     (id, name, captain_id, crew, current_mission_id, conversation_history)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    ship.id,
                    ship.name,
                    ship.captain_id,
                    crew_json,
                    ship.current_mission_id,
                    history_json,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a ship by id.
pub async fn get_ship(db: &Database, id: &str) -> Result<Option<Ship>, OdysseyError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, captain_id, crew, current_mission_id, conversation_history
                 FROM ships WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], row_to_ship);
            match result {
                Ok(ship) => Ok(Some(ship)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Add a user to a ship's crew (idempotent) and point their profile at the
/// ship. Both updates happen in one transaction.
pub async fn join_ship(db: &Database, ship_id: &str, uid: &str) -> Result<(), OdysseyError> {
    let ship_id = ship_id.to_string();
    let uid = uid.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            let crew_json: String = tx.query_row(
                "SELECT crew FROM ships WHERE id = ?1",
                params![ship_id],
                |row| row.get(0),
            )?;
            let mut crew: Vec<String> = serde_json::from_str(&crew_json).unwrap_or_default();
            if !crew.contains(&uid) {
                crew.push(uid.clone());
            }
            let crew_json = serde_json::to_string(&crew)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

            tx.execute(
                "UPDATE ships SET crew = ?1 WHERE id = ?2",
                params![crew_json, ship_id],
            )?;
            tx.execute(
                "UPDATE users SET current_ship_id = ?1 WHERE uid = ?2",
                params![ship_id, uid],
            )?;

            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Mirror the full conversation history document for a ship.
pub async fn save_conversation(
    db: &Database,
    ship_id: &str,
    history: &[ConversationEntry],
) -> Result<(), OdysseyError> {
    let ship_id = ship_id.to_string();
    let history = history.to_vec();
    db.connection()
        .call(move |conn| {
            let history_json = serde_json::to_string(&history)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            conn.execute(
                "UPDATE ships SET conversation_history = ?1 WHERE id = ?2",
                params![history_json, ship_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::users;
    use odyssey_core::types::{Avatar, Gender, User};
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn create_and_get_ship_roundtrips() {
        let (db, _dir) = setup_db().await;
        let ship = Ship::new("s1", "Odyssey", "cap-1", "mission-1");
        create_ship(&db, &ship).await.unwrap();

        let retrieved = get_ship(&db, "s1").await.unwrap().unwrap();
        assert_eq!(retrieved, ship);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn join_ship_is_idempotent_and_updates_profile() {
        let (db, _dir) = setup_db().await;
        let ship = Ship::new("s2", "Odyssey", "cap-1", "mission-1");
        create_ship(&db, &ship).await.unwrap();

        let user = User {
            uid: "crew-2".to_string(),
            name: "İkinci".to_string(),
            gender: Gender::Female,
            avatar: Avatar {
                kind: "pilot".to_string(),
                color: "#ff4081".to_string(),
            },
            current_ship_id: None,
        };
        users::create_user(&db, &user).await.unwrap();

        join_ship(&db, "s2", "crew-2").await.unwrap();
        join_ship(&db, "s2", "crew-2").await.unwrap();

        let ship = get_ship(&db, "s2").await.unwrap().unwrap();
        assert_eq!(ship.crew, vec!["cap-1".to_string(), "crew-2".to_string()]);

        let user = users::get_user(&db, "crew-2").await.unwrap().unwrap();
        assert_eq!(user.current_ship_id.as_deref(), Some("s2"));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn save_conversation_replaces_document() {
        let (db, _dir) = setup_db().await;
        let ship = Ship::new("s3", "Odyssey", "cap-1", "mission-1");
        create_ship(&db, &ship).await.unwrap();

        let history = vec![
            ConversationEntry::user("merhaba"),
            ConversationEntry::model("// HAL: Günaydın, Kaptan."),
        ];
        save_conversation(&db, "s3", &history).await.unwrap();

        let retrieved = get_ship(&db, "s3").await.unwrap().unwrap();
        assert_eq!(retrieved.conversation_history, history);

        // A shorter document replaces wholesale, no merging.
        let shorter = vec![ConversationEntry::user("tek satır")];
        save_conversation(&db, "s3", &shorter).await.unwrap();
        let retrieved = get_ship(&db, "s3").await.unwrap().unwrap();
        assert_eq!(retrieved.conversation_history, shorter);
        db.close().await.unwrap();
    }
}
