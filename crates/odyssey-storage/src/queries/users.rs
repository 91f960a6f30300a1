// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User profile CRUD operations.

use odyssey_core::types::{Avatar, Gender, User};
use odyssey_core::OdysseyError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};

fn gender_to_str(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "male",
        Gender::Female => "female",
    }
}

fn gender_from_str(s: &str) -> Gender {
    match s {
        "female" => Gender::Female,
        _ => Gender::Male,
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> Result<User, rusqlite::Error> {
    let gender: String = row.get(2)?;
    Ok(User {
        uid: row.get(0)?,
        name: row.get(1)?,
        gender: gender_from_str(&gender),
        avatar: Avatar {
            kind: row.get(3)?,
            color: row.get(4)?,
        },
        current_ship_id: row.get(5)?,
    })
}

/// Create a user profile.
pub async fn create_user(db: &Database, user: &User) -> Result<(), OdysseyError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (uid, name, gender, avatar_kind, avatar_color, current_ship_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user.uid,
                    user.name,
                    gender_to_str(user.gender),
                    user.avatar.kind,
                    user.avatar.color,
                    user.current_ship_id,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a user profile by uid.
pub async fn get_user(db: &Database, uid: &str) -> Result<Option<User>, OdysseyError> {
    let uid = uid.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT uid, name, gender, avatar_kind, avatar_color, current_ship_id
                 FROM users WHERE uid = ?1",
            )?;
            let result = stmt.query_row(params![uid], row_to_user);
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Replace a user profile wholesale.
pub async fn update_user(db: &Database, user: &User) -> Result<(), OdysseyError> {
    let user = user.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE users
                 SET name = ?2, gender = ?3, avatar_kind = ?4, avatar_color = ?5,
                     current_ship_id = ?6
                 WHERE uid = ?1",
                params![
                    user.uid,
                    user.name,
                    gender_to_str(user.gender),
                    user.avatar.kind,
                    user.avatar.color,
                    user.current_ship_id,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn make_user(uid: &str) -> User {
        User {
            uid: uid.to_string(),
            name: "Kaptan".to_string(),
            gender: Gender::Male,
            avatar: Avatar {
                kind: "astronaut".to_string(),
                color: "#00e5ff".to_string(),
            },
            current_ship_id: None,
        }
    }

    #[tokio::test]
    async fn create_and_get_user_roundtrips() {
        let (db, _dir) = setup_db().await;
        let user = make_user("u1");
        create_user(&db, &user).await.unwrap();

        let retrieved = get_user(&db, "u1").await.unwrap().unwrap();
        assert_eq!(retrieved, user);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_nonexistent_user_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_user(&db, "nobody").await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_user_replaces_profile() {
        let (db, _dir) = setup_db().await;
        let mut user = make_user("u2");
        create_user(&db, &user).await.unwrap();

        user.name = "Kaptan Yıldız".to_string();
        user.gender = Gender::Female;
        user.current_ship_id = Some("ship-1".to_string());
        update_user(&db, &user).await.unwrap();

        let retrieved = get_user(&db, "u2").await.unwrap().unwrap();
        assert_eq!(retrieved, user);
        db.close().await.unwrap();
    }
}
