// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mission definition storage (administrative surface).

use odyssey_core::types::MissionStep;
use odyssey_core::OdysseyError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// All stored mission definitions, in id order. An empty result means
/// "use the built-in catalog".
pub async fn list_missions(db: &Database) -> Result<Vec<MissionStep>, OdysseyError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, story, objective, success_prompt_keywords, image_prompt, video_prompt
                 FROM missions ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                let keywords_json: String = row.get(3)?;
                Ok(MissionStep {
                    id: row.get(0)?,
                    story: row.get(1)?,
                    objective: row.get(2)?,
                    success_prompt_keywords: serde_json::from_str(&keywords_json)
                        .unwrap_or_default(),
                    image_prompt: row.get(4)?,
                    video_prompt: row.get(5)?,
                })
            })?;
            let mut missions = Vec::new();
            for row in rows {
                missions.push(row?);
            }
            Ok(missions)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or replace a mission definition.
pub async fn upsert_mission(db: &Database, mission: &MissionStep) -> Result<(), OdysseyError> {
    let mission = mission.clone();
    db.connection()
        .call(move |conn| {
            let keywords_json = serde_json::to_string(&mission.success_prompt_keywords)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            conn.execute(
                "INSERT INTO missions
                     (id, story, objective, success_prompt_keywords, image_prompt, video_prompt)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(id) DO UPDATE SET
                     story = excluded.story,
                     objective = excluded.objective,
                     success_prompt_keywords = excluded.success_prompt_keywords,
                     image_prompt = excluded.image_prompt,
                     video_prompt = excluded.video_prompt",
                params![
                    mission.id,
                    mission.story,
                    mission.objective,
                    keywords_json,
                    mission.image_prompt,
                    mission.video_prompt,
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

    fn make_mission(id: &str) -> MissionStep {
        MissionStep {
            id: id.to_string(),
            story: "Gizemli bir sinyal tespit edildi.".to_string(),
            objective: "Sinyalin kaynağını belirle.".to_string(),
            success_prompt_keywords: vec!["sinyal".to_string(), "kaynak".to_string()],
            image_prompt: "a glowing crystalline comet".to_string(),
            video_prompt: "the comet revealing its secret".to_string(),
        }
    }

    #[tokio::test]
    async fn upsert_inserts_then_updates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();

        assert!(list_missions(&db).await.unwrap().is_empty());

        let mut mission = make_mission("mission-1");
        upsert_mission(&db, &mission).await.unwrap();

        mission.objective = "Yeni hedef.".to_string();
        upsert_mission(&db, &mission).await.unwrap();

        let missions = list_missions(&db).await.unwrap();
        assert_eq!(missions.len(), 1);
        assert_eq!(missions[0].objective, "Yeni hedef.");
        assert_eq!(missions[0].success_prompt_keywords, vec!["sinyal", "kaynak"]);
        db.close().await.unwrap();
    }
}
