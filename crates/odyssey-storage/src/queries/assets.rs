// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gallery asset operations. The gallery is append-only.

use std::str::FromStr;

use odyssey_core::types::{AssetKind, ImageData, PlayerAsset};
use odyssey_core::OdysseyError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Append one generated asset for a ship.
pub async fn append_asset(
    db: &Database,
    ship_id: &str,
    asset: &PlayerAsset,
) -> Result<(), OdysseyError> {
    let ship_id = ship_id.to_string();
    let asset = asset.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO assets
                     (id, ship_id, timestamp, kind, prompt, image_base64, image_mime_type, author)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    asset.id,
                    ship_id,
                    asset.timestamp,
                    asset.kind.to_string(),
                    asset.prompt,
                    asset.image.base64,
                    asset.image.mime_type,
                    asset.author,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// All assets for a ship, oldest first.
pub async fn list_assets(db: &Database, ship_id: &str) -> Result<Vec<PlayerAsset>, OdysseyError> {
    let ship_id = ship_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, timestamp, kind, prompt, image_base64, image_mime_type, author
                 FROM assets WHERE ship_id = ?1 ORDER BY timestamp ASC",
            )?;
            let rows = stmt.query_map(params![ship_id], |row| {
                let kind: String = row.get(2)?;
                Ok(PlayerAsset {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    kind: AssetKind::from_str(&kind).unwrap_or(AssetKind::Telescope),
                    prompt: row.get(3)?,
                    image: ImageData {
                        base64: row.get(4)?,
                        mime_type: row.get(5)?,
                    },
                    author: row.get(6)?,
                })
            })?;
            let mut assets = Vec::new();
            for row in rows {
                assets.push(row?);
            }
            Ok(assets)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn assets_append_and_list_per_ship() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();

        let telescope = PlayerAsset::now(
            AssetKind::Telescope,
            "a crystal comet",
            ImageData::jpeg("dGVsZQ=="),
            "Kaptan",
        );
        let astrobot = PlayerAsset::now(
            AssetKind::Astrobot,
            "repair the solar sail",
            ImageData {
                base64: "cm9ib3Q=".to_string(),
                mime_type: "image/png".to_string(),
            },
            "Kaptan",
        );

        append_asset(&db, "s1", &telescope).await.unwrap();
        append_asset(&db, "s1", &astrobot).await.unwrap();

        let assets = list_assets(&db, "s1").await.unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].kind, AssetKind::Telescope);
        assert_eq!(assets[1].kind, AssetKind::Astrobot);
        assert_eq!(assets[1].image.mime_type, "image/png");

        assert!(list_assets(&db, "other").await.unwrap().is_empty());
        db.close().await.unwrap();
    }
}
