// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in mission catalog and mission resolution.
//!
//! The persistence backend may carry admin-edited missions; an empty list
//! there means "use the built-in catalog".

use odyssey_core::types::MissionStep;
use odyssey_core::PersistenceBackend;

/// The three bundled scenarios. Each is a self-contained adventure;
/// `story` and `video_prompt` are reserved for future content.
pub fn builtin_missions() -> Vec<MissionStep> {
    vec![
        MissionStep {
            id: "mission-1".to_string(),
            story: String::new(),
            objective: "Tuhaf, kristal bir yapıya sahip gibi görünen 'C/2027 K1 (Kristal)' \
                        kuyruklu yıldızından gelen karmaşık bir sinyali araştırın. Sinyali \
                        çözün ve kaynağını belirleyin."
                .to_string(),
            success_prompt_keywords: vec![
                "çöz".to_string(),
                "sinyal analizi".to_string(),
                "kristal tara".to_string(),
            ],
            image_prompt: "Derin uzayın ortasında, içinden kristal bir kafesin parladığı bir \
                           kuyruklu yıldız. Gizemli bir enerji yayıyor. Sinematik, yüksek \
                           detaylı."
                .to_string(),
            video_prompt: String::new(),
        },
        MissionStep {
            id: "mission-2".to_string(),
            story: String::new(),
            objective: "Panspermi hipotezini düşündüren karmaşık organik moleküllerden oluşan \
                        bir iz bırakan 'P/2028 P1 (Yaşam)' kuyruklu yıldızını inceleyin. \
                        Kuyruğun bileşimini analiz edin."
                .to_string(),
            success_prompt_keywords: vec![
                "örnek al".to_string(),
                "bileşim analizi".to_string(),
                "organik tara".to_string(),
            ],
            image_prompt: "Koyu renkli bir kuyruklu yıldızın, organik bileşikleri temsil eden \
                           canlı, renkli, bulutsu benzeri bir kuyruğu var. Bilimsel bir \
                           estetik, gerçekçi aydınlatma."
                .to_string(),
            video_prompt: String::new(),
        },
        MissionStep {
            id: "mission-3".to_string(),
            story: String::new(),
            objective: "'X/1882 R1 (Hayalet)' kuyruklu yıldızının etrafındaki yerel bir \
                        uzay-zaman anomalisini araştırın. Bu hayalet nesneyi incelemek için \
                        bir graviton ışını kullanarak anomaliyi stabilize edin."
                .to_string(),
            success_prompt_keywords: vec![
                "stabilize et".to_string(),
                "graviton ışını".to_string(),
                "anomali analizi".to_string(),
            ],
            image_prompt: "Etrafında uzayda dalgalanmalar gibi gözle görülür uzay-zaman \
                           bozulmaları olan yarı saydam, hayalet gibi bir kuyruklu yıldız. \
                           Ürkütücü ve atmosferik bir sahne."
                .to_string(),
            video_prompt: String::new(),
        },
    ]
}

/// Loads the mission catalog: persisted missions when any exist, otherwise
/// the built-in set. Lookup failures degrade to the built-in set so a
/// storage hiccup cannot block entering the game.
pub async fn load_missions(store: &dyn PersistenceBackend) -> Vec<MissionStep> {
    match store.list_missions().await {
        Ok(missions) if !missions.is_empty() => missions,
        Ok(_) => builtin_missions(),
        Err(error) => {
            tracing::warn!(%error, "mission catalog load failed, using built-in missions");
            builtin_missions()
        }
    }
}

/// Resolves the active mission by id, falling back to the first entry when
/// the stored id is unknown. Returns `None` only for an empty catalog,
/// which [`load_missions`] never produces.
pub fn resolve_mission(missions: &[MissionStep], id: &str) -> Option<MissionStep> {
    missions
        .iter()
        .find(|m| m.id == id)
        .or_else(|| missions.first())
        .cloned()
}
