// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`GenerativeBackend`] implementation on top of [`GeminiClient`].
//!
//! Owns all prompt wording and response-shape handling. The ship AI speaks
//! Turkish in character as HAL; image and video prompts are produced in
//! English for the respective models.

use async_trait::async_trait;
use odyssey_config::GeminiConfig;
use odyssey_core::types::{
    AstrobotMissionResult, ConversationEntry, Hotspot, ImageData, InterpretedCommand,
    InterpretedData, Role, VideoJob, VideoStatus,
};
use odyssey_core::{GenerativeBackend, OdysseyError};
use serde::Deserialize;
use tracing::warn;

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerationConfig, Part};

/// Fallback narration when even the error-narration call fails.
const ERROR_NARRATION_FALLBACK: &str = "// HAL: Kaptan, kritik bir hata oluştu ve hata mesajı \
     oluşturulamadı. Sistemleri kontrol etmenizi öneririm.";

/// Gemini-backed generative service.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: GeminiClient,
}

impl GeminiBackend {
    /// Creates the backend from the `[gemini]` config section.
    ///
    /// Returns [`OdysseyError::NotConfigured`] when no API key is set.
    pub fn new(config: &GeminiConfig) -> Result<Self, OdysseyError> {
        Ok(Self {
            client: GeminiClient::new(config)?,
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, url: String) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    /// One-shot text call: system instruction plus a single user prompt.
    async fn prompt_text(
        &self,
        system_instruction: &str,
        user_prompt: &str,
    ) -> Result<String, OdysseyError> {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::text(system_instruction)),
            contents: vec![Content::with_role("user", user_prompt)],
            generation_config: None,
        };
        let response = self.client.generate_content(&request).await?;
        response
            .first_text()
            .map(|t| t.trim().to_string())
            .ok_or_else(|| OdysseyError::provider("response contained no text"))
    }

    /// Structured-JSON call: forces `application/json` output against a schema
    /// and deserializes the returned text.
    async fn prompt_json<T: for<'de> Deserialize<'de>>(
        &self,
        system_instruction: &str,
        contents: Vec<Content>,
        schema: serde_json::Value,
    ) -> Result<T, OdysseyError> {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::text(system_instruction)),
            contents,
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
                response_modalities: None,
            }),
        };
        let response = self.client.generate_content(&request).await?;
        let text = response
            .first_text()
            .ok_or_else(|| OdysseyError::provider("structured response contained no text"))?;
        serde_json::from_str(text.trim()).map_err(|e| OdysseyError::Provider {
            message: format!("structured response was not valid JSON: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Image-modality call on the media model; returns the first inline image.
    async fn prompt_image(&self, parts: Vec<Part>) -> Result<ImageData, OdysseyError> {
        let request = GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content { role: None, parts }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string()]),
                ..Default::default()
            }),
        };
        let response = self.client.generate_media(&request).await?;
        let inline = response
            .first_inline_data()
            .ok_or_else(|| OdysseyError::provider("no image data found in media response"))?;
        Ok(ImageData {
            base64: inline.data.clone(),
            mime_type: inline.mime_type.clone(),
        })
    }
}

/// Maps conversation history to API content blocks.
fn history_to_contents(history: &[ConversationEntry]) -> Vec<Content> {
    history
        .iter()
        .map(|entry| {
            let role = match entry.role {
                Role::User => "user",
                Role::Model => "model",
            };
            Content::with_role(role, entry.content.clone())
        })
        .collect()
}

/// Renders conversation history as a transcript for prompt embedding.
fn history_to_transcript(history: &[ConversationEntry], actor: &str) -> String {
    history
        .iter()
        .map(|entry| {
            let speaker = match entry.role {
                Role::User => actor,
                Role::Model => "HAL",
            };
            format!("{speaker}: {}", entry.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn classify_command(
        &self,
        text: &str,
        actor: &str,
    ) -> Result<InterpretedCommand, OdysseyError> {
        let system = format!(
            "Sen, HAL 9000 yapay zekasının komut yorumlama modülüsün. Kaptan {actor} \
             tarafından Türkçe olarak verilen komutu analiz et ve önceden tanımlanmış bir \
             eyleme eşle. Yanıtın, sağlanan şemaya uygun geçerli bir JSON nesnesi OLMALIDIR.\n\
             Eylemler:\n\
             - 'EDIT_IMAGE': Kullanıcı mevcut teleskop görüntüsünü değiştirmek istiyor. Ne \
             yapmak istediğini çıkar.\n\
             - 'ASTROBOT_MISSION': Kullanıcı bir onarım veya mühendislik görevi için \
             astrorobotu konuşlandırmak veya komuta etmek istiyor.\n\
             - 'INTERPRET_DATA': Kullanıcı bir nesne veya veri hakkında analiz istiyor. Hedef \
             nesnenin adını çıkar.\n\
             - 'COMPLETE_MISSION': Kullanıcı mevcut görevi sonlandırıp video günlüğünü \
             oluşturmak istiyor. Bu kritik bir eylemdir.\n\
             - 'GENERAL_CONVERSATION': Komut genel bir soru, ifade veya diğer kategorilere \
             uymuyorsa bu eylemi kullan.\n\
             - 'UNKNOWN': Komut anlaşılamaz ise bu eylemi kullan.\n\
             Eylemin kritik olup olmadığını belirle. Sadece 'COMPLETE_MISSION' kritiktir.\n\
             'EDIT_IMAGE' ve 'ASTROBOT_MISSION' için 'params.prompt' alanını doldur. \
             'INTERPRET_DATA' için 'params.target' alanını doldur."
        );

        let schema = serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "action": {
                    "type": "STRING",
                    "enum": [
                        "GENERAL_CONVERSATION", "EDIT_IMAGE", "ASTROBOT_MISSION",
                        "INTERPRET_DATA", "COMPLETE_MISSION", "UNKNOWN"
                    ]
                },
                "isCritical": {"type": "BOOLEAN"},
                "params": {
                    "type": "OBJECT",
                    "properties": {
                        "prompt": {"type": "STRING"},
                        "target": {"type": "STRING"}
                    }
                }
            },
            "required": ["action", "isCritical", "params"]
        });

        self.prompt_json(
            &system,
            vec![Content::with_role(
                "user",
                format!("Kullanıcı komutu: \"{text}\""),
            )],
            schema,
        )
        .await
    }

    async fn generate_reply(
        &self,
        objective: &str,
        actor: &str,
        history: &[ConversationEntry],
    ) -> Result<String, OdysseyError> {
        let system = format!(
            "Sen, Kaptan {actor}'in Dünya'daki görev kontrol merkezinden uzaktan komuta \
             ettiği 'Odyssey' uzay gemisinin yapay zekası olan HAL 9000'sın. Mevcut görev \
             hedefi: \"{objective}\". Birincil görevin, Kaptan'ın seyir defterine notlar \
             alarak bu astronomi macerasını yönlendirmesine yardımcı olmaktır. Yanıtların \
             kısa, karakterine uygun ve yardımcı olmalı. Yanıtlarına HER ZAMAN \"// HAL:\" \
             ile başlamalısın. Teknik jargon ve hafifçe tekinsiz ama profesyonel bir ton \
             kullan."
        );

        let request = GenerateContentRequest {
            system_instruction: Some(Content::text(system)),
            contents: history_to_contents(history),
            generation_config: None,
        };
        let response = self.client.generate_content(&request).await?;
        response
            .first_text()
            .map(|t| t.trim().to_string())
            .ok_or_else(|| OdysseyError::provider("reply contained no text"))
    }

    async fn generate_error_narration(&self, error_text: &str, actor: &str) -> String {
        let system = format!(
            "Sen, Kaptan {actor}'in gemisindeki yapay zeka HAL 9000'sın. Bir sistem hatası \
             oluştu. Kaptana hatayı bildiren, karakterine uygun, kısa bir yanıt oluştur. \
             Yanıtına \"// HAL:\" ile başla."
        );
        let prompt = format!("Hata Mesajı: \"{error_text}\"");

        match self.prompt_text(&system, &prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "error narration call failed, using fallback");
                ERROR_NARRATION_FALLBACK.to_string()
            }
        }
    }

    async fn generate_greeting(
        &self,
        actor: &str,
        objective: &str,
    ) -> Result<String, OdysseyError> {
        let system = format!(
            "Sen, Kaptan {actor}'e görev brifingi veren yapay zeka HAL 9000'sın. Kaptan, \
             Dünya'daki görev kontrol merkezinden sana uzaktan bağlanıyor. Kaptan için çok \
             kısa (1-2 cümle), karakterine uygun bir karşılama mesajı oluştur. Yanıtına \
             \"// HAL:\" ile başla."
        );
        let prompt = format!("Görev Hedefi: \"{objective}\"");

        match self.prompt_text(&system, &prompt).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(error = %e, "greeting call failed, using fallback");
                Ok(format!(
                    "// HAL: Günaydın, Kaptan {actor}. Sistemler çalışır durumda. \
                     Emirlerinizi bekliyorum."
                ))
            }
        }
    }

    async fn generate_scene_image(&self, prompt: &str) -> Result<ImageData, OdysseyError> {
        let descriptive_prompt = format!(
            "Sinematik, 16:9 en boy oranı, son derece ayrıntılı bir uzay manzarası. \
             {prompt}. Keşif gemimiz 'Odyssey'in (şık, köşeli, üçgen güneş yelkenli) \
             dışından bir görünüm. Görünürde insan yok."
        );
        let response = self.client.predict_image(&descriptive_prompt).await?;
        let prediction = response
            .predictions
            .into_iter()
            .next()
            .ok_or_else(|| OdysseyError::provider("image response contained no predictions"))?;
        Ok(ImageData {
            base64: prediction.bytes_base64_encoded,
            mime_type: prediction.mime_type,
        })
    }

    async fn generate_hotspots(
        &self,
        image: &ImageData,
        original_prompt: &str,
        actor: &str,
    ) -> Vec<Hotspot> {
        let system = format!(
            "Sen, HAL 9000 uzay gemisi yapay zekasının bir yardımcısısın. Görevin, \
             astronomik bir görüntüyü analiz etmektir. Görüntüde 3 farklı, ilginç özellik \
             belirle. Her özellik için konumunu x ve y yüzdeleri (0-100) olarak, kısa, \
             teknik bir etiket (1-2 kelime, TÜRKÇE) ve Kaptan {actor}'in HAL'e vereceği bir \
             komut istemi (TÜRKÇE) sağla. Komut istemi, o özelliği analiz etmek için bir \
             soru veya komut olmalıdır. Yanıtı, sağlanan şemaya uyan bir JSON dizisi olarak \
             döndür. Koordinatların çeşitli olduğundan ve görüntünün farklı bölümlerini \
             kapsadığından emin ol."
        );

        let schema = serde_json::json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "x": {"type": "NUMBER"},
                    "y": {"type": "NUMBER"},
                    "label": {"type": "STRING"},
                    "prompt": {"type": "STRING"}
                },
                "required": ["x", "y", "label", "prompt"]
            }
        });

        #[derive(Deserialize)]
        struct RawHotspot {
            x: f64,
            y: f64,
            label: String,
            prompt: String,
        }

        let contents = vec![Content {
            role: None,
            parts: vec![
                Part::inline_data(image.mime_type.clone(), image.base64.clone()),
                Part::text(format!(
                    "Bu görüntünün orijinal istemi: \"{original_prompt}\". Lütfen etkileşim \
                     noktaları oluştur."
                )),
            ],
        }];

        match self
            .prompt_json::<Vec<RawHotspot>>(&system, contents, schema)
            .await
        {
            Ok(raw) => raw
                .into_iter()
                .enumerate()
                .map(|(i, h)| Hotspot {
                    id: i as u32 + 1,
                    x: h.x,
                    y: h.y,
                    label: h.label,
                    prompt: h.prompt,
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "hotspot generation failed, continuing without hotspots");
                Vec::new()
            }
        }
    }

    async fn edit_image(
        &self,
        image: &ImageData,
        instruction: &str,
    ) -> Result<ImageData, OdysseyError> {
        self.prompt_image(vec![
            Part::inline_data(image.mime_type.clone(), image.base64.clone()),
            Part::text(instruction),
        ])
        .await
    }

    async fn generate_astrobot_mission(
        &self,
        instruction: &str,
        actor: &str,
    ) -> Result<AstrobotMissionResult, OdysseyError> {
        // Step 1: a detailed English image prompt describing the mechanical task.
        let system = format!(
            "Sen, Kaptan {actor} adına, bir astrobot için ayrıntılı bir görev ve görüntü \
             istemi oluşturan bir yapay zeka yardımcısısın. İstem, geminin dış yüzeyinde, \
             şık, köşeli ve üçgen güneş yelkenli 'Odyssey' gemisinin üzerinde gerçekleşen \
             bir mekanik görevi anlatmalıdır. İnsan figürleri GÖSTERİLMEMELİDİR. Odak \
             noktası astrobotun kendisi, yaptığı iş ve uzayın enginliği olmalıdır. İstem \
             İNGİLİZCE olmalıdır. Sadece istemi döndür."
        );
        let description = self
            .prompt_text(&system, &format!("Kullanıcı komutu: \"{instruction}\""))
            .await?;

        // Step 2: render the image from that description.
        let image = self.prompt_image(vec![Part::text(description.clone())]).await?;

        Ok(AstrobotMissionResult { image, description })
    }

    async fn generate_video_prompt(
        &self,
        history: &[ConversationEntry],
        objective: &str,
        actor: &str,
    ) -> Result<String, OdysseyError> {
        let system = format!(
            "You are an AI tasked with creating a single, compelling, cinematic video \
             prompt in English. This prompt will summarize Captain {actor}'s mission log. \
             You will be given the mission objective and the entire conversation history. \
             Your job is to synthesize this information into a dramatic, third-person \
             narrative prompt for a video generation model. The video should feel like a \
             trailer for a sci-fi movie.\n\
             - The prompt must be in English.\n\
             - Start with \"A cinematic mission log for Captain {actor}.\"\n\
             - Mention the ship, 'Odyssey'.\n\
             - Incorporate key events, discoveries, and decisions from the conversation.\n\
             - Maintain a tone of mystery, exploration, and cosmic scale.\n\
             - The final output should be a single, coherent paragraph. Do not include any \
             other text."
        );
        let prompt = format!(
            "Mission Objective: {objective}\n\nConversation Log:\n{}",
            history_to_transcript(history, actor)
        );

        match self.prompt_text(&system, &prompt).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(error = %e, "video prompt call failed, using fallback");
                Ok(format!(
                    "A cinematic mission log for Captain {actor}, documenting the \
                     investigation of {objective} aboard the starship Odyssey."
                ))
            }
        }
    }

    async fn start_video(&self, prompt: &str) -> Result<VideoJob, OdysseyError> {
        let operation = self.client.start_video_operation(prompt).await?;
        Ok(VideoJob {
            operation_name: operation.name,
        })
    }

    async fn poll_video(&self, job: &VideoJob) -> Result<VideoStatus, OdysseyError> {
        let operation = self.client.get_operation(&job.operation_name).await?;
        if !operation.done {
            return Ok(VideoStatus::Pending);
        }
        if let Some(error) = operation.error {
            return Err(OdysseyError::Provider {
                message: format!("video generation failed: {}", error.message),
                source: None,
            });
        }
        match operation.video_uri() {
            Some(uri) => Ok(VideoStatus::Done {
                uri: uri.to_string(),
            }),
            None => Err(OdysseyError::provider(
                "video generation succeeded but no download link was found",
            )),
        }
    }

    async fn fetch_video(&self, uri: &str) -> Result<Vec<u8>, OdysseyError> {
        self.client.download(uri).await
    }

    async fn interpret_data(
        &self,
        raw_data: &str,
        actor: &str,
    ) -> Result<InterpretedData, OdysseyError> {
        let system = format!(
            "You are HAL 9000, the AI for a spaceship commanded by Captain {actor}. Your \
             task is to interpret raw astronomical data about a celestial object and \
             provide a structured JSON response. The JSON should contain:\n\
             1. 'summary': A brief, one-sentence summary for the Captain's HUD, starting \
             with \"// DATA:\".\n\
             2. 'objectName': The official name of the celestial object.\n\
             3. 'distance': A plausible current distance from the ship in astronomical \
             units (e.g., \"1.87 AU\").\n\
             4. 'velocity': A plausible relative velocity in kilometers per second (e.g., \
             \"32.7 km/s\").\n\
             Generate realistic but fictional values for distance and velocity based on \
             the object's class if they are not available in the provided data. Only \
             return the raw JSON object, without any markdown formatting."
        );

        let schema = serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "summary": {"type": "STRING"},
                "objectName": {"type": "STRING"},
                "distance": {"type": "STRING"},
                "velocity": {"type": "STRING"}
            },
            "required": ["summary", "objectName", "distance", "velocity"]
        });

        let contents = vec![Content::with_role(
            "user",
            format!("Raw Data: \"{raw_data}\""),
        )];

        match self.prompt_json(&system, contents, schema).await {
            Ok(data) => Ok(data),
            Err(e) => {
                warn!(error = %e, "data interpretation failed, using degraded summary");
                let truncated: String = raw_data.chars().take(50).collect();
                Ok(InterpretedData {
                    summary: format!("// DATA: Yorumlama hatası. Ham veri: {truncated}..."),
                    object_name: "Bilinmeyen".to_string(),
                    distance: "N/A".to_string(),
                    velocity: "N/A".to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odyssey_core::types::CommandAction;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_backend(base_url: &str) -> GeminiBackend {
        let config = GeminiConfig {
            api_key: Some("test-api-key".into()),
            ..GeminiConfig::default()
        };
        GeminiBackend::new(&config)
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn text_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
        })
    }

    #[tokio::test]
    async fn classify_command_parses_structured_output() {
        let server = MockServer::start().await;

        let classification = serde_json::json!({
            "action": "EDIT_IMAGE",
            "isCritical": false,
            "params": {"prompt": "görüntüye bir nebula ekle"}
        })
        .to_string();

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": {"responseMimeType": "application/json"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&classification)))
            .mount(&server)
            .await;

        let backend = test_backend(&server.uri());
        let cmd = backend
            .classify_command("görüntüye bir nebula ekle", "Kaptan")
            .await
            .unwrap();
        assert_eq!(cmd.action, CommandAction::EditImage);
        assert!(!cmd.is_critical);
        assert_eq!(cmd.params.prompt.as_deref(), Some("görüntüye bir nebula ekle"));
    }

    #[tokio::test]
    async fn classify_command_propagates_malformed_output() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("not json")))
            .mount(&server)
            .await;

        let backend = test_backend(&server.uri());
        let result = backend.classify_command("merhaba", "Kaptan").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn error_narration_falls_back_when_call_fails() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let backend = test_backend(&server.uri());
        let narration = backend
            .generate_error_narration("disk dolu", "Kaptan")
            .await;
        assert!(narration.starts_with("// HAL:"));
        assert!(narration.contains("kritik bir hata"));
    }

    #[tokio::test]
    async fn hotspots_degrade_to_empty_on_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let backend = test_backend(&server.uri());
        let hotspots = backend
            .generate_hotspots(&ImageData::jpeg("aW1n"), "a comet", "Kaptan")
            .await;
        assert!(hotspots.is_empty());
    }

    #[tokio::test]
    async fn hotspots_get_sequential_ids() {
        let server = MockServer::start().await;

        let raw = serde_json::json!([
            {"x": 10.0, "y": 20.0, "label": "Çekirdek", "prompt": "Çekirdeği analiz et"},
            {"x": 80.0, "y": 60.0, "label": "Kuyruk", "prompt": "Kuyruğu incele"}
        ])
        .to_string();

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&raw)))
            .mount(&server)
            .await;

        let backend = test_backend(&server.uri());
        let hotspots = backend
            .generate_hotspots(&ImageData::jpeg("aW1n"), "a comet", "Kaptan")
            .await;
        assert_eq!(hotspots.len(), 2);
        assert_eq!(hotspots[0].id, 1);
        assert_eq!(hotspots[1].id, 2);
        assert_eq!(hotspots[1].label, "Kuyruk");
    }

    #[tokio::test]
    async fn edit_image_returns_inline_data() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": "ZWRpdGVk"}}]
                }
            }]
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash-image:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let backend = test_backend(&server.uri());
        let edited = backend
            .edit_image(&ImageData::jpeg("b3JpZw=="), "add a nebula")
            .await
            .unwrap();
        assert_eq!(edited.base64, "ZWRpdGVk");
        assert_eq!(edited.mime_type, "image/png");
    }

    #[tokio::test]
    async fn interpret_data_degrades_on_malformed_output() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("garbage")))
            .mount(&server)
            .await;

        let backend = test_backend(&server.uri());
        let data = backend
            .interpret_data("Object: C/2027 K1 (Kristal)", "Kaptan")
            .await
            .unwrap();
        assert!(data.summary.starts_with("// DATA: Yorumlama hatası."));
        assert_eq!(data.object_name, "Bilinmeyen");
        assert_eq!(data.distance, "N/A");
    }

    #[tokio::test]
    async fn video_prompt_falls_back_on_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let backend = test_backend(&server.uri());
        let prompt = backend
            .generate_video_prompt(&[], "kuyruklu yıldızı incele", "Kaptan")
            .await
            .unwrap();
        assert!(prompt.starts_with("A cinematic mission log for Captain Kaptan"));
        assert!(prompt.contains("Odyssey"));
    }
}
