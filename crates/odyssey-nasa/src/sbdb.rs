// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SBDB client with retry, special-object catalog, and descriptive-phrase
//! filtering.

use std::time::Duration;

use async_trait::async_trait;
use odyssey_config::LookupConfig;
use odyssey_core::{OdysseyError, SmallBodyLookup};
use serde::Deserialize;
use tracing::{debug, warn};

/// Fictional mission-critical objects, keyed by normalized full designation.
/// Checked before any network call; a partial name match resolves locally.
const SPECIAL_OBJECTS: [(&str, &str); 3] = [
    (
        "c/2027 k1 (kristal)",
        "Object: C/2027 K1 (Kristal), Classification: Crystalline Anomaly, Anomaly: Emitting \
         a structured, complex signal. Composition appears to be a non-baryonic crystalline \
         lattice. Source unknown.",
    ),
    (
        "p/2028 p1 (yaşam)",
        "Object: P/2028 P1 (Yaşam), Classification: Organic Trail Comet, Anomaly: Shedding a \
         tail rich in complex polypeptides and RNA precursors. Potential panspermia vector.",
    ),
    (
        "x/1882 r1 (hayalet)",
        "Object: X/1882 R1 (Hayalet), Classification: Temporal Echo, Anomaly: Object exhibits \
         intermittent tangibility. Appears to be a spacetime echo of a disintegrated comet, \
         trapped in a localized gravitational lensing effect.",
    ),
];

/// Turkish locative words that mark a phrase as a scene description rather
/// than an object designation. The SBDB API requires specific names
/// ("Eros", "C/2022 E3"), not descriptions.
const DESCRIPTIVE_KEYWORDS: [&str; 10] = [
    "kısmındaki",
    "bulunan",
    "üzerindeki",
    "alttaki",
    "üstteki",
    "ortasındaki",
    "görüntünün",
    "bulutsuyu",
    "galaksinin",
    "bulutunun",
];

/// Lookup backend backed by JPL's public Small-Body Database API.
#[derive(Debug, Clone)]
pub struct SbdbLookup {
    client: reqwest::Client,
    api_url: String,
    retries: u32,
    initial_backoff: Duration,
}

#[derive(Debug, Deserialize)]
struct SbdbResponse {
    #[serde(default)]
    count: Option<serde_json::Value>,
    object: Option<SbdbObject>,
    phys_par: Option<Vec<PhysicalParameter>>,
}

#[derive(Debug, Deserialize)]
struct SbdbObject {
    fullname: String,
    orbit_class: OrbitClass,
}

#[derive(Debug, Deserialize)]
struct OrbitClass {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PhysicalParameter {
    name: String,
    value: Option<serde_json::Value>,
}

impl SbdbLookup {
    /// Creates the lookup backend from the `[lookup]` config section.
    pub fn new(config: &LookupConfig) -> Result<Self, OdysseyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| OdysseyError::Lookup {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_url: config.sbdb_url.trim_end_matches('/').to_string(),
            retries: config.retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
        })
    }

    /// GETs a URL with exponential backoff. Retries on 429 and 5xx; other
    /// client errors fail immediately.
    async fn fetch_with_retry(&self, url: &str) -> Result<String, OdysseyError> {
        let mut delay = self.initial_backoff;

        for attempt in 1..=self.retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.text().await.map_err(|e| OdysseyError::Lookup {
                            message: format!("failed to read SBDB response body: {e}"),
                        });
                    }
                    if status.is_client_error() && status.as_u16() != 429 {
                        return Err(OdysseyError::Lookup {
                            message: format!("SBDB request failed with client error: {status}"),
                        });
                    }
                    warn!(
                        attempt,
                        retries = self.retries,
                        status = %status,
                        "SBDB request failed, will retry"
                    );
                }
                Err(e) => {
                    if attempt == self.retries {
                        return Err(OdysseyError::Lookup {
                            message: format!("SBDB request failed: {e}"),
                        });
                    }
                    warn!(attempt, retries = self.retries, error = %e, "network error, will retry");
                }
            }

            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        Err(OdysseyError::Lookup {
            message: format!("SBDB request failed after {} attempts", self.retries),
        })
    }

    async fn query_api(&self, object_name: &str) -> Result<Option<String>, OdysseyError> {
        let url = format!(
            "{}?sstr={}&phys-par=1",
            self.api_url,
            urlencode(object_name)
        );
        let body = self.fetch_with_retry(&url).await?;

        let data: SbdbResponse =
            serde_json::from_str(&body).map_err(|e| OdysseyError::Lookup {
                message: format!("failed to parse SBDB response: {e}"),
            })?;

        // count "0" means no match; ambiguous multi-match responses also
        // carry no `object` field. The API reports count as either a string
        // or a number depending on the query form.
        let not_found = data
            .count
            .as_ref()
            .is_some_and(|v| v.as_str() == Some("0") || v.as_i64() == Some(0));
        if not_found {
            debug!(object_name, "object not found in SBDB");
            return Ok(None);
        }
        let Some(object) = data.object else {
            debug!(object_name, "SBDB response carried no object record");
            return Ok(None);
        };

        let mut formatted = format!(
            "Object: {}, Orbit Class: {}",
            object.fullname, object.orbit_class.name
        );
        if let Some(phys_par) = data.phys_par {
            if let Some(diameter) = find_param(&phys_par, "diameter") {
                formatted.push_str(&format!(", Diameter: {diameter} km"));
            }
            if let Some(extent) = find_param(&phys_par, "extent") {
                formatted.push_str(&format!(", Dimensions: {extent} km"));
            }
        }
        Ok(Some(formatted))
    }
}

fn find_param(params: &[PhysicalParameter], name: &str) -> Option<String> {
    params
        .iter()
        .find(|p| p.name == name)
        .and_then(|p| p.value.as_ref())
        .map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

/// Normalizes an object name for special-object matching: lowercased with
/// collapsed whitespace.
fn normalize(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the query looks like a scene description instead of an object
/// designation, so the SBDB query should be skipped.
fn is_descriptive_phrase(normalized: &str) -> bool {
    DESCRIPTIVE_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
        || normalized.split(' ').count() > 5
}

/// Minimal percent-encoding for query values.
fn urlencode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

#[async_trait]
impl SmallBodyLookup for SbdbLookup {
    async fn lookup(&self, object_name: &str) -> Result<Option<String>, OdysseyError> {
        let normalized = normalize(object_name);

        // Mission-critical fictional objects resolve locally, and a partial
        // name ("kristal") matches its full designation.
        for (key, data) in SPECIAL_OBJECTS {
            if key.contains(normalized.as_str()) {
                debug!(object_name, "resolved from special object catalog");
                return Ok(Some(data.to_string()));
            }
        }

        if is_descriptive_phrase(&normalized) {
            warn!(
                object_name,
                "descriptive phrase, not a celestial object name; skipping SBDB query"
            );
            return Ok(None);
        }

        match self.query_api(object_name).await {
            Ok(result) => Ok(result),
            Err(e) => {
                // Degrade to "no data" so a flaky lookup cannot wedge the
                // game loop.
                warn!(object_name, error = %e, "SBDB lookup failed, degrading to no data");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_lookup(base_url: &str) -> SbdbLookup {
        let config = LookupConfig {
            sbdb_url: base_url.to_string(),
            retries: 2,
            initial_backoff_ms: 10,
        };
        SbdbLookup::new(&config).unwrap()
    }

    fn offline_lookup() -> SbdbLookup {
        // Unroutable address: any API call fails fast.
        test_lookup("http://127.0.0.1:1")
    }

    #[tokio::test]
    async fn special_objects_resolve_without_network() {
        let lookup = offline_lookup();
        let data = lookup.lookup("C/2027 K1 (Kristal)").await.unwrap().unwrap();
        assert!(data.contains("Crystalline Anomaly"));
    }

    #[tokio::test]
    async fn partial_special_name_matches() {
        let lookup = offline_lookup();
        let data = lookup.lookup("hayalet").await.unwrap().unwrap();
        assert!(data.contains("Temporal Echo"));

        let data = lookup.lookup("YAŞAM").await.unwrap().unwrap();
        assert!(data.contains("Organic Trail Comet"));
    }

    #[tokio::test]
    async fn descriptive_phrase_skips_api() {
        let lookup = offline_lookup();
        // Contains a descriptive keyword; must return None without a request.
        let result = lookup
            .lookup("görüntünün sol kısmındaki parlak nesne")
            .await
            .unwrap();
        assert!(result.is_none());

        // More than 5 words is also treated as descriptive.
        let result = lookup
            .lookup("the very bright object near the left edge")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn real_object_formats_sbdb_fields() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "count": 1,
            "object": {
                "fullname": "433 Eros (A898 PA)",
                "orbit_class": {"name": "Amor"}
            },
            "phys_par": [
                {"name": "diameter", "value": "16.84"},
                {"name": "extent", "value": "34.4x11.2x11.2"}
            ]
        });

        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("sstr", "Eros"))
            .and(query_param("phys-par", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let lookup = test_lookup(&server.uri());
        let data = lookup.lookup("Eros").await.unwrap().unwrap();
        assert_eq!(
            data,
            "Object: 433 Eros (A898 PA), Orbit Class: Amor, Diameter: 16.84 km, \
             Dimensions: 34.4x11.2x11.2 km"
        );
    }

    #[tokio::test]
    async fn unknown_object_returns_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": "0"})),
            )
            .mount(&server)
            .await;

        let lookup = test_lookup(&server.uri());
        assert!(lookup.lookup("Nonexistium").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn server_errors_degrade_to_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let lookup = test_lookup(&server.uri());
        assert!(lookup.lookup("Eros").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn client_error_fails_fast_and_degrades() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let lookup = test_lookup(&server.uri());
        assert!(lookup.lookup("Eros").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn retries_429_then_succeeds() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 1,
                "object": {"fullname": "1 Ceres", "orbit_class": {"name": "Main-belt Asteroid"}}
            })))
            .mount(&server)
            .await;

        let lookup = test_lookup(&server.uri());
        let data = lookup.lookup("Ceres").await.unwrap().unwrap();
        assert_eq!(data, "Object: 1 Ceres, Orbit Class: Main-belt Asteroid");
    }

    #[test]
    fn urlencode_escapes_spaces_and_slashes() {
        assert_eq!(urlencode("C/2022 E3"), "C%2F2022%20E3");
        assert_eq!(urlencode("Eros"), "Eros");
    }
}
