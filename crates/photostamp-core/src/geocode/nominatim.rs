//! Nominatim reverse-geocoding client.
//!
//! Talks to any Nominatim-compatible `/reverse` endpoint over HTTP.
//! Nominatim's usage policy requires an identifying User-Agent, which is
//! taken from the config.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::GeocodeConfig;
use crate::error::PipelineError;

use super::{AddressComponents, ReverseGeocoder};

/// Reverse geocoder backed by a Nominatim HTTP endpoint.
pub struct NominatimGeocoder {
    endpoint: String,
    language: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocodeConfig) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PipelineError::Geocode {
                message: format!("failed to build HTTP client: {e}"),
                status_code: None,
            })?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
            client,
        })
    }
}

/// Nominatim `/reverse?format=jsonv2` response, reduced to what we read.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: AddressComponents,
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    fn name(&self) -> &str {
        "nominatim"
    }

    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AddressComponents, PipelineError> {
        let url = format!("{}/reverse", self.endpoint);

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "jsonv2".to_string()),
                ("addressdetails", "1".to_string()),
                ("accept-language", self.language.clone()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PipelineError::Geocode {
                message: format!("reverse geocoding request failed: {e}"),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(PipelineError::Geocode {
                message: format!("HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let body: ReverseResponse = resp.json().await.map_err(|e| PipelineError::Geocode {
            message: format!("failed to parse geocoder response: {e}"),
            status_code: None,
        })?;

        Ok(body.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_response_deserializes_address() {
        let json = r#"{
            "place_id": 1620612,
            "licence": "Data © OpenStreetMap contributors",
            "display_name": "Leura, Blue Mountains, NSW, Australia",
            "address": {
                "suburb": "Leura",
                "city": "Blue Mountains",
                "state": "New South Wales",
                "country": "Australia",
                "country_code": "au"
            }
        }"#;

        let resp: ReverseResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.address.get("suburb").map(String::as_str), Some("Leura"));
        assert_eq!(
            resp.address.get("country").map(String::as_str),
            Some("Australia")
        );
    }

    #[test]
    fn test_reverse_response_tolerates_missing_address() {
        let resp: ReverseResponse = serde_json::from_str(r#"{"place_id": 1}"#).unwrap();
        assert!(resp.address.is_empty());
    }

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let config = GeocodeConfig {
            endpoint: "https://nominatim.example.org/".to_string(),
            ..GeocodeConfig::default()
        };
        let geocoder = NominatimGeocoder::new(&config).unwrap();
        assert_eq!(geocoder.endpoint, "https://nominatim.example.org");
    }
}
