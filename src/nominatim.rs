use crate::errors::PlaceClipError;
use crate::place::{Address, Coordinate, PlaceResult};
use crate::provider::SearchProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub endpoint: String,
    pub limit: usize,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        NominatimConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            limit: 20,
            user_agent: format!("placeclip/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(10),
        }
    }
}

/// One record of a `format=jsonv2` search response.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: HashMap<String, String>,
    #[serde(default)]
    pub extratags: Option<HashMap<String, String>>,
}

impl NominatimPlace {
    /// Converts the raw record. Returns `None` when the coordinate does not
    /// parse.
    pub fn into_place(self) -> Option<PlaceResult> {
        let latitude = self.lat.trim().parse::<f64>().ok()?;
        let longitude = self.lon.trim().parse::<f64>().ok()?;

        let extratags = self.extratags.unwrap_or_default();
        let address = &self.address;

        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                self.display_name
                    .as_deref()
                    .and_then(|display| display.split(',').next())
                    .map(|first| first.trim().to_string())
            });

        Some(PlaceResult {
            name,
            phone: pick(&extratags, &["phone", "contact:phone"]),
            url: pick(&extratags, &["website", "contact:website", "url"]),
            address: Address {
                thoroughfare: pick(address, &["road", "pedestrian", "footway"]),
                sub_thoroughfare: pick(address, &["house_number"]),
                locality: pick(address, &["city", "town", "village", "hamlet"]),
                sub_locality: pick(address, &["suburb", "neighbourhood", "quarter"]),
                administrative_area: pick(address, &["state"]),
                sub_administrative_area: pick(address, &["county"]),
                postal_code: pick(address, &["postcode"]),
                iso_country_code: pick(address, &["country_code"])
                    .map(|code| code.to_uppercase()),
                country: pick(address, &["country"]),
            },
            coordinate: Coordinate::new(latitude, longitude),
        })
    }
}

/// First non-blank value among `keys`.
fn pick(map: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.trim().is_empty())
        .cloned()
}

/// Decodes a search response body, skipping records without a usable
/// coordinate.
pub fn parse_response(body: &str) -> Result<Vec<PlaceResult>, PlaceClipError> {
    let records: Vec<NominatimPlace> = serde_json::from_str(body)
        .map_err(|e| PlaceClipError::ResponseError(format!("Failed to parse response: {}", e)))?;

    let total = records.len();
    let places: Vec<PlaceResult> = records
        .into_iter()
        .filter_map(|record| {
            let label = record.display_name.clone();
            let place = record.into_place();
            if place.is_none() {
                debug!("Skipping record with invalid coordinate: {:?}", label);
            }
            place
        })
        .collect();

    debug!("Decoded {} of {} records", places.len(), total);
    Ok(places)
}

pub struct NominatimProvider {
    client: Client,
    config: NominatimConfig,
}

impl NominatimProvider {
    pub fn new(config: NominatimConfig) -> Result<Self, PlaceClipError> {
        if config.endpoint.trim().is_empty() {
            return Err(PlaceClipError::ConfigError(
                "search endpoint must not be empty".to_string(),
            ));
        }
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| PlaceClipError::ConfigError(format!("Failed to build client: {}", e)))?;
        Ok(NominatimProvider { client, config })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl SearchProvider for NominatimProvider {
    async fn search(&self, query: &str) -> Result<Vec<PlaceResult>, PlaceClipError> {
        debug!("Searching for {:?}", query);
        let limit = self.config.limit.to_string();

        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("addressdetails", "1"),
                ("extratags", "1"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let places = parse_response(&body)?;
        info!("Search for {:?} returned {} places", query, places.len());
        Ok(places)
    }
}
