//! Mapbox Geocoding API client.

use std::time::Duration;

use async_trait::async_trait;
use atacado_core::GeoPoint;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::capabilities::Geocoder;
use crate::error::GeocodingError;

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/";

/// Client for the Mapbox Geocoding v5 API (forward and reverse lookups).
///
/// Use [`MapboxClient::new`] for production or
/// [`MapboxClient::with_base_url`] to point at a mock server in tests.
pub struct MapboxClient {
    client: Client,
    access_token: String,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    /// `[longitude, latitude]`, Mapbox's coordinate order.
    center: [f64; 2],
    place_name: String,
}

impl MapboxClient {
    /// Creates a new client pointed at the production Mapbox API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodingError> {
        Self::with_base_url(access_token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodingError::Api`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| GeocodingError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url,
        })
    }

    /// Builds `geocoding/v5/mapbox.places/{query}.json?access_token=...&limit=1`.
    fn build_url(&self, query: &str) -> Result<Url, GeocodingError> {
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC);
        let path = format!("geocoding/v5/mapbox.places/{encoded}.json");
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|e| GeocodingError::Api(format!("invalid geocoding query: {e}")))?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("limit", "1");
        Ok(url)
    }

    async fn fetch_features(&self, url: Url) -> Result<GeocodeResponse, GeocodingError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodingError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl Geocoder for MapboxClient {
    async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodingError> {
        let url = self.build_url(address)?;
        let parsed = self.fetch_features(url).await?;

        let Some(feature) = parsed.features.first() else {
            tracing::debug!(address, "mapbox returned zero features");
            return Err(GeocodingError::NoResults {
                address: address.to_string(),
            });
        };

        Ok(GeoPoint {
            latitude: feature.center[1],
            longitude: feature.center[0],
        })
    }

    async fn reverse_geocode(&self, point: GeoPoint) -> Result<String, GeocodingError> {
        let query = format!("{},{}", point.longitude, point.latitude);
        let url = self.build_url(&query)?;
        let parsed = self.fetch_features(url).await?;

        parsed
            .features
            .into_iter()
            .next()
            .map(|feature| feature.place_name)
            .ok_or(GeocodingError::NoResults { address: query })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> MapboxClient {
        MapboxClient::with_base_url("pk.test", 30, "atacado/0.1 (test)", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_encodes_the_address_into_the_path() {
        let client = test_client("https://api.mapbox.com");
        let url = client
            .build_url("Av. Ipiranga 1200, Porto Alegre")
            .unwrap();
        let s = url.as_str();
        assert!(
            s.starts_with("https://api.mapbox.com/geocoding/v5/mapbox.places/"),
            "unexpected url: {s}"
        );
        assert!(s.contains("Av%2E%20Ipiranga%201200"), "unexpected url: {s}");
        assert!(s.ends_with("access_token=pk.test&limit=1"), "unexpected url: {s}");
    }

    #[test]
    fn build_url_keeps_commas_out_of_the_raw_path() {
        let client = test_client("https://api.mapbox.com");
        let url = client.build_url("-51.23,-30.0331").unwrap();
        assert!(!url.path().contains(','), "unencoded comma in {url}");
    }
}
