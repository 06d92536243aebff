//! Google Maps Geocoding and Distance Matrix API client.

use std::time::Duration;

use async_trait::async_trait;
use atacado_core::GeoPoint;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::capabilities::{Geocoder, Router};
use crate::error::{GeocodingError, RoutingError};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";

/// Client for the Google Maps web service APIs.
///
/// Covers forward/reverse geocoding and driving distance through the
/// Distance Matrix endpoint, so a single API key serves both the
/// [`Geocoder`] and [`Router`] capabilities. Use
/// [`GoogleMapsClient::with_base_url`] to point at a mock server in tests.
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixRow {
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixElement {
    status: String,
    distance: Option<DistanceValue>,
}

#[derive(Debug, Deserialize)]
struct DistanceValue {
    /// Meters.
    value: f64,
}

impl GoogleMapsClient {
    /// Creates a new client pointed at the production Google Maps APIs.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodingError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodingError::Api`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(
        api_key: &str,
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
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters via [`Url::query_pairs_mut`].
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    async fn fetch_geocode(&self, url: Url) -> Result<GeocodeResponse, GeocodingError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodingError::Deserialize {
                context: url.path().to_string(),
                source: e,
            })?;

        match parsed.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(parsed),
            status => Err(GeocodingError::Api(format!(
                "{status}: {}",
                parsed.error_message.as_deref().unwrap_or("no detail")
            ))),
        }
    }
}

#[async_trait]
impl Geocoder for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodingError> {
        let url = self.build_url("maps/api/geocode/json", &[("address", address)]);
        let parsed = self.fetch_geocode(url).await?;

        let Some(result) = parsed.results.first() else {
            tracing::debug!(address, "google geocode returned zero results");
            return Err(GeocodingError::NoResults {
                address: address.to_string(),
            });
        };

        Ok(GeoPoint {
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
        })
    }

    async fn reverse_geocode(&self, point: GeoPoint) -> Result<String, GeocodingError> {
        let latlng = format!("{},{}", point.latitude, point.longitude);
        let url = self.build_url("maps/api/geocode/json", &[("latlng", &latlng)]);
        let parsed = self.fetch_geocode(url).await?;

        parsed
            .results
            .into_iter()
            .next()
            .map(|result| result.formatted_address)
            .ok_or(GeocodingError::NoResults { address: latlng })
    }
}

#[async_trait]
impl Router for GoogleMapsClient {
    async fn driving_distance_km(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<f64, RoutingError> {
        let origins = format!("{},{}", origin.latitude, origin.longitude);
        let destinations = format!("{},{}", destination.latitude, destination.longitude);
        let url = self.build_url(
            "maps/api/distancematrix/json",
            &[
                ("origins", origins.as_str()),
                ("destinations", destinations.as_str()),
                ("mode", "driving"),
            ],
        );

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let parsed: DistanceMatrixResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Deserialize {
                context: url.path().to_string(),
                source: e,
            })?;

        if parsed.status != "OK" {
            return Err(RoutingError::Api(format!(
                "{}: {}",
                parsed.status,
                parsed.error_message.as_deref().unwrap_or("no detail")
            )));
        }

        let element = parsed
            .rows
            .first()
            .and_then(|row| row.elements.first())
            .ok_or_else(|| RoutingError::NoRoute {
                reason: "empty distance matrix".to_string(),
            })?;

        if element.status != "OK" {
            return Err(RoutingError::NoRoute {
                reason: element.status.clone(),
            });
        }

        let meters = element
            .distance
            .as_ref()
            .ok_or_else(|| RoutingError::NoRoute {
                reason: "element missing distance".to_string(),
            })?
            .value;

        Ok(meters / 1000.0)
    }
}
