//! Integration tests for `MapboxClient` using wiremock HTTP mocks.

use atacado_core::GeoPoint;
use atacado_geo::providers::MapboxClient;
use atacado_geo::{Geocoder, GeocodingError};
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> MapboxClient {
    MapboxClient::with_base_url("pk.test", 30, "atacado/0.1 (test)", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn geocode_returns_lat_lon_from_first_feature() {
    let server = MockServer::start().await;

    // Mapbox centers are [longitude, latitude].
    let body = serde_json::json!({
        "features": [
            {
                "center": [-51.2177, -30.0346],
                "place_name": "Av. Ipiranga 1200, Porto Alegre, Brazil"
            },
            {
                "center": [0.0, 0.0],
                "place_name": "should be ignored"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path_regex(r"^/geocoding/v5/mapbox\.places/.*\.json$"))
        .and(query_param("access_token", "pk.test"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let point = client
        .geocode("Av. Ipiranga 1200, Porto Alegre")
        .await
        .expect("should geocode");

    assert!((point.latitude - (-30.0346)).abs() < 1e-9);
    assert!((point.longitude - (-51.2177)).abs() < 1e-9);
}

#[tokio::test]
async fn geocode_zero_features_is_no_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/geocoding/v5/mapbox\.places/.*\.json$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "features": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.geocode("nowhere at all").await;

    assert!(
        matches!(result, Err(GeocodingError::NoResults { ref address }) if address == "nowhere at all"),
        "expected NoResults, got: {result:?}"
    );
}

#[tokio::test]
async fn geocode_http_error_surfaces_as_http_variant() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/geocoding/v5/mapbox\.places/.*\.json$"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.geocode("Av. Brasil 100").await;

    assert!(
        matches!(result, Err(GeocodingError::Http(_))),
        "expected Http, got: {result:?}"
    );
}

#[tokio::test]
async fn geocode_malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/geocoding/v5/mapbox\.places/.*\.json$"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.geocode("Av. Brasil 100").await;

    assert!(
        matches!(result, Err(GeocodingError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn reverse_geocode_returns_place_name() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "features": [
            {
                "center": [-51.2177, -30.0346],
                "place_name": "Av. Ipiranga 1200, Porto Alegre, Brazil"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path_regex(r"^/geocoding/v5/mapbox\.places/.*\.json$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let address = client
        .reverse_geocode(GeoPoint {
            latitude: -30.0346,
            longitude: -51.2177,
        })
        .await
        .expect("should reverse geocode");

    assert_eq!(address, "Av. Ipiranga 1200, Porto Alegre, Brazil");
}
