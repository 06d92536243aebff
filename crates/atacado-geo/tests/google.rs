//! Integration tests for `GoogleMapsClient` using wiremock HTTP mocks.

use atacado_core::GeoPoint;
use atacado_geo::providers::GoogleMapsClient;
use atacado_geo::{Geocoder, GeocodingError, Router, RoutingError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GoogleMapsClient {
    GoogleMapsClient::with_base_url("g-test", 30, "atacado/0.1 (test)", base_url)
        .expect("client construction should not fail")
}

const STORE: GeoPoint = GeoPoint {
    latitude: -30.0346,
    longitude: -51.2177,
};

const CUSTOMER: GeoPoint = GeoPoint {
    latitude: -30.05,
    longitude: -51.18,
};

#[tokio::test]
async fn geocode_returns_location_of_first_result() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            {
                "formatted_address": "Av. Ipiranga, 1200 - Porto Alegre, RS, Brazil",
                "geometry": { "location": { "lat": -30.0346, "lng": -51.2177 } }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", "Av. Ipiranga 1200, Porto Alegre"))
        .and(query_param("key", "g-test"))
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
async fn geocode_zero_results_is_no_results() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "status": "ZERO_RESULTS", "results": [] });

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.geocode("nowhere at all").await;

    assert!(
        matches!(result, Err(GeocodingError::NoResults { .. })),
        "expected NoResults, got: {result:?}"
    );
}

#[tokio::test]
async fn geocode_error_status_is_api_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "REQUEST_DENIED",
        "error_message": "The provided API key is invalid.",
        "results": []
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.geocode("Av. Brasil 100").await;

    match result {
        Err(GeocodingError::Api(msg)) => {
            assert!(msg.contains("REQUEST_DENIED"), "message was: {msg}");
            assert!(msg.contains("invalid"), "message was: {msg}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn reverse_geocode_uses_latlng_param() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            {
                "formatted_address": "Av. Ipiranga, 1200 - Porto Alegre, RS, Brazil",
                "geometry": { "location": { "lat": -30.0346, "lng": -51.2177 } }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("latlng", "-30.0346,-51.2177"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let address = client
        .reverse_geocode(STORE)
        .await
        .expect("should reverse geocode");

    assert_eq!(address, "Av. Ipiranga, 1200 - Porto Alegre, RS, Brazil");
}

#[tokio::test]
async fn driving_distance_converts_meters_to_km() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "rows": [
            {
                "elements": [
                    {
                        "status": "OK",
                        "distance": { "text": "8.4 km", "value": 8400.0 },
                        "duration": { "text": "14 mins", "value": 840 }
                    }
                ]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/distancematrix/json"))
        .and(query_param("origins", "-30.0346,-51.2177"))
        .and(query_param("destinations", "-30.05,-51.18"))
        .and(query_param("mode", "driving"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let km = client
        .driving_distance_km(STORE, CUSTOMER)
        .await
        .expect("should resolve distance");

    assert!((km - 8.4).abs() < 1e-9, "got {km}");
}

#[tokio::test]
async fn driving_distance_element_failure_is_no_route() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "rows": [
            { "elements": [ { "status": "ZERO_RESULTS" } ] }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/distancematrix/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.driving_distance_km(STORE, CUSTOMER).await;

    assert!(
        matches!(result, Err(RoutingError::NoRoute { ref reason }) if reason == "ZERO_RESULTS"),
        "expected NoRoute, got: {result:?}"
    );
}

#[tokio::test]
async fn driving_distance_top_level_failure_is_api_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OVER_QUERY_LIMIT",
        "rows": []
    });

    Mock::given(method("GET"))
        .and(path("/maps/api/distancematrix/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.driving_distance_km(STORE, CUSTOMER).await;

    assert!(
        matches!(result, Err(RoutingError::Api(_))),
        "expected Api, got: {result:?}"
    );
}
