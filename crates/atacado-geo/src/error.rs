use thiserror::Error;

/// Errors returned by [`crate::Geocoder`] implementations.
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned no match for the address.
    #[error("no geocoding results for address '{address}'")]
    NoResults { address: String },

    /// The provider returned an error status with a message.
    #[error("geocoding API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned by [`crate::Router`] implementations.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider could not produce a route between the two points.
    #[error("no route between origin and destination ({reason})")]
    NoRoute { reason: String },

    /// The provider returned an error status with a message.
    #[error("routing API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
