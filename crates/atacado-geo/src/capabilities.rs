//! Injected lookup capabilities consumed by the filtering core.

use async_trait::async_trait;
use atacado_core::GeoPoint;

use crate::error::{GeocodingError, RoutingError};

/// Resolves free-text street addresses into coordinates and back.
///
/// Implementations own their timeout and cancellation policy; callers only
/// tolerate per-address failure.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a street address into a [`GeoPoint`].
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::NoResults`] when the provider has no match
    /// for the address, or another variant on transport/API failure.
    async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodingError>;

    /// Resolve coordinates into a formatted street address.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::NoResults`] when the provider has no match
    /// for the point, or another variant on transport/API failure.
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<String, GeocodingError>;
}

/// Resolves the driving distance between two points.
#[async_trait]
pub trait Router: Send + Sync {
    /// Driving distance from `origin` to `destination` in kilometers.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::NoRoute`] when the provider cannot connect
    /// the two points, or another variant on transport/API failure.
    async fn driving_distance_km(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<f64, RoutingError>;
}
