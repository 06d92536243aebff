//! Token-free fallback router.

use async_trait::async_trait;
use atacado_core::GeoPoint;

use crate::capabilities::Router;
use crate::distance::haversine_distance;
use crate::error::RoutingError;

/// Approximates driving distance with the great-circle distance.
///
/// Used when no routing provider is configured. Understates real road
/// distance, which only ever lowers the delivery fee.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatCircleRouter;

#[async_trait]
impl Router for GreatCircleRouter {
    async fn driving_distance_km(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<f64, RoutingError> {
        Ok(haversine_distance(origin, destination))
    }
}
