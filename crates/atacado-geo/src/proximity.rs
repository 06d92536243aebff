//! Proximity filtering of candidate stores around a reference location.

use atacado_core::{GeoPoint, Store};
use futures::future::join_all;

use crate::capabilities::Geocoder;
use crate::distance::haversine_distance;

/// A store that passed the proximity filter, annotated with its resolved
/// coordinates and great-circle distance from the reference location.
#[derive(Debug, Clone)]
pub struct NearbyStore {
    /// The candidate store with `coordinates` guaranteed filled.
    pub store: Store,
    pub distance_km: f64,
}

/// Filter `stores` down to those within `radius_km` of `reference`.
///
/// Stores lacking coordinates are resolved through `geocoder`; the lookups
/// for distinct stores run concurrently and are joined before any distance
/// is computed. A store whose address cannot be resolved is dropped from
/// the result (the listing degrades rather than aborts) and the failure is
/// logged. The boundary is inclusive: `distance_km == radius_km` passes.
///
/// Input order is preserved and the input slice is never mutated; the
/// result carries fresh annotated records.
pub async fn filter_nearby(
    reference: GeoPoint,
    stores: &[Store],
    radius_km: f64,
    geocoder: &dyn Geocoder,
) -> Vec<NearbyStore> {
    let resolutions = join_all(stores.iter().map(|store| async move {
        if let Some(coordinates) = store.coordinates {
            return Some(coordinates);
        }
        match geocoder.geocode(&store.address).await {
            Ok(coordinates) => Some(coordinates),
            Err(e) => {
                tracing::warn!(
                    store_id = %store.id,
                    address = %store.address,
                    error = %e,
                    "dropping store with unresolvable address"
                );
                None
            }
        }
    }))
    .await;

    stores
        .iter()
        .zip(resolutions)
        .filter_map(|(store, coordinates)| {
            let coordinates = coordinates?;
            let distance_km = haversine_distance(reference, coordinates);
            if distance_km > radius_km {
                return None;
            }
            let mut store = store.clone();
            store.coordinates = Some(coordinates);
            Some(NearbyStore { store, distance_km })
        })
        .collect()
}

/// Keep only stores whose name or address contains `query`,
/// case-insensitively. An empty query matches everything.
///
/// Applied after proximity filtering; composable rather than fused.
#[must_use]
pub fn filter_by_query(stores: &[NearbyStore], query: &str) -> Vec<NearbyStore> {
    let query = query.to_lowercase();
    stores
        .iter()
        .filter(|nearby| {
            query.is_empty()
                || nearby.store.name.to_lowercase().contains(&query)
                || nearby.store.address.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}
