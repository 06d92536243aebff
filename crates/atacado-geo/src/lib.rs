//! Store proximity filtering and geocoding/routing capabilities.
//!
//! The filtering core is pure: it takes a reference location, candidate
//! stores, and a radius, and annotates the stores within range with their
//! resolved coordinates and great-circle distance. Address resolution and
//! driving-distance lookups are injected through the [`Geocoder`] and
//! [`Router`] traits, with interchangeable Mapbox and Google Maps
//! implementations under [`providers`].

mod capabilities;
mod distance;
mod error;
mod proximity;
pub mod providers;

pub use capabilities::{Geocoder, Router};
pub use distance::{haversine_distance, EARTH_RADIUS_KM};
pub use error::{GeocodingError, RoutingError};
pub use proximity::{filter_by_query, filter_nearby, NearbyStore};
