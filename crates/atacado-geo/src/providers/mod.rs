//! Interchangeable geocoding/routing provider clients.
//!
//! Mapbox and Google Maps implement the same [`crate::Geocoder`] contract
//! (and Google additionally [`crate::Router`] via its Distance Matrix
//! endpoint), so callers pick a provider from configuration without the
//! filtering core knowing which one is behind the trait. The great-circle
//! router is the token-free fallback.

mod google;
mod great_circle;
mod mapbox;

pub use google::GoogleMapsClient;
pub use great_circle::GreatCircleRouter;
pub use mapbox::MapboxClient;
