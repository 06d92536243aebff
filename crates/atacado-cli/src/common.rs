//! Shared wiring between subcommands: provider selection and catalog loading.

use anyhow::Context;
use atacado_checkout::PricingConfig;
use atacado_core::{AppConfig, Store};
use atacado_geo::providers::{GoogleMapsClient, GreatCircleRouter, MapboxClient};
use atacado_geo::{Geocoder, Router};

/// Pick a geocoding provider from the configured credentials.
///
/// Mapbox is preferred when both tokens are present; the two providers are
/// interchangeable behind the trait.
pub fn build_geocoder(config: &AppConfig) -> anyhow::Result<Box<dyn Geocoder>> {
    if let Some(token) = &config.mapbox_access_token {
        let client = MapboxClient::new(token, config.geocode_timeout_secs, &config.http_user_agent)?;
        return Ok(Box::new(client));
    }
    if let Some(key) = &config.google_maps_api_key {
        let client =
            GoogleMapsClient::new(key, config.geocode_timeout_secs, &config.http_user_agent)?;
        return Ok(Box::new(client));
    }
    anyhow::bail!("no geocoding provider configured; set MAPBOX_ACCESS_TOKEN or GOOGLE_MAPS_API_KEY")
}

/// Pick a routing provider, falling back to the great-circle approximation.
pub fn build_router(config: &AppConfig) -> anyhow::Result<Box<dyn Router>> {
    if let Some(key) = &config.google_maps_api_key {
        let client =
            GoogleMapsClient::new(key, config.geocode_timeout_secs, &config.http_user_agent)?;
        return Ok(Box::new(client));
    }
    tracing::info!("no routing provider configured; using great-circle distances");
    Ok(Box::new(GreatCircleRouter))
}

/// Load the store catalog and lift it into runtime stores.
pub fn load_stores(config: &AppConfig) -> anyhow::Result<Vec<Store>> {
    let file = atacado_core::load_stores(&config.stores_path)
        .with_context(|| format!("loading stores from {}", config.stores_path.display()))?;
    Ok(file.stores.into_iter().map(Store::from).collect())
}

/// Find one store by id in the catalog.
pub fn find_store(config: &AppConfig, store_id: &str) -> anyhow::Result<Store> {
    load_stores(config)?
        .into_iter()
        .find(|store| store.id == store_id)
        .with_context(|| format!("store '{store_id}' not found in the catalog"))
}

/// Pricing configuration with the configured delivery fee cap applied.
pub fn pricing_config(config: &AppConfig) -> PricingConfig {
    PricingConfig {
        delivery_fee_cap: config.delivery_fee_cap,
        ..PricingConfig::default()
    }
}

/// Load a cart from a JSON file.
pub fn load_cart(path: &std::path::Path) -> anyhow::Result<atacado_checkout::Cart> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading cart file {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing cart file {}", path.display()))
}
