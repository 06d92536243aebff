//! `nearby` subcommand: proximity-filtered store listing.

use atacado_checkout::JsonFileAddressCache;
use atacado_core::{AppConfig, GeoPoint};
use atacado_geo::{filter_by_query, filter_nearby};
use clap::Args;

use crate::common;

#[derive(Debug, Args)]
pub struct NearbyArgs {
    /// Customer street address; falls back to the cached address.
    #[arg(long)]
    address: Option<String>,

    /// Customer latitude, paired with --lon (skips geocoding).
    #[arg(long, requires = "lon", conflicts_with = "address")]
    lat: Option<f64>,

    /// Customer longitude, paired with --lat.
    #[arg(long, requires = "lat")]
    lon: Option<f64>,

    /// Case-insensitive store name/address filter.
    #[arg(long, default_value = "")]
    query: String,

    /// Search radius in kilometers; defaults to the configured radius.
    #[arg(long)]
    radius_km: Option<f64>,
}

pub async fn run(config: &AppConfig, args: NearbyArgs) -> anyhow::Result<()> {
    let geocoder = common::build_geocoder(config)?;
    let stores = common::load_stores(config)?;
    let radius_km = args.radius_km.unwrap_or(config.search_radius_km);

    let reference = match (args.lat, args.lon) {
        (Some(latitude), Some(longitude)) => GeoPoint {
            latitude,
            longitude,
        },
        _ => {
            let address = resolve_address(config, args.address)?;
            tracing::debug!(address, "geocoding customer address");
            geocoder.geocode(&address).await?
        }
    };

    let nearby = filter_nearby(reference, &stores, radius_km, geocoder.as_ref()).await;
    let matches = filter_by_query(&nearby, &args.query);

    if matches.is_empty() {
        println!("no stores within {radius_km} km");
        return Ok(());
    }

    for entry in matches {
        println!(
            "{:<12} {:<30} {:>6.1} km  {}",
            entry.store.id, entry.store.name, entry.distance_km, entry.store.address
        );
    }

    Ok(())
}

/// Use the explicit address when given (caching it for next time),
/// otherwise fall back to the cache.
fn resolve_address(config: &AppConfig, explicit: Option<String>) -> anyhow::Result<String> {
    use atacado_checkout::AddressCache;

    let cache = JsonFileAddressCache::new(config.address_cache_path.clone());
    match explicit {
        Some(address) => {
            if let Err(e) = cache.write(&address) {
                tracing::warn!(error = %e, "could not cache the customer address");
            }
            Ok(address)
        }
        None => cache.read().ok_or_else(|| {
            anyhow::anyhow!("no address given and none cached; pass --address or --lat/--lon")
        }),
    }
}
