//! `price` subcommand: deterministic cart pricing.

use std::path::PathBuf;

use atacado_checkout::price;
use atacado_core::AppConfig;
use clap::Args;

use crate::common;

#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Path to a cart JSON file.
    #[arg(long)]
    pub cart: PathBuf,

    /// Id of the store fulfilling the order.
    #[arg(long)]
    pub store: String,

    /// Driving distance in kilometers, when already known.
    #[arg(long, conflicts_with = "destination")]
    pub distance_km: Option<f64>,

    /// Delivery street address; resolved and routed when no distance is given.
    #[arg(long)]
    pub destination: Option<String>,
}

pub async fn run(config: &AppConfig, args: PriceArgs) -> anyhow::Result<()> {
    let cart = common::load_cart(&args.cart)?;
    let store = common::find_store(config, &args.store)?;

    let distance_km = match (args.distance_km, &args.destination) {
        (Some(km), _) => Some(km),
        (None, Some(destination)) => {
            resolve_distance(config, &store, destination).await
        }
        (None, None) => None,
    };

    let result = price(&cart, distance_km, &common::pricing_config(config))?;

    println!("Itens:            {:>10}", result.total_quantity);
    println!("Peso total:       {:>10.2} kg", result.total_weight_kg);
    println!("Subtotal:         R${:>9.2}", result.subtotal.round_dp(2));
    println!("Taxa de separação: R${:>8.2}", result.picking_fee.round_dp(2));
    println!("Taxa de entrega:  R${:>9.2}", result.delivery_fee.round_dp(2));
    println!("Total:            R${:>9.2}", result.total.round_dp(2));

    Ok(())
}

/// Geocode both endpoints and route between them; any failure degrades to
/// pricing without a delivery fee.
async fn resolve_distance(
    config: &AppConfig,
    store: &atacado_core::Store,
    destination: &str,
) -> Option<f64> {
    let geocoder = match common::build_geocoder(config) {
        Ok(geocoder) => geocoder,
        Err(e) => {
            tracing::warn!(error = %e, "no geocoder available; pricing without delivery fee");
            return None;
        }
    };
    let router = match common::build_router(config) {
        Ok(router) => router,
        Err(e) => {
            tracing::warn!(error = %e, "no router available; pricing without delivery fee");
            return None;
        }
    };

    let origin = match store.coordinates {
        Some(coordinates) => coordinates,
        None => match geocoder.geocode(&store.address).await {
            Ok(coordinates) => coordinates,
            Err(e) => {
                tracing::warn!(store_id = %store.id, error = %e, "store address did not resolve");
                return None;
            }
        },
    };
    let target = match geocoder.geocode(destination).await {
        Ok(coordinates) => coordinates,
        Err(e) => {
            tracing::warn!(destination, error = %e, "destination did not resolve");
            return None;
        }
    };

    match router.driving_distance_km(origin, target).await {
        Ok(km) => Some(km),
        Err(e) => {
            tracing::warn!(error = %e, "routing failed; pricing without delivery fee");
            None
        }
    }
}
