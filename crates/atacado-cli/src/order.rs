//! `order` subcommand: checkout and WhatsApp hand-off.

use std::path::PathBuf;

use atacado_checkout::{
    format_order_message, whatsapp_order_url, AddressCache, CheckoutSession, CustomerDetails,
    JsonFileAddressCache, PaymentMethod,
};
use atacado_core::AppConfig;
use chrono::Utc;
use clap::{Args, ValueEnum};

use crate::common;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaymentArg {
    Pix,
    CreditCard,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Pix => PaymentMethod::Pix,
            PaymentArg::CreditCard => PaymentMethod::CreditCard,
        }
    }
}

#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Path to a cart JSON file.
    #[arg(long)]
    cart: PathBuf,

    /// Id of the store fulfilling the order.
    #[arg(long)]
    store: String,

    /// Customer name, as it should appear in the order message.
    #[arg(long)]
    name: String,

    /// Delivery street address; falls back to the cached address.
    #[arg(long)]
    address: Option<String>,

    /// Free-form note for the store.
    #[arg(long, default_value = "")]
    note: String,

    #[arg(long, value_enum)]
    payment: PaymentArg,
}

pub async fn run(config: &AppConfig, args: OrderArgs) -> anyhow::Result<()> {
    let cart = common::load_cart(&args.cart)?;
    anyhow::ensure!(!cart.is_empty(), "cannot place an order with an empty cart");

    let store = common::find_store(config, &args.store)?;
    let geocoder = common::build_geocoder(config)?;
    let router = common::build_router(config)?;

    let cache = JsonFileAddressCache::new(config.address_cache_path.clone());
    let street_address = match args.address {
        Some(address) => {
            if let Err(e) = cache.write(&address) {
                tracing::warn!(error = %e, "could not cache the customer address");
            }
            address
        }
        None => cache
            .read()
            .ok_or_else(|| anyhow::anyhow!("no address given and none cached; pass --address"))?,
    };

    let mut session = CheckoutSession::with_cart(store, cart);
    session.resolve_store_coordinates(geocoder.as_ref()).await?;
    if let Err(e) = session
        .set_customer_address(&street_address, geocoder.as_ref())
        .await
    {
        tracing::warn!(error = %e, "customer address did not resolve; pricing without delivery fee");
    }

    let pricing = session
        .checkout(router.as_ref(), &common::pricing_config(config))
        .await?;

    let customer = CustomerDetails {
        name: args.name,
        street_address,
        note: args.note,
        payment_method: args.payment.into(),
    };

    let message = format_order_message(
        session.store(),
        session.cart(),
        &pricing,
        &customer,
        Utc::now(),
    );

    println!("{message}");
    println!();
    println!("{}", whatsapp_order_url(&config.whatsapp_phone, &message));

    Ok(())
}
