use clap::{Parser, Subcommand};

mod common;
mod nearby;
mod order;
mod price;

#[derive(Debug, Parser)]
#[command(name = "atacado-cli")]
#[command(about = "Wholesale storefront command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the stores within delivery range of a customer location.
    Nearby(nearby::NearbyArgs),
    /// Price a cart for delivery from a store.
    Price(price::PriceArgs),
    /// Price a cart and produce the WhatsApp order hand-off link.
    Order(order::OrderArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = atacado_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Nearby(args) => nearby::run(&config, args).await,
        Commands::Price(args) => price::run(&config, args).await,
        Commands::Order(args) => order::run(&config, args).await,
    }
}
