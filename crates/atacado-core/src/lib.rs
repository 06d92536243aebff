//! Shared domain types and configuration for the atacado storefront.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod app_config;
mod catalog;
mod config;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_stores, StoreConfig, StoresFile};
pub use config::{load_app_config, load_app_config_from_env};

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A wholesale store a customer can browse and order from.
///
/// `coordinates` is filled lazily: `None` until a geocoding lookup succeeds
/// for `address`, then treated as stable for the rest of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinates: Option<GeoPoint>,
}

impl From<StoreConfig> for Store {
    fn from(config: StoreConfig) -> Self {
        Store {
            id: config.id,
            name: config.name,
            address: config.address,
            coordinates: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read stores file {path}: {source}")]
    StoresFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stores file: {0}")]
    StoresFileParse(#[from] serde_yaml::Error),

    #[error("stores file validation failed: {0}")]
    Validation(String),
}
