use std::path::PathBuf;

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub stores_path: PathBuf,
    pub address_cache_path: PathBuf,
    /// Phone number (country code + number, digits only) receiving orders.
    pub whatsapp_phone: String,
    pub mapbox_access_token: Option<String>,
    pub google_maps_api_key: Option<String>,
    pub search_radius_km: f64,
    pub delivery_fee_cap: Option<Decimal>,
    pub geocode_timeout_secs: u64,
    pub http_user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("stores_path", &self.stores_path)
            .field("address_cache_path", &self.address_cache_path)
            .field("whatsapp_phone", &self.whatsapp_phone)
            .field(
                "mapbox_access_token",
                &self.mapbox_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("search_radius_km", &self.search_radius_km)
            .field("delivery_fee_cap", &self.delivery_fee_cap)
            .field("geocode_timeout_secs", &self.geocode_timeout_secs)
            .field("http_user_agent", &self.http_user_agent)
            .finish()
    }
}
