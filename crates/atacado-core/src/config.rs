use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;
    use std::str::FromStr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_decimal_opt =
        |var: &str| -> Result<Option<rust_decimal::Decimal>, ConfigError> {
            match lookup(var) {
                Ok(raw) => rust_decimal::Decimal::from_str(&raw)
                    .map(Some)
                    .map_err(|e| ConfigError::InvalidEnvVar {
                        var: var.to_string(),
                        reason: e.to_string(),
                    }),
                Err(_) => Ok(None),
            }
        };

    let whatsapp_phone = require("ATACADO_WHATSAPP_PHONE")?;
    if !whatsapp_phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar {
            var: "ATACADO_WHATSAPP_PHONE".to_string(),
            reason: "must contain only digits (country code + number)".to_string(),
        });
    }

    let env = parse_environment(&or_default("ATACADO_ENV", "development"));
    let log_level = or_default("ATACADO_LOG_LEVEL", "info");
    let stores_path = PathBuf::from(or_default("ATACADO_STORES_PATH", "./config/stores.yaml"));
    let address_cache_path = PathBuf::from(or_default(
        "ATACADO_ADDRESS_CACHE_PATH",
        "./.atacado/address.json",
    ));

    let mapbox_access_token = lookup("MAPBOX_ACCESS_TOKEN").ok();
    let google_maps_api_key = lookup("GOOGLE_MAPS_API_KEY").ok();

    let search_radius_km = parse_f64("ATACADO_SEARCH_RADIUS_KM", "20")?;
    if search_radius_km <= 0.0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ATACADO_SEARCH_RADIUS_KM".to_string(),
            reason: "radius must be positive".to_string(),
        });
    }
    let delivery_fee_cap = parse_decimal_opt("ATACADO_DELIVERY_FEE_CAP")?;

    let geocode_timeout_secs = parse_u64("ATACADO_GEOCODE_TIMEOUT_SECS", "10")?;
    let http_user_agent = or_default("ATACADO_HTTP_USER_AGENT", "atacado/0.1 (storefront)");

    Ok(AppConfig {
        env,
        log_level,
        stores_path,
        address_cache_path,
        whatsapp_phone,
        mapbox_access_token,
        google_maps_api_key,
        search_radius_km,
        delivery_fee_cap,
        geocode_timeout_secs,
        http_user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
