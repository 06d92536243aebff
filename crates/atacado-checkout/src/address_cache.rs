//! Cached customer address, so returning customers skip the prompt.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressCacheError {
    #[error("failed to write address cache: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode address cache: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key/value persistence of the last known customer address.
///
/// Reads are lossy on purpose: a missing or unreadable cache behaves like
/// an empty one, and the customer is simply prompted again.
pub trait AddressCache: Send + Sync {
    fn read(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`AddressCacheError`] when the address cannot be persisted.
    fn write(&self, address: &str) -> Result<(), AddressCacheError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedAddress {
    address: String,
}

/// Address cache stored as a small JSON file.
#[derive(Debug)]
pub struct JsonFileAddressCache {
    path: PathBuf,
}

impl JsonFileAddressCache {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl AddressCache for JsonFileAddressCache {
    fn read(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<CachedAddress>(&content) {
            Ok(cached) => Some(cached.address),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "ignoring corrupt address cache");
                None
            }
        }
    }

    fn write(&self, address: &str) -> Result<(), AddressCacheError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string_pretty(&CachedAddress {
            address: address.to_string(),
        })?;
        std::fs::write(&self.path, encoded)?;
        Ok(())
    }
}

/// In-memory cache for tests and sessions that opt out of persistence.
#[derive(Debug, Default)]
pub struct InMemoryAddressCache {
    address: Mutex<Option<String>>,
}

impl InMemoryAddressCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AddressCache for InMemoryAddressCache {
    fn read(&self) -> Option<String> {
        self.address.lock().ok()?.clone()
    }

    fn write(&self, address: &str) -> Result<(), AddressCacheError> {
        if let Ok(mut slot) = self.address.lock() {
            *slot = Some(address.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("atacado-{}-{name}", std::process::id()))
    }

    #[test]
    fn file_cache_round_trips() {
        let path = temp_path("roundtrip.json");
        let cache = JsonFileAddressCache::new(path.clone());

        cache
            .write("Rua das Flores 22, Porto Alegre")
            .expect("write should succeed");
        assert_eq!(
            cache.read().as_deref(),
            Some("Rua das Flores 22, Porto Alegre")
        );

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn file_cache_overwrites_previous_address() {
        let path = temp_path("overwrite.json");
        let cache = JsonFileAddressCache::new(path.clone());

        cache.write("first").expect("write should succeed");
        cache.write("second").expect("write should succeed");
        assert_eq!(cache.read().as_deref(), Some("second"));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_reads_as_none() {
        let cache = JsonFileAddressCache::new(temp_path("does-not-exist.json"));
        assert!(cache.read().is_none());
    }

    #[test]
    fn corrupt_file_reads_as_none() {
        let path = temp_path("corrupt.json");
        std::fs::write(&path, "{ not json").expect("setup write");
        let cache = JsonFileAddressCache::new(path.clone());

        assert!(cache.read().is_none(), "corrupt cache behaves like empty");

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn in_memory_cache_round_trips() {
        let cache = InMemoryAddressCache::new();
        assert!(cache.read().is_none());
        cache.write("Av. Brasil 100").expect("write should succeed");
        assert_eq!(cache.read().as_deref(), Some("Av. Brasil 100"));
    }
}
