use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A store entry as declared in the `stores.yaml` catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub id: String,
    pub name: String,
    pub address: String,
    pub image: Option<String>,
    pub phone: Option<String>,
}

impl StoreConfig {
    /// Generate a URL-safe slug from the store name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[derive(Debug, Deserialize)]
pub struct StoresFile {
    pub stores: Vec<StoreConfig>,
}

/// Load and validate the store catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_stores(path: &Path) -> Result<StoresFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StoresFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let stores_file: StoresFile =
        serde_yaml::from_str(&content).map_err(ConfigError::StoresFileParse)?;

    validate_stores(&stores_file)?;

    Ok(stores_file)
}

fn validate_stores(stores_file: &StoresFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for store in &stores_file.stores {
        if store.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store id must be non-empty".to_string(),
            ));
        }
        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty name",
                store.id
            )));
        }
        if store.address.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty address",
                store.id
            )));
        }
        if !seen_ids.insert(store.id.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store id: '{}'",
                store.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(id: &str, name: &str, address: &str) -> StoreConfig {
        StoreConfig {
            id: id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            image: None,
            phone: None,
        }
    }

    #[test]
    fn slug_lowercases_and_hyphenates() {
        let s = store("s1", "Atacadão São João", "Av. Brasil 100");
        assert_eq!(s.slug(), "atacado-so-joo");
    }

    #[test]
    fn slug_collapses_repeated_separators() {
        let s = store("s1", "Big  Box   Atacado", "x");
        assert_eq!(s.slug(), "big-box-atacado");
    }

    #[test]
    fn validate_accepts_distinct_stores() {
        let file = StoresFile {
            stores: vec![
                store("s1", "Atacado Sul", "Av. Ipiranga 1200, Porto Alegre"),
                store("s2", "Atacado Norte", "Av. Assis Brasil 800, Porto Alegre"),
            ],
        };
        assert!(validate_stores(&file).is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let file = StoresFile {
            stores: vec![store("s1", "A", "addr a"), store("s1", "B", "addr b")],
        };
        let result = validate_stores(&file);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("duplicate")),
            "expected duplicate-id validation error, got: {result:?}"
        );
    }

    #[test]
    fn validate_rejects_empty_address() {
        let file = StoresFile {
            stores: vec![store("s1", "A", "   ")],
        };
        assert!(validate_stores(&file).is_err());
    }

    #[test]
    fn parses_minimal_yaml() {
        let yaml = r"
stores:
  - id: s1
    name: Atacado Sul
    address: Av. Ipiranga 1200, Porto Alegre
";
        let file: StoresFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.stores.len(), 1);
        assert_eq!(file.stores[0].id, "s1");
        assert!(file.stores[0].image.is_none());
    }
}
