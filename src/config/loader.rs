//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pricing
//! configurations from YAML files, and the [`ConfigurationStore`] trait
//! the selector consumes.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::DayOfWeek;

use super::types::PricingConfiguration;

/// A source of validated pricing configurations.
///
/// Every configuration a store hands out must already satisfy
/// [`PricingConfiguration::check_invariants`].
pub trait ConfigurationStore {
    /// Returns every known configuration, active or not.
    fn configurations(&self) -> &[PricingConfiguration];

    /// Returns the configurations that are currently active.
    fn active_configurations(&self) -> Vec<&PricingConfiguration> {
        self.configurations()
            .iter()
            .filter(|config| config.is_active)
            .collect()
    }
}

/// Loads and provides access to pricing configurations.
///
/// The `ConfigLoader` reads one configuration per YAML file from a
/// directory, validates each, and keeps them as an immutable snapshot.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── weekday.yaml
/// ├── weekend.yaml
/// └── holiday-surge.yaml
/// ```
///
/// Files are read in file-name order; files without a `.yaml` extension
/// are ignored.
///
/// # Example
///
/// ```no_run
/// use fare_engine::config::{ConfigLoader, ConfigurationStore};
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
/// for config in loader.active_configurations() {
///     println!("{}", config.name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    configurations: Vec<PricingConfiguration>,
}

impl ConfigLoader {
    /// Loads every configuration in the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/standard")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The directory is missing or holds no YAML files
    /// - Any file contains invalid YAML or an unparseable multiplier table
    /// - Any configuration breaks an invariant
    /// - Two configurations share a name
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        if !path.is_dir() {
            return Err(EngineError::ConfigNotFound { path: path_str });
        }

        let entries = fs::read_dir(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: path_str.clone(),
            })?;

            let file = entry.path();
            if file.extension().is_some_and(|ext| ext == "yaml") {
                files.push(file);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no configuration files found)", path_str),
            });
        }

        let configurations = files
            .iter()
            .map(|file| Self::load_yaml::<PricingConfiguration>(file))
            .collect::<EngineResult<Vec<_>>>()?;

        let loader = Self::from_configurations(configurations)?;
        info!(
            path = %path_str,
            configurations = loader.configurations.len(),
            "Loaded pricing configurations"
        );
        Ok(loader)
    }

    /// Builds a store from configurations already in memory.
    ///
    /// Applies the same validation as [`ConfigLoader::load`].
    pub fn from_configurations(configurations: Vec<PricingConfiguration>) -> EngineResult<Self> {
        let mut names = HashSet::new();
        for config in &configurations {
            config
                .check_invariants()
                .map_err(|violation| EngineError::InvalidConfiguration {
                    name: config.name.clone(),
                    field: violation.field.to_string(),
                    message: violation.message,
                })?;

            if !names.insert(config.name.as_str()) {
                return Err(EngineError::DuplicateConfiguration {
                    name: config.name.clone(),
                });
            }
        }

        warn_on_ambiguous_days(&configurations);
        Ok(Self { configurations })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Gets a configuration by its name.
    pub fn get(&self, name: &str) -> Option<&PricingConfiguration> {
        self.configurations.iter().find(|config| config.name == name)
    }
}

impl ConfigurationStore for ConfigLoader {
    fn configurations(&self) -> &[PricingConfiguration] {
        &self.configurations
    }
}

/// Logs a warning for each day served by more than one active configuration
/// at the same priority. Selection still succeeds, falling back to name order.
fn warn_on_ambiguous_days(configurations: &[PricingConfiguration]) {
    for day in DayOfWeek::ALL {
        let mut candidates: Vec<&PricingConfiguration> = configurations
            .iter()
            .filter(|config| config.applies_to(day))
            .collect();
        if candidates.len() < 2 {
            continue;
        }

        candidates.sort_by(|a, b| b.priority.cmp(&a.priority));
        let top_priority = candidates[0].priority;
        let tied: Vec<&str> = candidates
            .iter()
            .take_while(|config| config.priority == top_priority)
            .map(|config| config.name.as_str())
            .collect();

        if tied.len() > 1 {
            warn!(
                day = %day,
                priority = top_priority,
                configurations = ?tied,
                "Several active pricing configurations share a day and priority"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeMultiplierTable;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/standard"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_config(name: &str, days: &[DayOfWeek]) -> PricingConfiguration {
        PricingConfiguration {
            name: name.to_string(),
            description: String::new(),
            is_active: true,
            priority: 0,
            applicable_days: days.iter().copied().collect(),
            distance_base_price: dec("50"),
            base_distance_km: dec("5"),
            distance_additional_price: dec("10"),
            time_multipliers: TimeMultiplierTable::default(),
            waiting_charge_per_interval: dec("5"),
            waiting_interval_minutes: 3,
            waiting_free_minutes: 3,
        }
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.configurations().len(), 4);
    }

    #[test]
    fn test_load_reads_files_in_name_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let names: Vec<&str> = loader
            .configurations()
            .iter()
            .map(|config| config.name.as_str())
            .collect();
        assert_eq!(names, vec!["holiday-surge", "legacy-flat", "weekday", "weekend"]);
    }

    #[test]
    fn test_load_parses_weekday_configuration() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let weekday = loader.get("weekday").unwrap();

        assert!(weekday.is_active);
        assert_eq!(weekday.distance_base_price, dec("50.00"));
        assert_eq!(weekday.base_distance_km, dec("5.00"));
        assert_eq!(weekday.distance_additional_price, dec("10.00"));
        assert_eq!(weekday.time_multipliers.tiers().len(), 3);
        assert_eq!(weekday.waiting_interval_minutes, 3);
        assert_eq!(weekday.waiting_free_minutes, 3);
        assert!(weekday.applicable_days.contains(&DayOfWeek::Friday));
        assert!(!weekday.applicable_days.contains(&DayOfWeek::Saturday));
    }

    #[test]
    fn test_active_configurations_skip_inactive() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let active: Vec<&str> = loader
            .active_configurations()
            .iter()
            .map(|config| config.name.as_str())
            .collect();
        assert!(!active.contains(&"legacy-flat"));
        assert_eq!(active.len(), 3);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("/nonexistent/path"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_directory_without_yaml_returns_error() {
        // The source directory holds only Rust files
        let result = ConfigLoader::load("./src/config");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("no configuration files found"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_from_configurations_rejects_duplicate_names() {
        let result = ConfigLoader::from_configurations(vec![
            create_test_config("weekday", &[DayOfWeek::Monday]),
            create_test_config("weekday", &[DayOfWeek::Tuesday]),
        ]);

        match result {
            Err(EngineError::DuplicateConfiguration { name }) => assert_eq!(name, "weekday"),
            _ => panic!("Expected DuplicateConfiguration error"),
        }
    }

    #[test]
    fn test_from_configurations_rejects_invalid_configuration() {
        let mut config = create_test_config("broken", &[DayOfWeek::Monday]);
        config.base_distance_km = Decimal::ZERO;

        match ConfigLoader::from_configurations(vec![config]) {
            Err(EngineError::InvalidConfiguration { name, field, .. }) => {
                assert_eq!(name, "broken");
                assert_eq!(field, "base_distance_km");
            }
            _ => panic!("Expected InvalidConfiguration error"),
        }
    }

    #[test]
    fn test_from_configurations_accepts_overlapping_days() {
        // Overlaps are resolved by the selector's tie-break, not rejected
        let result = ConfigLoader::from_configurations(vec![
            create_test_config("a", &[DayOfWeek::Monday]),
            create_test_config("b", &[DayOfWeek::Monday]),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_get_unknown_configuration_returns_none() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(loader.get("unknown").is_none());
    }
}
