//! Pricing configuration types and loading.
//!
//! This module provides the [`PricingConfiguration`] snapshot the calculator
//! prices with, and the [`ConfigLoader`] that reads configurations from YAML
//! files and validates them before they can be selected.
//!
//! # Example
//!
//! ```no_run
//! use fare_engine::config::{ConfigLoader, ConfigurationStore};
//!
//! let loader = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded {} configurations", loader.configurations().len());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, ConfigurationStore};
pub use types::{InvariantViolation, MultiplierTier, PricingConfiguration, TimeMultiplierTable};
