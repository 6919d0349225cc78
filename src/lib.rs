//! Fare Engine for distance, time and waiting based trip pricing
//!
//! This crate selects the pricing configuration that applies to a trip's day
//! of the week and calculates the trip's price from its distance, duration and
//! waiting time, returning the total together with an itemized breakdown.
//!
//! # Example
//!
//! ```no_run
//! use fare_engine::calculation::price_trip;
//! use fare_engine::config::{ConfigLoader, ConfigurationStore};
//! use fare_engine::models::{CalculationRequest, DayOfWeek};
//! use rust_decimal::Decimal;
//!
//! let loader = ConfigLoader::load("./config/standard")?;
//! let request = CalculationRequest::new(
//!     Decimal::new(8, 0),
//!     Decimal::new(25, 1),
//!     10,
//!     DayOfWeek::Monday,
//! )?;
//!
//! let result = price_trip(loader.configurations(), &request)?;
//! assert_eq!(result.display_total(), "115.00");
//! # Ok::<(), fare_engine::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod audit;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
