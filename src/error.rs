//! Error types for the fare engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report: configuration loading problems,
//! configuration invariant violations, selection misses and bad requests.

use thiserror::Error;

use crate::models::DayOfWeek;

/// The main error type for the fare engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use fare_engine::error::EngineError;
/// use fare_engine::models::DayOfWeek;
///
/// let error = EngineError::ConfigurationNotFound {
///     day: DayOfWeek::Sunday,
/// };
/// assert_eq!(
///     error.to_string(),
///     "No active pricing configuration found for sunday"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration directory or file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A pricing configuration failed validation when it was loaded.
    #[error("Invalid pricing configuration '{name}', field '{field}': {message}")]
    InvalidConfiguration {
        /// The name of the offending configuration.
        name: String,
        /// The field that broke an invariant.
        field: String,
        /// A description of the broken invariant.
        message: String,
    },

    /// Two pricing configurations share the same name.
    #[error("Duplicate pricing configuration name: {name}")]
    DuplicateConfiguration {
        /// The repeated name.
        name: String,
    },

    /// No active configuration applies to the requested day.
    #[error("No active pricing configuration found for {day}")]
    ConfigurationNotFound {
        /// The day that was requested.
        day: DayOfWeek,
    },

    /// The calculator was handed a configuration that breaks an invariant.
    ///
    /// Configurations are validated when loaded, so this indicates a defect
    /// in whatever produced the snapshot.
    #[error("Precondition violated by configuration '{configuration}': {message}")]
    PreconditionViolation {
        /// The name of the offending configuration.
        configuration: String,
        /// A description of the broken invariant.
        message: String,
    },

    /// A calculation request was malformed.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A fare could not be computed, e.g. an amount exceeded the decimal range.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
