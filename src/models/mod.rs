//! Core data models for the fare engine.
//!
//! This module contains the request and result types exchanged with callers.

mod calculation_request;
mod calculation_result;
mod day_of_week;

pub use calculation_request::CalculationRequest;
pub use calculation_result::{AuditStep, CalculationResult, FareBreakdown};
pub use day_of_week::DayOfWeek;
