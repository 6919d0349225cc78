//! Calculation logic for the fare engine.
//!
//! This module contains the configuration selector and the fare calculator:
//! distance cost, the tiered time multiplier, the waiting charge, and the
//! composition of those into a total price with an itemized breakdown.
//!
//! Every function here is pure and reentrant. They read the configuration
//! snapshot they are given and never mutate it, so they may be called
//! concurrently without coordination.

use crate::error::EngineError;

mod distance_cost;
mod fare;
mod selection;
mod time_multiplier;
mod waiting_charge;

pub use distance_cost::{DistanceCostResult, additional_distance, calculate_distance_cost};
pub use fare::{calculate, price_trip};
pub use selection::select_configuration;
pub use time_multiplier::{
    DEFAULT_TIME_MULTIPLIER, TimeMultiplierResult, apply_time_multiplier, find_tier,
    lookup_multiplier,
};
pub use waiting_charge::{
    WaitingCharge, WaitingChargeResult, calculate_waiting_charge, compute_waiting_charge,
};

/// The error for an amount that left the range of `Decimal`.
fn overflow(quantity: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} exceeds the supported decimal range", quantity),
    }
}
