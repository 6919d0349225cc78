//! Calculation result models for the fare engine.
//!
//! This module contains the [`CalculationResult`] type and its associated structures
//! that capture all outputs from a fare calculation: the total price, an itemized
//! breakdown of every intermediate quantity, and an audit trace of the rules applied.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::DayOfWeek;

/// Itemized breakdown of a fare.
///
/// Echoes the request metrics and the configuration parameters that were used,
/// alongside every intermediate value, so a caller can reproduce the total by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareBreakdown {
    /// Distance travelled, as requested.
    pub distance_km: Decimal,
    /// Trip time in hours, as requested.
    pub total_time_hours: Decimal,
    /// Waiting time in minutes, as requested.
    pub waiting_time_minutes: u32,
    /// Day the trip took place on.
    pub day_of_week: DayOfWeek,

    /// Price covering the first `base_distance_km` (DBP).
    pub distance_base_price: Decimal,
    /// Distance covered by the base price.
    pub base_distance_km: Decimal,
    /// Price per kilometre beyond the base distance (DAP).
    pub distance_additional_price: Decimal,
    /// Distance travelled beyond the base distance.
    pub additional_distance_km: Decimal,
    /// Cost of the additional distance.
    pub distance_additional_cost: Decimal,
    /// Base price plus additional distance cost.
    pub total_distance_cost: Decimal,

    /// The hour threshold of the tier that supplied the multiplier, if any tier matched.
    pub time_multiplier_threshold_hours: Option<u32>,
    /// The multiplier applied to the distance cost.
    pub time_multiplier: Decimal,
    /// Distance cost after the time multiplier.
    pub time_adjusted_cost: Decimal,

    /// Grace period before waiting is charged.
    pub waiting_free_minutes: u32,
    /// Length of a billable waiting interval.
    pub waiting_interval_minutes: u32,
    /// Charge per billable waiting interval.
    pub waiting_charge_per_interval: Decimal,
    /// Waiting minutes beyond the grace period.
    pub chargeable_waiting_minutes: u32,
    /// Number of billed waiting intervals (partial intervals round up).
    pub waiting_intervals: u32,
    /// Total waiting charge.
    pub waiting_charges: Decimal,

    /// Time-adjusted cost plus waiting charges.
    pub total_price: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of a fare calculation.
///
/// Results contain no identifiers, timestamps or timings, so the same
/// configuration and request always produce an identical value.
///
/// # Example
///
/// ```
/// use fare_engine::calculation::calculate;
/// use fare_engine::config::PricingConfiguration;
/// use fare_engine::models::{CalculationRequest, DayOfWeek};
/// use rust_decimal::Decimal;
///
/// let yaml = r#"
/// name: standard
/// applicable_days: [monday]
/// distance_base_price: 50
/// base_distance_km: 5
/// distance_additional_price: 10
/// time_multipliers: { "1": 1.0, "2": 1.25, "3": 2.2 }
/// waiting_charge_per_interval: 5
/// waiting_interval_minutes: 3
/// waiting_free_minutes: 3
/// "#;
/// let config: PricingConfiguration = serde_yaml::from_str(yaml).unwrap();
/// let request = CalculationRequest::new(
///     Decimal::new(8, 0),
///     Decimal::new(25, 1),
///     10,
///     DayOfWeek::Monday,
/// )
/// .unwrap();
///
/// let result = calculate(&config, &request).unwrap();
/// assert_eq!(result.total_price, Decimal::new(115, 0));
/// assert_eq!(result.display_total(), "115.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The name of the configuration the fare was priced with.
    pub configuration_name: String,
    /// The exact total price.
    pub total_price: Decimal,
    /// Every intermediate quantity of the calculation.
    pub breakdown: FareBreakdown,
    /// The rules applied, in order.
    pub audit_steps: Vec<AuditStep>,
}

impl CalculationResult {
    /// Formats the total for display, rounded half-to-even to two decimal places.
    ///
    /// Only for presentation; `total_price` keeps the exact value.
    pub fn display_total(&self) -> String {
        let rounded = self
            .total_price
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        format!("{:.2}", rounded)
    }
}
