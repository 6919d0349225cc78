//! Tiered time multiplier lookup.
//!
//! Longer trips are charged more by scaling the distance cost with the
//! multiplier of the highest hour tier the trip has reached. Trips shorter
//! than every tier are not scaled.

use rust_decimal::Decimal;

use crate::config::{MultiplierTier, TimeMultiplierTable};
use crate::error::EngineResult;
use crate::models::AuditStep;

use super::overflow;

/// The multiplier used when a trip is shorter than every configured tier.
pub const DEFAULT_TIME_MULTIPLIER: Decimal = Decimal::ONE;

/// The result of applying the time multiplier, including the audit step.
#[derive(Debug, Clone)]
pub struct TimeMultiplierResult {
    /// Threshold of the matched tier, or `None` if the default applied.
    pub threshold_hours: Option<u32>,
    /// The multiplier that was applied.
    pub multiplier: Decimal,
    /// The distance cost after applying the multiplier.
    pub adjusted_cost: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Finds the tier with the largest threshold not exceeding `total_time_hours`.
pub fn find_tier(
    total_time_hours: Decimal,
    table: &TimeMultiplierTable,
) -> Option<&MultiplierTier> {
    table
        .tiers()
        .iter()
        .rev()
        .find(|tier| Decimal::from(tier.threshold_hours) <= total_time_hours)
}

/// Returns the multiplier that applies to a trip of `total_time_hours`.
///
/// The value of the tier with the largest threshold that is `<= total_time_hours`,
/// or [`DEFAULT_TIME_MULTIPLIER`] if the trip is shorter than every tier.
///
/// # Example
///
/// ```
/// use fare_engine::calculation::lookup_multiplier;
/// use fare_engine::config::TimeMultiplierTable;
/// use rust_decimal::Decimal;
///
/// let table: TimeMultiplierTable =
///     serde_json::from_str(r#"{"1": 1.0, "2": 1.25, "3": 2.2}"#).unwrap();
///
/// assert_eq!(lookup_multiplier(Decimal::new(25, 1), &table), Decimal::new(125, 2));
/// assert_eq!(lookup_multiplier(Decimal::new(5, 1), &table), Decimal::ONE);
/// ```
pub fn lookup_multiplier(total_time_hours: Decimal, table: &TimeMultiplierTable) -> Decimal {
    find_tier(total_time_hours, table).map_or(DEFAULT_TIME_MULTIPLIER, |tier| tier.multiplier)
}

/// Scales a distance cost by the time multiplier for the trip.
///
/// # Arguments
///
/// * `distance_cost` - The cost to scale
/// * `total_time_hours` - The trip duration
/// * `table` - The configured tiers
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `CalculationError` if the scaled cost exceeds the `Decimal` range.
pub fn apply_time_multiplier(
    distance_cost: Decimal,
    total_time_hours: Decimal,
    table: &TimeMultiplierTable,
    step_number: u32,
) -> EngineResult<TimeMultiplierResult> {
    let tier = find_tier(total_time_hours, table);
    let threshold_hours = tier.map(|tier| tier.threshold_hours);
    let multiplier = tier.map_or(DEFAULT_TIME_MULTIPLIER, |tier| tier.multiplier);
    let adjusted_cost = distance_cost
        .checked_mul(multiplier)
        .ok_or_else(|| overflow("time adjusted cost"))?;

    let tier_description = match threshold_hours {
        Some(hours) => format!("{}h tier", hours),
        None => "below all tiers".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "time_multiplier".to_string(),
        rule_name: "Time Multiplier".to_string(),
        input: serde_json::json!({
            "total_time_hours": total_time_hours.normalize().to_string(),
            "distance_cost": distance_cost.normalize().to_string(),
            "tiers": table
                .tiers()
                .iter()
                .map(|tier| serde_json::json!({
                    "threshold_hours": tier.threshold_hours,
                    "multiplier": tier.multiplier.normalize().to_string()
                }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "threshold_hours": threshold_hours,
            "multiplier": multiplier.normalize().to_string(),
            "adjusted_cost": adjusted_cost.normalize().to_string()
        }),
        reasoning: format!(
            "Time multiplier ({} for {} hours): ${} × {} = ${}",
            tier_description,
            total_time_hours.normalize(),
            distance_cost.normalize(),
            multiplier.normalize(),
            adjusted_cost.normalize()
        ),
    };

    Ok(TimeMultiplierResult {
        threshold_hours,
        multiplier,
        adjusted_cost,
        audit_step,
    })
}
