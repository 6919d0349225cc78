//! Distance cost calculation.
//!
//! The distance base price (DBP) covers the first `base_distance_km`; every
//! kilometre beyond it is charged at the distance additional price (DAP).

use rust_decimal::Decimal;

use crate::config::PricingConfiguration;
use crate::error::EngineResult;
use crate::models::AuditStep;

use super::overflow;

/// The result of a distance cost calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct DistanceCostResult {
    /// Distance travelled beyond the base distance.
    pub additional_distance_km: Decimal,
    /// Cost of the additional distance.
    pub additional_cost: Decimal,
    /// Base price plus additional distance cost.
    pub total_cost: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the distance travelled beyond `base_distance_km`, never negative.
///
/// # Example
///
/// ```
/// use fare_engine::calculation::additional_distance;
/// use rust_decimal::Decimal;
///
/// assert_eq!(additional_distance(Decimal::new(8, 0), Decimal::new(5, 0)), Decimal::new(3, 0));
/// assert_eq!(additional_distance(Decimal::new(2, 0), Decimal::new(5, 0)), Decimal::ZERO);
/// ```
pub fn additional_distance(distance_km: Decimal, base_distance_km: Decimal) -> Decimal {
    (distance_km - base_distance_km).max(Decimal::ZERO)
}

/// Calculates the distance cost of a trip.
///
/// `total_cost = distance_base_price + additional_distance_km × distance_additional_price`
///
/// # Arguments
///
/// * `distance_km` - The distance travelled
/// * `config` - The configuration supplying DBP, base distance and DAP
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `CalculationError` if the cost exceeds the `Decimal` range.
pub fn calculate_distance_cost(
    distance_km: Decimal,
    config: &PricingConfiguration,
    step_number: u32,
) -> EngineResult<DistanceCostResult> {
    let additional_distance_km = additional_distance(distance_km, config.base_distance_km);
    let additional_cost = additional_distance_km
        .checked_mul(config.distance_additional_price)
        .ok_or_else(|| overflow("additional distance cost"))?;
    let total_cost = config
        .distance_base_price
        .checked_add(additional_cost)
        .ok_or_else(|| overflow("distance cost"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "distance_cost".to_string(),
        rule_name: "Distance Cost".to_string(),
        input: serde_json::json!({
            "distance_km": distance_km.normalize().to_string(),
            "base_distance_km": config.base_distance_km.normalize().to_string(),
            "distance_base_price": config.distance_base_price.normalize().to_string(),
            "distance_additional_price": config.distance_additional_price.normalize().to_string()
        }),
        output: serde_json::json!({
            "additional_distance_km": additional_distance_km.normalize().to_string(),
            "additional_cost": additional_cost.normalize().to_string(),
            "total_cost": total_cost.normalize().to_string()
        }),
        reasoning: format!(
            "Distance cost: ${} + {} km × ${} = ${}",
            config.distance_base_price.normalize(),
            additional_distance_km.normalize(),
            config.distance_additional_price.normalize(),
            total_cost.normalize()
        ),
    };

    Ok(DistanceCostResult {
        additional_distance_km,
        additional_cost,
        total_cost,
        audit_step,
    })
}
