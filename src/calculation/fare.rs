//! Fare composition.
//!
//! Combines the distance cost, the time multiplier and the waiting charge
//! into a total price:
//!
//! ```text
//! total_price = (DBP + additional_km × DAP) × time_multiplier + waiting_charge
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PricingConfiguration;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CalculationRequest, CalculationResult, FareBreakdown};

use super::{
    apply_time_multiplier, calculate_distance_cost, calculate_waiting_charge, overflow,
    select_configuration,
};

/// Calculates the fare for a trip under the given configuration.
///
/// The calculation is a pure function of its arguments: no I/O, no shared
/// state, and identical arguments always produce an identical result.
///
/// # Errors
///
/// - `PreconditionViolation` if `config` breaks a configuration invariant.
///   Stores validate configurations on load, so this signals a defect in
///   whatever produced the snapshot.
/// - `InvalidRequest` if the request carries a negative distance or time.
/// - `CalculationError` if an amount exceeds the `Decimal` range.
///
/// No partial result is ever returned.
pub fn calculate(
    config: &PricingConfiguration,
    request: &CalculationRequest,
) -> EngineResult<CalculationResult> {
    config
        .check_invariants()
        .map_err(|violation| EngineError::PreconditionViolation {
            configuration: config.name.clone(),
            message: format!("{} {}", violation.field, violation.message),
        })?;
    request.validate()?;

    let distance = calculate_distance_cost(request.distance_km, config, 1)?;

    let time = apply_time_multiplier(
        distance.total_cost,
        request.total_time_hours,
        &config.time_multipliers,
        2,
    )?;

    let waiting = calculate_waiting_charge(
        request.waiting_time_minutes,
        config.waiting_free_minutes,
        config.waiting_charge_per_interval,
        config.waiting_interval_minutes,
        3,
    )?;

    let total_price = time
        .adjusted_cost
        .checked_add(waiting.charge.amount)
        .ok_or_else(|| overflow("total price"))?;
    let summary_step = total_step(time.adjusted_cost, waiting.charge.amount, total_price, 4);

    debug!(
        configuration = %config.name,
        day = %request.day_of_week,
        total_price = %total_price,
        "Calculated fare"
    );

    Ok(CalculationResult {
        configuration_name: config.name.clone(),
        total_price,
        breakdown: FareBreakdown {
            distance_km: request.distance_km,
            total_time_hours: request.total_time_hours,
            waiting_time_minutes: request.waiting_time_minutes,
            day_of_week: request.day_of_week,
            distance_base_price: config.distance_base_price,
            base_distance_km: config.base_distance_km,
            distance_additional_price: config.distance_additional_price,
            additional_distance_km: distance.additional_distance_km,
            distance_additional_cost: distance.additional_cost,
            total_distance_cost: distance.total_cost,
            time_multiplier_threshold_hours: time.threshold_hours,
            time_multiplier: time.multiplier,
            time_adjusted_cost: time.adjusted_cost,
            waiting_free_minutes: config.waiting_free_minutes,
            waiting_interval_minutes: config.waiting_interval_minutes,
            waiting_charge_per_interval: config.waiting_charge_per_interval,
            chargeable_waiting_minutes: waiting.charge.chargeable_minutes,
            waiting_intervals: waiting.charge.intervals,
            waiting_charges: waiting.charge.amount,
            total_price,
        },
        audit_steps: vec![
            distance.audit_step,
            time.audit_step,
            waiting.audit_step,
            summary_step,
        ],
    })
}

/// Selects the configuration for the request's day and prices the trip with it.
///
/// # Errors
///
/// `ConfigurationNotFound` if nothing applies to the day, otherwise any
/// error from [`calculate`].
///
/// # Example
///
/// ```no_run
/// use fare_engine::calculation::price_trip;
/// use fare_engine::config::{ConfigLoader, ConfigurationStore};
/// use fare_engine::models::{CalculationRequest, DayOfWeek};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/standard")?;
/// let request = CalculationRequest::new(
///     Decimal::new(12, 0),
///     Decimal::ONE,
///     0,
///     DayOfWeek::Tuesday,
/// )?;
/// let result = price_trip(loader.configurations(), &request)?;
/// println!("{} via {}", result.display_total(), result.configuration_name);
/// # Ok::<(), fare_engine::error::EngineError>(())
/// ```
pub fn price_trip<'a, I>(
    configurations: I,
    request: &CalculationRequest,
) -> EngineResult<CalculationResult>
where
    I: IntoIterator<Item = &'a PricingConfiguration>,
{
    let config = select_configuration(configurations, request.day_of_week)?;
    calculate(config, request)
}

fn total_step(
    time_adjusted_cost: Decimal,
    waiting_charges: Decimal,
    total_price: Decimal,
    step_number: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "total_price".to_string(),
        rule_name: "Total Price".to_string(),
        input: serde_json::json!({
            "time_adjusted_cost": time_adjusted_cost.normalize().to_string(),
            "waiting_charges": waiting_charges.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_price": total_price.normalize().to_string()
        }),
        reasoning: format!(
            "Total price: ${} + ${} = ${}",
            time_adjusted_cost.normalize(),
            waiting_charges.normalize(),
            total_price.normalize()
        ),
    }
}
