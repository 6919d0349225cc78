//! Waiting charge calculation.
//!
//! Waiting is free for a grace period; after that it is billed per started
//! interval, so any partial interval is charged as a full one.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::overflow;

/// The outcome of a waiting charge computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitingCharge {
    /// Waiting minutes beyond the grace period.
    pub chargeable_minutes: u32,
    /// Number of billed intervals.
    pub intervals: u32,
    /// The total charge.
    pub amount: Decimal,
}

/// The result of a waiting charge calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct WaitingChargeResult {
    /// The computed charge.
    pub charge: WaitingCharge,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the waiting charge.
///
/// Zero when `waiting_minutes <= free_minutes`; otherwise
/// `ceil((waiting_minutes - free_minutes) / interval_minutes) × charge_per_interval`.
///
/// # Errors
///
/// Returns `CalculationError` if `interval_minutes` is zero or the charge
/// exceeds the `Decimal` range.
///
/// # Example
///
/// ```
/// use fare_engine::calculation::compute_waiting_charge;
/// use rust_decimal::Decimal;
///
/// // 10 minutes with 3 free: 7 chargeable, ceil(7 / 3) = 3 intervals at $5
/// let charge = compute_waiting_charge(10, 3, Decimal::new(5, 0), 3)?;
/// assert_eq!(charge.intervals, 3);
/// assert_eq!(charge.amount, Decimal::new(15, 0));
/// # Ok::<(), fare_engine::error::EngineError>(())
/// ```
pub fn compute_waiting_charge(
    waiting_minutes: u32,
    free_minutes: u32,
    charge_per_interval: Decimal,
    interval_minutes: u32,
) -> EngineResult<WaitingCharge> {
    if interval_minutes == 0 {
        return Err(EngineError::CalculationError {
            message: "waiting interval must be at least one minute".to_string(),
        });
    }

    let chargeable_minutes = waiting_minutes.saturating_sub(free_minutes);
    let intervals = chargeable_minutes.div_ceil(interval_minutes);
    let amount = Decimal::from(intervals)
        .checked_mul(charge_per_interval)
        .ok_or_else(|| overflow("waiting charge"))?;

    Ok(WaitingCharge {
        chargeable_minutes,
        intervals,
        amount,
    })
}

/// Calculates the waiting charge and records it as an audit step.
///
/// # Arguments
///
/// * `waiting_minutes` - The total waiting time of the trip
/// * `free_minutes` - The grace period
/// * `charge_per_interval` - The charge per billed interval
/// * `interval_minutes` - The interval length, must be positive
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Any error from [`compute_waiting_charge`].
pub fn calculate_waiting_charge(
    waiting_minutes: u32,
    free_minutes: u32,
    charge_per_interval: Decimal,
    interval_minutes: u32,
    step_number: u32,
) -> EngineResult<WaitingChargeResult> {
    let charge = compute_waiting_charge(
        waiting_minutes,
        free_minutes,
        charge_per_interval,
        interval_minutes,
    )?;

    let reasoning = if charge.chargeable_minutes == 0 {
        format!(
            "Waiting charge: {} minutes within {} free minutes, no charge",
            waiting_minutes, free_minutes
        )
    } else {
        format!(
            "Waiting charge: ceil({} min / {} min) = {} intervals × ${} = ${}",
            charge.chargeable_minutes,
            interval_minutes,
            charge.intervals,
            charge_per_interval.normalize(),
            charge.amount.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "waiting_charge".to_string(),
        rule_name: "Waiting Charge".to_string(),
        input: serde_json::json!({
            "waiting_time_minutes": waiting_minutes,
            "free_minutes": free_minutes,
            "interval_minutes": interval_minutes,
            "charge_per_interval": charge_per_interval.normalize().to_string()
        }),
        output: serde_json::json!({
            "chargeable_minutes": charge.chargeable_minutes,
            "intervals": charge.intervals,
            "amount": charge.amount.normalize().to_string()
        }),
        reasoning,
    };

    Ok(WaitingChargeResult { charge, audit_step })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn five() -> Decimal {
        Decimal::new(5, 0)
    }

    #[test]
    fn test_within_free_period_is_free() {
        let charge = compute_waiting_charge(2, 3, five(), 3).unwrap();
        assert_eq!(charge.chargeable_minutes, 0);
        assert_eq!(charge.intervals, 0);
        assert_eq!(charge.amount, Decimal::ZERO);
    }

    #[test]
    fn test_exactly_free_period_is_free() {
        let charge = compute_waiting_charge(3, 3, five(), 3).unwrap();
        assert_eq!(charge.amount, Decimal::ZERO);
    }

    #[test]
    fn test_partial_interval_billed_in_full() {
        // 4 minutes with 3 free: 1 chargeable minute, 1 interval
        let charge = compute_waiting_charge(4, 3, five(), 3).unwrap();
        assert_eq!(charge.chargeable_minutes, 1);
        assert_eq!(charge.intervals, 1);
        assert_eq!(charge.amount, five());
    }

    #[test]
    fn test_whole_intervals() {
        // 9 minutes with 3 free: 6 chargeable, 2 intervals
        let charge = compute_waiting_charge(9, 3, five(), 3).unwrap();
        assert_eq!(charge.intervals, 2);
        assert_eq!(charge.amount, Decimal::new(10, 0));
    }

    #[test]
    fn test_mixed_intervals() {
        // 10 minutes with 3 free: 7 chargeable, ceil(7/3) = 3
        let charge = compute_waiting_charge(10, 3, five(), 3).unwrap();
        assert_eq!(charge.chargeable_minutes, 7);
        assert_eq!(charge.intervals, 3);
        assert_eq!(charge.amount, Decimal::new(15, 0));
    }

    #[test]
    fn test_no_free_period() {
        let charge = compute_waiting_charge(1, 0, Decimal::new(250, 2), 5).unwrap();
        assert_eq!(charge.intervals, 1);
        assert_eq!(charge.amount, Decimal::new(250, 2));
    }

    #[test]
    fn test_zero_waiting_time() {
        let charge = compute_waiting_charge(0, 0, five(), 3).unwrap();
        assert_eq!(charge.amount, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_for_charged_waiting() {
        let result = calculate_waiting_charge(10, 3, five(), 3, 3).unwrap();

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "waiting_charge");
        assert_eq!(result.audit_step.input["waiting_time_minutes"], 10);
        assert_eq!(result.audit_step.output["intervals"], 3);
        assert_eq!(result.audit_step.output["amount"].as_str().unwrap(), "15");
        assert!(result.audit_step.reasoning.contains("ceil(7 min / 3 min) = 3 intervals"));
    }

    #[test]
    fn test_audit_step_for_free_waiting() {
        let result = calculate_waiting_charge(2, 3, five(), 3, 3).unwrap();

        assert_eq!(result.charge.amount, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("no charge"));
    }

    #[test]
    fn test_zero_interval_is_an_error() {
        match compute_waiting_charge(10, 3, five(), 0) {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("waiting interval"), "got: {}", message);
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_charge_is_an_error() {
        let result = compute_waiting_charge(u32::MAX, 0, Decimal::MAX, 1);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    proptest! {
        #[test]
        fn free_period_is_never_charged(free in 0u32..120, waiting in 0u32..120) {
            prop_assume!(waiting <= free);
            let charge = compute_waiting_charge(waiting, free, five(), 3).unwrap();
            prop_assert_eq!(charge.amount, Decimal::ZERO);
        }

        #[test]
        fn charge_steps_up_at_each_interval_boundary(
            free in 0u32..30,
            interval in 1u32..15,
            k in 0u32..20,
        ) {
            // The last minute of interval k and the first minute of interval k + 1
            let end_of_interval = free + k * interval;
            let start_of_next = end_of_interval + 1;

            let before = compute_waiting_charge(end_of_interval, free, five(), interval).unwrap();
            let after = compute_waiting_charge(start_of_next, free, five(), interval).unwrap();

            prop_assert_eq!(before.intervals, k);
            prop_assert_eq!(after.intervals, k + 1);
            prop_assert_eq!(after.amount - before.amount, five());
        }

        #[test]
        fn charge_is_constant_within_an_interval(
            free in 0u32..30,
            interval in 1u32..15,
            k in 0u32..20,
            offset in 0u32..15,
        ) {
            let offset = offset % interval;
            let first = free + k * interval + 1;
            let a = compute_waiting_charge(first, free, five(), interval).unwrap();
            let b = compute_waiting_charge(first + offset, free, five(), interval).unwrap();
            prop_assert_eq!(a.amount, b.amount);
        }
    }
}
