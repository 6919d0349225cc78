//! Trip metrics supplied by the caller for a fare calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::DayOfWeek;

/// The trip attributes a fare is computed from.
///
/// Requests are ephemeral; they are never persisted by the engine.
///
/// # Example
///
/// ```
/// use fare_engine::models::{CalculationRequest, DayOfWeek};
/// use rust_decimal::Decimal;
///
/// let request = CalculationRequest::new(
///     Decimal::new(8, 0),
///     Decimal::new(25, 1),
///     10,
///     DayOfWeek::Monday,
/// )
/// .unwrap();
/// assert_eq!(request.waiting_time_minutes, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Total distance travelled in kilometres.
    pub distance_km: Decimal,
    /// Total trip time in hours.
    pub total_time_hours: Decimal,
    /// Total waiting time in whole minutes.
    pub waiting_time_minutes: u32,
    /// The day of the week the trip took place on.
    pub day_of_week: DayOfWeek,
}

impl CalculationRequest {
    /// Creates a validated request.
    ///
    /// Returns `InvalidRequest` if the distance or the trip time is negative.
    pub fn new(
        distance_km: Decimal,
        total_time_hours: Decimal,
        waiting_time_minutes: u32,
        day_of_week: DayOfWeek,
    ) -> EngineResult<Self> {
        let request = Self {
            distance_km,
            total_time_hours,
            waiting_time_minutes,
            day_of_week,
        };
        request.validate()?;
        Ok(request)
    }

    /// Checks the request's own invariants.
    ///
    /// Deserialized requests bypass [`CalculationRequest::new`], so the
    /// calculator runs this again before using one.
    pub fn validate(&self) -> EngineResult<()> {
        if self.distance_km < Decimal::ZERO {
            return Err(EngineError::InvalidRequest {
                field: "distance_km".to_string(),
                message: format!("cannot be negative (got {})", self.distance_km),
            });
        }
        if self.total_time_hours < Decimal::ZERO {
            return Err(EngineError::InvalidRequest {
                field: "total_time_hours".to_string(),
                message: format!("cannot be negative (got {})", self.total_time_hours),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_new_accepts_zero_values() {
        let request = CalculationRequest::new(Decimal::ZERO, Decimal::ZERO, 0, DayOfWeek::Monday);
        assert!(request.is_ok());
    }

    #[test]
    fn test_new_rejects_negative_distance() {
        let result = CalculationRequest::new(dec("-0.5"), dec("1"), 0, DayOfWeek::Monday);
        match result {
            Err(EngineError::InvalidRequest { field, .. }) => assert_eq!(field, "distance_km"),
            other => panic!("Expected InvalidRequest error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_negative_time() {
        let result = CalculationRequest::new(dec("3"), dec("-1"), 0, DayOfWeek::Monday);
        match result {
            Err(EngineError::InvalidRequest { field, .. }) => {
                assert_eq!(field, "total_time_hours")
            }
            other => panic!("Expected InvalidRequest error, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_request() {
        let json = r#"{
            "distance_km": "8.00",
            "total_time_hours": 2.5,
            "waiting_time_minutes": 10,
            "day_of_week": "tuesday"
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.distance_km, dec("8"));
        assert_eq!(request.total_time_hours, dec("2.5"));
        assert_eq!(request.waiting_time_minutes, 10);
        assert_eq!(request.day_of_week, DayOfWeek::Tuesday);
    }

    #[test]
    fn test_deserialize_rejects_negative_waiting_time() {
        let json = r#"{
            "distance_km": "8",
            "total_time_hours": "1",
            "waiting_time_minutes": -1,
            "day_of_week": "tuesday"
        }"#;

        assert!(serde_json::from_str::<CalculationRequest>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_day() {
        let json = r#"{
            "distance_km": "8",
            "total_time_hours": "1",
            "waiting_time_minutes": 0,
            "day_of_week": "someday"
        }"#;

        assert!(serde_json::from_str::<CalculationRequest>(json).is_err());
    }
}
