//! Configuration types for fare calculation.
//!
//! This module contains the strongly-typed pricing configuration that is
//! deserialized from YAML files, together with the invariant checks every
//! configuration must pass before the calculator will price with it.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::DayOfWeek;

/// One tier of a time-multiplier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierTier {
    /// Trips lasting at least this many hours fall in this tier.
    pub threshold_hours: u32,
    /// The multiplier applied to the distance cost for this tier.
    pub multiplier: Decimal,
}

/// Tiered time multipliers, sorted by ascending hour threshold.
///
/// Written in configuration files as a map from hour threshold to multiplier,
/// e.g. `{"1": 1.0, "2": 1.25, "3": 2.2}`. The map is parsed and sorted once
/// when the configuration is loaded; thresholds must be non-negative integers
/// and multipliers strictly positive.
///
/// # Example
///
/// ```
/// use fare_engine::config::TimeMultiplierTable;
///
/// let table: TimeMultiplierTable =
///     serde_json::from_str(r#"{"3": 2.2, "1": 1.0, "2": 1.25}"#).unwrap();
/// let thresholds: Vec<u32> = table.tiers().iter().map(|t| t.threshold_hours).collect();
/// assert_eq!(thresholds, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Decimal>",
    into = "BTreeMap<String, Decimal>"
)]
pub struct TimeMultiplierTable {
    tiers: Vec<MultiplierTier>,
}

impl TimeMultiplierTable {
    /// Builds a table from tiers in any order.
    ///
    /// Returns a description of the problem if a threshold repeats or a
    /// multiplier is not strictly positive.
    pub fn new(tiers: Vec<MultiplierTier>) -> Result<Self, String> {
        let mut tiers = tiers;
        tiers.sort_by_key(|tier| tier.threshold_hours);

        if let Some(pair) = tiers
            .windows(2)
            .find(|pair| pair[0].threshold_hours == pair[1].threshold_hours)
        {
            return Err(format!(
                "hour threshold {} appears more than once",
                pair[0].threshold_hours
            ));
        }

        let table = Self { tiers };
        match table.invalid_multiplier() {
            Some(tier) => Err(format!(
                "multiplier {} for {} hours must be positive",
                tier.multiplier, tier.threshold_hours
            )),
            None => Ok(table),
        }
    }

    /// Returns the tiers in ascending threshold order.
    pub fn tiers(&self) -> &[MultiplierTier] {
        &self.tiers
    }

    /// Returns true if no tiers are configured.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Returns the first tier whose multiplier is not strictly positive.
    fn invalid_multiplier(&self) -> Option<&MultiplierTier> {
        self.tiers.iter().find(|tier| tier.multiplier <= Decimal::ZERO)
    }

    /// Returns true if the tiers are sorted by strictly ascending threshold.
    fn is_sorted(&self) -> bool {
        self.tiers
            .windows(2)
            .all(|pair| pair[0].threshold_hours < pair[1].threshold_hours)
    }
}

impl TryFrom<BTreeMap<String, Decimal>> for TimeMultiplierTable {
    type Error = String;

    fn try_from(map: BTreeMap<String, Decimal>) -> Result<Self, Self::Error> {
        let tiers = map
            .into_iter()
            .map(|(hours, multiplier)| {
                // `u32::from_str` accepts a leading '+', plain digits only here
                let threshold_hours = Some(hours.trim())
                    .filter(|key| key.starts_with(|c: char| c.is_ascii_digit()))
                    .and_then(|key| key.parse::<u32>().ok())
                    .ok_or_else(|| {
                        format!(
                            "invalid hour '{}': hours must be non-negative integers",
                            hours
                        )
                    })?;
                Ok(MultiplierTier {
                    threshold_hours,
                    multiplier,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Self::new(tiers)
    }
}

impl From<TimeMultiplierTable> for BTreeMap<String, Decimal> {
    fn from(table: TimeMultiplierTable) -> Self {
        table
            .tiers
            .into_iter()
            .map(|tier| (tier.threshold_hours.to_string(), tier.multiplier))
            .collect()
    }
}

/// A point-in-time snapshot of an administrator-defined pricing configuration.
///
/// The engine never mutates a configuration; it only reads one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfiguration {
    /// Unique name of the configuration.
    pub name: String,
    /// Free-form description shown to administrators.
    #[serde(default)]
    pub description: String,
    /// Only active configurations are eligible for selection.
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    /// Breaks ties when several active configurations apply to the same day.
    /// Higher wins.
    #[serde(default)]
    pub priority: u32,
    /// Days of the week this configuration applies to.
    pub applicable_days: BTreeSet<DayOfWeek>,
    /// Price covering the first `base_distance_km` (DBP).
    pub distance_base_price: Decimal,
    /// Distance covered by the base price.
    pub base_distance_km: Decimal,
    /// Price per kilometre beyond the base distance (DAP).
    pub distance_additional_price: Decimal,
    /// Tiered time multipliers (TMF).
    #[serde(default)]
    pub time_multipliers: TimeMultiplierTable,
    /// Charge per billable waiting interval.
    pub waiting_charge_per_interval: Decimal,
    /// Length of a billable waiting interval in minutes.
    #[serde(default = "default_waiting_interval_minutes")]
    pub waiting_interval_minutes: u32,
    /// Grace period in minutes before waiting is charged.
    #[serde(default = "default_waiting_free_minutes")]
    pub waiting_free_minutes: u32,
}

fn default_is_active() -> bool {
    true
}

fn default_waiting_interval_minutes() -> u32 {
    3
}

fn default_waiting_free_minutes() -> u32 {
    3
}

/// A broken configuration invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// The field that broke the invariant.
    pub field: &'static str,
    /// A description of the broken invariant.
    pub message: String,
}

impl PricingConfiguration {
    /// Returns true if this configuration may be selected for `day`.
    pub fn applies_to(&self, day: DayOfWeek) -> bool {
        self.is_active && self.applicable_days.contains(&day)
    }

    /// Checks every configuration invariant, returning the first one broken.
    ///
    /// - the name is not blank
    /// - at least one applicable day
    /// - prices are non-negative
    /// - the base distance is strictly positive
    /// - the waiting interval is strictly positive
    /// - multiplier tiers are sorted, unique and strictly positive
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.name.trim().is_empty() {
            return Err(violation("name", "must not be blank"));
        }
        if self.applicable_days.is_empty() {
            return Err(violation("applicable_days", "must contain at least one day"));
        }
        non_negative("distance_base_price", self.distance_base_price)?;
        non_negative("distance_additional_price", self.distance_additional_price)?;
        non_negative(
            "waiting_charge_per_interval",
            self.waiting_charge_per_interval,
        )?;
        if self.base_distance_km <= Decimal::ZERO {
            return Err(violation(
                "base_distance_km",
                format!("must be positive (got {})", self.base_distance_km),
            ));
        }
        if self.waiting_interval_minutes == 0 {
            return Err(violation("waiting_interval_minutes", "must be positive"));
        }
        if !self.time_multipliers.is_sorted() {
            return Err(violation(
                "time_multipliers",
                "hour thresholds must be unique and ascending",
            ));
        }
        if let Some(tier) = self.time_multipliers.invalid_multiplier() {
            return Err(violation(
                "time_multipliers",
                format!(
                    "multiplier {} for {} hours must be positive",
                    tier.multiplier, tier.threshold_hours
                ),
            ));
        }
        Ok(())
    }
}

fn violation(field: &'static str, message: impl Into<String>) -> InvariantViolation {
    InvariantViolation {
        field,
        message: message.into(),
    }
}

fn non_negative(field: &'static str, value: Decimal) -> Result<(), InvariantViolation> {
    if value < Decimal::ZERO {
        return Err(violation(
            field,
            format!("cannot be negative (got {})", value),
        ));
    }
    Ok(())
}
