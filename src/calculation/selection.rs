//! Pricing configuration selection.
//!
//! Picks the single configuration that prices a trip on a given day.

use std::cmp::Ordering;

use tracing::debug;

use crate::config::PricingConfiguration;
use crate::error::{EngineError, EngineResult};
use crate::models::DayOfWeek;

/// Selects the configuration that applies to `day`.
///
/// A configuration is eligible when it is active and `day` is one of its
/// applicable days. When several are eligible the one with the highest
/// `priority` wins, and equal priorities fall back to the lexicographically
/// smallest name. Names are unique, so the choice never depends on the
/// order of `configurations`.
///
/// # Errors
///
/// Returns `ConfigurationNotFound` when no configuration is eligible,
/// including when `configurations` is empty.
///
/// # Example
///
/// ```no_run
/// use fare_engine::calculation::select_configuration;
/// use fare_engine::config::{ConfigLoader, ConfigurationStore};
/// use fare_engine::models::DayOfWeek;
///
/// let loader = ConfigLoader::load("./config/standard")?;
/// let config = select_configuration(loader.configurations(), DayOfWeek::Monday)?;
/// println!("Pricing with {}", config.name);
/// # Ok::<(), fare_engine::error::EngineError>(())
/// ```
pub fn select_configuration<'a, I>(
    configurations: I,
    day: DayOfWeek,
) -> EngineResult<&'a PricingConfiguration>
where
    I: IntoIterator<Item = &'a PricingConfiguration>,
{
    let selected = configurations
        .into_iter()
        .filter(|config| config.applies_to(day))
        .max_by(|a, b| precedence(a, b))
        .ok_or(EngineError::ConfigurationNotFound { day })?;

    debug!(
        day = %day,
        configuration = %selected.name,
        priority = selected.priority,
        "Selected pricing configuration"
    );
    Ok(selected)
}

/// Orders configurations so that the preferred one compares greatest.
fn precedence(a: &PricingConfiguration, b: &PricingConfiguration) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| b.name.cmp(&a.name))
}
