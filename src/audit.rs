//! Audit records for pricing configuration changes.
//!
//! Administrators create, edit, activate and delete configurations outside
//! the engine. Each change is described by an immutable
//! [`ConfigurationAuditEntry`] and handed to an [`AuditSink`]; where entries
//! are persisted is up to the sink. The calculator never reads them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::config::PricingConfiguration;

/// The kind of change made to a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationAction {
    /// A new configuration was added.
    Created,
    /// One or more fields of a configuration changed.
    Updated,
    /// A configuration was removed.
    Deleted,
    /// An inactive configuration was switched on and nothing else changed.
    Activated,
    /// An active configuration was switched off and nothing else changed.
    Deactivated,
}

impl fmt::Display for ConfigurationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationAction::Created => write!(f, "created"),
            ConfigurationAction::Updated => write!(f, "updated"),
            ConfigurationAction::Deleted => write!(f, "deleted"),
            ConfigurationAction::Activated => write!(f, "activated"),
            ConfigurationAction::Deactivated => write!(f, "deactivated"),
        }
    }
}

/// An immutable record of one configuration change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationAuditEntry {
    /// The name of the configuration that changed.
    pub configuration: String,
    /// What happened to it.
    pub action: ConfigurationAction,
    /// Who made the change.
    pub actor: String,
    /// When the change was made.
    pub timestamp: DateTime<Utc>,
    /// Changed fields, keyed by field name.
    ///
    /// Creations list every field's new value, updates map each changed
    /// field to `{"old": .., "new": ..}`, deletions are empty.
    pub changes: Value,
}

impl ConfigurationAuditEntry {
    /// Describes the change from `before` to `after`.
    ///
    /// `before` is `None` for a creation and `after` is `None` for a deletion.
    /// Returns `None` if both are `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::Utc;
    /// use fare_engine::audit::{ConfigurationAction, ConfigurationAuditEntry};
    /// use fare_engine::config::PricingConfiguration;
    ///
    /// let yaml = r#"
    /// name: weekday
    /// applicable_days: [monday]
    /// distance_base_price: 50
    /// base_distance_km: 5
    /// distance_additional_price: 10
    /// waiting_charge_per_interval: 5
    /// "#;
    /// let before: PricingConfiguration = serde_yaml::from_str(yaml).unwrap();
    /// let mut after = before.clone();
    /// after.is_active = false;
    ///
    /// let entry =
    ///     ConfigurationAuditEntry::between(Some(&before), Some(&after), "admin", Utc::now())
    ///         .unwrap();
    /// assert_eq!(entry.action, ConfigurationAction::Deactivated);
    /// ```
    pub fn between(
        before: Option<&PricingConfiguration>,
        after: Option<&PricingConfiguration>,
        actor: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Option<Self> {
        let (configuration, action, changes) = match (before, after) {
            (None, None) => return None,
            (None, Some(created)) => (
                created.name.clone(),
                ConfigurationAction::Created,
                field_values(created),
            ),
            (Some(deleted), None) => (
                deleted.name.clone(),
                ConfigurationAction::Deleted,
                Value::Object(Map::new()),
            ),
            (Some(old), Some(new)) => {
                let changes = changed_fields(old, new);
                let action = match (changes.len(), new.is_active) {
                    (1, true) if changes.contains_key("is_active") => {
                        ConfigurationAction::Activated
                    }
                    (1, false) if changes.contains_key("is_active") => {
                        ConfigurationAction::Deactivated
                    }
                    _ => ConfigurationAction::Updated,
                };
                (new.name.clone(), action, Value::Object(changes))
            }
        };

        Some(Self {
            configuration,
            action,
            actor: actor.into(),
            timestamp,
            changes,
        })
    }
}

/// Serializes a configuration to its field map.
fn field_values(config: &PricingConfiguration) -> Value {
    // Every field serializes to a string-keyed JSON value, so this cannot fail
    serde_json::to_value(config).unwrap_or_default()
}

/// Maps each field that differs between `old` and `new` to its old and new value.
fn changed_fields(old: &PricingConfiguration, new: &PricingConfiguration) -> Map<String, Value> {
    let (Value::Object(old), Value::Object(new)) = (field_values(old), field_values(new)) else {
        return Map::new();
    };

    new.into_iter()
        .filter_map(|(field, new_value)| {
            let old_value = old.get(&field).cloned().unwrap_or(Value::Null);
            (old_value != new_value).then(|| {
                (
                    field,
                    serde_json::json!({ "old": old_value, "new": new_value }),
                )
            })
        })
        .collect()
}

/// Receives configuration audit entries.
pub trait AuditSink {
    /// Records one entry. Entries are never modified once recorded.
    fn record(&mut self, entry: ConfigurationAuditEntry);
}

impl AuditSink for Vec<ConfigurationAuditEntry> {
    fn record(&mut self, entry: ConfigurationAuditEntry) {
        self.push(entry);
    }
}

/// Writes audit entries to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&mut self, entry: ConfigurationAuditEntry) {
        info!(
            configuration = %entry.configuration,
            action = %entry.action,
            actor = %entry.actor,
            timestamp = %entry.timestamp,
            changes = %entry.changes,
            "Pricing configuration {}",
            entry.action
        );
    }
}
