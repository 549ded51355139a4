// SPDX-License-Identifier: PMPL-1.0-or-later
//! Per-run rule configuration.
//!
//! Three layers produce the effective configuration of each rule: the
//! rule's built-in defaults, the standards table (canonical defaults for
//! rules it knows about), and the caller's per-run overrides. Each layer is
//! merged field by field -- an explicit typed merge, not a generic deep
//! merge of loose objects -- so an unspecified field always inherits from
//! the layer below and is never dropped.

use crate::model::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Partial override for one rule. Absent fields inherit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl RuleOverride {
    /// Apply this override on top of a base configuration. Override leaves
    /// win; unspecified leaves inherit.
    pub fn merged_onto(&self, base: EffectiveRuleConfig) -> EffectiveRuleConfig {
        EffectiveRuleConfig {
            enabled: self.enabled.unwrap_or(base.enabled),
            severity: self.severity.unwrap_or(base.severity),
        }
    }
}

/// Caller-supplied per-run configuration: a nested object keyed by rule id,
/// each value a partial override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(flatten)]
    pub overrides: BTreeMap<String, RuleOverride>,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, rule_id: impl Into<String>, entry: RuleOverride) {
        self.overrides.insert(rule_id.into(), entry);
    }

    /// Convenience: disable one rule, keeping any other override fields.
    pub fn disable(&mut self, rule_id: impl Into<String>) {
        self.overrides.entry(rule_id.into()).or_default().enabled = Some(false);
    }

    pub fn get(&self, rule_id: &str) -> Option<&RuleOverride> {
        self.overrides.get(rule_id)
    }
}

/// Canonical defaults for one rule as a standard defines it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleDefaults {
    pub enabled: bool,
    pub severity: Severity,
}

/// The standards table: rule id to canonical defaults. Rules the table does
/// not know fall back to their descriptor's built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct StandardsTable {
    entries: BTreeMap<String, RuleDefaults>,
}

impl StandardsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rule_id: impl Into<String>, defaults: RuleDefaults) {
        self.entries.insert(rule_id.into(), defaults);
    }

    pub fn get(&self, rule_id: &str) -> Option<RuleDefaults> {
        self.entries.get(rule_id).copied()
    }
}

/// Configuration a rule actually runs with, computed once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectiveRuleConfig {
    pub enabled: bool,
    pub severity: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_leaf_wins_unspecified_inherits() {
        let base = EffectiveRuleConfig {
            enabled: true,
            severity: Severity::High,
        };
        let over = RuleOverride {
            enabled: None,
            severity: Some(Severity::Critical),
        };
        let effective = over.merged_onto(base);
        assert_eq!(effective.severity, Severity::Critical);
        assert!(effective.enabled);
    }

    #[test]
    fn empty_override_is_identity() {
        let base = EffectiveRuleConfig {
            enabled: false,
            severity: Severity::Low,
        };
        assert_eq!(RuleOverride::default().merged_onto(base), base);
    }

    #[test]
    fn run_config_deserializes_from_nested_object() {
        let config: RunConfig = serde_json::from_str(
            r#"{"img-alt": {"severity": "critical"}, "doc-title": {"enabled": false}}"#,
        )
        .unwrap();
        assert_eq!(
            config.get("img-alt").unwrap().severity,
            Some(Severity::Critical)
        );
        assert_eq!(config.get("doc-title").unwrap().enabled, Some(false));
        assert!(config.get("unmentioned").is_none());
    }

    #[test]
    fn disable_preserves_other_fields() {
        let mut config = RunConfig::new();
        config.set(
            "img-alt",
            RuleOverride {
                enabled: None,
                severity: Some(Severity::Low),
            },
        );
        config.disable("img-alt");
        let entry = config.get("img-alt").unwrap();
        assert_eq!(entry.enabled, Some(false));
        assert_eq!(entry.severity, Some(Severity::Low));
    }
}
