// SPDX-License-Identifier: PMPL-1.0-or-later
//! The rule registry: an immutable catalog of checks and their metadata.

use super::config::{EffectiveRuleConfig, RunConfig, StandardsTable};
use super::selector::Selector;
use crate::checks::Check;
use crate::error::{AuditError, Result};
use crate::model::{CategoryType, Severity};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// Everything the engine knows about one rule: identity, selector, default
/// configuration, taxonomy, informational links, and the check itself.
/// Immutable after registration.
#[derive(Clone)]
pub struct RuleDescriptor {
    /// Unique, stable, kebab-case rule id.
    pub id: String,
    pub selector: Selector,
    /// Built-in default severity; the standards table and run overrides
    /// may replace it per run.
    pub severity: Severity,
    pub categories: BTreeSet<CategoryType>,
    /// WCAG success criteria this rule maps to, e.g. "1.1.1".
    pub wcag_criteria: BTreeSet<String>,
    /// Informational resources surfaced in the report.
    pub links: Vec<String>,
    pub recommendations: Vec<String>,
    pub enabled_by_default: bool,
    pub check: Arc<dyn Check>,
}

impl RuleDescriptor {
    pub fn new(
        id: impl Into<String>,
        selector: Selector,
        severity: Severity,
        check: Arc<dyn Check>,
    ) -> Self {
        Self {
            id: id.into(),
            selector,
            severity,
            categories: BTreeSet::new(),
            wcag_criteria: BTreeSet::new(),
            links: Vec::new(),
            recommendations: Vec::new(),
            enabled_by_default: true,
            check,
        }
    }

    pub fn with_categories<I: IntoIterator<Item = CategoryType>>(mut self, categories: I) -> Self {
        self.categories.extend(categories);
        self
    }

    pub fn with_wcag<I, S>(mut self, criteria: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wcag_criteria.extend(criteria.into_iter().map(Into::into));
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.links.push(link.into());
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendations.push(recommendation.into());
        self
    }

    pub fn disabled_by_default(mut self) -> Self {
        self.enabled_by_default = false;
        self
    }

    fn builtin_defaults(&self) -> EffectiveRuleConfig {
        EffectiveRuleConfig {
            enabled: self.enabled_by_default,
            severity: self.severity,
        }
    }
}

impl fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("id", &self.id)
            .field("selector", &self.selector)
            .field("severity", &self.severity)
            .field("categories", &self.categories)
            .finish_non_exhaustive()
    }
}

/// A rule that survived configuration resolution, paired with the
/// configuration it will run with.
#[derive(Debug)]
pub struct ActiveRule<'a> {
    pub rule: &'a RuleDescriptor,
    pub config: EffectiveRuleConfig,
}

/// Ordered catalog of rules. Registration order is preserved and
/// user-observable: some checks scan state populated by earlier checks.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<RuleDescriptor>,
    index: HashMap<String, usize>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule to the catalog. Ids are permanent: re-registering one is
    /// a fatal setup error, never a silent replacement.
    pub fn register(&mut self, descriptor: RuleDescriptor) -> Result<()> {
        if self.index.contains_key(&descriptor.id) {
            return Err(AuditError::DuplicateRuleId(descriptor.id));
        }
        self.index.insert(descriptor.id.clone(), self.rules.len());
        self.rules.push(descriptor);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&RuleDescriptor> {
        self.index.get(id).map(|&i| &self.rules[i])
    }

    /// All rules, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleDescriptor> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compute each registered rule's effective configuration and return
    /// the rules that remain active, in registration order.
    ///
    /// The base is the standards-table entry when one exists, otherwise the
    /// descriptor's built-in defaults; the caller override, if present, is
    /// merged on top field by field. An override naming an id that was
    /// never registered is a fatal setup error. Rules whose effective
    /// `enabled` is false are excluded entirely: not invoked and not
    /// recorded as skipped.
    pub fn resolve_config<'a>(
        &'a self,
        run_config: &RunConfig,
        standards: &StandardsTable,
    ) -> Result<Vec<ActiveRule<'a>>> {
        for id in run_config.overrides.keys() {
            if !self.index.contains_key(id) {
                return Err(AuditError::UnknownRuleId(id.clone()));
            }
        }

        let mut active = Vec::new();
        for rule in &self.rules {
            let base = match standards.get(&rule.id) {
                Some(defaults) => EffectiveRuleConfig {
                    enabled: defaults.enabled,
                    severity: defaults.severity,
                },
                None => rule.builtin_defaults(),
            };
            let config = match run_config.get(&rule.id) {
                Some(entry) => entry.merged_onto(base),
                None => base,
            };
            if config.enabled {
                active.push(ActiveRule { rule, config });
            }
        }
        Ok(active)
    }
}
