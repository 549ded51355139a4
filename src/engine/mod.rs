// SPDX-License-Identifier: PMPL-1.0-or-later
//! The audit engine: registry, configuration, session, scheduler, and
//! aggregation.
//!
//! A run wires these together: a [`RuleRegistry`](registry::RuleRegistry)
//! holds the catalog, [`resolve_config`](registry::RuleRegistry::resolve_config)
//! folds caller overrides onto standards defaults, and
//! [`scheduler::run`] executes the active rules sequentially against an
//! [`AuditContext`](context::AuditContext), accumulating issues in an
//! [`AuditSession`](session::AuditSession) and folding them into the final
//! scored report.

pub mod config;
pub mod context;
pub mod registry;
pub mod scheduler;
pub mod selector;
pub mod session;
pub mod summary;

pub use config::{EffectiveRuleConfig, RuleDefaults, RuleOverride, RunConfig, StandardsTable};
pub use context::AuditContext;
pub use registry::{ActiveRule, RuleDescriptor, RuleRegistry};
pub use scheduler::{run, RuleResult};
pub use selector::Selector;
pub use session::AuditSession;
pub use summary::{score, summarize, AxisCounters, Summary};
