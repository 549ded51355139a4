// SPDX-License-Identifier: PMPL-1.0-or-later
//! Shared data model for rules, issues, and execution outcomes.

use crate::dom::Element;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a rule or issue. Ordering is significant: later variants are
/// more severe, and the scoring deduction grows with severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational
    Info,
    /// Minor impact, should be addressed
    Low,
    /// Serious barrier for some users
    High,
    /// Blocks access outright
    Critical,
}

impl Severity {
    /// Whether issues at this severity count as errors in the summary.
    ///
    /// This threshold is the single most consequential scoring decision in
    /// the engine: `Critical` and `High` issues land in the `error` bucket
    /// of every summary axis, `Low` and `Info` land in `warning`.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }

    /// Points subtracted from the 100-point score per issue at this
    /// severity. Explicit policy: weights are monotonic in severity.
    pub fn score_deduction(&self) -> f64 {
        match self {
            Severity::Critical => 10.0,
            Severity::High => 5.0,
            Severity::Low => 2.0,
            Severity::Info => 1.0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Low => write!(f, "low"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Classification tag for a rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryType {
    /// Not required by WCAG but recommended
    BestPractice,
    /// WCAG Level A - minimum conformance
    WcagA,
    /// WCAG Level AA - standard conformance
    WcagAa,
    /// WCAG Level AAA - enhanced conformance
    WcagAaa,
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryType::BestPractice => write!(f, "best-practice"),
            CategoryType::WcagA => write!(f, "wcag-a"),
            CategoryType::WcagAa => write!(f, "wcag-aa"),
            CategoryType::WcagAaa => write!(f, "wcag-aaa"),
        }
    }
}

/// Machine-readable reason a check declared itself unable to evaluate.
///
/// Distinct from free text so callers can branch on it; the human-readable
/// form comes from `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
pub enum SkipReason {
    /// The host environment lacks a capability the check needs
    /// (e.g. computed styles on a static document).
    MissingCapability(String),
    /// The document has no content to evaluate.
    EmptyDocument,
    /// The check does not apply to this kind of document.
    Unsupported(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingCapability(what) => {
                write!(f, "missing capability: {}", what)
            }
            SkipReason::EmptyDocument => write!(f, "empty document"),
            SkipReason::Unsupported(what) => write!(f, "unsupported: {}", what),
        }
    }
}

/// Terminal status of one rule in one run. Every active rule ends the run
/// with exactly one of these; a crashed check is visible as `Error`, never
/// a silent omission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// The check completed without fault. Zero reported issues is a valid
    /// (vacuous) pass.
    Passed,
    /// The check faulted; the reason is diagnostic text from the fault.
    Error { reason: String },
    /// The check declared its preconditions unmet.
    Skipped { reason: SkipReason },
}

impl ExecutionStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, ExecutionStatus::Passed)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExecutionStatus::Error { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ExecutionStatus::Skipped { .. })
    }
}

/// One reported problem instance, tied to a rule and optionally a node.
/// Immutable once created by the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Sequential id of the form `report_N`, assigned by a single
    /// run-scoped counter (not per rule).
    pub id: String,
    /// Id of the rule that reported this issue.
    pub rule_id: String,
    /// Human-readable message, already interpolated and HTML-escaped.
    pub message: String,
    /// Engine-side handle of the offending element, when one exists.
    /// Not serialized; the stable `node_ref` path is the wire form.
    #[serde(skip)]
    pub node: Option<Element>,
    /// Opaque element reference rendered by the DOM provider, or null.
    pub node_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
    /// Free-form structured payload attached by the check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Draft of an issue as a check hands it over; the store assigns the id
/// and the reporter resolves the node handle to a stable reference.
#[derive(Debug, Clone)]
pub struct IssueDraft {
    pub message: String,
    pub node: Option<Element>,
    pub skip_reason: Option<SkipReason>,
    pub data: Option<serde_json::Value>,
}

impl IssueDraft {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            node: None,
            skip_reason: None,
            data: None,
        }
    }

    pub fn with_node(mut self, node: Element) -> Self {
        self.node = Some(node);
        self
    }

    pub fn with_skip_reason(mut self, reason: SkipReason) -> Self {
        self.skip_reason = Some(reason);
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering_is_monotonic() {
        assert!(Severity::Info < Severity::Low);
        assert!(Severity::Low < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn severity_deductions_grow_with_severity() {
        let weights: Vec<f64> = [
            Severity::Info,
            Severity::Low,
            Severity::High,
            Severity::Critical,
        ]
        .iter()
        .map(|s| s.score_deduction())
        .collect();
        assert!(weights.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn error_threshold_splits_at_high() {
        assert!(Severity::Critical.is_error());
        assert!(Severity::High.is_error());
        assert!(!Severity::Low.is_error());
        assert!(!Severity::Info.is_error());
    }

    #[test]
    fn execution_status_serializes_tagged() {
        let status = ExecutionStatus::Error {
            reason: "x".to_string(),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json, serde_json::json!({"type": "error", "reason": "x"}));
    }

    #[test]
    fn skip_reason_is_machine_readable() {
        let reason = SkipReason::MissingCapability("computed styles".to_string());
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["kind"], "missing-capability");
        assert_eq!(reason.to_string(), "missing capability: computed styles");
    }

    #[test]
    fn category_serializes_kebab_case() {
        let json = serde_json::to_value(CategoryType::WcagAa).unwrap();
        assert_eq!(json, "wcag-aa");
    }
}
