// SPDX-License-Identifier: PMPL-1.0-or-later
//! Cross-tabulated summaries and the overall score.
//!
//! Both functions are pure projections over the rule results and the
//! session store: calling them repeatedly without mutation in between
//! yields identical values, and neither depends on the order rules
//! executed in.

use super::scheduler::RuleResult;
use super::session::AuditSession;
use crate::model::{CategoryType, Severity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The four counters every summary axis tabulates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisCounters {
    pub error: u32,
    pub warning: u32,
    pub passed: u32,
    pub skipped: u32,
}

/// Multi-axis summary of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub by_category: BTreeMap<CategoryType, AxisCounters>,
    pub by_issue_type: AxisCounters,
    pub by_standard_rule: BTreeMap<String, AxisCounters>,
    pub by_wcag_success_criteria: BTreeMap<String, AxisCounters>,
}

impl Summary {
    /// Increment one counter on every axis the rule belongs to.
    fn bump(&mut self, rule: &RuleResult, bucket: impl Fn(&mut AxisCounters)) {
        bucket(&mut self.by_issue_type);
        bucket(self.by_standard_rule.entry(rule.rule_id.clone()).or_default());
        for category in &rule.categories {
            bucket(self.by_category.entry(*category).or_default());
        }
        for criterion in &rule.wcag_criteria {
            bucket(
                self.by_wcag_success_criteria
                    .entry(criterion.clone())
                    .or_default(),
            );
        }
    }
}

/// Fold rule results and stored issues into the summary.
///
/// Per issue, the owning rule's *effective* severity decides the bucket:
/// `Critical` and `High` count as `error`, `Low` and `Info` as `warning` --
/// the error/warning threshold documented on
/// [`Severity::is_error`](crate::model::Severity::is_error). A rule that
/// passed with zero issues counts as `passed` on every axis it belongs to;
/// a skipped rule as `skipped`; a rule whose check faulted as `error`, so a
/// crash is never invisible in the cross-tabulation.
pub fn summarize(results: &[RuleResult], session: &AuditSession) -> Summary {
    let by_id: HashMap<&str, &RuleResult> =
        results.iter().map(|r| (r.rule_id.as_str(), r)).collect();

    let mut summary = Summary::default();
    let mut issue_counts: HashMap<&str, usize> = HashMap::new();

    for issue in session.all() {
        let Some(rule) = by_id.get(issue.rule_id.as_str()) else {
            continue;
        };
        *issue_counts.entry(rule.rule_id.as_str()).or_default() += 1;
        if rule.severity.is_error() {
            summary.bump(rule, |c| c.error += 1);
        } else {
            summary.bump(rule, |c| c.warning += 1);
        }
    }

    for rule in results {
        let issues = issue_counts
            .get(rule.rule_id.as_str())
            .copied()
            .unwrap_or(0);
        if rule.status.is_passed() && issues == 0 {
            summary.bump(rule, |c| c.passed += 1);
        } else if rule.status.is_skipped() {
            summary.bump(rule, |c| c.skipped += 1);
        } else if rule.status.is_error() {
            summary.bump(rule, |c| c.error += 1);
        }
    }

    summary
}

/// Overall score: 100 minus a severity-weighted deduction per issue,
/// clamped to [0, 100].
///
/// Weights come from [`Severity::score_deduction`] (Critical 10, High 5,
/// Low 2, Info 1). The score is a fold over the issue multiset, so
/// identical issue sets yield identical scores regardless of the order
/// rules executed in.
pub fn score(results: &[RuleResult], session: &AuditSession) -> f64 {
    let by_id: HashMap<&str, Severity> = results
        .iter()
        .map(|r| (r.rule_id.as_str(), r.severity))
        .collect();

    let deduction: f64 = session
        .all()
        .iter()
        .filter_map(|issue| by_id.get(issue.rule_id.as_str()))
        .map(|severity| severity.score_deduction())
        .sum();

    (100.0 - deduction).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExecutionStatus, IssueDraft, SkipReason};
    use std::collections::BTreeSet;

    fn result(id: &str, status: ExecutionStatus, severity: Severity) -> RuleResult {
        RuleResult {
            rule_id: id.to_string(),
            status,
            severity,
            categories: BTreeSet::from([CategoryType::WcagA]),
            wcag_criteria: BTreeSet::from(["1.1.1".to_string()]),
            recommendations: Vec::new(),
            links: Vec::new(),
            elements_evaluated: 1,
        }
    }

    #[test]
    fn issues_split_between_error_and_warning_at_high() {
        let mut session = AuditSession::new();
        session.report("hi", None, IssueDraft::new("a"));
        session.report("lo", None, IssueDraft::new("b"));
        let results = vec![
            result("hi", ExecutionStatus::Passed, Severity::High),
            result("lo", ExecutionStatus::Passed, Severity::Low),
        ];
        let summary = summarize(&results, &session);
        assert_eq!(summary.by_issue_type.error, 1);
        assert_eq!(summary.by_issue_type.warning, 1);
        assert_eq!(summary.by_issue_type.passed, 0);
    }

    #[test]
    fn passed_with_zero_issues_counts_passed_on_every_axis() {
        let session = AuditSession::new();
        let results = vec![result("r1", ExecutionStatus::Passed, Severity::High)];
        let summary = summarize(&results, &session);
        assert_eq!(summary.by_issue_type.passed, 1);
        assert_eq!(summary.by_standard_rule["r1"].passed, 1);
        assert_eq!(summary.by_category[&CategoryType::WcagA].passed, 1);
        assert_eq!(summary.by_wcag_success_criteria["1.1.1"].passed, 1);
    }

    #[test]
    fn skipped_and_faulted_rules_are_tabulated() {
        let session = AuditSession::new();
        let results = vec![
            result(
                "skip",
                ExecutionStatus::Skipped {
                    reason: SkipReason::EmptyDocument,
                },
                Severity::High,
            ),
            result(
                "boom",
                ExecutionStatus::Error {
                    reason: "x".to_string(),
                },
                Severity::High,
            ),
        ];
        let summary = summarize(&results, &session);
        assert_eq!(summary.by_issue_type.skipped, 1);
        assert_eq!(summary.by_issue_type.error, 1);
    }

    #[test]
    fn summarize_is_a_pure_projection() {
        let mut session = AuditSession::new();
        session.report("r1", None, IssueDraft::new("a"));
        let results = vec![result("r1", ExecutionStatus::Passed, Severity::Critical)];
        let first = summarize(&results, &session);
        let second = summarize(&results, &session);
        assert_eq!(first, second);
    }

    #[test]
    fn score_uses_effective_severity_and_clamps() {
        let mut session = AuditSession::new();
        for _ in 0..3 {
            session.report("r1", None, IssueDraft::new("a"));
        }
        let results = vec![result("r1", ExecutionStatus::Passed, Severity::Critical)];
        assert_eq!(score(&results, &session), 70.0);

        for _ in 0..20 {
            session.report("r1", None, IssueDraft::new("a"));
        }
        assert_eq!(score(&results, &session), 0.0);
    }

    #[test]
    fn empty_run_scores_one_hundred() {
        let session = AuditSession::new();
        assert_eq!(score(&[], &session), 100.0);
    }
}
