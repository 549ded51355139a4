// SPDX-License-Identifier: PMPL-1.0-or-later
//! The audit session: the report store and its run-scoped id counter.
//!
//! A session is an explicit value owned by the caller and passed by
//! reference to the scheduler and aggregator. Concurrent audits in one
//! process each need their own session; nothing here is global.

use crate::model::{Issue, IssueDraft};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Mutable state of one audit run: reported issues in insertion order and
/// the monotonic counter behind `report_N` ids.
///
/// # Contract
///
/// Ids are contiguous from 0 within a run. Between logically distinct runs
/// the caller must call [`reset`](AuditSession::reset) (or use a fresh
/// session); reusing a session without resetting leaks the previous run's
/// issues and ids into the next run's summary. This is a documented
/// contract, not something the store detects at runtime.
pub struct AuditSession {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    issues: Vec<Issue>,
    next_id: usize,
}

impl AuditSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            issues: Vec::new(),
            next_id: 0,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Store a drafted issue under the next sequential id and return it.
    pub fn report(
        &mut self,
        rule_id: &str,
        node_ref: Option<String>,
        draft: IssueDraft,
    ) -> &Issue {
        let issue = Issue {
            id: format!("report_{}", self.next_id),
            rule_id: rule_id.to_string(),
            message: draft.message,
            node: draft.node,
            node_ref,
            skip_reason: draft.skip_reason,
            data: draft.data,
        };
        self.next_id += 1;
        self.issues.push(issue);
        self.issues.last().expect("just pushed")
    }

    pub fn get(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|i| i.id == id)
    }

    /// All issues, in insertion order.
    pub fn all(&self) -> &[Issue] {
        &self.issues
    }

    /// Issues reported by one rule, in insertion order.
    pub fn issues_for(&self, rule_id: &str) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.rule_id == rule_id).collect()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Clear all issues and restart the id counter at 0.
    pub fn reset(&mut self) {
        self.issues.clear();
        self.next_id = 0;
    }
}

impl Default for AuditSession {
    fn default() -> Self {
        Self::new()
    }
}
