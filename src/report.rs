// SPDX-License-Identifier: PMPL-1.0-or-later
//! The final audit report and its output formats.
//!
//! The report is produced once at the end of a run and is read-only from
//! then on. JSON output is plain serde; the text renderer groups rules by
//! terminal status for human consumption.

use crate::engine::summary::Summary;
use crate::model::{CategoryType, ExecutionStatus, Issue, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Per-rule slice of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleAudit {
    pub status: ExecutionStatus,
    /// Issues this rule reported, in insertion order.
    pub results: Vec<Issue>,
    /// Effective severity the rule ran with.
    pub severity: Severity,
    pub categories: BTreeSet<CategoryType>,
    pub recommendations: Vec<String>,
    pub resources: Vec<String>,
    pub total_elements_evaluated: usize,
}

/// The immutable, JSON-serializable output of one audit run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Context label (document name, file path, widget id, ...).
    pub context: String,
    pub session: Uuid,
    pub created_at: DateTime<Utc>,
    pub document_html_size: usize,
    pub context_html_size: usize,
    pub page_title: Option<String>,
    pub total_elements_on_document: usize,
    pub total_elements_on_context: usize,
    /// 0-100, severity-weighted.
    pub score: f64,
    pub rules: BTreeMap<String, RuleAudit>,
    pub summary: Summary,
}

impl AuditReport {
    /// Whether the run produced any error-class findings.
    pub fn has_errors(&self) -> bool {
        self.summary.by_issue_type.error > 0
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render a report in the requested format.
pub fn render_report(report: &AuditReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => report.to_json().unwrap_or_else(|e| {
            format!("{{\"error\": \"Failed to serialize report: {}\"}}", e)
        }),
    }
}

fn render_text(report: &AuditReport) -> String {
    let mut out = String::new();

    out.push_str("=== Accessibility Audit Report ===\n\n");
    out.push_str(&format!("Context:  {}\n", report.context));
    if let Some(ref title) = report.page_title {
        out.push_str(&format!("Title:    {}\n", title));
    }
    out.push_str(&format!("Elements: {}\n", report.total_elements_on_context));
    out.push_str(&format!("Score:    {:.1}/100\n\n", report.score));

    let counters = &report.summary.by_issue_type;
    out.push_str(&format!(
        "Rules: {} error(s), {} warning(s), {} passed, {} skipped\n\n",
        counters.error, counters.warning, counters.passed, counters.skipped
    ));

    for (rule_id, audit) in &report.rules {
        if audit.results.is_empty() && audit.status.is_passed() {
            continue;
        }
        match &audit.status {
            ExecutionStatus::Error { reason } => {
                out.push_str(&format!("[{}] CHECK FAULTED: {}\n", rule_id, reason));
            }
            ExecutionStatus::Skipped { reason } => {
                out.push_str(&format!("[{}] skipped ({})\n", rule_id, reason));
            }
            ExecutionStatus::Passed => {
                out.push_str(&format!(
                    "[{}] {} ({} issue(s))\n",
                    rule_id,
                    audit.severity,
                    audit.results.len()
                ));
            }
        }
        for issue in &audit.results {
            out.push_str(&format!("  {}: {}\n", issue.id, issue.message));
            if let Some(ref node_ref) = issue.node_ref {
                out.push_str(&format!("    at {}\n", node_ref));
            }
        }
        for recommendation in &audit.recommendations {
            out.push_str(&format!("  Fix: {}\n", recommendation));
        }
        out.push('\n');
    }

    if counters.error > 0 {
        out.push_str("RESULT: FAIL (errors found)\n");
    } else if counters.warning > 0 {
        out.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        out.push_str("RESULT: PASS\n");
    }

    out
}
