// SPDX-License-Identifier: PMPL-1.0-or-later
//! Sequential execution of active rules against a context.
//!
//! Rules run strictly one at a time, in registration order. Order is
//! user-observable (some checks scan state populated by earlier checks),
//! and sequential execution is load-bearing: checks share one
//! unsynchronized session store, and a check that mutates transient
//! document state must finish its cleanup before the next check observes
//! the document. Suspension happens only at await points inside individual
//! checks; there is no interleaving between checks and no global timeout --
//! an asynchronous check is responsible for bounding its own I/O.

use super::config::{EffectiveRuleConfig, RunConfig, StandardsTable};
use super::context::AuditContext;
use super::registry::{ActiveRule, RuleRegistry};
use super::session::AuditSession;
use super::summary;
use crate::checks::CheckError;
use crate::error::{AuditError, Result};
use crate::locale::MessageCatalog;
use crate::model::{CategoryType, ExecutionStatus, Severity};
use crate::report::{AuditReport, RuleAudit};
use crate::{checks::CheckContext, dom::DomError};
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Terminal record of one rule in one run, carrying the effective
/// configuration and taxonomy the aggregator needs.
#[derive(Debug, Clone)]
pub struct RuleResult {
    pub rule_id: String,
    pub status: ExecutionStatus,
    /// Effective severity after configuration resolution.
    pub severity: Severity,
    pub categories: BTreeSet<CategoryType>,
    pub wcag_criteria: BTreeSet<String>,
    pub recommendations: Vec<String>,
    pub links: Vec<String>,
    pub elements_evaluated: usize,
}

/// Execute every active rule and assemble the final report.
///
/// Only setup faults (an override naming an unknown rule, a malformed
/// selector on a descriptor) propagate as errors. Every per-check problem
/// is captured as that rule's terminal status; a crashed check can never
/// abort the run or go missing from the report.
pub async fn run(
    registry: &RuleRegistry,
    run_config: &RunConfig,
    standards: &StandardsTable,
    messages: &MessageCatalog,
    context: &AuditContext<'_>,
    session: &mut AuditSession,
) -> Result<AuditReport> {
    let active = registry.resolve_config(run_config, standards)?;
    info!(
        rules = active.len(),
        context = %context.label,
        "starting audit run"
    );

    let mut results: Vec<RuleResult> = Vec::with_capacity(active.len());
    for entry in &active {
        let result = run_rule(entry, messages, context, session).await?;
        results.push(result);
    }

    let summary = summary::summarize(&results, session);
    let score = summary::score(&results, session);

    let mut rules: BTreeMap<String, RuleAudit> = BTreeMap::new();
    for result in results {
        let issues = session
            .issues_for(&result.rule_id)
            .into_iter()
            .cloned()
            .collect();
        rules.insert(
            result.rule_id,
            RuleAudit {
                status: result.status,
                results: issues,
                severity: result.severity,
                categories: result.categories,
                recommendations: result.recommendations,
                resources: result.links,
                total_elements_evaluated: result.elements_evaluated,
            },
        );
    }

    info!(score, issues = session.len(), "audit run complete");

    Ok(AuditReport {
        context: context.label.clone(),
        session: session.session_id(),
        created_at: Utc::now(),
        document_html_size: context.dom.html_size(),
        context_html_size: context.html_size(),
        page_title: context.dom.page_title(),
        total_elements_on_document: context.dom.element_count(),
        total_elements_on_context: context.element_count(),
        score,
        rules,
        summary,
    })
}

async fn run_rule(
    entry: &ActiveRule<'_>,
    messages: &MessageCatalog,
    context: &AuditContext<'_>,
    session: &mut AuditSession,
) -> Result<RuleResult> {
    let rule = entry.rule;
    let config: EffectiveRuleConfig = entry.config;

    let elements = rule
        .selector
        .resolve(context)
        .map_err(|source: DomError| AuditError::Selector {
            rule: rule.id.clone(),
            source,
        })?;
    debug!(rule = %rule.id, candidates = elements.len(), "resolved selector");

    let mut cx = CheckContext::new(context.dom, messages, session, &rule.id);
    let status = match rule.check.validate(&elements, &mut cx).await {
        Ok(()) => ExecutionStatus::Passed,
        Err(CheckError::Skip(reason)) => {
            debug!(rule = %rule.id, %reason, "check skipped itself");
            ExecutionStatus::Skipped { reason }
        }
        Err(CheckError::Fault(err)) => {
            warn!(rule = %rule.id, error = %err, "check faulted; continuing run");
            ExecutionStatus::Error {
                reason: err.to_string(),
            }
        }
    };

    Ok(RuleResult {
        rule_id: rule.id.clone(),
        status,
        severity: config.severity,
        categories: rule.categories.clone(),
        wcag_criteria: rule.wcag_criteria.clone(),
        recommendations: rule.recommendations.clone(),
        links: rule.links.clone(),
        elements_evaluated: elements.len(),
    })
}
