// SPDX-License-Identifier: PMPL-1.0-or-later
//! The check contract and the built-in rule catalog.
//!
//! Each check is one inspection routine mapped to one rule id. Checks
//! receive their resolved candidate elements and a [`CheckContext`] to
//! report through; they never see the registry, the configuration layer,
//! or other rules' results. Built-in checks cover a representative slice
//! of WCAG:
//!
//! - **img-alt** (1.1.1): images must carry an alt attribute
//! - **img-alt-generic**: alt text should describe, not say "image"
//! - **html-lang** (3.1.1): document language declaration
//! - **doc-title** (2.4.2): document title presence
//! - **form-label** (1.3.1/3.3.2): form controls need accessible names
//! - **link-name** (2.4.4): links need accessible names
//! - **button-name** (4.1.2): buttons need accessible names
//! - **aria-role** (4.1.2): role attributes must name real roles
//! - **heading-order**: heading levels should not skip
//! - **duplicate-id** (4.1.1): ids must be unique
//! - **media-captions** (1.2.2): videos need caption tracks
//! - **tabindex-positive** (2.4.3): avoid positive tabindex
//! - **meta-viewport** (1.4.4): zoom must not be disabled or capped
//! - **color-contrast** (1.4.3): requires computed styles; skips on
//!   providers that cannot compute them

pub mod aria;
pub mod document;
pub mod forms;
pub mod headings;
pub mod images;
pub mod media;
pub mod navigation;
pub mod styles;

use crate::dom::{DomProvider, Element};
use crate::engine::config::{RuleDefaults, StandardsTable};
use crate::engine::registry::{RuleDescriptor, RuleRegistry};
use crate::engine::session::AuditSession;
use crate::error::Result;
use crate::locale::MessageCatalog;
use crate::model::{Issue, IssueDraft, SkipReason};
use async_trait::async_trait;

/// Why a check did not complete. `Skip` is the documented sentinel for a
/// precondition the check itself declared unmet; `Fault` is anything else
/// that crossed the check boundary. The scheduler converts either into the
/// rule's terminal status and the run continues.
#[derive(Debug)]
pub enum CheckError {
    Skip(SkipReason),
    Fault(anyhow::Error),
}

impl CheckError {
    pub fn skip(reason: SkipReason) -> Self {
        CheckError::Skip(reason)
    }
}

impl From<anyhow::Error> for CheckError {
    fn from(err: anyhow::Error) -> Self {
        CheckError::Fault(err)
    }
}

pub type CheckOutcome = std::result::Result<(), CheckError>;

/// What a running check sees: the document, the message catalog, and a
/// reporting handle bound to its own rule id so a check cannot
/// mis-attribute an issue.
pub struct CheckContext<'a> {
    pub dom: &'a dyn DomProvider,
    pub messages: &'a MessageCatalog,
    session: &'a mut AuditSession,
    rule_id: &'a str,
}

impl<'a> CheckContext<'a> {
    pub fn new(
        dom: &'a dyn DomProvider,
        messages: &'a MessageCatalog,
        session: &'a mut AuditSession,
        rule_id: &'a str,
    ) -> Self {
        Self {
            dom,
            messages,
            session,
            rule_id,
        }
    }

    /// Report an issue for this check's rule. The session assigns the id;
    /// the draft's node handle is resolved to a stable reference here.
    pub fn report(&mut self, draft: IssueDraft) -> &Issue {
        let node_ref = draft.node.map(|el| self.dom.element_path(el));
        self.session.report(self.rule_id, node_ref, draft)
    }
}

/// A single inspection routine.
///
/// `validate` may suspend (e.g. to fetch an external stylesheet); the
/// scheduler awaits it to completion before the next check runs. Returning
/// `Err(CheckError::Skip(..))` is the one sanctioned way to decline
/// evaluation; returning `Ok(())` without reporting is a valid (vacuous)
/// pass. Panicking is a contract violation -- faults belong in the `Err`
/// arm, where the scheduler captures them per rule.
#[async_trait(?Send)]
pub trait Check {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome;
}

/// The built-in rules, in their canonical registration order. Document-wide
/// structural rules run after the per-element rules that precede them.
pub fn builtin_rules() -> Vec<RuleDescriptor> {
    vec![
        images::img_alt(),
        images::img_alt_generic(),
        document::html_lang(),
        document::doc_title(),
        forms::form_label(),
        navigation::link_name(),
        navigation::button_name(),
        aria::aria_role(),
        headings::heading_order(),
        document::duplicate_id(),
        media::media_captions(),
        navigation::tabindex_positive(),
        styles::meta_viewport(),
        styles::color_contrast(),
    ]
}

/// A registry pre-loaded with the built-in rules.
pub fn builtin_registry() -> Result<RuleRegistry> {
    let mut registry = RuleRegistry::new();
    for rule in builtin_rules() {
        registry.register(rule)?;
    }
    Ok(registry)
}

/// Canonical standards defaults for the built-in rules: every rule enabled
/// at its descriptor severity.
pub fn builtin_standards() -> StandardsTable {
    let mut standards = StandardsTable::new();
    for rule in builtin_rules() {
        standards.insert(
            rule.id.clone(),
            RuleDefaults {
                enabled: rule.enabled_by_default,
                severity: rule.severity,
            },
        );
    }
    standards
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared harness for check unit tests: run one rule against an HTML
    //! fragment through the real scheduler.

    use crate::dom::HtmlDocument;
    use crate::engine::config::RunConfig;
    use crate::engine::context::AuditContext;
    use crate::engine::registry::{RuleDescriptor, RuleRegistry};
    use crate::engine::scheduler;
    use crate::engine::session::AuditSession;
    use crate::engine::StandardsTable;
    use crate::locale::MessageCatalog;
    use crate::report::{AuditReport, RuleAudit};

    pub async fn audit_html(rule: RuleDescriptor, html: &str) -> AuditReport {
        let rule_id = rule.id.clone();
        let mut registry = RuleRegistry::new();
        registry.register(rule).expect("unique rule id");
        let doc = HtmlDocument::parse(html);
        let ctx = AuditContext::document(&doc, "test");
        let mut session = AuditSession::new();
        let report = scheduler::run(
            &registry,
            &RunConfig::new(),
            &StandardsTable::new(),
            &MessageCatalog::english(),
            &ctx,
            &mut session,
        )
        .await
        .expect("audit runs");
        assert!(report.rules.contains_key(&rule_id));
        report
    }

    pub fn rule_audit<'r>(report: &'r AuditReport, id: &str) -> &'r RuleAudit {
        report.rules.get(id).expect("rule present in report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rule_ids_are_unique_and_kebab_case() {
        let rules = builtin_rules();
        let mut seen = std::collections::HashSet::new();
        for rule in &rules {
            assert!(seen.insert(rule.id.clone()), "duplicate id {}", rule.id);
            assert!(
                rule.id
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "id {} is not kebab-case",
                rule.id
            );
        }
    }

    #[test]
    fn builtin_registry_registers_all_rules() {
        let registry = builtin_registry().unwrap();
        assert_eq!(registry.len(), builtin_rules().len());
    }

    #[test]
    fn wcag_rules_map_to_criteria() {
        use crate::model::CategoryType;
        for rule in builtin_rules() {
            let wcag_tagged = rule.categories.iter().any(|c| {
                matches!(
                    c,
                    CategoryType::WcagA | CategoryType::WcagAa | CategoryType::WcagAaa
                )
            });
            if wcag_tagged {
                assert!(
                    !rule.wcag_criteria.is_empty(),
                    "rule {} claims a WCAG level but maps to no criterion",
                    rule.id
                );
            }
        }
    }

    #[test]
    fn builtin_standards_cover_every_builtin_rule() {
        let standards = builtin_standards();
        for rule in builtin_rules() {
            assert!(standards.get(&rule.id).is_some(), "missing {}", rule.id);
        }
    }
}
