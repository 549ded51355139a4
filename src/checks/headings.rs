// SPDX-License-Identifier: PMPL-1.0-or-later
//! Heading structure. Skipped heading levels break the document outline
//! screen reader users navigate by. Best practice rather than a normative
//! WCAG failure.

use crate::checks::{Check, CheckContext, CheckOutcome};
use crate::dom::Element;
use crate::engine::context::AuditContext;
use crate::engine::registry::RuleDescriptor;
use crate::engine::selector::Selector;
use crate::model::{CategoryType, IssueDraft, Severity};
use async_trait::async_trait;
use std::sync::Arc;

pub fn heading_order() -> RuleDescriptor {
    RuleDescriptor::new(
        "heading-order",
        // Heading structure is a whole-document question, even when the
        // audit is scoped to one widget.
        Selector::dynamic(|cx: &AuditContext<'_>| {
            cx.dom
                .query(None, "h1, h2, h3, h4, h5, h6")
                .unwrap_or_default()
        }),
        Severity::Low,
        Arc::new(HeadingOrder),
    )
    .with_categories([CategoryType::BestPractice])
    .with_recommendation("Increase heading levels one step at a time")
}

pub struct HeadingOrder;

#[async_trait(?Send)]
impl Check for HeadingOrder {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        let mut previous: Option<u32> = None;
        for &el in elements {
            if cx.dom.hidden_from_assistive_tech(el) {
                continue;
            }
            let Some(level) = heading_level(cx, el) else {
                continue;
            };
            if let Some(prev) = previous {
                if level > prev + 1 {
                    let message = cx.messages.instant(
                        "heading-order.skipped-level",
                        &[("from", &prev.to_string()), ("to", &level.to_string())],
                    );
                    cx.report(IssueDraft::new(message).with_node(el));
                }
            }
            previous = Some(level);
        }
        Ok(())
    }
}

fn heading_level(cx: &CheckContext<'_>, el: Element) -> Option<u32> {
    let tag = cx.dom.tag_name(el)?;
    tag.strip_prefix('h')?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::{audit_html, rule_audit};

    #[tokio::test]
    async fn sequential_headings_pass() {
        let report = audit_html(
            heading_order(),
            r#"<html><body><h1>A</h1><h2>B</h2><h3>C</h3><h2>D</h2></body></html>"#,
        )
        .await;
        assert!(rule_audit(&report, "heading-order").results.is_empty());
    }

    #[tokio::test]
    async fn skipped_level_is_reported() {
        let report = audit_html(
            heading_order(),
            r#"<html><body><h1>A</h1><h4>B</h4></body></html>"#,
        )
        .await;
        let audit = rule_audit(&report, "heading-order");
        assert_eq!(audit.results.len(), 1);
        assert!(audit.results[0].message.contains("h1"));
        assert!(audit.results[0].message.contains("h4"));
    }

    #[tokio::test]
    async fn no_headings_is_a_vacuous_pass() {
        let report = audit_html(heading_order(), "<html><body><p>x</p></body></html>").await;
        let audit = rule_audit(&report, "heading-order");
        assert!(audit.status.is_passed());
        assert_eq!(audit.total_elements_evaluated, 0);
    }
}
