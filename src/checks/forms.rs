// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form labelling - WCAG 1.3.1 Info and Relationships / 3.3.2 Labels or
//! Instructions (Level A).
//!
//! A form control is considered labelled when any of these hold: a
//! non-empty aria-label or aria-labelledby, a title attribute, a `label`
//! whose `for` references the control's id, or a `label` ancestor wrapping
//! the control.

use crate::checks::{Check, CheckContext, CheckOutcome};
use crate::dom::Element;
use crate::engine::registry::RuleDescriptor;
use crate::engine::selector::Selector;
use crate::model::{CategoryType, IssueDraft, Severity};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Input types that carry an intrinsic label or are not user-facing.
const SELF_LABELLED_TYPES: &[&str] = &["hidden", "submit", "reset", "button", "image"];

pub fn form_label() -> RuleDescriptor {
    RuleDescriptor::new(
        "form-label",
        Selector::css("input, select, textarea"),
        Severity::Critical,
        Arc::new(FormLabel),
    )
    .with_categories([CategoryType::WcagA])
    .with_wcag(["1.3.1", "3.3.2"])
    .with_link("https://www.w3.org/WAI/WCAG21/Understanding/labels-or-instructions.html")
    .with_recommendation("Associate every form control with a label element or aria-label")
}

pub struct FormLabel;

#[async_trait(?Send)]
impl Check for FormLabel {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        // Ids referenced by label[for] anywhere in the document.
        let labelled_ids: HashSet<String> = cx
            .dom
            .query(None, "label[for]")
            .unwrap_or_default()
            .into_iter()
            .filter_map(|l| cx.dom.attr(l, "for"))
            .filter(|id| !id.is_empty())
            .collect();

        for &el in elements {
            if cx.dom.hidden_from_assistive_tech(el) {
                continue;
            }
            let tag = cx.dom.tag_name(el).unwrap_or_default();
            let control_type = cx
                .dom
                .attr(el, "type")
                .unwrap_or_default()
                .to_lowercase();
            if tag == "input" && SELF_LABELLED_TYPES.contains(&control_type.as_str()) {
                continue;
            }

            if has_accessible_name(cx, el, &labelled_ids) {
                continue;
            }

            let control = if control_type.is_empty() {
                tag.clone()
            } else {
                format!("{}[type={}]", tag, control_type)
            };
            let message = cx
                .messages
                .instant("form-label.unlabeled", &[("control", &control)]);
            cx.report(IssueDraft::new(message).with_node(el));
        }
        Ok(())
    }
}

fn has_accessible_name(
    cx: &CheckContext<'_>,
    el: Element,
    labelled_ids: &HashSet<String>,
) -> bool {
    for attr in ["aria-label", "aria-labelledby", "title"] {
        if cx
            .dom
            .attr(el, attr)
            .is_some_and(|v| !v.trim().is_empty())
        {
            return true;
        }
    }
    if let Some(id) = cx.dom.attr(el, "id") {
        if labelled_ids.contains(&id) {
            return true;
        }
    }
    // Wrapped in a label element.
    let mut cur = cx.dom.parent(el);
    while let Some(p) = cur {
        if cx.dom.tag_name(p).as_deref() == Some("label") {
            return true;
        }
        cur = cx.dom.parent(p);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::{audit_html, rule_audit};

    #[tokio::test]
    async fn labelled_controls_pass() {
        let report = audit_html(
            form_label(),
            r#"<html><body>
                <label for="name">Name</label><input id="name" type="text">
                <label>Email <input type="email"></label>
                <input type="search" aria-label="Search the site">
                <input type="submit" value="Go">
            </body></html>"#,
        )
        .await;
        let audit = rule_audit(&report, "form-label");
        assert!(audit.status.is_passed());
        assert!(audit.results.is_empty());
    }

    #[tokio::test]
    async fn unlabelled_controls_are_reported() {
        let report = audit_html(
            form_label(),
            r#"<html><body>
                <input type="text">
                <select><option>a</option></select>
                <textarea></textarea>
            </body></html>"#,
        )
        .await;
        let audit = rule_audit(&report, "form-label");
        assert_eq!(audit.results.len(), 3);
        assert!(audit.results[0].message.contains("input[type=text]"));
    }

    #[tokio::test]
    async fn hidden_inputs_are_ignored() {
        let report = audit_html(
            form_label(),
            r#"<html><body><input type="hidden" name="csrf"></body></html>"#,
        )
        .await;
        assert!(rule_audit(&report, "form-label").results.is_empty());
    }
}
