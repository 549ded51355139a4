// SPDX-License-Identifier: PMPL-1.0-or-later
//! ARIA role validity - WCAG 4.1.2 Name, Role, Value (Level A).
//!
//! An unknown role is worse than no role: assistive technology falls back
//! to the implicit role silently, so the author's intent is lost.

use crate::checks::{Check, CheckContext, CheckOutcome};
use crate::dom::Element;
use crate::engine::registry::RuleDescriptor;
use crate::engine::selector::Selector;
use crate::model::{CategoryType, IssueDraft, Severity};
use async_trait::async_trait;
use std::sync::Arc;

/// Roles defined by WAI-ARIA 1.2, including abstract-free widget, document
/// structure, landmark, and live region roles.
const VALID_ROLES: &[&str] = &[
    "alert",
    "alertdialog",
    "application",
    "article",
    "banner",
    "blockquote",
    "button",
    "caption",
    "cell",
    "checkbox",
    "code",
    "columnheader",
    "combobox",
    "complementary",
    "contentinfo",
    "definition",
    "deletion",
    "dialog",
    "directory",
    "document",
    "emphasis",
    "feed",
    "figure",
    "form",
    "generic",
    "grid",
    "gridcell",
    "group",
    "heading",
    "img",
    "insertion",
    "link",
    "list",
    "listbox",
    "listitem",
    "log",
    "main",
    "marquee",
    "math",
    "menu",
    "menubar",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "meter",
    "navigation",
    "none",
    "note",
    "option",
    "paragraph",
    "presentation",
    "progressbar",
    "radio",
    "radiogroup",
    "region",
    "row",
    "rowgroup",
    "rowheader",
    "scrollbar",
    "search",
    "searchbox",
    "separator",
    "slider",
    "spinbutton",
    "status",
    "strong",
    "subscript",
    "superscript",
    "switch",
    "tab",
    "table",
    "tablist",
    "tabpanel",
    "term",
    "textbox",
    "time",
    "timer",
    "toolbar",
    "tooltip",
    "tree",
    "treegrid",
    "treeitem",
];

pub fn aria_role() -> RuleDescriptor {
    RuleDescriptor::new(
        "aria-role",
        Selector::css("[role]"),
        Severity::High,
        Arc::new(AriaRole),
    )
    .with_categories([CategoryType::WcagA])
    .with_wcag(["4.1.2"])
    .with_link("https://www.w3.org/TR/wai-aria-1.2/#role_definitions")
    .with_recommendation("Use a role defined by WAI-ARIA, or remove the attribute")
}

pub struct AriaRole;

#[async_trait(?Send)]
impl Check for AriaRole {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        for &el in elements {
            let Some(role) = cx.dom.attr(el, "role") else {
                continue;
            };
            // Role lists fall back left to right; the first token decides.
            let Some(first) = role.split_whitespace().next() else {
                continue;
            };
            let normalized = first.to_lowercase();
            if !VALID_ROLES.contains(&normalized.as_str()) {
                let message = cx.messages.instant("aria-role.invalid", &[("role", first)]);
                cx.report(IssueDraft::new(message).with_node(el));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::{audit_html, rule_audit};

    #[tokio::test]
    async fn known_roles_pass() {
        let report = audit_html(
            aria_role(),
            r#"<html><body>
                <nav role="navigation"></nav>
                <div role="button presentation"></div>
            </body></html>"#,
        )
        .await;
        assert!(rule_audit(&report, "aria-role").results.is_empty());
    }

    #[tokio::test]
    async fn unknown_role_is_reported() {
        let report = audit_html(
            aria_role(),
            r#"<html><body><div role="navigaton"></div></body></html>"#,
        )
        .await;
        let audit = rule_audit(&report, "aria-role");
        assert_eq!(audit.results.len(), 1);
        assert!(audit.results[0].message.contains("navigaton"));
    }

    #[tokio::test]
    async fn empty_role_is_ignored() {
        let report = audit_html(
            aria_role(),
            r#"<html><body><div role=" "></div></body></html>"#,
        )
        .await;
        assert!(rule_audit(&report, "aria-role").results.is_empty());
    }
}
