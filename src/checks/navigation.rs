// SPDX-License-Identifier: PMPL-1.0-or-later
//! Link and focus-order checks.
//!
//! - **link-name** (WCAG 2.4.4): every link needs an accessible name
//! - **button-name** (WCAG 4.1.2): every button needs an accessible name
//! - **tabindex-positive**: positive tabindex overrides the natural focus
//!   order and almost always harms keyboard navigation

use crate::checks::{Check, CheckContext, CheckOutcome};
use crate::dom::Element;
use crate::engine::registry::RuleDescriptor;
use crate::engine::selector::Selector;
use crate::model::{CategoryType, IssueDraft, Severity};
use async_trait::async_trait;
use std::sync::Arc;

pub fn link_name() -> RuleDescriptor {
    RuleDescriptor::new(
        "link-name",
        Selector::css("a[href]"),
        Severity::Critical,
        Arc::new(LinkName),
    )
    .with_categories([CategoryType::WcagA])
    .with_wcag(["2.4.4"])
    .with_link("https://www.w3.org/WAI/WCAG21/Understanding/link-purpose-in-context.html")
    .with_recommendation("Give every link text content, an aria-label, or a labelled image")
}

pub fn button_name() -> RuleDescriptor {
    RuleDescriptor::new(
        "button-name",
        Selector::css("button, input[type='button'], input[type='submit'], input[type='reset']"),
        Severity::Critical,
        Arc::new(ButtonName),
    )
    .with_categories([CategoryType::WcagA])
    .with_wcag(["4.1.2"])
    .with_link("https://www.w3.org/WAI/WCAG21/Understanding/name-role-value.html")
    .with_recommendation("Give every button text content, a value, or an aria-label")
}

pub fn tabindex_positive() -> RuleDescriptor {
    RuleDescriptor::new(
        "tabindex-positive",
        Selector::css("[tabindex]"),
        Severity::Low,
        Arc::new(TabindexPositive),
    )
    .with_categories([CategoryType::BestPractice])
    .with_wcag(["2.4.3"])
    .with_recommendation("Use tabindex=\"0\" or restructure the document instead")
}

fn named_by_attr(cx: &CheckContext<'_>, el: Element) -> bool {
    ["aria-label", "aria-labelledby", "title"].iter().any(|a| {
        cx.dom
            .attr(el, a)
            .is_some_and(|v| !v.trim().is_empty())
    })
}

pub struct LinkName;

#[async_trait(?Send)]
impl Check for LinkName {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        for &el in elements {
            if cx.dom.hidden_from_assistive_tech(el) {
                continue;
            }
            if !cx.dom.text(el).trim().is_empty() || named_by_attr(cx, el) {
                continue;
            }
            // A labelled image inside the link names it too.
            let labelled_img = cx
                .dom
                .query(Some(el), "img[alt]")
                .unwrap_or_default()
                .into_iter()
                .any(|img| {
                    img != el
                        && cx
                            .dom
                            .attr(img, "alt")
                            .is_some_and(|alt| !alt.trim().is_empty())
                });
            if labelled_img {
                continue;
            }
            let message = cx.messages.instant("link-name.empty", &[]);
            cx.report(IssueDraft::new(message).with_node(el));
        }
        Ok(())
    }
}

pub struct ButtonName;

#[async_trait(?Send)]
impl Check for ButtonName {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        for &el in elements {
            if cx.dom.hidden_from_assistive_tech(el) {
                continue;
            }
            let named = match cx.dom.tag_name(el).as_deref() {
                Some("input") => {
                    cx.dom
                        .attr(el, "value")
                        .is_some_and(|v| !v.trim().is_empty())
                        || named_by_attr(cx, el)
                }
                _ => !cx.dom.text(el).trim().is_empty() || named_by_attr(cx, el),
            };
            if !named {
                let message = cx.messages.instant("button-name.empty", &[]);
                cx.report(IssueDraft::new(message).with_node(el));
            }
        }
        Ok(())
    }
}

pub struct TabindexPositive;

#[async_trait(?Send)]
impl Check for TabindexPositive {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        for &el in elements {
            let Some(value) = cx.dom.attr(el, "tabindex") else {
                continue;
            };
            if let Ok(index) = value.trim().parse::<i64>() {
                if index > 0 {
                    let message = cx
                        .messages
                        .instant("tabindex.positive", &[("value", value.trim())]);
                    cx.report(IssueDraft::new(message).with_node(el));
                }
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
    async fn named_links_pass() {
        let report = audit_html(
            link_name(),
            r#"<html><body>
                <a href="/a">Read more</a>
                <a href="/b" aria-label="Home"></a>
                <a href="/c"><img src="x.png" alt="Site map"></a>
            </body></html>"#,
        )
        .await;
        assert!(rule_audit(&report, "link-name").results.is_empty());
    }

    #[tokio::test]
    async fn empty_links_are_reported() {
        let report = audit_html(
            link_name(),
            r#"<html><body>
                <a href="/a"></a>
                <a href="/b"><img src="x.png" alt=""></a>
            </body></html>"#,
        )
        .await;
        assert_eq!(rule_audit(&report, "link-name").results.len(), 2);
    }

    #[tokio::test]
    async fn buttons_need_text_or_value() {
        let report = audit_html(
            button_name(),
            r#"<html><body>
                <button>Save</button>
                <button></button>
                <input type="submit" value="Send">
                <input type="button">
            </body></html>"#,
        )
        .await;
        assert_eq!(rule_audit(&report, "button-name").results.len(), 2);
    }

    #[tokio::test]
    async fn positive_tabindex_is_flagged_zero_is_not() {
        let report = audit_html(
            tabindex_positive(),
            r#"<html><body>
                <div tabindex="0"></div>
                <div tabindex="-1"></div>
                <div tabindex="3"></div>
            </body></html>"#,
        )
        .await;
        let audit = rule_audit(&report, "tabindex-positive");
        assert_eq!(audit.results.len(), 1);
        assert!(audit.results[0].message.contains('3'));
    }
}
