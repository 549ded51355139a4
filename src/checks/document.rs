// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document-level checks: language declaration (WCAG 3.1.1), title
//! presence (WCAG 2.4.2), and id uniqueness (WCAG 4.1.1).
//!
//! Title and id uniqueness use dynamic selectors: they are whole-document
//! questions even when the audit is scoped to one widget.

use crate::checks::{Check, CheckContext, CheckOutcome};
use crate::dom::Element;
use crate::engine::context::AuditContext;
use crate::engine::registry::RuleDescriptor;
use crate::engine::selector::Selector;
use crate::model::{CategoryType, IssueDraft, Severity};
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

pub fn html_lang() -> RuleDescriptor {
    RuleDescriptor::new(
        "html-lang",
        Selector::css("html"),
        Severity::High,
        Arc::new(HtmlLang),
    )
    .with_categories([CategoryType::WcagA])
    .with_wcag(["3.1.1"])
    .with_link("https://www.w3.org/WAI/WCAG21/Understanding/language-of-page.html")
    .with_recommendation("Declare the page language, e.g. <html lang=\"en\">")
}

pub fn doc_title() -> RuleDescriptor {
    RuleDescriptor::new(
        "doc-title",
        Selector::dynamic(|cx: &AuditContext<'_>| {
            cx.dom.query(None, "head > title").unwrap_or_default()
        }),
        Severity::High,
        Arc::new(DocTitle),
    )
    .with_categories([CategoryType::WcagA])
    .with_wcag(["2.4.2"])
    .with_link("https://www.w3.org/WAI/WCAG21/Understanding/page-titled.html")
    .with_recommendation("Give the document a descriptive <title>")
}

pub fn duplicate_id() -> RuleDescriptor {
    RuleDescriptor::new(
        "duplicate-id",
        Selector::dynamic(|cx: &AuditContext<'_>| {
            cx.dom.query(None, "[id]").unwrap_or_default()
        }),
        Severity::High,
        Arc::new(DuplicateId),
    )
    .with_categories([CategoryType::WcagA])
    .with_wcag(["4.1.1"])
    .with_link("https://www.w3.org/WAI/WCAG21/Understanding/parsing.html")
    .with_recommendation("Make element ids unique within the document")
}

pub struct HtmlLang;

#[async_trait(?Send)]
impl Check for HtmlLang {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        // BCP 47 primary subtag plus optional subtags.
        let lang_tag = Regex::new(r"^[a-zA-Z]{2,3}(-[a-zA-Z0-9]{1,8})*$").expect("valid regex");
        for &el in elements {
            match cx.dom.attr(el, "lang") {
                None => {
                    let message = cx.messages.instant("html-lang.missing", &[]);
                    cx.report(IssueDraft::new(message).with_node(el));
                }
                Some(lang) if lang.trim().is_empty() => {
                    let message = cx.messages.instant("html-lang.missing", &[]);
                    cx.report(IssueDraft::new(message).with_node(el));
                }
                Some(lang) if !lang_tag.is_match(lang.trim()) => {
                    let message = cx
                        .messages
                        .instant("html-lang.invalid", &[("lang", &lang)]);
                    cx.report(IssueDraft::new(message).with_node(el));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

pub struct DocTitle;

#[async_trait(?Send)]
impl Check for DocTitle {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        match elements.first() {
            None => {
                let message = cx.messages.instant("doc-title.missing", &[]);
                cx.report(IssueDraft::new(message));
            }
            Some(&title) if cx.dom.text(title).trim().is_empty() => {
                let message = cx.messages.instant("doc-title.empty", &[]);
                cx.report(IssueDraft::new(message).with_node(title));
            }
            Some(_) => {}
        }
        Ok(())
    }
}

pub struct DuplicateId;

#[async_trait(?Send)]
impl Check for DuplicateId {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        let mut seen: HashSet<String> = HashSet::new();
        for &el in elements {
            let Some(id) = cx.dom.attr(el, "id") else {
                continue;
            };
            if id.is_empty() {
                continue;
            }
            if !seen.insert(id.clone()) {
                let message = cx
                    .messages
                    .instant("duplicate-id.duplicate", &[("id", &id)]);
                cx.report(
                    IssueDraft::new(message)
                        .with_node(el)
                        .with_data(serde_json::json!({ "id": id })),
                );
            }
        }
        Ok(())
    }
}
