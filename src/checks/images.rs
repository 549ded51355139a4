// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alternative text checks - WCAG 1.1.1 Non-text Content (Level A).
//!
//! `img-alt` requires every image to carry an alt attribute (empty alt is
//! valid for decorative images). `img-alt-generic` flags alt text that is
//! present but useless: generic words like "image", or a bare filename.

use crate::checks::{Check, CheckContext, CheckOutcome};
use crate::dom::Element;
use crate::engine::registry::RuleDescriptor;
use crate::engine::selector::Selector;
use crate::model::{CategoryType, IssueDraft, Severity};
use async_trait::async_trait;
use std::sync::Arc;

/// Alt text values that indicate lazy/unhelpful descriptions.
const GENERIC_ALT_VALUES: &[&str] = &[
    "image",
    "photo",
    "picture",
    "icon",
    "graphic",
    "img",
    "banner",
    "logo",
    "untitled",
    "screenshot",
    "thumbnail",
    "placeholder",
];

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp"];

pub fn img_alt() -> RuleDescriptor {
    RuleDescriptor::new(
        "img-alt",
        Selector::css("img"),
        Severity::Critical,
        Arc::new(ImgAlt),
    )
    .with_categories([CategoryType::WcagA])
    .with_wcag(["1.1.1"])
    .with_link("https://www.w3.org/WAI/WCAG21/Understanding/non-text-content.html")
    .with_recommendation(
        "Add alt=\"description\" for informative images or alt=\"\" for decorative images",
    )
}

pub fn img_alt_generic() -> RuleDescriptor {
    RuleDescriptor::new(
        "img-alt-generic",
        Selector::css("img[alt]"),
        Severity::Low,
        Arc::new(ImgAltGeneric),
    )
    .with_categories([CategoryType::BestPractice])
    .with_recommendation("Replace with a meaningful description of the image content")
}

pub struct ImgAlt;

#[async_trait(?Send)]
impl Check for ImgAlt {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        for &el in elements {
            if cx.dom.hidden_from_assistive_tech(el) {
                continue;
            }
            if cx.dom.attr(el, "alt").is_none() {
                let message = cx.messages.instant("img-alt.missing", &[]);
                cx.report(IssueDraft::new(message).with_node(el));
            }
        }
        Ok(())
    }
}

pub struct ImgAltGeneric;

#[async_trait(?Send)]
impl Check for ImgAltGeneric {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        for &el in elements {
            if cx.dom.hidden_from_assistive_tech(el) {
                continue;
            }
            let Some(alt) = cx.dom.attr(el, "alt") else {
                continue;
            };
            let normalized = alt.trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }
            if GENERIC_ALT_VALUES.contains(&normalized.as_str()) {
                let message = cx
                    .messages
                    .instant("img-alt-generic.generic", &[("alt", &alt)]);
                cx.report(IssueDraft::new(message).with_node(el));
            } else if IMAGE_EXTENSIONS.iter().any(|ext| normalized.ends_with(ext)) {
                let message = cx
                    .messages
                    .instant("img-alt-generic.filename", &[("alt", &alt)]);
                cx.report(IssueDraft::new(message).with_node(el));
            }
        }
        Ok(())
    }
}
