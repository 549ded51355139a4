// SPDX-License-Identifier: PMPL-1.0-or-later
//! Style-dependent checks.
//!
//! - **color-contrast** (WCAG 1.4.3): text must reach a 4.5:1 contrast
//!   ratio against its background. Needs computed styles; on providers
//!   that cannot compute them the check skips itself with a
//!   machine-readable reason instead of guessing.
//! - **meta-viewport** (WCAG 1.4.4): the viewport meta tag must not
//!   disable or cap user zoom.

use crate::checks::{Check, CheckContext, CheckError, CheckOutcome};
use crate::dom::Element;
use crate::engine::registry::RuleDescriptor;
use crate::engine::selector::Selector;
use crate::model::{CategoryType, IssueDraft, Severity, SkipReason};
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;

/// Minimum contrast ratio for normal text at WCAG AA.
const MIN_CONTRAST_RATIO: f64 = 4.5;

pub fn color_contrast() -> RuleDescriptor {
    RuleDescriptor::new(
        "color-contrast",
        Selector::css("p, span, a, li, td, th, h1, h2, h3, h4, h5, h6, label, button"),
        Severity::High,
        Arc::new(ColorContrast),
    )
    .with_categories([CategoryType::WcagAa])
    .with_wcag(["1.4.3"])
    .with_link("https://www.w3.org/WAI/WCAG21/Understanding/contrast-minimum.html")
    .with_recommendation("Darken the text or lighten the background until the ratio reaches 4.5:1")
}

pub fn meta_viewport() -> RuleDescriptor {
    RuleDescriptor::new(
        "meta-viewport",
        Selector::css("meta[name='viewport']"),
        Severity::High,
        Arc::new(MetaViewport),
    )
    .with_categories([CategoryType::WcagAa])
    .with_wcag(["1.4.4"])
    .with_link("https://www.w3.org/WAI/WCAG21/Understanding/resize-text.html")
    .with_recommendation("Remove user-scalable=no and maximum-scale restrictions")
}

pub struct ColorContrast;

#[async_trait(?Send)]
impl Check for ColorContrast {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        if !cx.dom.can_compute_styles() {
            return Err(CheckError::skip(SkipReason::MissingCapability(
                "computed styles".to_string(),
            )));
        }
        for &el in elements {
            if cx.dom.hidden_from_assistive_tech(el) || cx.dom.text(el).trim().is_empty() {
                continue;
            }
            let fg = cx.dom.computed_style(el, "color").and_then(|v| parse_color(&v));
            let bg = cx
                .dom
                .computed_style(el, "background-color")
                .and_then(|v| parse_color(&v));
            let (Some(fg), Some(bg)) = (fg, bg) else {
                continue;
            };
            let ratio = contrast_ratio(fg, bg);
            if ratio < MIN_CONTRAST_RATIO {
                let message = cx.messages.instant(
                    "color-contrast.low",
                    &[
                        ("ratio", &format!("{:.2}", ratio)),
                        ("required", &format!("{}", MIN_CONTRAST_RATIO)),
                    ],
                );
                cx.report(
                    IssueDraft::new(message)
                        .with_node(el)
                        .with_data(serde_json::json!({ "ratio": ratio })),
                );
            }
        }
        Ok(())
    }
}

pub struct MetaViewport;

#[async_trait(?Send)]
impl Check for MetaViewport {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        for &el in elements {
            let Some(content) = cx.dom.attr(el, "content") else {
                continue;
            };
            for directive in content.split(',') {
                let mut parts = directive.splitn(2, '=');
                let key = parts.next().unwrap_or("").trim().to_lowercase();
                let value = parts.next().unwrap_or("").trim().to_lowercase();
                if key == "user-scalable" && (value == "no" || value == "0") {
                    let message = cx.messages.instant("meta-viewport.user-scalable", &[]);
                    cx.report(IssueDraft::new(message).with_node(el));
                } else if key == "maximum-scale" {
                    if let Ok(scale) = value.parse::<f64>() {
                        if scale < 2.0 {
                            let message = cx
                                .messages
                                .instant("meta-viewport.maximum-scale", &[("value", &value)]);
                            cx.report(IssueDraft::new(message).with_node(el));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Parse a CSS color: #rgb, #rrggbb, rgb()/rgba(), or a basic named color.
pub fn parse_color(value: &str) -> Option<(u8, u8, u8)> {
    let trimmed = value.trim().to_lowercase();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex_color(hex);
    }
    if trimmed.starts_with("rgb") {
        return parse_rgb_color(&trimmed);
    }
    parse_named_color(&trimmed)
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

fn parse_rgb_color(value: &str) -> Option<(u8, u8, u8)> {
    let re = Regex::new(r"rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)").ok()?;
    let caps = re.captures(value)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    Some((r, g, b))
}

fn parse_named_color(name: &str) -> Option<(u8, u8, u8)> {
    match name {
        "white" => Some((255, 255, 255)),
        "black" => Some((0, 0, 0)),
        "red" => Some((255, 0, 0)),
        "green" => Some((0, 128, 0)),
        "blue" => Some((0, 0, 255)),
        "yellow" => Some((255, 255, 0)),
        "gray" | "grey" => Some((128, 128, 128)),
        "silver" => Some((192, 192, 192)),
        "orange" => Some((255, 165, 0)),
        "purple" => Some((128, 0, 128)),
        "navy" => Some((0, 0, 128)),
        _ => None,
    }
}

/// Relative luminance per WCAG 2.x.
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let srgb = [r, g, b].map(|c| {
        let v = c as f64 / 255.0;
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * srgb[0] + 0.7152 * srgb[1] + 0.0722 * srgb[2]
}

/// Contrast ratio between two colors; always >= 1.0.
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}
