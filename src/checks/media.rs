// SPDX-License-Identifier: PMPL-1.0-or-later
//! Media alternatives - WCAG 1.2.2 Captions (Prerecorded) (Level A).

use crate::checks::{Check, CheckContext, CheckOutcome};
use crate::dom::Element;
use crate::engine::registry::RuleDescriptor;
use crate::engine::selector::Selector;
use crate::model::{CategoryType, IssueDraft, Severity};
use async_trait::async_trait;
use std::sync::Arc;

pub fn media_captions() -> RuleDescriptor {
    RuleDescriptor::new(
        "media-captions",
        Selector::css("video"),
        Severity::High,
        Arc::new(MediaCaptions),
    )
    .with_categories([CategoryType::WcagA])
    .with_wcag(["1.2.2"])
    .with_link("https://www.w3.org/WAI/WCAG21/Understanding/captions-prerecorded.html")
    .with_recommendation("Add a <track kind=\"captions\"> to every video element")
}

pub struct MediaCaptions;

#[async_trait(?Send)]
impl Check for MediaCaptions {
    async fn validate(&self, elements: &[Element], cx: &mut CheckContext<'_>) -> CheckOutcome {
        for &el in elements {
            if cx.dom.hidden_from_assistive_tech(el) {
                continue;
            }
            let has_captions = cx
                .dom
                .query(Some(el), "track")
                .unwrap_or_default()
                .into_iter()
                .any(|track| {
                    matches!(
                        cx.dom
                            .attr(track, "kind")
                            .unwrap_or_default()
                            .to_lowercase()
                            .as_str(),
                        "captions" | "subtitles"
                    )
                });
            if !has_captions {
                let message = cx.messages.instant("media-captions.missing", &[]);
                cx.report(IssueDraft::new(message).with_node(el));
            }
        }
        Ok(())
    }
}
