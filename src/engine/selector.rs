// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule selectors and their resolution against a context.

use super::context::AuditContext;
use crate::dom::{DomError, Element};
use std::fmt;
use std::sync::Arc;

/// How a rule names its candidate elements.
///
/// `Css` is queried once against the context root. `Dynamic` is invoked
/// instead when a rule needs a pre-filtered or document-wide set rather
/// than "all matches under this subtree" -- document title and heading
/// structure are whole-document questions even when the audit is scoped to
/// a widget.
#[derive(Clone)]
pub enum Selector {
    Css(String),
    Dynamic(Arc<dyn Fn(&AuditContext<'_>) -> Vec<Element>>),
}

impl Selector {
    pub fn css(selector: impl Into<String>) -> Self {
        Selector::Css(selector.into())
    }

    pub fn dynamic(f: impl Fn(&AuditContext<'_>) -> Vec<Element> + 'static) -> Self {
        Selector::Dynamic(Arc::new(f))
    }

    /// Resolve to candidate elements, then drop everything the context
    /// excludes. The exclusion filter applies to both variants.
    pub fn resolve(&self, context: &AuditContext<'_>) -> Result<Vec<Element>, DomError> {
        let candidates = match self {
            Selector::Css(css) => context.dom.query(context.root, css)?,
            Selector::Dynamic(f) => f(context),
        };
        Ok(apply_exclusions(context, candidates))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(css) => f.debug_tuple("Css").field(css).finish(),
            Selector::Dynamic(_) => f.debug_tuple("Dynamic").field(&"<fn>").finish(),
        }
    }
}

/// Remove candidates equal to, or nested inside, any excluded container.
fn apply_exclusions(context: &AuditContext<'_>, candidates: Vec<Element>) -> Vec<Element> {
    if context.exclusions.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|el| {
            !context
                .exclusions
                .iter()
                .any(|x| x == el || context.dom.contains(*x, *el))
        })
        .collect()
}
