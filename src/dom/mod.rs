// SPDX-License-Identifier: PMPL-1.0-or-later
//! The DOM provider seam.
//!
//! The engine never inspects documents itself; it talks to a [`DomProvider`]
//! through opaque [`Element`] handles. Selector matching, text extraction,
//! and visibility predicates are the provider's business. The bundled
//! [`HtmlDocument`] provider covers static HTML via `scraper`; a live-DOM
//! provider can implement the same trait.

mod html;

pub use html::HtmlDocument;

use thiserror::Error;

/// Opaque handle to one element of a provider's document. Only meaningful
/// to the provider that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element(pub(crate) u32);

#[derive(Error, Debug)]
pub enum DomError {
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Document access as the engine consumes it.
///
/// `query` resolves a CSS selector to elements in document order, optionally
/// scoped to the subtree of one element (the scope element itself is a
/// candidate). Everything else is per-element data access.
pub trait DomProvider {
    /// Resolve a CSS selector, in document order.
    fn query(&self, scope: Option<Element>, selector: &str) -> Result<Vec<Element>, DomError>;

    /// Lowercase tag name, or `None` for a stale handle.
    fn tag_name(&self, el: Element) -> Option<String>;

    /// Attribute value, `None` when absent.
    fn attr(&self, el: Element, name: &str) -> Option<String>;

    /// Concatenated descendant text.
    fn text(&self, el: Element) -> String;

    /// Parent element, `None` at the document root.
    fn parent(&self, el: Element) -> Option<Element>;

    /// Whether `node` is a strict descendant of `ancestor`.
    fn contains(&self, ancestor: Element, node: Element) -> bool {
        let mut cur = self.parent(node);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Stable, human-readable path for an element, used as the opaque
    /// `node_ref` in reports.
    fn element_path(&self, el: Element) -> String;

    /// Whether assistive technology would skip this element
    /// (aria-hidden, hidden attribute, display:none et al.).
    fn hidden_from_assistive_tech(&self, el: Element) -> bool;

    /// Whether the provider can answer computed-style questions. Static
    /// documents cannot; checks that need styles skip themselves.
    fn can_compute_styles(&self) -> bool {
        false
    }

    /// Computed value of a CSS property, when the provider can compute
    /// styles. Providers that answer `false` above return `None`.
    fn computed_style(&self, _el: Element, _property: &str) -> Option<String> {
        None
    }

    /// Number of elements in the whole document.
    fn element_count(&self) -> usize;

    /// Number of elements in the subtree rooted at `scope` (inclusive).
    fn subtree_element_count(&self, scope: Element) -> usize;

    /// Serialized length of the whole document, in bytes.
    fn html_size(&self) -> usize;

    /// Serialized length of the subtree rooted at `scope`, in bytes.
    fn subtree_html_size(&self, scope: Element) -> usize;

    /// Document title, when the document declares one.
    fn page_title(&self) -> Option<String>;
}
