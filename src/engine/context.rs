// SPDX-License-Identifier: PMPL-1.0-or-later
//! The context a run is evaluated against: a document (or one subtree of
//! it) plus an exclusion set.

use crate::dom::{DomProvider, Element};
use crate::error::Result;

/// Scope of one audit run.
///
/// `root` narrows static selectors to a subtree; `None` audits the whole
/// document. The exclusion set removes elements equal to or nested inside
/// any excluded container from every rule's candidates, which prevents
/// double-reporting when a caller audits one widget apart from the page it
/// lives in.
pub struct AuditContext<'a> {
    pub dom: &'a dyn DomProvider,
    pub root: Option<Element>,
    pub exclusions: Vec<Element>,
    /// Label surfaced as the report's context metadata.
    pub label: String,
}

impl<'a> AuditContext<'a> {
    /// Audit the whole document.
    pub fn document(dom: &'a dyn DomProvider, label: impl Into<String>) -> Self {
        Self {
            dom,
            root: None,
            exclusions: Vec::new(),
            label: label.into(),
        }
    }

    /// Narrow the audit to the subtree rooted at `root`.
    pub fn with_root(mut self, root: Element) -> Self {
        self.root = Some(root);
        self
    }

    /// Exclude one container and everything inside it.
    pub fn exclude(mut self, container: Element) -> Self {
        self.exclusions.push(container);
        self
    }

    /// Exclude every element the selector matches.
    pub fn exclude_matching(mut self, selector: &str) -> Result<Self> {
        let matched = self.dom.query(None, selector)?;
        self.exclusions.extend(matched);
        Ok(self)
    }

    /// Number of elements in scope before exclusion.
    pub fn element_count(&self) -> usize {
        match self.root {
            Some(root) => self.dom.subtree_element_count(root),
            None => self.dom.element_count(),
        }
    }

    /// Serialized size of the scoped markup, in bytes.
    pub fn html_size(&self) -> usize {
        match self.root {
            Some(root) => self.dom.subtree_html_size(root),
            None => self.dom.html_size(),
        }
    }
}
