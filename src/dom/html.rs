// SPDX-License-Identifier: PMPL-1.0-or-later
//! Static-HTML DOM provider backed by `scraper`.
//!
//! The document is parsed once; every element receives a stable handle in
//! document order and its data is captured into a handle table. Queries
//! re-use `scraper`'s selector matching against the live tree, so the full
//! CSS subset `scraper` supports is available to rules.

use super::{DomError, DomProvider, Element};
use scraper::{Html, Selector};
use std::collections::HashMap;

struct NodeRecord {
    tag: String,
    attrs: HashMap<String, String>,
    text: String,
    html_len: usize,
    parent: Option<u32>,
    path: String,
    hidden_self: bool,
}

/// A parsed HTML document implementing [`DomProvider`].
pub struct HtmlDocument {
    html: Html,
    nodes: Vec<NodeRecord>,
    html_size: usize,
}

impl HtmlDocument {
    /// Parse a document. `html5ever` recovers from arbitrary input, so this
    /// never fails; a garbage document simply has few elements.
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        let universal = Selector::parse("*").expect("valid selector");

        let mut nodes: Vec<NodeRecord> = Vec::new();
        // Pre-order traversal: a stack of enclosing element handles keyed
        // by depth reconstructs parent links without touching node ids.
        let mut stack: Vec<u32> = Vec::new();
        let mut child_counts: Vec<u32> = Vec::new();

        for el in html.select(&universal) {
            let depth = el
                .ancestors()
                .filter(|n| n.value().is_element())
                .count();
            stack.truncate(depth);
            let parent = stack.last().copied();

            let tag = el.value().name().to_lowercase();
            let attrs: HashMap<String, String> = el
                .value()
                .attrs()
                .map(|(k, v)| (k.to_lowercase(), v.to_string()))
                .collect();

            let ordinal = match parent {
                Some(p) => {
                    child_counts[p as usize] += 1;
                    child_counts[p as usize]
                }
                None => 1,
            };
            let path = render_path_segment(&tag, &attrs, ordinal, parent, &nodes);

            let hidden_self = is_hidden_element(&tag, &attrs);

            let idx = nodes.len() as u32;
            nodes.push(NodeRecord {
                tag,
                attrs,
                text: el.text().collect::<String>(),
                html_len: el.html().len(),
                parent,
                path,
                hidden_self,
            });
            child_counts.push(0);
            stack.push(idx);
        }

        let html_size = html.root_element().html().len();

        Self {
            html,
            nodes,
            html_size,
        }
    }

    fn record(&self, el: Element) -> Option<&NodeRecord> {
        self.nodes.get(el.0 as usize)
    }
}

/// One path segment per element: `tag#id` when an id exists, otherwise
/// `tag:nth-child(n)`, prefixed with the parent's path.
fn render_path_segment(
    tag: &str,
    attrs: &HashMap<String, String>,
    ordinal: u32,
    parent: Option<u32>,
    nodes: &[NodeRecord],
) -> String {
    let segment = match attrs.get("id").filter(|id| !id.is_empty()) {
        Some(id) => format!("{}#{}", tag, id),
        None if parent.is_none() => tag.to_string(),
        None => format!("{}:nth-child({})", tag, ordinal),
    };
    match parent {
        Some(p) => format!("{} > {}", nodes[p as usize].path, segment),
        None => segment,
    }
}

fn is_hidden_element(tag: &str, attrs: &HashMap<String, String>) -> bool {
    if attrs.get("aria-hidden").map(String::as_str) == Some("true") {
        return true;
    }
    if attrs.contains_key("hidden") {
        return true;
    }
    if tag == "input" && attrs.get("type").map(String::as_str) == Some("hidden") {
        return true;
    }
    if let Some(style) = attrs.get("style") {
        let compact: String = style
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if compact.contains("display:none") || compact.contains("visibility:hidden") {
            return true;
        }
    }
    false
}

impl DomProvider for HtmlDocument {
    fn query(&self, scope: Option<Element>, selector: &str) -> Result<Vec<Element>, DomError> {
        let sel = Selector::parse(selector).map_err(|e| DomError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        let universal = Selector::parse("*").expect("valid selector");

        // The construction traversal and this one are both pre-order over
        // the same tree, so the enumeration index is the element handle.
        let mut matches = Vec::new();
        for (idx, el) in self.html.select(&universal).enumerate() {
            if !sel.matches(&el) {
                continue;
            }
            let handle = Element(idx as u32);
            if let Some(root) = scope {
                if handle != root && !self.contains(root, handle) {
                    continue;
                }
            }
            matches.push(handle);
        }
        Ok(matches)
    }

    fn tag_name(&self, el: Element) -> Option<String> {
        self.record(el).map(|r| r.tag.clone())
    }

    fn attr(&self, el: Element, name: &str) -> Option<String> {
        self.record(el)?.attrs.get(&name.to_lowercase()).cloned()
    }

    fn text(&self, el: Element) -> String {
        self.record(el).map(|r| r.text.clone()).unwrap_or_default()
    }

    fn parent(&self, el: Element) -> Option<Element> {
        self.record(el)?.parent.map(Element)
    }

    fn element_path(&self, el: Element) -> String {
        self.record(el).map(|r| r.path.clone()).unwrap_or_default()
    }

    fn hidden_from_assistive_tech(&self, el: Element) -> bool {
        let mut cur = Some(el);
        while let Some(e) = cur {
            match self.record(e) {
                Some(r) if r.hidden_self => return true,
                Some(_) => cur = self.parent(e),
                None => return false,
            }
        }
        false
    }

    fn element_count(&self) -> usize {
        self.nodes.len()
    }

    fn subtree_element_count(&self, scope: Element) -> usize {
        if self.record(scope).is_none() {
            return 0;
        }
        1 + (0..self.nodes.len() as u32)
            .filter(|&i| self.contains(scope, Element(i)))
            .count()
    }

    fn html_size(&self) -> usize {
        self.html_size
    }

    fn subtree_html_size(&self, scope: Element) -> usize {
        self.record(scope).map(|r| r.html_len).unwrap_or(0)
    }

    fn page_title(&self) -> Option<String> {
        self.nodes
            .iter()
            .find(|r| r.tag == "title")
            .map(|r| r.text.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        <html lang="en">
        <head><title>Fixture</title></head>
        <body>
            <div id="main">
                <img src="a.png">
                <p>Hello <span>world</span></p>
            </div>
            <div id="aside">
                <img src="b.png" alt="b">
            </div>
        </body>
        </html>
    "#;

    #[test]
    fn query_returns_document_order() {
        let doc = HtmlDocument::parse(DOC);
        let imgs = doc.query(None, "img").unwrap();
        assert_eq!(imgs.len(), 2);
        assert!(doc.element_path(imgs[0]).contains("div#main"));
        assert!(doc.element_path(imgs[1]).contains("div#aside"));
    }

    #[test]
    fn query_scoped_to_subtree() {
        let doc = HtmlDocument::parse(DOC);
        let main = doc.query(None, "#main").unwrap()[0];
        let imgs = doc.query(Some(main), "img").unwrap();
        assert_eq!(imgs.len(), 1);
        assert_eq!(doc.attr(imgs[0], "src").as_deref(), Some("a.png"));
    }

    #[test]
    fn containment_follows_parent_chain() {
        let doc = HtmlDocument::parse(DOC);
        let main = doc.query(None, "#main").unwrap()[0];
        let span = doc.query(None, "span").unwrap()[0];
        let aside = doc.query(None, "#aside").unwrap()[0];
        assert!(doc.contains(main, span));
        assert!(!doc.contains(aside, span));
        assert!(!doc.contains(span, main));
    }

    #[test]
    fn text_concatenates_descendants() {
        let doc = HtmlDocument::parse(DOC);
        let p = doc.query(None, "p").unwrap()[0];
        assert_eq!(doc.text(p).trim(), "Hello world");
    }

    #[test]
    fn hidden_propagates_from_ancestors() {
        let doc = HtmlDocument::parse(
            r#"<html><body><div aria-hidden="true"><a href="/x">link</a></div></body></html>"#,
        );
        let link = doc.query(None, "a").unwrap()[0];
        assert!(doc.hidden_from_assistive_tech(link));
    }

    #[test]
    fn page_title_trimmed() {
        let doc = HtmlDocument::parse(DOC);
        assert_eq!(doc.page_title().as_deref(), Some("Fixture"));
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let doc = HtmlDocument::parse(DOC);
        assert!(doc.query(None, "p..[").is_err());
    }

    #[test]
    fn stale_handle_is_harmless() {
        let doc = HtmlDocument::parse(DOC);
        let bogus = Element(9999);
        assert_eq!(doc.tag_name(bogus), None);
        assert_eq!(doc.text(bogus), "");
        assert!(!doc.hidden_from_assistive_tech(bogus));
    }
}
