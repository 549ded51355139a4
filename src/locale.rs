// SPDX-License-Identifier: PMPL-1.0-or-later
//! Message formatting for issue text.
//!
//! Rules never format prose themselves; they ask the catalog for a template
//! by key and pass interpolation arguments. Every interpolated value is
//! HTML-escaped before substitution, so reported messages are safe to embed
//! in HTML reports as-is.

use std::collections::HashMap;

/// Locale-aware message catalog. `instant` resolves a key to its template
/// and interpolates `{name}` placeholders with escaped argument values.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// Empty catalog; `instant` falls back to returning the key itself.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    /// Resolve and interpolate a message. An unknown key yields the key
    /// itself rather than failing: a missing translation must never abort
    /// a running audit.
    pub fn instant(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = match self.templates.get(key) {
            Some(t) => t.clone(),
            None => return key.to_string(),
        };
        let mut out = template;
        for (name, value) in args {
            out = out.replace(&format!("{{{}}}", name), &escape_html(value));
        }
        out
    }

    /// Built-in English catalog covering the bundled rules.
    pub fn english() -> Self {
        let mut catalog = Self::new();
        for (key, template) in [
            ("img-alt.missing", "Image is missing an alt attribute. Every img element must have one; use alt=\"\" for decorative images."),
            ("img-alt-generic.generic", "Image alt text \"{alt}\" is generic and does not describe the image."),
            ("img-alt-generic.filename", "Image alt text \"{alt}\" looks like a filename rather than a description."),
            ("html-lang.missing", "Document is missing a lang attribute on the html element."),
            ("html-lang.invalid", "Document lang attribute \"{lang}\" is not a valid language tag."),
            ("doc-title.missing", "Document has no title element."),
            ("doc-title.empty", "Document title element is empty."),
            ("form-label.unlabeled", "Form control ({control}) has no associated label or accessible name."),
            ("link-name.empty", "Link has no accessible name: no text content, aria-label, or labelled image."),
            ("button-name.empty", "Button has no accessible name."),
            ("aria-role.invalid", "Element declares unknown ARIA role \"{role}\"."),
            ("heading-order.skipped-level", "Heading level jumps from h{from} to h{to}, skipping at least one level."),
            ("duplicate-id.duplicate", "Element id \"{id}\" is used more than once in the document."),
            ("media-captions.missing", "Video element has no captions or subtitles track."),
            ("tabindex.positive", "Element uses positive tabindex {value}, which overrides the natural focus order."),
            ("meta-viewport.user-scalable", "Viewport meta tag disables user scaling."),
            ("meta-viewport.maximum-scale", "Viewport meta tag restricts maximum scale to {value}."),
            ("color-contrast.low", "Text contrast ratio {ratio}:1 is below the required {required}:1."),
        ] {
            catalog.insert(key, template);
        }
        catalog
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

/// Escape text for safe interpolation into HTML contexts.
fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_named_arguments() {
        let mut catalog = MessageCatalog::new();
        catalog.insert("greet", "Hello {name}!");
        assert_eq!(catalog.instant("greet", &[("name", "world")]), "Hello world!");
    }

    #[test]
    fn escapes_interpolated_values() {
        let mut catalog = MessageCatalog::new();
        catalog.insert("echo", "value: {v}");
        assert_eq!(
            catalog.instant("echo", &[("v", "<script>\"x\"</script>")]),
            "value: &lt;script&gt;&quot;x&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let catalog = MessageCatalog::new();
        assert_eq!(catalog.instant("nope", &[]), "nope");
    }

    #[test]
    fn english_catalog_covers_bundled_rules() {
        let catalog = MessageCatalog::english();
        let msg = catalog.instant("img-alt.missing", &[]);
        assert!(msg.contains("alt attribute"));
    }
}
