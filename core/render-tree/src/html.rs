//! FILENAME: core/render-tree/src/html.rs
//! PURPOSE: Markup serialization of an element subtree.
//! CONTEXT: Hosts that embed the rendered tree as markup call `to_html`.
//! Output is deterministic: classes in insertion order, styles and
//! attributes sorted by name.

use std::fmt::Write;
use crate::document::Document;
use crate::element::ElementId;

impl Document {
    /// Serializes `id` and its subtree. Stale ids yield an empty string.
    pub fn to_html(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: ElementId, out: &mut String) {
        let Some(el) = self.get(id) else {
            return;
        };

        out.push('<');
        out.push_str(&el.tag);
        if !el.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&el.classes.join(" ")));
        }
        if !el.styles.is_empty() {
            let style = el
                .styles
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", escape(&style));
        }
        for (name, value) in &el.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');

        if let Some(text) = &el.text {
            out.push_str(&escape(text));
        }
        for child in el.children() {
            self.write_html(*child, out);
        }

        let _ = write!(out, "</{}>", el.tag);
    }
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
