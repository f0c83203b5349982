//! FILENAME: core/render-tree/src/snapshot.rs
//! PURPOSE: Id-free structural copies of element subtrees.
//! CONTEXT: Two renders produce equal snapshots exactly when their element
//! trees have the same shape, tags, classes, styles, attributes and text,
//! regardless of which arena slots they occupy.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::document::Document;
use crate::element::{ClassList, ElementId};

/// Structural copy of one element and its descendants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub tag: String,
    pub classes: ClassList,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    /// Total number of nodes in this snapshot, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NodeSnapshot::node_count).sum::<usize>()
    }
}

impl Document {
    /// Takes a snapshot of `id`'s subtree, or `None` for stale ids.
    pub fn snapshot(&self, id: ElementId) -> Option<NodeSnapshot> {
        let el = self.get(id)?;
        Some(NodeSnapshot {
            tag: el.tag.clone(),
            classes: el.classes.clone(),
            styles: el.styles.clone(),
            attributes: el.attributes.clone(),
            text: el.text.clone(),
            children: el
                .children()
                .iter()
                .filter_map(|c| self.snapshot(*c))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(doc: &mut Document, label: &str) -> ElementId {
        let div = doc.create_element("div");
        doc.add_class(div, "child");
        let text = doc.create_element("text");
        doc.set_text(text, label);
        doc.append_child(div, text);
        div
    }

    #[test]
    fn test_snapshots_ignore_arena_slots() {
        let mut doc = Document::new();
        let _padding = doc.create_element("span");
        let a = build(&mut doc, "Europe");
        let b = build(&mut doc, "Europe");

        assert_ne!(a, b);
        assert_eq!(doc.snapshot(a), doc.snapshot(b));
        assert_eq!(doc.snapshot(a).unwrap().node_count(), 2);
    }

    #[test]
    fn test_snapshot_serializes_compactly() {
        let mut doc = Document::new();
        let a = build(&mut doc, "Asia");
        let json = serde_json::to_value(doc.snapshot(a).unwrap()).unwrap();

        assert_eq!(json["classes"][0], "child");
        assert!(json.get("styles").is_none());
        assert_eq!(json["children"][0]["text"], "Asia");
    }
}
