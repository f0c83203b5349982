//! FILENAME: core/hierarchy-visual/src/tree_walker.rs
//! Tree Walker - Keeps the rendered element tree in sync with the view model.
//!
//! Rendered shape of one category:
//!
//! ```text
//! div.child[data-key][style=margin-left: {level*20}px]
//!   text.label                      category label
//!   div.child ...                   interior: one per child category
//!   text.values.marker              leaf: "Measures:"
//!   text.values.entry[data-key] ... leaf: one per measure
//! ```
//!
//! Every level is bound with a keyed join, so elements whose data survives
//! an update are reused in place. Structure left over from a node's
//! previous shape (e.g. a measures block on a node that gained children)
//! is removed.

use rustc_hash::FxHashMap;
use render_tree::{clear_children, join_children, Document, ElementId, Selector};
use crate::view_model::{CategoryKind, CategoryViewModel, Measure};

/// Indentation per hierarchy level, in pixels.
pub const INDENT_PX_PER_LEVEL: u32 = 20;

/// Text of the marker preceding a leaf's measures.
pub const MEASURES_MARKER: &str = "Measures:";

pub const ROOT_CLASS: &str = "root";
pub const CHILD_CLASS: &str = "child";
pub const LABEL_CLASS: &str = "label";
pub const VALUES_CLASS: &str = "values";
pub const MARKER_CLASS: &str = "marker";
pub const ENTRY_CLASS: &str = "entry";

/// Attribute recording the reconciliation depth of a category container.
pub const DEPTH_ATTRIBUTE: &str = "data-depth";

pub const ROOT_SELECTOR: Selector<'static> = Selector::new("div", ROOT_CLASS);
pub const CHILD_SELECTOR: Selector<'static> = Selector::new("div", CHILD_CLASS);
pub const LABEL_SELECTOR: Selector<'static> = Selector::new("text", LABEL_CLASS);
pub const MARKER_SELECTOR: Selector<'static> = Selector::new("text", MARKER_CLASS);
pub const ENTRY_SELECTOR: Selector<'static> = Selector::new("text", ENTRY_CLASS);

const SINGLETON_KEY: &str = "0";

/// The `margin-left` value for a level.
pub fn indent_px(level: u32) -> String {
    format!("{}px", level.saturating_mul(INDENT_PX_PER_LEVEL))
}

/// Join keys for a sibling sequence: the label prefixed with how many
/// earlier siblings share it, so duplicates stay distinct and stable.
pub fn occurrence_keys<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
    labels
        .into_iter()
        .map(|label| {
            let n = seen.entry(label).or_insert(0);
            let key = format!("{}:{}", n, label);
            *n += 1;
            key
        })
        .collect()
}

// ============================================================================
// ROOT
// ============================================================================

/// Replaces every `div.root` under `target` with one fresh root container.
///
/// The children of the first previous root are moved into the new root so
/// they can still be reconciled incrementally; only the root element itself
/// is recreated. Returns `None` if `target` is stale.
pub fn replace_root(doc: &mut Document, target: ElementId) -> Option<ElementId> {
    if !doc.contains(target) {
        log::warn!("replace_root: target {:?} is not in the document", target);
        return None;
    }

    let previous = doc.select_children(target, ROOT_SELECTOR);
    let root = doc.create_element(ROOT_SELECTOR.tag);
    doc.add_class(root, ROOT_CLASS);

    if let Some(&first) = previous.first() {
        doc.adopt_children(first, root);
    }
    for old in previous {
        doc.remove(old);
    }
    doc.append_child(target, root);
    Some(root)
}

// ============================================================================
// RECONCILIATION
// ============================================================================

/// Binds one `div.child` under `container` per node, then recurses into
/// interior nodes or renders the measures of leaves.
///
/// Only the subtree of `container` is touched. A stale container is a no-op.
pub fn reconcile(doc: &mut Document, container: ElementId, nodes: &[CategoryViewModel], depth: u32) {
    if !doc.contains(container) {
        log::warn!("reconcile: container {:?} is not in the document", container);
        return;
    }

    let keys = occurrence_keys(nodes.iter().map(|n| n.value.as_str()));
    let joined = join_children(doc, container, CHILD_SELECTOR, &keys);
    if !joined.entered.is_empty() || joined.exited > 0 {
        log::debug!(
            "depth {}: {} categories, {} created, {} removed",
            depth,
            nodes.len(),
            joined.entered.len(),
            joined.exited
        );
    }

    for (node, &element) in nodes.iter().zip(&joined.bound) {
        doc.set_style(element, "margin-left", indent_px(node.level));
        doc.set_attribute(element, DEPTH_ATTRIBUTE, depth.to_string());
        bind_label(doc, element, &node.value);

        match node.kind() {
            CategoryKind::Interior => {
                clear_measures(doc, element);
                reconcile(doc, element, &node.children, depth + 1);
            }
            CategoryKind::Leaf => {
                clear_children(doc, element, CHILD_SELECTOR);
                render_measures(doc, element, &node.values);
            }
            CategoryKind::Degenerate => {
                clear_children(doc, element, CHILD_SELECTOR);
                clear_measures(doc, element);
            }
        }
    }
}

fn bind_label(doc: &mut Document, element: ElementId, label: &str) {
    let joined = join_children(doc, element, LABEL_SELECTOR, &[SINGLETON_KEY.to_string()]);
    if let Some(&text) = joined.bound.first() {
        doc.set_text(text, label);
    }
}

fn render_measures(doc: &mut Document, element: ElementId, values: &[Measure]) {
    let marker = join_children(doc, element, MARKER_SELECTOR, &[SINGLETON_KEY.to_string()]);
    for &m in &marker.entered {
        doc.add_class(m, VALUES_CLASS);
        doc.set_text(m, MEASURES_MARKER);
    }

    let keys = occurrence_keys(values.iter().map(|m| m.name.as_str()));
    let entries = join_children(doc, element, ENTRY_SELECTOR, &keys);
    for &e in &entries.entered {
        doc.add_class(e, VALUES_CLASS);
    }
    for (measure, &e) in values.iter().zip(&entries.bound) {
        doc.set_text(e, &measure.value.to_string());
    }
}

fn clear_measures(doc: &mut Document, element: ElementId) {
    clear_children(doc, element, MARKER_SELECTOR);
    clear_children(doc, element, ENTRY_SELECTOR);
}
