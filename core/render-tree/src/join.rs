//! FILENAME: core/render-tree/src/join.rs
//! PURPOSE: Keyed enter/update/exit reconciliation.
//! CONTEXT: `diff_keyed` is the pure part: given the keys bound to the
//! existing elements and the keys of the incoming data, it decides which
//! data items need new elements, which elements survive, and which go away.
//! `join_children` applies that decision to the direct children of one
//! parent element.
//!
//! Algorithm:
//! 1. Collect existing children matching the selector and read their keys
//! 2. Diff against the incoming keys
//! 3. Remove exits, create and append enters
//! 4. Reorder the bound elements to data order within their current slots

use std::hash::Hash;
use rustc_hash::{FxHashMap, FxHashSet};
use crate::document::Document;
use crate::element::{ElementId, Selector};

/// Attribute holding the key an element is bound to.
pub const KEY_ATTRIBUTE: &str = "data-key";

// ============================================================================
// PURE DIFF
// ============================================================================

/// Result of diffing existing keys against incoming keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyedDiff {
    /// Incoming indices that have no existing element.
    pub enter: Vec<usize>,
    /// (incoming index, existing index) pairs bound to the same key.
    pub update: Vec<(usize, usize)>,
    /// Existing indices whose key is absent from the incoming data.
    /// Unkeyed existing items and duplicate keys also exit.
    pub exit: Vec<usize>,
}

impl KeyedDiff {
    /// Returns true if nothing needs to be created or removed.
    pub fn is_stable(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}

/// Diffs existing keys against incoming keys.
///
/// The first existing item carrying a key wins; later duplicates exit.
/// Likewise the first incoming item with a key claims the existing element
/// and later duplicates enter.
pub fn diff_keyed<K>(existing: &[Option<K>], incoming: &[K]) -> KeyedDiff
where
    K: Eq + Hash,
{
    let mut by_key: FxHashMap<&K, usize> = FxHashMap::default();
    let mut diff = KeyedDiff::default();

    for (i, key) in existing.iter().enumerate() {
        match key {
            Some(k) if !by_key.contains_key(k) => {
                by_key.insert(k, i);
            }
            _ => diff.exit.push(i),
        }
    }

    let mut claimed: FxHashSet<usize> = FxHashSet::default();
    for (i, key) in incoming.iter().enumerate() {
        match by_key.get(key) {
            Some(&e) if claimed.insert(e) => diff.update.push((i, e)),
            _ => diff.enter.push(i),
        }
    }

    diff.exit.extend(by_key.values().copied().filter(|e| !claimed.contains(e)));
    diff.exit.sort_unstable();
    diff
}

// ============================================================================
// DOCUMENT JOIN
// ============================================================================

/// Elements bound by a `join_children` call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinResult {
    /// One element per incoming key, in data order.
    pub bound: Vec<ElementId>,
    /// The subset of `bound` created by this join.
    pub entered: Vec<ElementId>,
    /// Number of elements removed.
    pub exited: usize,
}

/// Binds one child of `parent` matching `selector` to each key.
///
/// New elements are created with the selector's tag and class and the key
/// stored in `KEY_ATTRIBUTE`. Children not matching the selector are never
/// touched. A stale `parent` yields an empty result.
pub fn join_children(
    doc: &mut Document,
    parent: ElementId,
    selector: Selector<'_>,
    keys: &[String],
) -> JoinResult {
    if !doc.contains(parent) {
        log::warn!("join {} on stale parent {:?}", selector, parent);
        return JoinResult::default();
    }

    let existing = doc.select_children(parent, selector);
    let existing_keys: Vec<Option<String>> = existing
        .iter()
        .map(|id| doc.attribute(*id, KEY_ATTRIBUTE).map(str::to_string))
        .collect();
    let diff = diff_keyed(&existing_keys, keys);

    let exiting: Vec<ElementId> = diff.exit.iter().map(|&e| existing[e]).collect();
    doc.remove_children(parent, &exiting);

    let mut bound: Vec<Option<ElementId>> = vec![None; keys.len()];
    for &(i, e) in &diff.update {
        bound[i] = Some(existing[e]);
    }

    let mut entered = Vec::with_capacity(diff.enter.len());
    for &i in &diff.enter {
        let el = doc.create_element(selector.tag);
        doc.add_class(el, selector.class);
        doc.set_attribute(el, KEY_ATTRIBUTE, keys[i].as_str());
        doc.append_child(parent, el);
        bound[i] = Some(el);
        entered.push(el);
    }

    let bound: Vec<ElementId> = bound.into_iter().flatten().collect();
    doc.place_in_order(parent, &bound);

    if diff.is_stable() {
        log::trace!("join {} under {:?}: {} unchanged", selector, parent, diff.update.len());
    } else {
        log::trace!(
            "join {} under {:?}: {} enter, {} update, {} exit",
            selector,
            parent,
            entered.len(),
            diff.update.len(),
            diff.exit.len()
        );
    }

    JoinResult {
        bound,
        entered,
        exited: diff.exit.len(),
    }
}

/// Removes every child of `parent` matching `selector`. Returns the count.
pub fn clear_children(doc: &mut Document, parent: ElementId, selector: Selector<'_>) -> usize {
    join_children(doc, parent, selector, &[]).exited
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHILD: Selector<'static> = Selector::new("div", "child");

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_diff_enter_update_exit() {
        let existing = vec![Some("a"), Some("b"), Some("c")];
        let diff = diff_keyed(&existing, &["c", "d", "a"]);

        assert_eq!(diff.update, vec![(0, 2), (2, 0)]);
        assert_eq!(diff.enter, vec![1]);
        assert_eq!(diff.exit, vec![1]);
        assert!(!diff.is_stable());
    }

    #[test]
    fn test_diff_unkeyed_and_duplicates_exit() {
        let existing = vec![None, Some("a"), Some("a")];
        let diff = diff_keyed(&existing, &["a", "a"]);

        assert_eq!(diff.update, vec![(0, 1)]);
        assert_eq!(diff.enter, vec![1]);
        assert_eq!(diff.exit, vec![0, 2]);
    }

    #[test]
    fn test_diff_identical_is_stable() {
        let existing = vec![Some(1), Some(2)];
        let diff = diff_keyed(&existing, &[1, 2]);
        assert!(diff.is_stable());
        assert_eq!(diff.update, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_join_creates_then_reuses() {
        let mut doc = Document::new();
        let body = doc.body();

        let first = join_children(&mut doc, body, CHILD, &keys(&["a", "b"]));
        assert_eq!(first.entered.len(), 2);
        assert_eq!(doc.attribute(first.bound[1], KEY_ATTRIBUTE), Some("b"));

        let second = join_children(&mut doc, body, CHILD, &keys(&["a", "b"]));
        assert!(second.entered.is_empty());
        assert_eq!(second.exited, 0);
        assert_eq!(second.bound, first.bound);
    }

    #[test]
    fn test_join_removes_and_reorders() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = join_children(&mut doc, body, CHILD, &keys(&["a", "b", "c"]));

        let second = join_children(&mut doc, body, CHILD, &keys(&["c", "a"]));
        assert_eq!(second.exited, 1);
        assert_eq!(second.bound, vec![first.bound[2], first.bound[0]]);
        assert_eq!(doc.children(body), &[first.bound[2], first.bound[0]]);
        assert!(!doc.contains(first.bound[1]));
    }

    #[test]
    fn test_join_wide_level_rebinds_and_shrinks() {
        let mut doc = Document::new();
        let body = doc.body();
        let wide: Vec<String> = (0..40_000).map(|i| i.to_string()).collect();
        let first = join_children(&mut doc, body, CHILD, &wide);

        let again = join_children(&mut doc, body, CHILD, &wide);
        assert!(again.entered.is_empty());
        assert_eq!(again.bound, first.bound);

        let shrunk = join_children(&mut doc, body, CHILD, &keys(&["39999"]));
        assert_eq!(shrunk.exited, wide.len() - 1);
        assert_eq!(doc.children(body), &[first.bound[wide.len() - 1]]);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_join_leaves_other_children_alone() {
        let mut doc = Document::new();
        let body = doc.body();
        let label = doc.create_element("text");
        doc.add_class(label, "label");
        doc.append_child(body, label);

        join_children(&mut doc, body, CHILD, &keys(&["a"]));
        assert_eq!(clear_children(&mut doc, body, CHILD), 1);
        assert_eq!(doc.children(body), &[label]);
    }

    #[test]
    fn test_join_on_stale_parent_is_empty() {
        let mut doc = Document::new();
        let body = doc.body();
        let gone = doc.create_element("div");
        doc.append_child(body, gone);
        doc.remove(gone);

        let result = join_children(&mut doc, gone, CHILD, &keys(&["a"]));
        assert!(result.bound.is_empty());
        assert_eq!(doc.len(), 1);
    }
}
