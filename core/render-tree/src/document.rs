//! FILENAME: core/render-tree/src/document.rs
//! PURPOSE: The element arena (the "DOM" the visual renders into).
//! CONTEXT: The host owns the document and hands the visual one element to
//! render under. Removed slots are recycled; ids carry a generation so that
//! stale handles resolve to nothing instead of a reused slot.

use rustc_hash::FxHashSet;
use crate::element::{Element, ElementId, Selector};

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// Arena-backed element tree with a `body` root.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    body: ElementId,
    live: usize,
}

impl Document {
    /// Creates a document containing only an empty `body` element.
    pub fn new() -> Self {
        let mut doc = Document {
            slots: Vec::new(),
            free: Vec::new(),
            body: ElementId { index: 0, generation: 0 },
            live: 0,
        };
        doc.body = doc.create_element("body");
        doc
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Number of live elements (attached or detached), including `body`.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    // ========================================================================
    // ALLOCATION
    // ========================================================================

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.element = Some(Element::new(tag));
            return ElementId { index, generation: slot.generation };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            element: Some(Element::new(tag)),
        });
        ElementId { index, generation: 0 }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.element.as_ref()
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.element.as_mut()
    }

    // ========================================================================
    // STRUCTURE
    // ========================================================================

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id)?.parent
    }

    /// Returns the children of an element, or an empty slice for stale ids.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// Returns true if `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent(c);
        }
        false
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first. Returns false if either id is stale or the
    /// move would create a cycle.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            log::warn!("append_child rejected: {:?} is an ancestor of {:?}", child, parent);
            return false;
        }
        self.detach(child);
        if let Some(el) = self.get_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
        true
    }

    /// Removes an element from its parent without destroying it.
    pub fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(el) = self.get_mut(id) {
            el.parent = None;
        }
    }

    /// Detaches and destroys an element and its whole subtree.
    /// The `body` element cannot be removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.body || !self.contains(id) {
            return false;
        }
        self.detach(id);
        self.free_subtree(id);
        true
    }

    /// Detaches and destroys the listed children of `parent` with a single
    /// pass over its child list. Ids that are not children of `parent` are
    /// skipped. Returns the number of children removed.
    pub(crate) fn remove_children(&mut self, parent: ElementId, ids: &[ElementId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let doomed: FxHashSet<ElementId> = ids.iter().copied().collect();
        let Some(p) = self.get_mut(parent) else {
            return 0;
        };
        let before = p.children.len();
        p.children.retain(|c| !doomed.contains(c));
        let removed = before - p.children.len();

        for id in doomed {
            if self.parent(id) == Some(parent) {
                self.free_subtree(id);
            }
        }
        removed
    }

    /// Frees `id` and all of its descendants. The caller detaches `id` first.
    fn free_subtree(&mut self, id: ElementId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.index as usize) else {
                continue;
            };
            if slot.generation != current.generation {
                continue;
            }
            if let Some(el) = slot.element.take() {
                stack.extend(el.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                self.live -= 1;
            }
        }
    }

    /// Moves every child of `from` to the end of `to`, keeping their order.
    pub fn adopt_children(&mut self, from: ElementId, to: ElementId) {
        if from == to || !self.contains(to) || self.is_ancestor_or_self(from, to) {
            return;
        }
        let children = match self.get_mut(from) {
            Some(el) => std::mem::take(&mut el.children),
            None => return,
        };
        for child in &children {
            if let Some(el) = self.get_mut(*child) {
                el.parent = Some(to);
            }
        }
        if let Some(el) = self.get_mut(to) {
            el.children.extend(children);
        }
    }

    /// Rearranges the children of `parent` so that the elements in `ordered`
    /// appear in that order. They keep the slots they already occupy among
    /// the parent's children; other children do not move.
    pub(crate) fn place_in_order(&mut self, parent: ElementId, ordered: &[ElementId]) {
        let Some(p) = self.get_mut(parent) else {
            return;
        };
        let wanted: FxHashSet<ElementId> = ordered.iter().copied().collect();
        let positions: Vec<usize> = p
            .children
            .iter()
            .enumerate()
            .filter(|(_, c)| wanted.contains(c))
            .map(|(i, _)| i)
            .collect();
        if positions.len() != ordered.len() {
            log::warn!(
                "place_in_order: {} of {} elements are children of {:?}",
                positions.len(),
                ordered.len(),
                parent
            );
            return;
        }
        for (pos, id) in positions.into_iter().zip(ordered) {
            p.children[pos] = *id;
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Direct children of `parent` matching `selector`, in document order.
    pub fn select_children(&self, parent: ElementId, selector: Selector<'_>) -> Vec<ElementId> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|c| self.get(*c).is_some_and(|el| selector.matches(el)))
            .collect()
    }

    /// All descendants of `root` (excluding `root`) carrying `class`, in
    /// document (pre-)order.
    pub fn descendants_with_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(el) = self.get(id) else {
                continue;
            };
            if el.has_class(class) {
                found.push(id);
            }
            stack.extend(el.children.iter().rev().copied());
        }
        found
    }

    // ========================================================================
    // CONTENT
    // ========================================================================

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.get(id)?.text.as_deref()
    }

    /// Sets text content. Unchanged text is left untouched.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(el) = self.get_mut(id) {
            if el.text.as_deref() != Some(text) {
                el.text = Some(text.to_string());
            }
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.get_mut(id) {
            if !el.has_class(class) {
                el.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.get_mut(id) {
            el.classes.retain(|c| c != class);
        }
    }

    pub fn style(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id)?.styles.get(name).map(String::as_str)
    }

    pub fn set_style(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.styles.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_style(&mut self, id: ElementId, name: &str) {
        if let Some(el) = self.get_mut(id) {
            el.styles.remove(name);
        }
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id)?.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.attributes.insert(name.to_string(), value.into());
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
