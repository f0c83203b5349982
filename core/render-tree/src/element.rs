//! FILENAME: core/render-tree/src/element.rs
//! PURPOSE: Element handles, element data and selectors.
//! CONTEXT: Elements live in the `Document` arena and are addressed by
//! generational ids, so a handle to a removed element never aliases a
//! newer element that reuses its slot.

use std::collections::BTreeMap;
use smallvec::SmallVec;

/// Class list storage. Most elements carry one or two classes.
pub type ClassList = SmallVec<[String; 2]>;

/// Handle to an element in a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// A single element: tag, classes, inline styles, attributes and text.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub classes: ClassList,
    /// Inline style properties (e.g., "margin-left" -> "20px").
    pub styles: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
    /// Text content rendered before any child elements.
    pub text: Option<String>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            classes: ClassList::new(),
            styles: BTreeMap::new(),
            attributes: BTreeMap::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

// ============================================================================
// SELECTOR
// ============================================================================

/// Matches elements by tag and class, like `div.child`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector<'a> {
    pub tag: &'a str,
    pub class: &'a str,
}

impl<'a> Selector<'a> {
    pub const fn new(tag: &'a str, class: &'a str) -> Self {
        Selector { tag, class }
    }

    pub fn matches(&self, element: &Element) -> bool {
        element.tag == self.tag && element.has_class(self.class)
    }
}

impl std::fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.tag, self.class)
    }
}
