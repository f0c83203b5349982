//! FILENAME: core/hierarchy-visual/src/view_model.rs
//! View Model - What the visual displays.
//!
//! The host matrix is reinterpreted into a tree of categories. Each node is
//! either interior (it has children) or a leaf (it has measures). A node
//! with neither is tolerated and rendered as a bare label.

use serde::{Deserialize, Serialize};
use dataview::PrimitiveValue;

// ============================================================================
// MEASURE
// ============================================================================

/// One measure on a leaf category, e.g. "Sum of Sales" = 1250.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// Measure name (the value source's display name).
    pub name: String,
    /// The value as supplied by the host.
    pub value: PrimitiveValue,
}

impl Measure {
    pub fn new(name: impl Into<String>, value: impl Into<PrimitiveValue>) -> Self {
        Measure {
            name: name.into(),
            value: value.into(),
        }
    }
}

// ============================================================================
// CATEGORY
// ============================================================================

/// The shape of a category node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryKind {
    /// Has children.
    Interior,
    /// Has measures.
    Leaf,
    /// Has neither; renders its label only.
    Degenerate,
}

/// One node of the category tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryViewModel {
    /// Display label.
    pub value: String,

    /// Depth in the hierarchy; drives indentation.
    pub level: u32,

    /// Child categories (interior nodes only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryViewModel>,

    /// Measures in value-source order (leaf nodes only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Measure>,
}

impl CategoryViewModel {
    /// Creates an interior category.
    pub fn interior(value: impl Into<String>, level: u32, children: Vec<CategoryViewModel>) -> Self {
        CategoryViewModel {
            value: value.into(),
            level,
            children,
            values: Vec::new(),
        }
    }

    /// Creates a leaf category.
    pub fn leaf(value: impl Into<String>, level: u32, values: Vec<Measure>) -> Self {
        CategoryViewModel {
            value: value.into(),
            level,
            children: Vec::new(),
            values,
        }
    }

    /// Interior wins when both children and values are present.
    pub fn kind(&self) -> CategoryKind {
        if !self.children.is_empty() {
            CategoryKind::Interior
        } else if !self.values.is_empty() {
            CategoryKind::Leaf
        } else {
            CategoryKind::Degenerate
        }
    }

    pub fn is_interior(&self) -> bool {
        self.kind() == CategoryKind::Interior
    }

    pub fn is_leaf(&self) -> bool {
        self.kind() == CategoryKind::Leaf
    }

    /// Looks up a measure by name.
    pub fn measure(&self, name: &str) -> Option<&Measure> {
        self.values.iter().find(|m| m.name == name)
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(CategoryViewModel::node_count).sum::<usize>()
    }
}

/// Root wrapper: the top-level categories in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VisualViewModel {
    pub categories: Vec<CategoryViewModel>,
}

impl VisualViewModel {
    pub fn new(categories: Vec<CategoryViewModel>) -> Self {
        VisualViewModel { categories }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of nodes in the whole tree.
    pub fn node_count(&self) -> usize {
        self.categories.iter().map(CategoryViewModel::node_count).sum()
    }

    /// Counts interior nodes per depth (index = depth from the top level).
    pub fn interior_counts_by_depth(&self) -> Vec<usize> {
        let mut counts = Vec::new();
        let mut level: Vec<&CategoryViewModel> = self.categories.iter().collect();
        while !level.is_empty() {
            counts.push(level.iter().filter(|c| c.is_interior()).count());
            level = level.into_iter().flat_map(|c| c.children.iter()).collect();
        }
        counts
    }
}
