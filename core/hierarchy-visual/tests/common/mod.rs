//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for hierarchy visual integration tests.

#![allow(dead_code)]

use dataview::{DataView, DataViewMatrix, MatrixNode, PrimitiveValue, VisualUpdateOptions};
use hierarchy_visual::tree_walker::{CHILD_SELECTOR, ENTRY_SELECTOR, LABEL_SELECTOR, MARKER_SELECTOR};
use hierarchy_visual::{Visual, VisualConstructorOptions};
use render_tree::{Document, ElementId, NodeSnapshot};

/// Measures used by the sample fixtures.
pub const MEASURES: [&str; 2] = ["Sales", "Units"];

/// A host document with a visual constructed on its body.
pub struct TestHarness {
    pub doc: Document,
    pub visual: Visual,
}

impl TestHarness {
    pub fn new() -> Self {
        let doc = Document::new();
        let visual = Visual::new(VisualConstructorOptions { element: doc.body() });
        TestHarness { doc, visual }
    }

    /// Sends an update carrying `rows` as the matrix row hierarchy.
    pub fn update_rows(&mut self, rows: Vec<MatrixNode>) {
        let options = options_for(rows);
        self.update(&options);
    }

    pub fn update(&mut self, options: &VisualUpdateOptions) {
        self.visual.update(&mut self.doc, options);
    }

    pub fn root(&self) -> ElementId {
        self.visual.root().expect("visual has rendered a root")
    }

    /// `div.child` containers directly under `parent`.
    pub fn categories(&self, parent: ElementId) -> Vec<ElementId> {
        self.doc.select_children(parent, CHILD_SELECTOR)
    }

    /// Follows labels from the root, e.g. `["Europe", "France"]`.
    pub fn find(&self, path: &[&str]) -> Option<ElementId> {
        let mut current = self.root();
        for label in path {
            current = self
                .categories(current)
                .into_iter()
                .find(|c| self.label(*c).as_deref() == Some(*label))?;
        }
        Some(current)
    }

    pub fn label(&self, category: ElementId) -> Option<String> {
        let label = *self.doc.select_children(category, LABEL_SELECTOR).first()?;
        self.doc.text(label).map(str::to_string)
    }

    pub fn marker_count(&self, category: ElementId) -> usize {
        self.doc.select_children(category, MARKER_SELECTOR).len()
    }

    pub fn entries(&self, category: ElementId) -> Vec<String> {
        self.doc
            .select_children(category, ENTRY_SELECTOR)
            .into_iter()
            .filter_map(|e| self.doc.text(e).map(str::to_string))
            .collect()
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        self.doc.snapshot(self.doc.body()).expect("body is live")
    }
}

pub fn options_for(rows: Vec<MatrixNode>) -> VisualUpdateOptions {
    VisualUpdateOptions::new(vec![DataView::from_matrix(DataViewMatrix::new(rows, &MEASURES))])
}

pub fn leaf(label: &str, level: u32, sales: f64, units: f64) -> MatrixNode {
    MatrixNode::leaf(label, level, vec![PrimitiveValue::Number(sales), PrimitiveValue::Number(units)])
}

/// Europe { France { Paris, Lyon }, Spain }, Asia { Japan }
pub fn sample_rows() -> Vec<MatrixNode> {
    vec![
        MatrixNode::interior(
            "Europe",
            0,
            vec![
                MatrixNode::interior(
                    "France",
                    1,
                    vec![leaf("Paris", 2, 100.0, 10.0), leaf("Lyon", 2, 50.0, 5.0)],
                ),
                leaf("Spain", 1, 80.0, 8.0),
            ],
        ),
        MatrixNode::interior("Asia", 0, vec![leaf("Japan", 1, 120.0, 12.0)]),
    ]
}
