//! FILENAME: core/dataview/src/matrix.rs
//! PURPOSE: The hierarchical matrix shape of a host data view.
//! CONTEXT: The host pre-aggregates its data into a row hierarchy. Interior
//! nodes carry children; leaf nodes carry one value per value source
//! (measure). The visual only reads this structure during an update and
//! never keeps it around afterwards.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::value::PrimitiveValue;

/// Index into `DataViewMatrix::value_sources`.
pub type ValueSourceIndex = usize;

// ============================================================================
// MATRIX NODE
// ============================================================================

/// One measure value on a matrix node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatrixValue {
    /// The aggregated value supplied by the host.
    #[serde(default)]
    pub value: PrimitiveValue,

    /// Which value source this value belongs to.
    /// When absent, the key in the node's `values` map is the source index.
    #[serde(default)]
    pub value_source_index: Option<ValueSourceIndex>,
}

/// A value attached to a hierarchy level of a node (used by some hosts
/// instead of `value`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LevelValue {
    #[serde(default)]
    pub value: PrimitiveValue,
}

/// A node in the row hierarchy of a matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatrixNode {
    /// Category value shown for this node.
    #[serde(default)]
    pub value: Option<PrimitiveValue>,

    /// Per-level values (alternative source for the label).
    #[serde(default)]
    pub level_values: Vec<LevelValue>,

    /// Depth of this node in the hierarchy (0 for top-level categories).
    #[serde(default)]
    pub level: Option<u32>,

    /// Child nodes, present on interior nodes only.
    #[serde(default)]
    pub children: Option<Vec<MatrixNode>>,

    /// Measure values keyed by position, present on leaves.
    #[serde(default)]
    pub values: Option<BTreeMap<usize, MatrixValue>>,
}

impl MatrixNode {
    /// Creates an interior node.
    pub fn interior(value: impl Into<PrimitiveValue>, level: u32, children: Vec<MatrixNode>) -> Self {
        MatrixNode {
            value: Some(value.into()),
            level: Some(level),
            children: Some(children),
            ..Default::default()
        }
    }

    /// Creates a leaf node with values in value-source order.
    pub fn leaf(value: impl Into<PrimitiveValue>, level: u32, values: Vec<PrimitiveValue>) -> Self {
        let values = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                (
                    i,
                    MatrixValue {
                        value: v,
                        value_source_index: Some(i),
                    },
                )
            })
            .collect();
        MatrixNode {
            value: Some(value.into()),
            level: Some(level),
            values: Some(values),
            ..Default::default()
        }
    }

    /// Returns the children, or an empty slice if this node has none.
    pub fn children(&self) -> &[MatrixNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Returns true if this node has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Returns the display value, falling back to the first level value.
    pub fn display_value(&self) -> Option<&PrimitiveValue> {
        self.value
            .as_ref()
            .or_else(|| self.level_values.first().map(|lv| &lv.value))
    }
}

// ============================================================================
// MATRIX
// ============================================================================

/// Metadata describing one measure column of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValueSource {
    /// Human-readable name (e.g., "Sum of Sales").
    #[serde(default)]
    pub display_name: String,

    /// Fully qualified query name, if the host provides one.
    #[serde(default)]
    pub query_name: Option<String>,
}

impl ValueSource {
    pub fn new(display_name: impl Into<String>) -> Self {
        ValueSource {
            display_name: display_name.into(),
            query_name: None,
        }
    }
}

/// The row axis of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatrixHierarchy {
    /// Synthetic root node; its children are the top-level categories.
    #[serde(default)]
    pub root: MatrixNode,
}

/// The hierarchical matrix of a data view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataViewMatrix {
    #[serde(default)]
    pub rows: MatrixHierarchy,

    /// Measures, in the order their values appear on leaf nodes.
    #[serde(default)]
    pub value_sources: Vec<ValueSource>,
}

impl DataViewMatrix {
    /// Builds a matrix from top-level row nodes and measure names.
    pub fn new(rows: Vec<MatrixNode>, measures: &[&str]) -> Self {
        DataViewMatrix {
            rows: MatrixHierarchy {
                root: MatrixNode {
                    children: Some(rows),
                    ..Default::default()
                },
            },
            value_sources: measures.iter().map(|m| ValueSource::new(*m)).collect(),
        }
    }

    /// Returns the measure name for a value source index.
    pub fn value_source_name(&self, index: ValueSourceIndex) -> Option<&str> {
        self.value_sources.get(index).map(|vs| vs.display_name.as_str())
    }
}
