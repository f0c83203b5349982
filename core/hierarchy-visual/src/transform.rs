//! FILENAME: core/hierarchy-visual/src/transform.rs
//! Matrix -> View Model conversion.
//!
//! This is the only place that reads the host's matrix. The conversion is
//! a structural copy: node order and depth are preserved, nothing is
//! filtered, sorted or aggregated. Leaf row values become the `values`
//! mapping, named after the matrix value sources.

use dataview::{DataView, DataViewMatrix, MatrixNode};
use crate::view_model::{CategoryViewModel, Measure, VisualViewModel};

/// Builds the view model from the host's data views.
///
/// Returns `None` when there is nothing to render: no data view, no matrix,
/// or a row root without children.
pub fn visual_transform(data_views: &[DataView]) -> Option<VisualViewModel> {
    let matrix = data_views.first()?.matrix.as_ref()?;
    matrix_to_view_model(matrix)
}

/// Builds the view model from a single matrix.
pub fn matrix_to_view_model(matrix: &DataViewMatrix) -> Option<VisualViewModel> {
    let categories = matrix
        .rows
        .root
        .children()
        .iter()
        .map(|node| convert_node(matrix, node, 0))
        .collect();

    Some(VisualViewModel::new(categories)).filter(|vm| !vm.is_empty())
}

fn convert_node(matrix: &DataViewMatrix, node: &MatrixNode, depth: u32) -> CategoryViewModel {
    let value = node
        .display_value()
        .map(|v| v.to_string())
        .unwrap_or_default();
    let level = node.level.unwrap_or(depth);

    if node.has_children() {
        let children = node
            .children()
            .iter()
            .map(|child| convert_node(matrix, child, depth + 1))
            .collect();
        return CategoryViewModel::interior(value, level, children);
    }

    CategoryViewModel::leaf(value, level, leaf_measures(matrix, node))
}

fn leaf_measures(matrix: &DataViewMatrix, node: &MatrixNode) -> Vec<Measure> {
    let Some(values) = &node.values else {
        return Vec::new();
    };

    values
        .iter()
        .map(|(&position, mv)| {
            let source = mv.value_source_index.unwrap_or(position);
            let name = matrix
                .value_source_name(source)
                .map(str::to_string)
                .unwrap_or_else(|| source.to_string());
            Measure::new(name, mv.value.clone())
        })
        .collect()
}
