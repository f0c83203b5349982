//! FILENAME: core/dataview/src/lib.rs
//! Host data contracts for the hierarchy visual.
//!
//! These are plain data shapes decoupled from any host SDK. The visual's
//! transform and settings layers depend only on them.
//!
//! Layers:
//! - `value`: Scalar values (labels, measures)
//! - `matrix`: The row hierarchy and its value sources
//! - `data_view`: Update payload, metadata objects, property enumeration

mod error;
pub mod value;
pub mod matrix;
pub mod data_view;

pub use error::DataViewError;
pub use value::PrimitiveValue;
pub use matrix::{
    DataViewMatrix, LevelValue, MatrixHierarchy, MatrixNode, MatrixValue, ValueSource,
    ValueSourceIndex,
};
pub use data_view::{
    DataView, DataViewMetadata, DataViewObject, DataViewObjects,
    EnumerateVisualObjectInstancesOptions, Viewport, VisualObjectInstance, VisualUpdateOptions,
};
