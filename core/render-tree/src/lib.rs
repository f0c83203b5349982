//! FILENAME: core/render-tree/src/lib.rs
//! Element tree for the hierarchy visual.
//!
//! A small DOM-like model: the host owns a `Document`, the visual renders
//! under one of its elements and keeps it in sync through keyed joins.
//!
//! Layers:
//! - `element`: Handles, element data, selectors
//! - `document`: The arena and its structural operations
//! - `join`: Keyed enter/update/exit reconciliation
//! - `html` / `snapshot`: Output forms of a subtree

pub mod element;
pub mod document;
pub mod join;
pub mod html;
pub mod snapshot;

pub use element::{ClassList, Element, ElementId, Selector};
pub use document::Document;
pub use join::{clear_children, diff_keyed, join_children, JoinResult, KeyedDiff, KEY_ATTRIBUTE};
pub use snapshot::NodeSnapshot;
