//! FILENAME: core/hierarchy-visual/src/lib.rs
//! Hierarchy tree visual.
//!
//! Renders a host matrix as an indented tree of categories, with the
//! measures of each leaf on a single line, and keeps the rendered element
//! tree in sync across updates.
//!
//! Layers:
//! - `view_model`: What the visual displays
//! - `transform`: Host matrix -> view model
//! - `settings`: Format pane options (parse / enumerate)
//! - `tree_walker`: Keyed reconciliation of the element tree
//! - `visual`: Host entry points (construct, update, enumerate)

pub mod view_model;
pub mod transform;
pub mod settings;
pub mod tree_walker;
pub mod visual;

pub use view_model::{CategoryKind, CategoryViewModel, Measure, VisualViewModel};
pub use transform::{matrix_to_view_model, visual_transform};
pub use settings::{DataPointSettings, VisualSettings, DATA_POINT_OBJECT};
pub use tree_walker::{
    indent_px, reconcile, replace_root, INDENT_PX_PER_LEVEL, MEASURES_MARKER,
};
pub use visual::{Visual, VisualConstructorOptions};
