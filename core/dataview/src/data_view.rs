//! FILENAME: core/dataview/src/data_view.rs
//! PURPOSE: Data views and the update payload the host sends on every change.
//! CONTEXT: A data view bundles the matrix with metadata, including the
//! property objects the user edited in the host's format pane. Only the
//! first data view of an update is consumed by the visual.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::error::DataViewError;
use crate::matrix::DataViewMatrix;

/// Properties of one format-pane object, keyed by property name.
pub type DataViewObject = BTreeMap<String, Value>;

/// All format-pane objects, keyed by object name (e.g., "dataPoint").
pub type DataViewObjects = BTreeMap<String, DataViewObject>;

// ============================================================================
// DATA VIEW
// ============================================================================

/// Metadata attached to a data view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataViewMetadata {
    /// Persisted format-pane values. Absent until the user edits one.
    #[serde(default)]
    pub objects: Option<DataViewObjects>,
}

impl DataViewMetadata {
    /// Looks up a raw property value.
    pub fn property(&self, object_name: &str, property_name: &str) -> Option<&Value> {
        self.objects
            .as_ref()?
            .get(object_name)?
            .get(property_name)
    }

    /// Sets a raw property value, creating the object if needed.
    pub fn set_property(&mut self, object_name: &str, property_name: &str, value: Value) {
        self.objects
            .get_or_insert_with(BTreeMap::new)
            .entry(object_name.to_string())
            .or_default()
            .insert(property_name.to_string(), value);
    }
}

/// One data view supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataView {
    #[serde(default)]
    pub metadata: DataViewMetadata,

    /// The hierarchical matrix; absent when the host has no matrix mapping.
    #[serde(default)]
    pub matrix: Option<DataViewMatrix>,
}

impl DataView {
    pub fn from_matrix(matrix: DataViewMatrix) -> Self {
        DataView {
            metadata: DataViewMetadata::default(),
            matrix: Some(matrix),
        }
    }
}

// ============================================================================
// UPDATE OPTIONS
// ============================================================================

/// Size of the area the host gives the visual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// The payload of a host `update` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VisualUpdateOptions {
    #[serde(default)]
    pub viewport: Viewport,

    /// Ordered data views; the visual reads the first one.
    #[serde(default)]
    pub data_views: Vec<DataView>,
}

impl VisualUpdateOptions {
    pub fn new(data_views: Vec<DataView>) -> Self {
        VisualUpdateOptions {
            viewport: Viewport::default(),
            data_views,
        }
    }

    /// Returns the first data view, which is the only one the visual reads.
    pub fn primary_data_view(&self) -> Option<&DataView> {
        self.data_views.first()
    }

    /// Decodes the host's JSON update payload.
    pub fn from_json(json: &str) -> Result<Self, DataViewError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes a JSON update payload from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataViewError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Decodes a JSON update payload stored on disk (recorded host sessions).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataViewError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }
}

// ============================================================================
// PROPERTY ENUMERATION
// ============================================================================

/// Request from a host property pane for one object's current values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EnumerateVisualObjectInstancesOptions {
    pub object_name: String,
}

impl EnumerateVisualObjectInstancesOptions {
    pub fn new(object_name: impl Into<String>) -> Self {
        EnumerateVisualObjectInstancesOptions {
            object_name: object_name.into(),
        }
    }
}

/// One described object instance returned to the property pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VisualObjectInstance {
    pub object_name: String,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Data selector; `None` means the instance applies to the whole visual.
    #[serde(default)]
    pub selector: Option<Value>,

    pub properties: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use serde_json::json;

    const PAYLOAD: &str = r#"{
        "viewport": { "width": 400, "height": 300 },
        "dataViews": [ {
            "metadata": { "objects": { "dataPoint": { "fontSize": 14 } } },
            "matrix": { "rows": { "root": { "children": [ { "value": "A", "level": 0 } ] } } }
        } ]
    }"#;

    #[test]
    fn test_from_json_reads_first_data_view() {
        let options = VisualUpdateOptions::from_json(PAYLOAD).unwrap();
        assert_eq!(options.viewport.width, 400.0);

        let dv = options.primary_data_view().unwrap();
        assert_eq!(dv.metadata.property("dataPoint", "fontSize"), Some(&json!(14)));
        assert!(dv.matrix.is_some());
    }

    #[test]
    fn test_from_json_rejects_malformed_payload() {
        let err = VisualUpdateOptions::from_json("{ \"dataViews\": 5 }").unwrap_err();
        assert!(matches!(err, DataViewError::Json(_)));
    }

    #[test]
    fn test_missing_sections_default() {
        let options = VisualUpdateOptions::from_json("{}").unwrap();
        assert!(options.primary_data_view().is_none());
    }

    #[test]
    fn test_from_path_reads_recorded_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAYLOAD.as_bytes()).unwrap();

        let options = VisualUpdateOptions::from_path(file.path()).unwrap();
        assert_eq!(options.data_views.len(), 1);
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = VisualUpdateOptions::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DataViewError::Io(_)));
    }

    #[test]
    fn test_set_property_creates_object() {
        let mut metadata = DataViewMetadata::default();
        assert!(metadata.property("dataPoint", "fill").is_none());

        metadata.set_property("dataPoint", "fill", json!("#ff0000"));
        assert_eq!(metadata.property("dataPoint", "fill"), Some(&json!("#ff0000")));
    }
}
