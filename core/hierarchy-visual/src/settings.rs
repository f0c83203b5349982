//! FILENAME: core/hierarchy-visual/src/settings.rs
//! Visual Settings - The user-editable formatting options.
//!
//! Settings are read from the data view's metadata objects on every update.
//! Parsing never fails: a missing or ill-typed property keeps its default.
//! Enumeration describes the current values back to the host's property
//! pane without modifying them.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use dataview::{DataView, DataViewMetadata, EnumerateVisualObjectInstancesOptions, VisualObjectInstance};

/// Object name of the data point settings in the format pane.
pub const DATA_POINT_OBJECT: &str = "dataPoint";

/// Default label font size, in points.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

// ============================================================================
// DATA POINT SETTINGS
// ============================================================================

/// Formatting of the rendered tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPointSettings {
    /// Fallback text color when `fill` is empty.
    pub default_color: String,

    /// Whether every data point is shown (reported to the host only).
    pub show_all_data_points: bool,

    /// Text color of the tree.
    pub fill: String,

    /// Conditional fill rule (reported to the host only).
    pub fill_rule: String,

    /// Label font size.
    pub font_size: f64,
}

impl Default for DataPointSettings {
    fn default() -> Self {
        DataPointSettings {
            default_color: String::new(),
            show_all_data_points: true,
            fill: String::new(),
            fill_rule: String::new(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl DataPointSettings {
    /// The color to apply, if any: `fill` first, then `default_color`.
    pub fn effective_color(&self) -> Option<&str> {
        [self.fill.as_str(), self.default_color.as_str()]
            .into_iter()
            .find(|c| !c.is_empty())
    }
}

// ============================================================================
// VISUAL SETTINGS
// ============================================================================

/// All settings of the visual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VisualSettings {
    pub data_point: DataPointSettings,
}

impl VisualSettings {
    /// The documented defaults.
    pub fn get_default() -> Self {
        VisualSettings::default()
    }

    /// Parses settings from a data view, falling back to defaults for every
    /// property that is missing or has the wrong type.
    pub fn parse(data_view: Option<&DataView>) -> Self {
        let mut settings = VisualSettings::default();
        let Some(metadata) = data_view.map(|dv| &dv.metadata) else {
            return settings;
        };

        let dp = &mut settings.data_point;
        if let Some(color) = read_color(metadata, "defaultColor") {
            dp.default_color = color;
        }
        if let Some(show) = read_property(metadata, "showAllDataPoints").and_then(Value::as_bool) {
            dp.show_all_data_points = show;
        }
        if let Some(color) = read_color(metadata, "fill") {
            dp.fill = color;
        }
        if let Some(rule) = read_property(metadata, "fillRule").and_then(Value::as_str) {
            dp.fill_rule = rule.to_string();
        }
        match read_property(metadata, "fontSize").and_then(Value::as_f64) {
            Some(size) if size.is_finite() && size > 0.0 => dp.font_size = size,
            Some(size) => log::debug!("ignoring invalid fontSize {}", size),
            None => {}
        }

        settings
    }

    /// Describes the current values of one object for the property pane.
    /// Unknown object names yield no instances.
    pub fn enumerate_object_instances(
        &self,
        options: &EnumerateVisualObjectInstancesOptions,
    ) -> Vec<VisualObjectInstance> {
        match options.object_name.as_str() {
            DATA_POINT_OBJECT => {
                let dp = &self.data_point;
                let mut properties = BTreeMap::new();
                properties.insert("defaultColor".to_string(), json!(dp.default_color));
                properties.insert("showAllDataPoints".to_string(), json!(dp.show_all_data_points));
                properties.insert("fill".to_string(), json!(dp.fill));
                properties.insert("fillRule".to_string(), json!(dp.fill_rule));
                properties.insert("fontSize".to_string(), json!(dp.font_size));

                vec![VisualObjectInstance {
                    object_name: DATA_POINT_OBJECT.to_string(),
                    display_name: None,
                    selector: None,
                    properties,
                }]
            }
            _ => Vec::new(),
        }
    }
}

fn read_property<'a>(metadata: &'a DataViewMetadata, property: &str) -> Option<&'a Value> {
    metadata.property(DATA_POINT_OBJECT, property)
}

/// Colors come either as a plain string or as `{ "solid": { "color": .. } }`.
fn read_color(metadata: &DataViewMetadata, property: &str) -> Option<String> {
    let value = read_property(metadata, property)?;
    value
        .as_str()
        .or_else(|| value.pointer("/solid/color").and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_view_with(properties: Value) -> DataView {
        let mut dv = DataView::default();
        if let Value::Object(map) = properties {
            for (name, value) in map {
                dv.metadata.set_property(DATA_POINT_OBJECT, &name, value);
            }
        }
        dv
    }

    #[test]
    fn test_parse_without_data_view_is_default() {
        assert_eq!(VisualSettings::parse(None), VisualSettings::get_default());
        assert_eq!(
            VisualSettings::parse(Some(&DataView::default())),
            VisualSettings::get_default()
        );
    }

    #[test]
    fn test_parse_reads_properties() {
        let dv = data_view_with(json!({
            "fontSize": 16,
            "showAllDataPoints": false,
            "fill": { "solid": { "color": "#336699" } },
            "defaultColor": "#000000",
            "fillRule": "gradient"
        }));
        let dp = VisualSettings::parse(Some(&dv)).data_point;

        assert_eq!(dp.font_size, 16.0);
        assert!(!dp.show_all_data_points);
        assert_eq!(dp.fill, "#336699");
        assert_eq!(dp.default_color, "#000000");
        assert_eq!(dp.fill_rule, "gradient");
        assert_eq!(dp.effective_color(), Some("#336699"));
    }

    #[test]
    fn test_parse_ignores_wrong_types() {
        let dv = data_view_with(json!({
            "fontSize": "large",
            "showAllDataPoints": "yes",
            "fill": 42
        }));
        assert_eq!(VisualSettings::parse(Some(&dv)), VisualSettings::get_default());
    }

    #[test]
    fn test_parse_rejects_non_positive_font_size() {
        let dv = data_view_with(json!({ "fontSize": -3 }));
        assert_eq!(VisualSettings::parse(Some(&dv)).data_point.font_size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_effective_color_falls_back() {
        let mut dp = DataPointSettings::default();
        assert_eq!(dp.effective_color(), None);
        dp.default_color = "#111111".to_string();
        assert_eq!(dp.effective_color(), Some("#111111"));
    }

    #[test]
    fn test_enumerate_describes_current_values() {
        let mut settings = VisualSettings::get_default();
        settings.data_point.font_size = 20.0;

        let instances = settings.enumerate_object_instances(
            &EnumerateVisualObjectInstancesOptions::new(DATA_POINT_OBJECT),
        );
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].object_name, "dataPoint");
        assert_eq!(instances[0].properties["fontSize"], json!(20.0));
        assert_eq!(instances[0].properties["showAllDataPoints"], json!(true));
        assert!(instances[0].selector.is_none());

        // Read-only.
        assert_eq!(settings.data_point.font_size, 20.0);
    }

    #[test]
    fn test_enumerate_unknown_object_is_empty() {
        let instances = VisualSettings::get_default()
            .enumerate_object_instances(&EnumerateVisualObjectInstancesOptions::new("legend"));
        assert!(instances.is_empty());
    }
}
