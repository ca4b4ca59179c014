use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property holding the hazard value of a grid cell.
pub const DATA_PROPERTY: &str = "data";
/// Property holding the link to the confidence interval report of a cell.
pub const CI_REPORT_PROPERTY: &str = "ci_report_url";

/// `type` member of a [`FeatureCollection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionKind {
    /// The only accepted value.
    #[default]
    FeatureCollection,
}

/// `type` member of a [`Feature`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    /// The only accepted value.
    #[default]
    Feature,
}

/// GeoJSON `FeatureCollection` as served by the data and boundary endpoints.
///
/// Only what is read or written here is typed; CRS and other members are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Always `FeatureCollection`.
    #[serde(rename = "type")]
    pub kind: CollectionKind,
    /// Features, in server order.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Other members (`crs`, `bbox`, …).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// GeoJSON `Feature`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Always `Feature`.
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    /// Geometry object, passed through as is.
    #[serde(default)]
    pub geometry: Value,
    /// Feature properties.
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Other members (`id`, `bbox`, …).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Feature {
    /// Hazard value of the cell. Numbers sent as strings are accepted.
    pub fn data_value(&self) -> Option<f64> {
        match self.properties.get(DATA_PROPERTY)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Confidence interval report link, if the server attached one.
    pub fn ci_report_url(&self) -> Option<&str> {
        self.properties.get(CI_REPORT_PROPERTY)?.as_str()
    }
}
