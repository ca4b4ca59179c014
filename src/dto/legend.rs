use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::{
    color_map::{ColorMap, ColorMapError, EndpointPolicy, LegendEntry},
    dto::validation::{validate_color_count, validate_edges},
};

/// Legend specification attached to each hazard in the metadata document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendSpec {
    /// Bucket edges, strictly ascending.
    pub edges: Vec<f64>,
    /// One color per visible bucket.
    pub colors: Vec<String>,
    /// Which extreme buckets are shown.
    #[serde(default)]
    pub endpoint_type: EndpointPolicy,
    /// Digits after the decimal point in legend labels.
    #[serde(default)]
    pub decimal_places: usize,
    /// Legend title, e.g. `Legend (in °C):`.
    #[serde(default)]
    pub label: String,
}

impl LegendSpec {
    /// Build the validated color map described by this spec.
    pub fn to_color_map(&self) -> Result<ColorMap, ColorMapError> {
        ColorMap::new(
            self.edges.clone(),
            self.colors.clone(),
            self.endpoint_type,
            self.decimal_places,
        )
    }
}

impl Validate for LegendSpec {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_edges(&self.edges) {
            errors.add("edges", e);
        } else if let Err(e) = validate_color_count(&self.edges, &self.colors, self.endpoint_type)
        {
            errors.add("colors", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Legend ready to draw: title plus one entry per visible bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    /// Legend title.
    pub title: String,
    /// Rows, lowest bucket first.
    pub entries: Vec<LegendEntry>,
    /// Color map the rows were derived from.
    #[serde(skip)]
    pub color_map: ColorMap,
}

impl TryFrom<&LegendSpec> for Legend {
    type Error = ColorMapError;

    fn try_from(spec: &LegendSpec) -> Result<Self, Self::Error> {
        let color_map = spec.to_color_map()?;
        Ok(Self {
            title: spec.label.clone(),
            entries: color_map.legend(),
            color_map,
        })
    }
}
