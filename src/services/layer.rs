//! Styling of fetched GeoJSON layers.

use serde_json::{Number, Value, json};
use tracing::warn;

use crate::{
    color_map::{ColorMap, ColorMapError},
    dto::geojson::{CI_REPORT_PROPERTY, DATA_PROPERTY, Feature, FeatureCollection},
    state::BoundaryLayer,
};

/// Fill color property added to styled features.
pub const FILL_PROPERTY: &str = "fill";
/// Fill opacity property added to styled features.
pub const FILL_OPACITY_PROPERTY: &str = "fill-opacity";
/// Visible bucket index property added to styled features.
pub const LEGEND_INDEX_PROPERTY: &str = "legend_index";
/// Label property added to boundary features.
pub const LABEL_PROPERTY: &str = "label";

/// Data layer ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLayer {
    /// Features that carried a value, with fill properties.
    pub collection: FeatureCollection,
    /// Features dropped because `data` was missing or not a number.
    pub skipped: usize,
}

/// Color every feature of a data layer. Geometry, `ci_report_url` and other
/// members are kept; features without a numeric `data` are dropped.
pub fn style_data_layer(
    collection: FeatureCollection,
    color_map: &ColorMap,
    opacity: f64,
) -> Result<StyledLayer, ColorMapError> {
    let mut skipped = 0;
    let mut features = Vec::with_capacity(collection.features.len());

    for mut feature in collection.features {
        let Some(value) = feature.data_value().filter(|value| !value.is_nan()) else {
            skipped += 1;
            continue;
        };
        let index = color_map.classify_index(value)?;
        let color = &color_map.colors()[index];

        let properties = &mut feature.properties;
        properties.insert(FILL_PROPERTY.into(), Value::String(color.clone()));
        properties.insert(FILL_OPACITY_PROPERTY.into(), json!(opacity));
        properties.insert(LEGEND_INDEX_PROPERTY.into(), json!(index));
        // JSON has no infinities; those keep the member they came with.
        if let Some(number) = Number::from_f64(value) {
            properties.insert(DATA_PROPERTY.into(), Value::Number(number));
        }
        features.push(feature);
    }

    if skipped > 0 {
        warn!(skipped, kept = features.len(), "features without a numeric value");
    }

    Ok(StyledLayer {
        collection: FeatureCollection {
            features,
            ..collection
        },
        skipped,
    })
}

/// Attach the map label of `layer` to each boundary feature.
pub fn label_boundary_layer(mut collection: FeatureCollection, layer: BoundaryLayer) -> FeatureCollection {
    for feature in &mut collection.features {
        label_feature(feature, layer);
    }
    collection
}

fn label_feature(feature: &mut Feature, layer: BoundaryLayer) {
    match layer.feature_label(&feature.properties) {
        Some(label) => {
            feature
                .properties
                .insert(LABEL_PROPERTY.into(), Value::String(label));
        }
        None => warn!(%layer, property = layer.label_property(), "boundary feature has no name"),
    }
}

/// Report links of the styled cells, in feature order.
pub fn ci_report_urls(collection: &FeatureCollection) -> Vec<&str> {
    collection
        .features
        .iter()
        .filter_map(|feature| feature.properties.get(CI_REPORT_PROPERTY)?.as_str())
        .collect()
}
