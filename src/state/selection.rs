use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::boundary::BoundaryLayer;

/// Opacity of the data layer before the user touches the slider.
pub const DEFAULT_OPACITY: f64 = 0.7;

/// What is computed for the selected hazard scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Calculation {
    /// Magnitude of the event expected once per return period.
    Intensity,
    /// Change in intensity between two warming levels.
    IntensityChange,
    /// Years between events of a given intensity.
    ReturnTime,
    /// How many times more frequent an event becomes between two warming levels.
    FrequencyChange,
}

impl Calculation {
    /// All calculations, in menu order.
    pub const ALL: [Calculation; 4] = [
        Calculation::Intensity,
        Calculation::IntensityChange,
        Calculation::ReturnTime,
        Calculation::FrequencyChange,
    ];

    /// Key used by the metadata document.
    pub fn as_str(self) -> &'static str {
        match self {
            Calculation::Intensity => "intensity",
            Calculation::IntensityChange => "intensity_change",
            Calculation::ReturnTime => "return_time",
            Calculation::FrequencyChange => "frequency_change",
        }
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calculation name that does not match any [`Calculation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown calculation `{0}`")]
pub struct UnknownCalculationName(pub String);

impl FromStr for Calculation {
    type Err = UnknownCalculationName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Calculation::ALL
            .into_iter()
            .find(|calculation| calculation.as_str() == s)
            .ok_or_else(|| UnknownCalculationName(s.to_string()))
    }
}

/// Format served by the data endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Feature collection drawn on the map.
    GeoJson,
    /// Tabular download.
    Csv,
    /// NetCDF download.
    NetCdf,
}

impl DataFormat {
    /// Path segment naming the format.
    pub fn as_str(self) -> &'static str {
        match self {
            DataFormat::GeoJson => "geojson",
            DataFormat::Csv => "csv",
            DataFormat::NetCdf => "netcdf",
        }
    }
}

/// British National Grid coordinates (EPSG:27700).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridReference {
    /// Metres east of the grid origin.
    pub easting: f64,
    /// Metres north of the grid origin.
    pub northing: f64,
}

/// Everything the user has chosen in the side panel.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Selected scenario key, e.g. `extreme_temp`.
    pub scenario: Option<String>,
    /// Selected calculation.
    pub calculation: Option<Calculation>,
    /// Current value of each hazard argument, in the hazard's argument order.
    pub args: IndexMap<String, f64>,
    /// Administrative boundaries drawn over the data layer.
    pub boundary_layer: Option<BoundaryLayer>,
    /// Data layer opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            scenario: None,
            calculation: None,
            args: IndexMap::new(),
            boundary_layer: None,
            opacity: DEFAULT_OPACITY,
        }
    }
}

/// User input fed to the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// First render: pick defaults and emit every effect.
    Initialise,
    /// Scenario dropdown changed.
    SelectScenario(String),
    /// Calculation dropdown changed.
    SelectCalculation(Calculation),
    /// A hazard argument slider moved.
    SetArgument {
        /// Argument name, e.g. `return_time`.
        name: String,
        /// Requested value; snapped to the nearest allowed value.
        value: f64,
    },
    /// Opacity slider moved.
    SetOpacity(f64),
    /// Boundary dropdown changed (`None` hides the overlay).
    SelectBoundaryLayer(Option<BoundaryLayer>),
    /// A postcode search resolved to a location.
    CenterOn(GridReference),
}

/// Text shown next to a slider: covariates (warming levels) keep one decimal,
/// everything else is shown as a whole number.
pub fn slider_value_text(name: &str, value: f64) -> String {
    let decimals: usize = if name.starts_with("covariate") { 1 } else { 0 };
    format!("{value:.decimals$}")
}

/// Shortest decimal rendering of an argument value, without a trailing `.0`.
pub fn format_arg_value(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculation_round_trips_through_its_name() {
        for calculation in Calculation::ALL {
            assert_eq!(calculation.as_str().parse::<Calculation>(), Ok(calculation));
        }
        assert_eq!(
            "median".parse::<Calculation>(),
            Err(UnknownCalculationName("median".into()))
        );
    }

    #[test]
    fn slider_text_uses_one_decimal_for_covariates() {
        assert_eq!(slider_value_text("covariate", 1.5), "1.5");
        assert_eq!(slider_value_text("covariate_comp", 2.0), "2.0");
        assert_eq!(slider_value_text("return_time", 100.0), "100");
        assert_eq!(slider_value_text("intensity", 32.0), "32");
    }

    #[test]
    fn arg_values_drop_trailing_zero() {
        assert_eq!(format_arg_value(100.0), "100");
        assert_eq!(format_arg_value(1.5), "1.5");
        assert_eq!(format_arg_value(0.0), "0");
    }

    #[test]
    fn default_state_has_nothing_selected() {
        let state = UiState::default();
        assert!(state.scenario.is_none());
        assert!(state.calculation.is_none());
        assert_eq!(state.opacity, DEFAULT_OPACITY);
    }
}
