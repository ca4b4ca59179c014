use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    dto::{legend::LegendSpec, validation::validate_argument_values},
    state::selection::Calculation,
};

/// Document served by `/data/metadata`: which scenarios exist, which hazard
/// each (scenario, calculation) pair maps to, and how to draw each hazard.
///
/// Map order is significant: the first scenario and its first calculation are
/// the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Scenario key to dropdown label and calculations.
    pub ui_selection: IndexMap<String, ScenarioSelection>,
    /// Hazard key to hazard definition.
    pub hazards: IndexMap<String, HazardDefinition>,
}

/// Scenario entry in the selection tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSelection {
    /// Text shown in the scenario dropdown.
    pub ui_label: String,
    /// Calculation to hazard key.
    pub calculations: IndexMap<Calculation, String>,
}

/// Client-facing description of one hazard computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardDefinition {
    /// Query parameter names, in URL order.
    #[serde(default)]
    pub arg_names: Vec<String>,
    /// Slider label per argument; empty strings mean no label.
    #[serde(default)]
    pub arg_labels: Vec<String>,
    /// Text shown in the calculation dropdown.
    #[serde(default)]
    pub calculation_dropdown_label: String,
    /// HTML description with `{arg_name}` placeholders.
    #[serde(default)]
    pub calculation_description_template: String,
    /// Allowed values per argument, parallel to `arg_names`.
    #[serde(default)]
    pub args: Vec<Vec<f64>>,
    /// How to color and label the data layer.
    pub legend: LegendSpec,
}

impl HazardDefinition {
    /// Allowed values of argument `name`.
    pub fn allowed_values(&self, name: &str) -> Option<&[f64]> {
        let index = self.arg_names.iter().position(|arg| arg == name)?;
        self.args.get(index).map(Vec::as_slice)
    }

    /// Slider label of argument `index`, if it has a non-empty one.
    pub fn arg_label(&self, index: usize) -> Option<&str> {
        self.arg_labels
            .get(index)
            .map(String::as_str)
            .filter(|label| !label.is_empty())
    }
}

impl Validate for HazardDefinition {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.arg_names.len() != self.args.len() {
            let mut err = ValidationError::new("argument_count");
            err.message = Some(
                format!(
                    "{} argument names but {} value lists",
                    self.arg_names.len(),
                    self.args.len()
                )
                .into(),
            );
            errors.add("args", err);
        }

        for values in &self.args {
            if let Err(e) = validate_argument_values(values) {
                errors.add("args", e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Inconsistencies between a selection and the metadata document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetadataError {
    /// The document lists no scenario.
    #[error("metadata lists no scenario")]
    NoScenarios,
    /// The scenario key is not in `ui_selection`.
    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),
    /// The scenario offers no calculation at all.
    #[error("scenario `{0}` offers no calculation")]
    NoCalculations(String),
    /// The scenario does not offer this calculation.
    #[error("scenario `{scenario}` has no `{calculation}` calculation")]
    UnknownCalculation {
        /// Scenario key.
        scenario: String,
        /// Requested calculation.
        calculation: Calculation,
    },
    /// `ui_selection` points at a hazard missing from `hazards`.
    #[error("scenario `{scenario}` / `{calculation}` refers to missing hazard `{hazard}`")]
    MissingHazard {
        /// Scenario key.
        scenario: String,
        /// Calculation.
        calculation: Calculation,
        /// Dangling hazard key.
        hazard: String,
    },
    /// A hazard's argument lists are malformed.
    #[error("hazard `{hazard}` is malformed: {errors}")]
    MalformedHazard {
        /// Hazard key.
        hazard: String,
        /// What failed.
        errors: ValidationErrors,
    },
}

/// Hazard selected by a (scenario, calculation) pair.
#[derive(Debug, Clone, Copy)]
pub struct HazardRef<'a> {
    /// Hazard key, used in data URLs.
    pub name: &'a str,
    /// Hazard definition.
    pub definition: &'a HazardDefinition,
}

impl Metadata {
    /// First scenario key, the default selection.
    pub fn first_scenario(&self) -> Result<&str, MetadataError> {
        self.ui_selection
            .keys()
            .next()
            .map(String::as_str)
            .ok_or(MetadataError::NoScenarios)
    }

    /// Scenario entry for `name`.
    pub fn scenario(&self, name: &str) -> Result<&ScenarioSelection, MetadataError> {
        self.ui_selection
            .get(name)
            .ok_or_else(|| MetadataError::UnknownScenario(name.to_string()))
    }

    /// Hazard computed for `calculation` under `scenario`.
    pub fn hazard(
        &self,
        scenario: &str,
        calculation: Calculation,
    ) -> Result<HazardRef<'_>, MetadataError> {
        let selection = self.scenario(scenario)?;
        let name = selection.calculations.get(&calculation).ok_or_else(|| {
            MetadataError::UnknownCalculation {
                scenario: scenario.to_string(),
                calculation,
            }
        })?;
        let definition = self
            .hazards
            .get(name)
            .ok_or_else(|| MetadataError::MissingHazard {
                scenario: scenario.to_string(),
                calculation,
                hazard: name.clone(),
            })?;
        Ok(HazardRef { name, definition })
    }

    /// Check that the selection tree only points at existing, well-formed
    /// hazards. Legends are checked when a hazard is selected.
    pub fn check(&self) -> Result<(), MetadataError> {
        if self.ui_selection.is_empty() {
            return Err(MetadataError::NoScenarios);
        }
        for (scenario, selection) in &self.ui_selection {
            if selection.calculations.is_empty() {
                return Err(MetadataError::NoCalculations(scenario.clone()));
            }
            for &calculation in selection.calculations.keys() {
                let hazard = self.hazard(scenario, calculation)?;
                hazard
                    .definition
                    .validate()
                    .map_err(|errors| MetadataError::MalformedHazard {
                        hazard: hazard.name.to_string(),
                        errors,
                    })?;
            }
        }
        Ok(())
    }
}
