use indexmap::IndexMap;
use reqwest::Url;
use thiserror::Error;
use tracing::debug;
use validator::Validate;

use crate::{
    color_map::ColorMapError,
    dto::{
        legend::Legend,
        metadata::{HazardRef, Metadata, MetadataError},
    },
    state::{
        boundary::BoundaryLayer,
        description::render_description,
        endpoints::Endpoints,
        selection::{
            Calculation, DataFormat, GridReference, UiEvent, UiState, slider_value_text,
        },
    },
};

/// Two argument values closer than this are the same slider position.
const VALUE_TOLERANCE: f64 = 1e-9;

/// Formats offered as downloads next to the map.
const DOWNLOAD_FORMATS: [DataFormat; 2] = [DataFormat::Csv, DataFormat::NetCdf];

/// Read-only inputs of the reducer.
#[derive(Debug, Clone, Copy)]
pub struct ReducerContext<'a> {
    /// Metadata document fetched at startup.
    pub metadata: &'a Metadata,
    /// URL builder for the hazard service.
    pub endpoints: &'a Endpoints,
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    /// State after the event.
    pub state: UiState,
    /// Side effects to run, in order.
    pub effects: Vec<Effect>,
}

/// Side effect requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Redraw the side panel.
    UpdateControls(ControlPanel),
    /// Load the data layer.
    FetchData(DataFetch),
    /// Redraw the legend.
    DrawLegend(Legend),
    /// Change the data layer opacity.
    SetOpacity(f64),
    /// Load and draw an administrative boundary overlay.
    ShowBoundaryLayer {
        /// Overlay to draw.
        layer: BoundaryLayer,
        /// GeoJSON source.
        url: Url,
    },
    /// Remove the boundary overlay.
    HideBoundaryLayer,
    /// Pan the map to a location.
    CenterOn(GridReference),
}

/// Request for the data layer of the active hazard.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFetch {
    /// Store version that issued the request; responses of older tickets are
    /// stale. Zero until the store stamps it.
    pub ticket: u64,
    /// Hazard key.
    pub hazard: String,
    /// GeoJSON URL.
    pub url: Url,
}

/// Dropdown entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption<T> {
    /// Submitted value.
    pub value: T,
    /// Visible text.
    pub label: String,
    /// Whether this is the current choice.
    pub selected: bool,
}

/// One argument slider.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderView {
    /// Argument name.
    pub name: String,
    /// Text above the slider, if any.
    pub label: Option<String>,
    /// Allowed values, one tick each.
    pub values: Vec<f64>,
    /// Distance between the first two ticks.
    pub step: Option<f64>,
    /// Index of the current value in `values`.
    pub selected: usize,
    /// Current value as displayed.
    pub value_text: String,
}

/// Link to the active layer in another format.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadLink {
    /// Served format.
    pub format: DataFormat,
    /// Download URL.
    pub url: Url,
}

/// Everything the side panel shows for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    /// Scenario dropdown.
    pub scenarios: Vec<SelectOption<String>>,
    /// Calculation dropdown of the selected scenario.
    pub calculations: Vec<SelectOption<Calculation>>,
    /// Argument sliders of the active hazard.
    pub sliders: Vec<SliderView>,
    /// Rendered calculation description (HTML).
    pub description: String,
    /// Download links for the active layer.
    pub downloads: Vec<DownloadLink>,
}

/// Events the reducer refuses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReduceError {
    /// Scenario key not in the metadata.
    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),
    /// Calculation not offered by the selected scenario.
    #[error("scenario `{scenario}` does not offer `{calculation}`")]
    UnknownCalculation {
        /// Selected scenario.
        scenario: String,
        /// Rejected calculation.
        calculation: Calculation,
    },
    /// The active hazard has no such argument.
    #[error("hazard `{hazard}` has no argument `{name}`")]
    UnknownArgument {
        /// Active hazard.
        hazard: String,
        /// Rejected argument name.
        name: String,
    },
    /// NaN or infinite argument value.
    #[error("argument `{name}` cannot be set to {value}")]
    InvalidArgumentValue {
        /// Argument name.
        name: String,
        /// Rejected value.
        value: f64,
    },
    /// Opacity outside `[0, 1]`.
    #[error("opacity must lie in [0, 1], got {0}")]
    InvalidOpacity(f64),
    /// The active hazard's legend cannot be drawn.
    #[error("hazard `{hazard}` has an invalid legend: {source}")]
    InvalidLegend {
        /// Hazard key.
        hazard: String,
        /// What is wrong with the legend.
        #[source]
        source: ColorMapError,
    },
    /// The metadata document is inconsistent.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// Apply `event` to `state`. Pure: the caller runs the returned effects.
pub fn reduce(
    state: &UiState,
    event: UiEvent,
    ctx: &ReducerContext<'_>,
) -> Result<Reduction, ReduceError> {
    let initialise = matches!(event, UiEvent::Initialise);
    let mut next = state.clone();
    normalise(&mut next, ctx.metadata)?;

    let mut center_on = None;
    match event {
        UiEvent::Initialise => {}
        UiEvent::SelectScenario(name) => {
            if !ctx.metadata.ui_selection.contains_key(&name) {
                return Err(ReduceError::UnknownScenario(name));
            }
            next.scenario = Some(name);
        }
        UiEvent::SelectCalculation(calculation) => {
            let scenario = selected_scenario(&next)?;
            if !ctx.metadata.scenario(scenario)?.calculations.contains_key(&calculation) {
                return Err(ReduceError::UnknownCalculation {
                    scenario: scenario.to_string(),
                    calculation,
                });
            }
            next.calculation = Some(calculation);
        }
        UiEvent::SetArgument { name, value } => {
            let hazard = active_hazard(&next, ctx.metadata)?;
            let Some(allowed) = hazard.definition.allowed_values(&name) else {
                return Err(ReduceError::UnknownArgument {
                    hazard: hazard.name.to_string(),
                    name,
                });
            };
            if !value.is_finite() {
                return Err(ReduceError::InvalidArgumentValue { name, value });
            }
            let snapped = nearest_allowed(allowed, value).unwrap_or(value);
            next.args.insert(name, snapped);
        }
        UiEvent::SetOpacity(opacity) => {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(ReduceError::InvalidOpacity(opacity));
            }
            next.opacity = opacity;
        }
        UiEvent::SelectBoundaryLayer(layer) => next.boundary_layer = layer,
        UiEvent::CenterOn(location) => center_on = Some(location),
    }

    normalise(&mut next, ctx.metadata)?;
    let hazard = active_hazard(&next, ctx.metadata)?;

    let mut effects = Vec::new();

    let selection_changed = initialise
        || next.scenario != state.scenario
        || next.calculation != state.calculation
        || next.args != state.args;
    if selection_changed {
        effects.push(Effect::UpdateControls(control_panel(&next, hazard, ctx)));
    }

    let request = data_url(hazard, &next.args, ctx.endpoints);
    if initialise || previous_request(state, ctx).as_ref() != Some(&request) {
        let legend =
            Legend::try_from(&hazard.definition.legend).map_err(|source| {
                ReduceError::InvalidLegend {
                    hazard: hazard.name.to_string(),
                    source,
                }
            })?;
        debug!(hazard = hazard.name, url = %request, "data layer request changed");
        effects.push(Effect::FetchData(DataFetch {
            ticket: 0,
            hazard: hazard.name.to_string(),
            url: request,
        }));
        effects.push(Effect::DrawLegend(legend));
    }

    if initialise || next.opacity != state.opacity {
        effects.push(Effect::SetOpacity(next.opacity));
    }

    if initialise || next.boundary_layer != state.boundary_layer {
        effects.push(match next.boundary_layer {
            Some(layer) => Effect::ShowBoundaryLayer {
                layer,
                url: ctx.endpoints.boundary(layer),
            },
            None => Effect::HideBoundaryLayer,
        });
    }

    if let Some(location) = center_on {
        effects.push(Effect::CenterOn(location));
    }

    Ok(Reduction {
        state: next,
        effects,
    })
}

/// Fill in defaults: first scenario, first offered calculation, and one value
/// per argument of the active hazard.
fn normalise(state: &mut UiState, metadata: &Metadata) -> Result<(), ReduceError> {
    let scenario_key = match state.scenario.take() {
        Some(key) => key,
        None => metadata.first_scenario()?.to_string(),
    };
    let scenario = metadata
        .scenario(&scenario_key)
        .map_err(|_| ReduceError::UnknownScenario(scenario_key.clone()))?;

    let calculation = match state.calculation {
        Some(calculation) if scenario.calculations.contains_key(&calculation) => calculation,
        _ => *scenario
            .calculations
            .keys()
            .next()
            .ok_or_else(|| MetadataError::NoCalculations(scenario_key.clone()))?,
    };

    let hazard = metadata.hazard(&scenario_key, calculation)?;
    hazard
        .definition
        .validate()
        .map_err(|errors| MetadataError::MalformedHazard {
            hazard: hazard.name.to_string(),
            errors,
        })?;

    let mut args = IndexMap::with_capacity(hazard.definition.arg_names.len());
    for (name, allowed) in hazard.definition.arg_names.iter().zip(&hazard.definition.args) {
        let value = state
            .args
            .get(name)
            .copied()
            .filter(|&previous| is_allowed(allowed, previous))
            .unwrap_or_else(|| default_value(allowed));
        args.insert(name.clone(), value);
    }

    state.scenario = Some(scenario_key);
    state.calculation = Some(calculation);
    state.args = args;
    Ok(())
}

fn selected_scenario(state: &UiState) -> Result<&str, ReduceError> {
    state
        .scenario
        .as_deref()
        .ok_or(ReduceError::Metadata(MetadataError::NoScenarios))
}

/// Hazard of a normalised state.
fn active_hazard<'m>(state: &UiState, metadata: &'m Metadata) -> Result<HazardRef<'m>, ReduceError> {
    let scenario = selected_scenario(state)?;
    let calculation = state.calculation.ok_or_else(|| {
        ReduceError::Metadata(MetadataError::NoCalculations(scenario.to_string()))
    })?;
    Ok(metadata.hazard(scenario, calculation)?)
}

/// Data request of a state as it was, without filling defaults. `None` when
/// the state did not select a complete hazard.
fn previous_request(state: &UiState, ctx: &ReducerContext<'_>) -> Option<Url> {
    let scenario = state.scenario.as_deref()?;
    let hazard = ctx.metadata.hazard(scenario, state.calculation?).ok()?;
    let complete = hazard
        .definition
        .arg_names
        .iter()
        .all(|name| state.args.contains_key(name));
    complete.then(|| data_url(hazard, &state.args, ctx.endpoints))
}

fn data_url(hazard: HazardRef<'_>, args: &IndexMap<String, f64>, endpoints: &Endpoints) -> Url {
    endpoints.data(hazard.name, DataFormat::GeoJson, &ordered_args(hazard, args))
}

/// Argument values in `arg_names` order.
fn ordered_args(hazard: HazardRef<'_>, args: &IndexMap<String, f64>) -> Vec<(String, f64)> {
    hazard
        .definition
        .arg_names
        .iter()
        .filter_map(|name| args.get(name).map(|value| (name.clone(), *value)))
        .collect()
}

fn control_panel(state: &UiState, hazard: HazardRef<'_>, ctx: &ReducerContext<'_>) -> ControlPanel {
    let metadata = ctx.metadata;
    let scenario_key = state.scenario.as_deref().unwrap_or_default();

    let scenarios = metadata
        .ui_selection
        .iter()
        .map(|(key, selection)| SelectOption {
            value: key.clone(),
            label: selection.ui_label.clone(),
            selected: key == scenario_key,
        })
        .collect();

    let calculations = metadata
        .ui_selection
        .get(scenario_key)
        .map(|selection| {
            selection
                .calculations
                .iter()
                .map(|(&calculation, hazard_key)| SelectOption {
                    value: calculation,
                    label: metadata
                        .hazards
                        .get(hazard_key)
                        .map(|hazard| hazard.calculation_dropdown_label.clone())
                        .filter(|label| !label.is_empty())
                        .unwrap_or_else(|| calculation.to_string()),
                    selected: Some(calculation) == state.calculation,
                })
                .collect()
        })
        .unwrap_or_default();

    let definition = hazard.definition;
    let sliders = definition
        .arg_names
        .iter()
        .zip(&definition.args)
        .enumerate()
        .map(|(index, (name, values))| {
            let value = state.args.get(name).copied().unwrap_or_else(|| default_value(values));
            SliderView {
                name: name.clone(),
                label: definition.arg_label(index).map(str::to_string),
                values: values.clone(),
                step: match values.as_slice() {
                    [first, second, ..] => Some(second - first),
                    _ => None,
                },
                selected: nearest_index(values, value).unwrap_or_default(),
                value_text: slider_value_text(name, value),
            }
        })
        .collect();

    let args = ordered_args(hazard, &state.args);
    let downloads = DOWNLOAD_FORMATS
        .into_iter()
        .map(|format| DownloadLink {
            format,
            url: ctx.endpoints.data(hazard.name, format, &args),
        })
        .collect();

    ControlPanel {
        scenarios,
        calculations,
        sliders,
        description: render_description(&definition.calculation_description_template, &state.args),
        downloads,
    }
}

fn is_allowed(allowed: &[f64], value: f64) -> bool {
    allowed.iter().any(|v| (v - value).abs() <= VALUE_TOLERANCE)
}

/// Middle tick, where a range input starts.
fn default_value(allowed: &[f64]) -> f64 {
    allowed.get(allowed.len() / 2).copied().unwrap_or_default()
}

fn nearest_index(allowed: &[f64], value: f64) -> Option<usize> {
    allowed
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - value).abs().total_cmp(&(*b - value).abs()))
        .map(|(index, _)| index)
}

fn nearest_allowed(allowed: &[f64], value: f64) -> Option<f64> {
    nearest_index(allowed, value).map(|index| allowed[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color_map::EndpointPolicy,
        dto::metadata::fixtures,
        state::selection::DEFAULT_OPACITY,
    };

    struct Fixture {
        metadata: Metadata,
        endpoints: Endpoints,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                metadata: fixtures::metadata(),
                endpoints: Endpoints::new("http://localhost:5000/scotclimpact").unwrap(),
            }
        }

        fn ctx(&self) -> ReducerContext<'_> {
            ReducerContext {
                metadata: &self.metadata,
                endpoints: &self.endpoints,
            }
        }

        fn reduce(&self, state: &UiState, event: UiEvent) -> Result<Reduction, ReduceError> {
            reduce(state, event, &self.ctx())
        }

        fn initialised(&self) -> UiState {
            self.reduce(&UiState::default(), UiEvent::Initialise)
                .unwrap()
                .state
        }
    }

    fn fetch_url(effects: &[Effect]) -> Option<&str> {
        effects.iter().find_map(|effect| match effect {
            Effect::FetchData(fetch) => Some(fetch.url.as_str()),
            _ => None,
        })
    }

    fn controls(effects: &[Effect]) -> &ControlPanel {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::UpdateControls(panel) => Some(panel),
                _ => None,
            })
            .expect("controls were updated")
    }

    #[test]
    fn initialise_selects_first_entries_and_emits_everything() {
        let fixture = Fixture::new();
        let reduction = fixture
            .reduce(&UiState::default(), UiEvent::Initialise)
            .unwrap();

        assert_eq!(reduction.state.scenario.as_deref(), Some("extreme_temp"));
        assert_eq!(reduction.state.calculation, Some(Calculation::Intensity));
        assert_eq!(reduction.state.args["covariate"], 2.0);
        assert_eq!(reduction.state.args["return_time"], 60.0);

        let effects = &reduction.effects;
        assert_eq!(effects.len(), 5);
        assert!(matches!(effects[0], Effect::UpdateControls(_)));
        assert_eq!(
            fetch_url(effects),
            Some(
                "http://localhost:5000/scotclimpact/data/map/extreme_temp_intensity?covariate=2&return_time=60"
            )
        );
        assert!(matches!(&effects[2], Effect::DrawLegend(legend) if legend.entries.len() == 9));
        assert_eq!(effects[3], Effect::SetOpacity(DEFAULT_OPACITY));
        assert_eq!(effects[4], Effect::HideBoundaryLayer);
    }

    #[test]
    fn control_panel_describes_the_selection() {
        let fixture = Fixture::new();
        let reduction = fixture
            .reduce(&UiState::default(), UiEvent::Initialise)
            .unwrap();
        let panel = controls(&reduction.effects);

        let scenarios: Vec<_> = panel
            .scenarios
            .iter()
            .map(|option| (option.value.as_str(), option.selected))
            .collect();
        assert_eq!(
            scenarios,
            [("extreme_temp", true), ("extreme_3day_precip", false)]
        );
        assert_eq!(panel.calculations.len(), 3);
        assert_eq!(
            panel.calculations[0].label,
            "Hottest temperature expected to be exceeded in # years."
        );

        let covariate = &panel.sliders[0];
        assert_eq!(covariate.label, None);
        assert_eq!(covariate.step, Some(0.5));
        assert_eq!(covariate.selected, 4);
        assert_eq!(covariate.value_text, "2.0");
        let return_time = &panel.sliders[1];
        assert_eq!(return_time.step, Some(10.0));
        assert_eq!(return_time.value_text, "60");
        assert!(return_time.label.is_some());

        assert_eq!(
            panel.description,
            "<p>Hottest temperature expected in 60 years at +2 °C.</p>"
        );
        assert_eq!(
            panel.downloads[1].url.as_str(),
            "http://localhost:5000/scotclimpact/data/map/extreme_temp_intensity/netcdf?covariate=2&return_time=60"
        );
    }

    #[test]
    fn set_argument_snaps_and_refetches() {
        let fixture = Fixture::new();
        let state = fixture.initialised();

        let reduction = fixture
            .reduce(
                &state,
                UiEvent::SetArgument {
                    name: "return_time".into(),
                    value: 97.0,
                },
            )
            .unwrap();
        assert_eq!(reduction.state.args["return_time"], 100.0);
        assert_eq!(
            fetch_url(&reduction.effects),
            Some(
                "http://localhost:5000/scotclimpact/data/map/extreme_temp_intensity?covariate=2&return_time=100"
            )
        );
        assert_eq!(reduction.effects.len(), 3);
        assert!(matches!(reduction.effects[0], Effect::UpdateControls(_)));
        assert!(matches!(reduction.effects[1], Effect::FetchData(_)));
        assert!(matches!(reduction.effects[2], Effect::DrawLegend(_)));
    }

    #[test]
    fn unchanged_request_does_not_refetch() {
        let fixture = Fixture::new();
        let state = fixture.initialised();

        let reduction = fixture
            .reduce(
                &state,
                UiEvent::SetArgument {
                    name: "return_time".into(),
                    value: 61.0,
                },
            )
            .unwrap();
        assert_eq!(reduction.state, state);
        assert!(reduction.effects.is_empty());
    }

    #[test]
    fn switching_calculation_keeps_compatible_arguments() {
        let fixture = Fixture::new();
        let state = fixture.initialised();
        let state = fixture
            .reduce(
                &state,
                UiEvent::SetArgument {
                    name: "covariate".into(),
                    value: 3.5,
                },
            )
            .unwrap()
            .state;

        let reduction = fixture
            .reduce(&state, UiEvent::SelectCalculation(Calculation::ReturnTime))
            .unwrap();
        let args: Vec<_> = reduction
            .state
            .args
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        assert_eq!(args, [("covariate", 3.5), ("intensity", 35.0)]);
        assert_eq!(
            fetch_url(&reduction.effects),
            Some(
                "http://localhost:5000/scotclimpact/data/map/extreme_temp_return_time?covariate=3.5&intensity=35"
            )
        );
    }

    #[test]
    fn switching_scenario_falls_back_to_first_offered_calculation() {
        let fixture = Fixture::new();
        let state = fixture.initialised();
        let reduction = fixture
            .reduce(
                &state,
                UiEvent::SelectScenario("extreme_3day_precip".into()),
            )
            .unwrap();
        assert_eq!(reduction.state.calculation, Some(Calculation::ReturnTime));

        let state = fixture
            .reduce(&state, UiEvent::SelectCalculation(Calculation::ReturnTime))
            .unwrap()
            .state;
        let reduction = fixture
            .reduce(
                &state,
                UiEvent::SelectScenario("extreme_3day_precip".into()),
            )
            .unwrap();
        assert_eq!(reduction.state.calculation, Some(Calculation::ReturnTime));
        assert_eq!(reduction.state.args["intensity"], 175.0);
    }

    #[test]
    fn rejects_unknown_selections() {
        let fixture = Fixture::new();
        let state = fixture.initialised();

        assert_eq!(
            fixture.reduce(&state, UiEvent::SelectScenario("drought".into())),
            Err(ReduceError::UnknownScenario("drought".into()))
        );
        assert_eq!(
            fixture.reduce(&state, UiEvent::SelectCalculation(Calculation::FrequencyChange)),
            Err(ReduceError::UnknownCalculation {
                scenario: "extreme_temp".into(),
                calculation: Calculation::FrequencyChange
            })
        );
        assert_eq!(
            fixture.reduce(
                &state,
                UiEvent::SetArgument {
                    name: "intensity".into(),
                    value: 30.0
                }
            ),
            Err(ReduceError::UnknownArgument {
                hazard: "extreme_temp_intensity".into(),
                name: "intensity".into()
            })
        );
        assert!(matches!(
            fixture.reduce(
                &state,
                UiEvent::SetArgument {
                    name: "covariate".into(),
                    value: f64::NAN
                }
            ),
            Err(ReduceError::InvalidArgumentValue { .. })
        ));
    }

    #[test]
    fn opacity_must_be_a_fraction() {
        let fixture = Fixture::new();
        let state = fixture.initialised();

        let reduction = fixture.reduce(&state, UiEvent::SetOpacity(0.25)).unwrap();
        assert_eq!(reduction.effects, [Effect::SetOpacity(0.25)]);
        assert_eq!(reduction.state.opacity, 0.25);

        assert_eq!(
            fixture.reduce(&state, UiEvent::SetOpacity(1.5)),
            Err(ReduceError::InvalidOpacity(1.5))
        );
        assert!(fixture.reduce(&state, UiEvent::SetOpacity(f64::NAN)).is_err());
    }

    #[test]
    fn boundary_layer_toggles_overlay() {
        let fixture = Fixture::new();
        let state = fixture.initialised();

        let reduction = fixture
            .reduce(
                &state,
                UiEvent::SelectBoundaryLayer(Some(BoundaryLayer::HealthBoards)),
            )
            .unwrap();
        assert_eq!(
            reduction.effects,
            [Effect::ShowBoundaryLayer {
                layer: BoundaryLayer::HealthBoards,
                url: Url::parse("http://localhost:5000/scotclimpact/boundaries/health_boards")
                    .unwrap(),
            }]
        );

        let reduction = fixture
            .reduce(&reduction.state, UiEvent::SelectBoundaryLayer(None))
            .unwrap();
        assert_eq!(reduction.effects, [Effect::HideBoundaryLayer]);
    }

    #[test]
    fn center_on_only_moves_the_map() {
        let fixture = Fixture::new();
        let state = fixture.initialised();
        let location = GridReference {
            easting: 326_200.0,
            northing: 673_100.0,
        };
        let reduction = fixture.reduce(&state, UiEvent::CenterOn(location)).unwrap();
        assert_eq!(reduction.effects, [Effect::CenterOn(location)]);
        assert_eq!(reduction.state, state);
    }

    #[test]
    fn invalid_legend_names_the_hazard() {
        let fixture = Fixture::new();
        let state = fixture.initialised();
        let state = fixture
            .reduce(
                &state,
                UiEvent::SelectScenario("extreme_3day_precip".into()),
            )
            .unwrap()
            .state;

        let err = fixture
            .reduce(&state, UiEvent::SelectCalculation(Calculation::FrequencyChange))
            .unwrap_err();
        assert_eq!(
            err,
            ReduceError::InvalidLegend {
                hazard: "extreme_3day_precip_frequency_change".into(),
                source: ColorMapError::ColorCountMismatch {
                    policy: EndpointPolicy::LowerInRange,
                    edges: 7,
                    expected: 7,
                    actual: 6
                }
            }
        );
    }
}
