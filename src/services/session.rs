//! Runs reducer effects against the hazard service and writes what would be
//! drawn on the map into an output directory.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    dto::{geojson::FeatureCollection, legend::Legend, metadata::Metadata},
    error::{ClientError, ClientResult},
    services::{
        api_client::HazardApi,
        layer::{ci_report_urls, label_boundary_layer, style_data_layer},
        legend_svg::render_legend_svg,
        postcode::PostcodeLookup,
    },
    state::{
        Effect, Endpoints, GridReference, ReducerContext, UiEvent, UiStore,
        reducer::{ControlPanel, DataFetch},
    },
};

/// Styled data layer file.
pub const LAYER_FILE: &str = "layer.geojson";
/// Legend drawing file.
pub const LEGEND_FILE: &str = "legend.svg";
/// Labelled boundary overlay file.
pub const BOUNDARY_FILE: &str = "boundary.geojson";

/// What running the effects of one event did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    /// Files written, in order.
    pub written: Vec<PathBuf>,
    /// Files removed.
    pub removed: Vec<PathBuf>,
    /// Side panel, when it changed.
    pub controls: Option<ControlPanel>,
    /// Location the map was centered on.
    pub center: Option<GridReference>,
    /// Data features dropped for lack of a numeric value.
    pub skipped_features: usize,
    /// Data responses discarded because a newer request was issued.
    pub stale_responses: usize,
}

/// A client session: metadata, UI store and the last drawn layer.
pub struct MapSession {
    api: Arc<dyn HazardApi>,
    metadata: Metadata,
    endpoints: Endpoints,
    store: UiStore,
    output_dir: PathBuf,
    legend: Option<Legend>,
    layer: Option<FeatureCollection>,
}

impl MapSession {
    /// Fetch and check the metadata document, then open a session on it.
    pub async fn connect(
        api: Arc<dyn HazardApi>,
        endpoints: Endpoints,
        output_dir: PathBuf,
    ) -> ClientResult<Self> {
        let metadata = api.fetch_metadata().await?;
        Self::with_metadata(api, metadata, endpoints, output_dir)
    }

    /// Open a session on an already loaded metadata document.
    pub fn with_metadata(
        api: Arc<dyn HazardApi>,
        metadata: Metadata,
        endpoints: Endpoints,
        output_dir: PathBuf,
    ) -> ClientResult<Self> {
        metadata.check()?;
        info!(
            scenarios = metadata.ui_selection.len(),
            hazards = metadata.hazards.len(),
            "metadata loaded"
        );
        Ok(Self {
            api,
            metadata,
            endpoints,
            store: UiStore::new(),
            output_dir,
            legend: None,
            layer: None,
        })
    }

    /// Metadata the session runs on.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// UI store.
    pub fn store(&self) -> &UiStore {
        &self.store
    }

    /// Directory receiving the output files.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Apply `event` and run the resulting effects.
    pub async fn dispatch(&mut self, event: UiEvent) -> ClientResult<SessionReport> {
        let ctx = ReducerContext {
            metadata: &self.metadata,
            endpoints: &self.endpoints,
        };
        let effects = self.store.dispatch(event, &ctx)?;
        self.run_effects(effects).await
    }

    /// Look `postcode` up and center the map on it.
    pub async fn search_postcode(
        &mut self,
        lookup: &PostcodeLookup,
        postcode: &str,
    ) -> ClientResult<SessionReport> {
        let location = lookup.lookup(postcode).await?;
        self.dispatch(UiEvent::CenterOn(location)).await
    }

    async fn run_effects(&mut self, effects: Vec<Effect>) -> ClientResult<SessionReport> {
        let mut report = SessionReport::default();
        if effects.is_empty() {
            return Ok(report);
        }
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| ClientError::Output {
                path: self.output_dir.display().to_string(),
                source,
            })?;

        // The legend of a batch colors the layer fetched in the same batch.
        if let Some(legend) = effects.iter().find_map(|effect| match effect {
            Effect::DrawLegend(legend) => Some(legend),
            _ => None,
        }) {
            self.legend = Some(legend.clone());
        }

        for effect in effects {
            match effect {
                Effect::UpdateControls(panel) => {
                    debug!(
                        sliders = panel.sliders.len(),
                        calculations = panel.calculations.len(),
                        "controls updated"
                    );
                    report.controls = Some(panel);
                }
                Effect::FetchData(fetch) => self.load_data_layer(fetch, &mut report).await?,
                Effect::DrawLegend(legend) => {
                    let path = self.output_dir.join(LEGEND_FILE);
                    write_file(&path, render_legend_svg(&legend).into_bytes()).await?;
                    report.written.push(path);
                }
                Effect::SetOpacity(opacity) => {
                    info!(opacity, "data layer opacity");
                    if report.written.iter().all(|path| !path.ends_with(LAYER_FILE)) {
                        self.draw_data_layer(&mut report).await?;
                    }
                }
                Effect::ShowBoundaryLayer { layer, url } => {
                    let collection = self.api.fetch_boundary(layer, url).await?;
                    let labelled = label_boundary_layer(collection, layer);
                    info!(%layer, features = labelled.features.len(), "boundary layer shown");
                    let path = self.output_dir.join(BOUNDARY_FILE);
                    write_json(&path, &labelled).await?;
                    report.written.push(path);
                }
                Effect::HideBoundaryLayer => {
                    let path = self.output_dir.join(BOUNDARY_FILE);
                    match tokio::fs::remove_file(&path).await {
                        Ok(()) => report.removed.push(path),
                        Err(err) if err.kind() == ErrorKind::NotFound => {}
                        Err(source) => {
                            return Err(ClientError::Output {
                                path: path.display().to_string(),
                                source,
                            });
                        }
                    }
                    debug!("boundary layer hidden");
                }
                Effect::CenterOn(location) => {
                    info!(
                        easting = location.easting,
                        northing = location.northing,
                        "centering map"
                    );
                    report.center = Some(location);
                }
            }
        }

        Ok(report)
    }

    async fn load_data_layer(
        &mut self,
        fetch: DataFetch,
        report: &mut SessionReport,
    ) -> ClientResult<()> {
        info!(hazard = %fetch.hazard, url = %fetch.url, ticket = fetch.ticket, "fetching data layer");
        let collection = self.api.fetch_layer(fetch.url).await?;
        if !self.store.is_current(fetch.ticket) {
            warn!(ticket = fetch.ticket, "discarding stale data layer");
            report.stale_responses += 1;
            return Ok(());
        }
        self.layer = Some(collection);
        self.draw_data_layer(report).await
    }

    /// Style the last fetched layer with the current legend and opacity.
    async fn draw_data_layer(&self, report: &mut SessionReport) -> ClientResult<()> {
        let (Some(layer), Some(legend)) = (&self.layer, &self.legend) else {
            return Ok(());
        };
        let styled = style_data_layer(layer.clone(), &legend.color_map, self.store.state().opacity)?;
        debug!(
            features = styled.collection.features.len(),
            reports = ci_report_urls(&styled.collection).len(),
            "data layer styled"
        );
        report.skipped_features += styled.skipped;

        let path = self.output_dir.join(LAYER_FILE);
        write_json(&path, &styled.collection).await?;
        report.written.push(path);
        Ok(())
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> ClientResult<()> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| ClientError::Encode {
        path: path.display().to_string(),
        source,
    })?;
    write_file(path, bytes).await
}

async fn write_file(path: &Path, bytes: Vec<u8>) -> ClientResult<()> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| ClientError::Output {
            path: path.display().to_string(),
            source,
        })
}
