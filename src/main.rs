//! hazard-map binary: drives a map session from the command line and writes the
//! drawn layer, legend and overlays to disk.

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use hazard_map::{
    config::AppConfig,
    dto::metadata::Metadata,
    error::ClientError,
    services::{
        api_client::HttpHazardApi,
        postcode::{PostcodeError, PostcodeLookup},
        session::{MapSession, SessionReport},
    },
    state::{BoundaryLayer, Calculation, Endpoints, UiEvent},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "hazard-map")]
#[command(version, about = "Render climate hazard map layers", long_about = None)]
struct Cli {
    /// Scenario key, e.g. `extreme_temp` (defaults to the first one).
    #[arg(short, long)]
    scenario: Option<String>,

    /// Calculation: intensity, intensity_change, return_time or frequency_change.
    #[arg(short, long)]
    calculation: Option<Calculation>,

    /// Hazard argument as `name=value`; repeatable.
    #[arg(short, long = "arg", value_parser = parse_argument)]
    args: Vec<(String, f64)>,

    /// Boundary overlay, or `none`.
    #[arg(short, long)]
    boundary: Option<String>,

    /// Data layer opacity in [0, 1].
    #[arg(long)]
    opacity: Option<f64>,

    /// Center the map on this postcode.
    #[arg(short, long)]
    postcode: Option<String>,

    /// Read metadata from a file instead of the service.
    #[arg(long)]
    metadata_file: Option<PathBuf>,

    /// Directory receiving the output files.
    #[arg(short, long, env = "HAZARD_MAP_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if let Some(dir) = cli.output_dir.clone() {
        config.output_dir = dir;
    }
    let config = config.validated()?;

    let endpoints = Endpoints::new(&config.api_base_url)?;
    let api = Arc::new(HttpHazardApi::new(endpoints.clone(), config.request_timeout())?);

    let mut session = match &cli.metadata_file {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading metadata file {}", path.display()))?;
            let metadata: Metadata = serde_json::from_str(&contents)
                .with_context(|| format!("parsing metadata file {}", path.display()))?;
            MapSession::with_metadata(api, metadata, endpoints, config.output_dir.clone())?
        }
        None => MapSession::connect(api, endpoints, config.output_dir.clone())
            .await
            .context("loading hazard metadata")?,
    };

    log_report(session.dispatch(UiEvent::Initialise).await?);

    let mut events = Vec::new();
    if let Some(scenario) = cli.scenario {
        events.push(UiEvent::SelectScenario(scenario));
    }
    if let Some(calculation) = cli.calculation {
        events.push(UiEvent::SelectCalculation(calculation));
    }
    for (name, value) in cli.args {
        events.push(UiEvent::SetArgument { name, value });
    }
    let opacity = cli.opacity.unwrap_or(config.default_opacity);
    events.push(UiEvent::SetOpacity(opacity));
    if let Some(boundary) = cli.boundary {
        let layer = BoundaryLayer::parse_optional(&boundary)?;
        events.push(UiEvent::SelectBoundaryLayer(layer));
    }

    for event in events {
        log_report(session.dispatch(event).await?);
    }

    if let Some(postcode) = cli.postcode {
        let lookup = PostcodeLookup::new(&config.postcode_api_url, config.request_timeout())?;
        match session.search_postcode(&lookup, &postcode).await {
            Ok(report) => log_report(report),
            Err(ClientError::Postcode(
                err @ (PostcodeError::NotFound(_) | PostcodeError::Malformed { .. }),
            )) => {
                warn!("{err}");
            }
            Err(err) => return Err(err.into()),
        }
    }

    let state = session.store().state();
    info!(
        scenario = state.scenario.as_deref().unwrap_or_default(),
        calculation = ?state.calculation,
        args = ?state.args,
        output = %session.output_dir().display(),
        "map rendered"
    );
    Ok(())
}

/// Parse a `name=value` hazard argument.
fn parse_argument(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid value for `{name}`: {err}"))?;
    Ok((name.trim().to_string(), value))
}

fn log_report(report: SessionReport) {
    for path in &report.written {
        info!(path = %path.display(), "written");
    }
    for path in &report.removed {
        info!(path = %path.display(), "removed");
    }
    if report.skipped_features > 0 {
        warn!(skipped = report.skipped_features, "features without a value were not drawn");
    }
    if let Some(center) = report.center {
        info!(easting = center.easting, northing = center.northing, "map centered");
    }
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,hazard_map=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hazard_arguments() {
        assert_eq!(
            parse_argument("return_time=50"),
            Ok(("return_time".to_string(), 50.0))
        );
        assert!(parse_argument("return_time").is_err());
        assert!(parse_argument("covariate=warm").is_err());
    }

    #[test]
    fn cli_accepts_repeated_arguments() {
        let cli = Cli::try_parse_from([
            "hazard-map",
            "--scenario",
            "extreme_temp",
            "--calculation",
            "return_time",
            "--arg",
            "covariate=1.5",
            "--arg",
            "intensity=35",
            "--boundary",
            "none",
        ])
        .unwrap();
        assert_eq!(cli.calculation, Some(Calculation::ReturnTime));
        assert_eq!(cli.args.len(), 2);
        assert_eq!(cli.boundary.as_deref(), Some("none"));
    }
}
