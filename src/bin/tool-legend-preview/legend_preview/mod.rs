//! Helper tool rendering every hazard legend of a metadata document into one
//! HTML page

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

mod html;
mod swatch;

use anyhow::{Context, Result};
use clap::Parser;
use hazard_map::dto::{legend::Legend, metadata::Metadata};
use html::{LegendBlock, write_html_page};
use std::{env, fs, path::PathBuf};
use swatch::Swatch;

#[derive(Debug, Parser)]
#[command(name = "tool-legend-preview", about = "Preview hazard legends as HTML")]
struct Args {
    /// Metadata document, as served by `/data/metadata`.
    metadata: PathBuf,
    /// Output file (defaults to `$CARGO_TARGET_DIR/tool-legend-preview/legends.html`).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let contents = fs::read_to_string(&args.metadata)
        .with_context(|| format!("reading {}", args.metadata.display()))?;
    let metadata: Metadata = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", args.metadata.display()))?;

    let output = match args.output {
        Some(path) => path,
        None => {
            let target_dir = env::var("CARGO_TARGET_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("target"));
            let out_dir = target_dir.join("tool-legend-preview");
            fs::create_dir_all(&out_dir)?;
            out_dir.join("legends.html")
        }
    };

    let blocks = metadata
        .hazards
        .iter()
        .map(|(name, hazard)| legend_block(name, &Legend::try_from(&hazard.legend)))
        .collect::<Result<Vec<_>>>()?;
    let invalid = blocks.iter().filter(|block| block.error.is_some()).count();

    let path = write_html_page("Hazard legends", &blocks, output)?;
    println!(
        "Rendered {} legends ({} invalid) into {}",
        blocks.len(),
        invalid,
        path.display()
    );
    Ok(())
}

fn legend_block(
    hazard: &str,
    legend: &Result<Legend, hazard_map::color_map::ColorMapError>,
) -> Result<LegendBlock> {
    match legend {
        Ok(legend) => {
            let rows = legend
                .entries
                .iter()
                .map(|entry| {
                    let swatch = Swatch::parse(&entry.color)
                        .with_context(|| format!("hazard {hazard}: color {}", entry.color))?;
                    Ok((entry.label.clone(), swatch))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(LegendBlock {
                hazard: hazard.to_string(),
                title: legend.title.clone(),
                rows,
                error: None,
            })
        }
        Err(err) => Ok(LegendBlock {
            hazard: hazard.to_string(),
            title: String::new(),
            rows: Vec::new(),
            error: Some(err.to_string()),
        }),
    }
}
