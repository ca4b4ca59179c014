//! Helper tool rendering every hazard legend of a metadata document into one
//! HTML page

#[cfg(feature = "tool-legend-preview")]
mod legend_preview;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "tool-legend-preview")]
    {
        legend_preview::run()?;
    }
    Ok(())
}
