//! SVG rendering of a legend: one colored square per bucket, lowest bucket at
//! the bottom.

use std::fmt::Write;

use crate::dto::legend::Legend;

/// Side of a color square, also the row height.
pub const BOX_SIZE: u32 = 30;
/// Width of the drawing.
pub const LEGEND_WIDTH: u32 = 300;
/// Gap between a square and its label.
const LABEL_GAP: u32 = 5;

/// Render `legend` as a standalone SVG document.
pub fn render_legend_svg(legend: &Legend) -> String {
    let rows = u32::try_from(legend.entries.len()).unwrap_or(u32::MAX);
    let height = BOX_SIZE.saturating_mul(rows);
    let mut svg = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{LEGEND_WIDTH}" height="{height}">"#
    );
    let _ = writeln!(svg, "  <title>{}</title>", escape_xml(&legend.title));

    let mut y = height.saturating_sub(BOX_SIZE);
    for entry in &legend.entries {
        let _ = writeln!(
            svg,
            r#"  <rect x="0" y="{y}" width="{BOX_SIZE}" height="{BOX_SIZE}" fill="{}"/>"#,
            escape_xml(&entry.color)
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{}" y="{}" dominant-baseline="middle" xml:space="preserve">{}</text>"#,
            BOX_SIZE + LABEL_GAP,
            y + BOX_SIZE / 2,
            escape_xml(&entry.label)
        );
        y = y.saturating_sub(BOX_SIZE);
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_map::{ColorMap, EndpointPolicy};

    fn legend() -> Legend {
        let color_map = ColorMap::new(
            vec![25.0, 27.0],
            vec!["#ffffe5".into(), "#fff7bc".into(), "#fee391".into()],
            EndpointPolicy::OutOfRange,
            0,
        )
        .unwrap();
        Legend {
            title: "Legend (in °C):".into(),
            entries: color_map.legend(),
            color_map,
        }
    }

    #[test]
    fn stacks_rows_bottom_up() {
        let svg = render_legend_svg(&legend());
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="90">"#
        ));
        assert!(svg.contains(r##"<rect x="0" y="60" width="30" height="30" fill="#ffffe5"/>"##));
        assert!(svg.contains(r##"<rect x="0" y="0" width="30" height="30" fill="#fee391"/>"##));
        assert!(svg.contains(r#"<text x="35" y="75""#));
        assert!(svg.contains("<title>Legend (in °C):</title>"));
    }

    #[test]
    fn escapes_labels() {
        let svg = render_legend_svg(&legend());
        assert!(svg.contains(">   &lt; 25</text>"));
        assert!(svg.contains(">27 &lt;</text>"));
        assert!(!svg.contains("   < 25"));
    }
}
