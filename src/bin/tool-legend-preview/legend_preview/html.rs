#![forbid(unsafe_code)]

use super::swatch::Swatch;
use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};

pub struct LegendBlock {
    pub hazard: String,
    pub title: String,
    pub rows: Vec<(String, Swatch)>,
    pub error: Option<String>,
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn write_html_page(
    title: &str,
    blocks: &[LegendBlock],
    path: impl AsRef<std::path::Path>,
) -> Result<std::path::PathBuf> {
    let path = path.as_ref();
    let f = File::create(path)?;
    let mut w = BufWriter::new(f);
    writeln!(
        w,
        r#"<!doctype html><meta charset="utf-8">
<style>
  body{{margin:0;background:#111;color:#eee;font-family:system-ui}}
  h2{{margin:12px}}
  .g{{display:grid;grid-template-columns:repeat(auto-fill,minmax(260px,1fr));gap:12px;padding:8px}}
  .l{{display:flex;flex-direction:column-reverse;gap:2px}}
  .s{{height:30px;border-radius:6px;display:flex;align-items:center;padding:0 10px;
      font-weight:700;white-space:pre}}
  .e{{color:#f66}}
</style>
<h2>{title}</h2>
<div class="g">"#
    )?;
    for block in blocks {
        writeln!(w, "<section><h3>{}</h3>", escape(&block.hazard))?;
        if let Some(error) = &block.error {
            writeln!(w, r#"<p class="e">{}</p></section>"#, escape(error))?;
            continue;
        }
        writeln!(w, "<p>{}</p><div class=\"l\">", escape(&block.title))?;
        for (label, swatch) in &block.rows {
            writeln!(
                w,
                r#"<div class="s" style="background:{};color:{}">{} | {}</div>"#,
                swatch.hex(),
                swatch.text_color(),
                escape(label),
                swatch.hex()
            )?;
        }
        writeln!(w, "</div></section>")?;
    }
    writeln!(w, "</div>")?;
    w.flush()?;
    Ok(path.to_path_buf())
}
