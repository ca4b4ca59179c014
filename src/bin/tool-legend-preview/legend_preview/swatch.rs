#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use palette::{FromColor, Oklab, Srgb};

const DARK_TEXT_ABOVE: f32 = 0.62; // OKLab lightness where black text reads better

#[derive(Clone, Copy, Debug)]
pub struct Swatch {
    pub rgb: Srgb<u8>,
    pub lab: Oklab,
}

impl Swatch {
    /// Parse a `#rrggbb` color.
    pub fn parse(hex: &str) -> Result<Self> {
        let rgb: Srgb<u8> = hex
            .trim()
            .parse()
            .map_err(|err| anyhow!("invalid hex color `{hex}`: {err}"))?;
        let lab = Oklab::from_color(rgb.into_format::<f32>());
        Ok(Self { rgb, lab })
    }

    #[inline]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.rgb.red, self.rgb.green, self.rgb.blue)
    }

    #[inline]
    pub fn text_color(&self) -> &'static str {
        if self.lab.l > DARK_TEXT_ABOVE { "#111" } else { "#eee" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_readable_text() {
        let light = Swatch::parse("#ffffe5").unwrap();
        assert_eq!(light.text_color(), "#111");
        assert_eq!(light.hex(), "#ffffe5");

        let dark = Swatch::parse("#662506").unwrap();
        assert_eq!(dark.text_color(), "#eee");
    }

    #[test]
    fn rejects_named_colors() {
        assert!(Swatch::parse("orange").is_err());
    }
}
