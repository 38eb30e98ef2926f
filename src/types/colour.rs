//! Editor colour type and parsing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How colour components in a header are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColourScale {
    /// Floats in `[0, 1]`, clamped and scaled to `0..=255`.
    #[default]
    Unit,
    /// Components above `1.0` are already `0..=255` values.
    Legacy,
}

impl ColourScale {
    pub fn name(self) -> &'static str {
        match self {
            ColourScale::Unit => "unit",
            ColourScale::Legacy => "legacy",
        }
    }
}

impl fmt::Display for ColourScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An RGB colour value as shown by the level editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White, used for components that are missing or unreadable.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a QUAKED colour group such as `0 .5 .8`.
    ///
    /// Each of the three components is a float in `[0, 1]`, clamped and
    /// scaled to `0..=255`. Missing or unparseable components count as `1.0`.
    /// With [`ColourScale::Legacy`] a component above `1.0` is taken as a
    /// `0..=255` value as written; smaller ones scale like `Unit`.
    pub fn parse_components(s: &str, scale: ColourScale) -> Self {
        let mut parts = s.split_whitespace();
        let mut next = || scale_component(parts.next(), scale);
        let r = next();
        let g = next();
        let b = next();
        Self::rgb(r, g, b)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

fn scale_component(part: Option<&str>, scale: ColourScale) -> u8 {
    let value = part
        .and_then(|p| p.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(1.0);
    match scale {
        ColourScale::Legacy if value > 1.0 => value.min(255.0).round() as u8,
        _ => (value.clamp(0.0, 1.0) * 255.0).round() as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(s: &str) -> Colour {
        Colour::parse_components(s, ColourScale::Unit)
    }

    #[test]
    fn test_unit_scales() {
        assert_eq!(unit("1 0 0"), Colour::rgb(255, 0, 0));
        assert_eq!(unit("0 .5 .8"), Colour::rgb(0, 128, 204));
    }

    #[test]
    fn test_unit_clamps() {
        assert_eq!(unit("2 -1 0.25"), Colour::rgb(255, 0, 64));
    }

    #[test]
    fn test_unit_matches_rounding_rule() {
        for raw in [0.0_f64, 0.1, 0.33, 0.5, 0.66, 0.9, 1.0, 1.7, -0.2] {
            let text = format!("{raw} {raw} {raw}");
            let expected = (raw.clamp(0.0, 1.0) * 255.0).round() as u8;
            assert_eq!(
                unit(&text),
                Colour::rgb(expected, expected, expected)
            );
        }
    }

    #[test]
    fn test_unit_missing_defaults_to_white() {
        assert_eq!(unit("0"), Colour::rgb(0, 255, 255));
        assert_eq!(unit("red 0 0"), Colour::rgb(255, 0, 0));
        assert_eq!(unit(""), Colour::WHITE);
    }

    #[test]
    fn test_legacy_scale_keeps_byte_values() {
        assert_eq!(
            Colour::parse_components("255 128 0", ColourScale::Legacy),
            Colour::rgb(255, 128, 0)
        );
        assert_eq!(
            Colour::parse_components("0 .5 .8", ColourScale::Legacy),
            Colour::rgb(0, 128, 204)
        );
        assert_eq!(
            Colour::parse_components("300 -4 x", ColourScale::Legacy),
            Colour::rgb(255, 0, 255)
        );
    }

    #[test]
    fn test_unit_scale_clamps_byte_values() {
        assert_eq!(
            Colour::parse_components("255 128 0", ColourScale::Unit),
            Colour::rgb(255, 255, 0)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Colour::rgb(255, 128, 0).to_string(), "255 128 0");
    }
}
