//! Highlight colors.
//!
//! Colors are RGB triples with each channel in the closed interval [0, 1],
//! the normalized form PDF annotation dictionaries expect in their `/C`
//! entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An RGB highlight color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl HighlightColor {
    pub const YELLOW: Self = Self { r: 1.0, g: 1.0, b: 0.0 };
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0 };
    pub const LIGHT_BLUE: Self = Self { r: 0.68, g: 0.85, b: 0.9 };
    pub const DARK_BLUE: Self = Self { r: 0.0, g: 0.0, b: 0.55 };

    /// Create a color, validating every channel is within [0, 1].
    pub fn new(r: f32, g: f32, b: f32) -> Result<Self> {
        for (name, v) in [("r", r), ("g", g), ("b", b)] {
            if !(0.0..=1.0).contains(&v) || v.is_nan() {
                return Err(Error::InvalidColor(format!(
                    "channel {} = {} is outside [0, 1]",
                    name, v
                )));
            }
        }
        Ok(Self { r, g, b })
    }

    /// Look up a color by its palette name (case-insensitive, spaces or
    /// hyphens between words).
    pub fn named(name: &str) -> Option<Self> {
        let key = name.trim().to_lowercase().replace([' ', '_'], "-");
        Self::palette()
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, c)| *c)
    }

    /// The named palette, in presentation order.
    pub fn palette() -> &'static [(&'static str, HighlightColor)] {
        &[
            ("yellow", Self::YELLOW),
            ("red", Self::RED),
            ("green", Self::GREEN),
            ("light-blue", Self::LIGHT_BLUE),
            ("dark-blue", Self::DARK_BLUE),
        ]
    }

    /// Channels as a `[r, g, b]` array.
    pub fn channels(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for HighlightColor {
    /// Light blue, the historical default of the statement-marking workflow.
    fn default() -> Self {
        Self::LIGHT_BLUE
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for HighlightColor {
    type Err = Error;

    /// Parse either a palette name ("yellow", "light-blue") or a numeric
    /// triple ("1,1,0" / "0.68,0.85,0.9").
    fn from_str(s: &str) -> Result<Self> {
        if let Some(color) = Self::named(s) {
            return Ok(color);
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(Error::InvalidColor(format!(
                "expected a palette name or \"r,g,b\", got {:?}",
                s
            )));
        }

        let mut channels = [0.0f32; 3];
        for (i, part) in parts.iter().enumerate() {
            channels[i] = part
                .parse::<f32>()
                .map_err(|_| Error::InvalidColor(format!("not a number: {:?}", part)))?;
        }
        Self::new(channels[0], channels[1], channels[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_range() {
        assert!(HighlightColor::new(0.0, 0.5, 1.0).is_ok());
        assert!(HighlightColor::new(-0.1, 0.0, 0.0).is_err());
        assert!(HighlightColor::new(0.0, 1.1, 0.0).is_err());
        assert!(HighlightColor::new(0.0, 0.0, f32::NAN).is_err());
    }

    #[test]
    fn test_named_lookup() {
        assert_eq!(HighlightColor::named("yellow"), Some(HighlightColor::YELLOW));
        assert_eq!(
            HighlightColor::named("Light Blue"),
            Some(HighlightColor::LIGHT_BLUE)
        );
        assert_eq!(
            HighlightColor::named("dark_blue"),
            Some(HighlightColor::DARK_BLUE)
        );
        assert_eq!(HighlightColor::named("mauve"), None);
    }

    #[test]
    fn test_from_str_triple() {
        let c: HighlightColor = "1, 1, 0".parse().unwrap();
        assert_eq!(c, HighlightColor::YELLOW);

        assert!("1,2".parse::<HighlightColor>().is_err());
        assert!("1,1,2".parse::<HighlightColor>().is_err());
        assert!("a,b,c".parse::<HighlightColor>().is_err());
    }

    #[test]
    fn test_default_is_light_blue() {
        assert_eq!(HighlightColor::default(), HighlightColor::LIGHT_BLUE);
    }
}
