//! Chart colors
//!
//! Two fixed palettes, switched by the presentation mode. The detailed
//! chart pins axis, text and reference-line colors to black in both modes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::weight::ParseTagError;

/// Forced color for axes, labels and reference lines in the detailed chart
pub const FIXED_DARK: &str = "#000000";

/// Presentation mode of the host page
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ParseTagError::new("theme", s)),
        }
    }
}

/// Resolved colors for one render
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Palette {
    pub axis: &'static str,
    pub text: &'static str,
    pub line: &'static str,
    pub grid: &'static str,
}

impl Palette {
    /// Palette that follows the presentation mode
    pub fn themed(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                axis: "#737373",
                text: "#525252",
                line: "#2563eb",
                grid: "#737373",
            },
            Theme::Dark => Self {
                axis: "#a3a3a3",
                text: "#a3a3a3",
                line: "#3b82f6",
                grid: "#a3a3a3",
            },
        }
    }

    /// Palette with axis, text and grid forced dark; only the line follows the mode
    pub fn fixed_dark(theme: Theme) -> Self {
        Self {
            axis: FIXED_DARK,
            text: FIXED_DARK,
            grid: FIXED_DARK,
            ..Self::themed(theme)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_color_follows_theme() {
        assert_eq!(Palette::themed(Theme::Light).line, "#2563eb");
        assert_eq!(Palette::themed(Theme::Dark).line, "#3b82f6");
        assert_eq!(Palette::fixed_dark(Theme::Dark).line, "#3b82f6");
    }

    #[test]
    fn test_fixed_dark_ignores_theme() {
        for theme in [Theme::Light, Theme::Dark] {
            let palette = Palette::fixed_dark(theme);
            assert_eq!(palette.axis, FIXED_DARK);
            assert_eq!(palette.text, FIXED_DARK);
            assert_eq!(palette.grid, FIXED_DARK);
        }
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
