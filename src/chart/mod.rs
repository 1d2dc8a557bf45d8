//! Weight chart
//!
//! Renders an animal's weight history as a 500x250 SVG line chart.
//!
//! Rendering is a pure function of (entries, sort order, theme, options):
//! [`build_scene`] positions everything, [`to_svg`] serializes the result,
//! and [`Selection`] carries the tooltip state between clicks.
//!
//! Two variants are available:
//! - [`ChartVariant::Basic`]: raw min/max axis, themed colors, hover titles,
//!   flat-line fallback when every weight is equal
//! - [`ChartVariant::Detailed`]: +/-5 kg axis margin, fixed dark axes,
//!   dashed reference lines, click-to-open tooltip
//!
//! # Example
//!
//! ```rust
//! use vetchart::chart::{ChartOptions, Theme, WeightChart};
//! use vetchart::weight::{SortOrder, WeightHistory};
//!
//! let history = WeightHistory::sample();
//! let chart = WeightChart::new(ChartOptions::default(), Theme::Light);
//! let svg = chart.render_svg(history.entries(), SortOrder::Asc).unwrap();
//! assert!(svg.contains("Weight history chart"));
//! ```

pub mod geometry;
pub mod scene;
pub mod selection;
pub mod svg;
pub mod theme;

pub use geometry::{AxisScale, Layout, Padding, Projection, TimeSpan, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use scene::{
    build_scene, AxisLabels, ChartBody, ChartScene, DerivedPoint, Label, PlottedPoint,
    ReferenceKind, ReferenceLine, TextAnchor, WEIGHT_MARGIN_KG,
};
pub use selection::{ActivePoint, ChartEvent, Selection};
pub use svg::{to_svg, ARIA_LABEL};
pub use theme::{Palette, Theme, FIXED_DARK};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::weight::{ParseTagError, SortOrder, WeightEntry, WeightUnit};

/// Which version of the chart to draw
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChartVariant {
    Basic,
    #[default]
    Detailed,
}

impl std::fmt::Display for ChartVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartVariant::Basic => write!(f, "basic"),
            ChartVariant::Detailed => write!(f, "detailed"),
        }
    }
}

impl FromStr for ChartVariant {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(ChartVariant::Basic),
            "detailed" | "interactive" => Ok(ChartVariant::Detailed),
            _ => Err(ParseTagError::new("chart variant", s)),
        }
    }
}

/// How the sort-order flag affects the horizontal axis
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AxisDirection {
    /// Earliest date always on the left; the flag only orders the description
    #[default]
    Chronological,
    /// Descending order mirrors the axis (earliest date on the right)
    FollowSortOrder,
}

impl std::fmt::Display for AxisDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisDirection::Chronological => write!(f, "chronological"),
            AxisDirection::FollowSortOrder => write!(f, "follow_sort_order"),
        }
    }
}

impl FromStr for AxisDirection {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "chronological" => Ok(AxisDirection::Chronological),
            "follow_sort_order" | "mirrored" => Ok(AxisDirection::FollowSortOrder),
            _ => Err(ParseTagError::new("axis direction", s)),
        }
    }
}

/// Rendering options
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartOptions {
    #[serde(default)]
    pub variant: ChartVariant,
    #[serde(default)]
    pub axis_direction: AxisDirection,
}

/// `DD/MM/YYYY`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// One decimal followed by the unit tag, e.g. `12.0 kg`
pub fn format_weight(weight: f64, unit: WeightUnit) -> String {
    format!("{:.1} {}", weight, unit)
}

/// A configured chart renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightChart {
    options: ChartOptions,
    theme: Theme,
}

impl WeightChart {
    pub fn new(options: ChartOptions, theme: Theme) -> Self {
        Self { options, theme }
    }

    /// Builder method: set the theme
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Builder method: set the variant
    pub fn variant(mut self, variant: ChartVariant) -> Self {
        self.options.variant = variant;
        self
    }

    /// Builder method: set the axis direction policy
    pub fn axis_direction(mut self, direction: AxisDirection) -> Self {
        self.options.axis_direction = direction;
        self
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Positioned chart, or `None` with fewer than two entries
    pub fn render(&self, entries: &[WeightEntry], sort_order: SortOrder) -> Option<ChartScene> {
        build_scene(entries, sort_order, self.theme, &self.options)
    }

    /// SVG document, or `None` with fewer than two entries
    pub fn render_svg(&self, entries: &[WeightEntry], sort_order: SortOrder) -> Option<String> {
        self.render(entries, sort_order)
            .map(|scene| to_svg(&scene, None))
    }

    /// SVG document with the tooltip in `selection` drawn on top
    pub fn render_svg_with(
        &self,
        entries: &[WeightEntry],
        sort_order: SortOrder,
        selection: &Selection,
    ) -> Option<String> {
        self.render(entries, sort_order)
            .map(|scene| to_svg(&scene, selection.active()))
    }
}
