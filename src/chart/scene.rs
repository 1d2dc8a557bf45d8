//! Chart scene construction
//!
//! Turns a list of weight entries into a fully positioned, renderer-agnostic
//! description of the chart. The SVG writer only serializes what is built
//! here, so every geometric property can be tested on the scene itself.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::geometry::{AxisScale, Layout, Projection, TimeSpan};
use super::theme::{Palette, Theme};
use super::{format_date, format_weight, AxisDirection, ChartOptions, ChartVariant};
use crate::weight::{SortOrder, WeightEntry, WeightUnit, MIN_CHART_ENTRIES};

/// Space kept above the heaviest and below the lightest measurement (kg)
pub const WEIGHT_MARGIN_KG: f64 = 5.0;

/// A measurement with its canonical weight, derived fresh on every render
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DerivedPoint {
    pub date: DateTime<Utc>,
    pub weight_kg: f64,
    pub original_weight: f64,
    pub original_unit: WeightUnit,
}

impl DerivedPoint {
    pub fn from_entry(entry: &WeightEntry) -> Self {
        Self {
            date: entry.date,
            weight_kg: entry.weight_kg(),
            original_weight: entry.weight,
            original_unit: entry.unit,
        }
    }

    /// Original value and unit, e.g. `78.9 lb`
    pub fn value_label(&self) -> String {
        format_weight(self.original_weight, self.original_unit)
    }

    pub fn date_label(&self) -> String {
        format_date(&self.date)
    }
}

/// A derived point placed in pixel space
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlottedPoint {
    pub x: f64,
    pub y: f64,
    pub source: DerivedPoint,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// A positioned axis label
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: TextAnchor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

/// Why a reference line is drawn
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// Most recent measurement
    Latest,
    /// Middle-index measurement (only with three or more entries)
    Middle,
    /// Heaviest measurement
    Max,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Latest => "latest",
            ReferenceKind::Middle => "middle",
            ReferenceKind::Max => "max",
        }
    }
}

/// Dashed horizontal guide at a notable weight
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReferenceLine {
    pub kind: ReferenceKind,
    pub weight_kg: f64,
    pub y: f64,
}

/// Axis lines are implied by the layout; these are their labels
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AxisLabels {
    /// Top of the vertical axis
    pub weight_max: Label,
    /// Bottom of the vertical axis
    pub weight_min: Label,
    /// Left end of the horizontal axis
    pub date_left: Label,
    /// Right end of the horizontal axis
    pub date_right: Label,
}

/// What is drawn besides the markers
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartBody {
    /// All weights equal: a single horizontal line, no axes
    Flat { y: f64 },
    /// Axes, trend line and reference lines
    Plotted {
        axes: AxisLabels,
        reference_lines: Vec<ReferenceLine>,
    },
}

/// Everything needed to draw one chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartScene {
    pub layout: Layout,
    pub variant: ChartVariant,
    pub sort_order: SortOrder,
    pub mirrored: bool,
    pub palette: Palette,
    pub marker_radius: f64,
    pub time_span: TimeSpan,
    pub weight_scale: AxisScale,
    /// Points in chronological order
    pub points: Vec<PlottedPoint>,
    pub body: ChartBody,
    /// Date range in the caller's sort order, for accessible descriptions
    pub description: String,
}

impl ChartScene {
    /// Whether markers respond to clicks with a tooltip
    pub fn is_interactive(&self) -> bool {
        self.variant == ChartVariant::Detailed
    }

    pub fn point(&self, index: usize) -> Option<&PlottedPoint> {
        self.points.get(index)
    }

    /// Polyline vertices in chronological order
    pub fn polyline_points(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }

    pub fn reference_lines(&self) -> &[ReferenceLine] {
        match &self.body {
            ChartBody::Plotted {
                reference_lines, ..
            } => reference_lines,
            ChartBody::Flat { .. } => &[],
        }
    }

    pub fn axes(&self) -> Option<&AxisLabels> {
        match &self.body {
            ChartBody::Plotted { axes, .. } => Some(axes),
            ChartBody::Flat { .. } => None,
        }
    }
}

/// Build the scene for a list of entries
///
/// Returns `None` when there are fewer than two entries: a single point
/// cannot make a line, so nothing is drawn.
pub fn build_scene(
    entries: &[WeightEntry],
    sort_order: SortOrder,
    theme: Theme,
    options: &ChartOptions,
) -> Option<ChartScene> {
    let derived: Vec<DerivedPoint> = entries
        .iter()
        .map(DerivedPoint::from_entry)
        .filter(|p| p.weight_kg.is_finite())
        .collect();

    if derived.len() < entries.len() {
        tracing::warn!(
            skipped = entries.len() - derived.len(),
            "Skipping entries with non-finite weight"
        );
    }

    if derived.len() < MIN_CHART_ENTRIES {
        tracing::debug!(entries = derived.len(), "Not enough entries to chart");
        return None;
    }

    let mut chronological = derived.clone();
    chronological.sort_by(|a, b| a.date.cmp(&b.date));

    let first = chronological.first()?;
    let last = chronological.last()?;
    let time_span = TimeSpan {
        start: first.date,
        end: last.date,
    };

    let min_kg = derived.iter().map(|p| p.weight_kg).fold(f64::INFINITY, f64::min);
    let max_kg = derived.iter().map(|p| p.weight_kg).fold(f64::NEG_INFINITY, f64::max);
    let actual_scale = AxisScale::new(min_kg, max_kg);

    let (layout, weight_scale, palette, marker_radius) = match options.variant {
        ChartVariant::Basic => (Layout::basic(), actual_scale, Palette::themed(theme), 4.0),
        ChartVariant::Detailed => (
            Layout::detailed(),
            actual_scale.padded(WEIGHT_MARGIN_KG),
            Palette::fixed_dark(theme),
            6.0,
        ),
    };

    let mirrored =
        options.axis_direction == AxisDirection::FollowSortOrder && sort_order == SortOrder::Desc;
    let projection = Projection::new(layout, time_span, weight_scale, mirrored);

    let points: Vec<PlottedPoint> = chronological
        .iter()
        .map(|p| PlottedPoint {
            x: projection.x(p.date),
            y: projection.y(p.weight_kg),
            source: p.clone(),
        })
        .collect();

    let description = {
        let (from, to) = match sort_order {
            SortOrder::Asc => (time_span.start, time_span.end),
            SortOrder::Desc => (time_span.end, time_span.start),
        };
        format!(
            "Weight history from {} to {}",
            format_date(&from),
            format_date(&to)
        )
    };

    let body = if options.variant == ChartVariant::Basic && weight_scale.is_degenerate() {
        ChartBody::Flat {
            y: layout.center_y(),
        }
    } else {
        let axes = axis_labels(&layout, options.variant, &weight_scale, &time_span, mirrored);
        let reference_lines = match options.variant {
            ChartVariant::Detailed => reference_lines(&derived, &chronological, &projection),
            ChartVariant::Basic => Vec::new(),
        };
        ChartBody::Plotted {
            axes,
            reference_lines,
        }
    };

    tracing::trace!(
        points = points.len(),
        variant = %options.variant,
        mirrored,
        "Built chart scene"
    );

    Some(ChartScene {
        layout,
        variant: options.variant,
        sort_order,
        mirrored,
        palette,
        marker_radius,
        time_span,
        weight_scale,
        points,
        body,
        description,
    })
}

fn axis_labels(
    layout: &Layout,
    variant: ChartVariant,
    scale: &AxisScale,
    span: &TimeSpan,
    mirrored: bool,
) -> AxisLabels {
    let (weight_gap, font_size) = match variant {
        ChartVariant::Basic => (10.0, None),
        ChartVariant::Detailed => (8.0, Some(10.0)),
    };
    let date_y = layout.plot_bottom() + 15.0;
    let (left_date, right_date) = if mirrored {
        (span.end, span.start)
    } else {
        (span.start, span.end)
    };

    AxisLabels {
        weight_max: Label {
            x: layout.plot_left() - weight_gap,
            y: layout.plot_top(),
            text: format_weight(scale.max, WeightUnit::Kg),
            anchor: TextAnchor::End,
            font_size,
        },
        weight_min: Label {
            x: layout.plot_left() - weight_gap,
            y: layout.plot_bottom(),
            text: format_weight(scale.min, WeightUnit::Kg),
            anchor: TextAnchor::End,
            font_size,
        },
        date_left: Label {
            x: layout.plot_left(),
            y: date_y,
            text: format_date(&left_date),
            anchor: TextAnchor::Start,
            font_size: None,
        },
        date_right: Label {
            x: layout.plot_right(),
            y: date_y,
            text: format_date(&right_date),
            anchor: TextAnchor::End,
            font_size: None,
        },
    }
}

/// Latest, middle and max guides; a value already drawn is not drawn again
fn reference_lines(
    derived: &[DerivedPoint],
    chronological: &[DerivedPoint],
    projection: &Projection,
) -> Vec<ReferenceLine> {
    let mut candidates = Vec::with_capacity(3);

    if let Some(latest) = chronological.last() {
        candidates.push((ReferenceKind::Latest, latest.weight_kg));
    }

    if chronological.len() >= 3 {
        let middle = &chronological[(chronological.len() - 1) / 2];
        candidates.push((ReferenceKind::Middle, middle.weight_kg));
    }

    // Ties go to the later entry in the caller's order
    let heaviest = derived
        .iter()
        .reduce(|prev, cur| if prev.weight_kg > cur.weight_kg { prev } else { cur });
    if let Some(heaviest) = heaviest {
        candidates.push((ReferenceKind::Max, heaviest.weight_kg));
    }

    let mut lines: Vec<ReferenceLine> = Vec::with_capacity(candidates.len());
    for (kind, weight_kg) in candidates {
        if lines.iter().any(|l| l.weight_kg == weight_kg) {
            continue;
        }
        lines.push(ReferenceLine {
            kind,
            weight_kg,
            y: projection.y(weight_kg),
        });
    }
    lines
}
