//! Chart geometry
//!
//! Fixed logical canvas, padding, and the linear maps from (time, weight)
//! into pixel space. Everything here is recomputed per render.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Logical canvas width (SVG viewBox units)
pub const CANVAS_WIDTH: f64 = 500.0;

/// Logical canvas height (SVG viewBox units)
pub const CANVAS_HEIGHT: f64 = 250.0;

/// Space between the canvas edge and the plot area
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Canvas size plus padding
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl Layout {
    pub fn basic() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            padding: Padding {
                top: 20.0,
                right: 20.0,
                bottom: 40.0,
                left: 50.0,
            },
        }
    }

    /// Wider right margin leaves room for the tooltip at the last point
    pub fn detailed() -> Self {
        Self {
            padding: Padding {
                right: 30.0,
                ..Self::basic().padding
            },
            ..Self::basic()
        }
    }

    pub fn plot_width(&self) -> f64 {
        self.width - self.padding.left - self.padding.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.padding.top - self.padding.bottom
    }

    pub fn plot_left(&self) -> f64 {
        self.padding.left
    }

    pub fn plot_right(&self) -> f64 {
        self.width - self.padding.right
    }

    pub fn plot_top(&self) -> f64 {
        self.padding.top
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.padding.bottom
    }

    pub fn center_x(&self) -> f64 {
        self.padding.left + self.plot_width() / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.padding.top + self.plot_height() / 2.0
    }
}

/// Closed value interval of the vertical axis, in kilograms
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
}

impl AxisScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Widen the interval by `margin` on both sides, never below zero
    ///
    /// A single-value interval is widened symmetrically so the value stays
    /// mid-axis; near zero the margin shrinks instead of being clamped.
    pub fn padded(&self, margin: f64) -> Self {
        let margin = if self.is_degenerate() {
            margin.min(self.min.max(0.0))
        } else {
            margin
        };
        Self {
            min: (self.min - margin).max(0.0),
            max: self.max + margin,
        }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.range() == 0.0
    }
}

/// Closed time interval of the horizontal axis
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSpan {
    pub fn range_millis(&self) -> i64 {
        self.end.timestamp_millis() - self.start.timestamp_millis()
    }

    pub fn is_degenerate(&self) -> bool {
        self.range_millis() == 0
    }
}

/// Maps a (date, kilograms) pair into pixel space
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    layout: Layout,
    time: TimeSpan,
    weight: AxisScale,
    mirrored: bool,
}

impl Projection {
    /// `mirrored` puts the earliest date at the right edge
    pub fn new(layout: Layout, time: TimeSpan, weight: AxisScale, mirrored: bool) -> Self {
        Self {
            layout,
            time,
            weight,
            mirrored,
        }
    }

    pub fn x(&self, date: DateTime<Utc>) -> f64 {
        if self.time.is_degenerate() {
            return self.layout.center_x();
        }
        let offset = (date.timestamp_millis() - self.time.start.timestamp_millis()) as f64;
        let position = offset / self.time.range_millis() as f64 * self.layout.plot_width();
        if self.mirrored {
            self.layout.plot_left() + self.layout.plot_width() - position
        } else {
            self.layout.plot_left() + position
        }
    }

    /// Pixel y grows downward while weight grows upward
    pub fn y(&self, kg: f64) -> f64 {
        if self.weight.is_degenerate() {
            return self.layout.center_y();
        }
        let relative = kg - self.weight.min;
        self.layout.plot_top() + self.layout.plot_height()
            - relative / self.weight.range() * self.layout.plot_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn span(start_day: u32, end_day: u32) -> TimeSpan {
        TimeSpan {
            start: Utc.with_ymd_and_hms(2024, 1, start_day, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, end_day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_layout_dimensions() {
        let basic = Layout::basic();
        assert_eq!(basic.plot_width(), 430.0);
        assert_eq!(basic.plot_height(), 190.0);
        assert_eq!(basic.center_x(), 265.0);
        assert_eq!(basic.center_y(), 115.0);

        let detailed = Layout::detailed();
        assert_eq!(detailed.plot_width(), 420.0);
        assert_eq!(detailed.plot_right(), 470.0);
    }

    #[test]
    fn test_projection_endpoints() {
        let layout = Layout::basic();
        let time = span(1, 11);
        let projection = Projection::new(layout, time, AxisScale::new(10.0, 20.0), false);

        assert_eq!(projection.x(time.start), 50.0);
        assert_eq!(projection.x(time.end), 480.0);
        assert_eq!(projection.y(10.0), 210.0);
        assert_eq!(projection.y(20.0), 20.0);
        assert_eq!(projection.y(15.0), 115.0);
    }

    #[test]
    fn test_projection_mirrored() {
        let layout = Layout::basic();
        let time = span(1, 11);
        let projection = Projection::new(layout, time, AxisScale::new(10.0, 20.0), true);

        assert_eq!(projection.x(time.start), 480.0);
        assert_eq!(projection.x(time.end), 50.0);
    }

    #[test]
    fn test_degenerate_ranges_collapse_to_center() {
        let layout = Layout::basic();
        let time = span(5, 5);
        let projection = Projection::new(layout, time, AxisScale::new(7.0, 7.0), false);

        assert_eq!(projection.x(time.start), layout.center_x());
        assert_eq!(projection.y(7.0), layout.center_y());
    }

    #[test]
    fn test_padded_scale_clamps_at_zero() {
        let scale = AxisScale::new(3.0, 12.0).padded(5.0);
        assert_eq!(scale.min, 0.0);
        assert_eq!(scale.max, 17.0);

        let scale = AxisScale::new(30.0, 40.0).padded(5.0);
        assert_eq!(scale.min, 25.0);
    }

    #[test]
    fn test_padded_single_value_stays_centered() {
        let scale = AxisScale::new(3.0, 3.0).padded(5.0);
        assert_eq!((scale.min, scale.max), (0.0, 6.0));

        let scale = AxisScale::new(8.0, 8.0).padded(5.0);
        assert_eq!((scale.min, scale.max), (3.0, 13.0));

        assert!(AxisScale::new(0.0, 0.0).padded(5.0).is_degenerate());
    }
}
