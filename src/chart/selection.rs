//! Tooltip selection state
//!
//! The open tooltip is a plain value owned by whoever hosts the chart.
//! Click events are applied with [`Selection::apply`], which returns the
//! next state without touching the scene.

use serde::{Deserialize, Serialize};

use super::scene::ChartScene;

/// Tooltip payload for the currently selected point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivePoint {
    pub x: f64,
    pub y: f64,
    /// Original (non-converted) value and unit, e.g. `78.9 lb`
    pub value: String,
    /// `DD/MM/YYYY`
    pub date: String,
}

/// Pointer events the chart reacts to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "index", rename_all = "snake_case")]
pub enum ChartEvent {
    /// A marker was clicked; index into `ChartScene::points`
    PointClicked(usize),
    /// Somewhere on the drawing outside a marker or the tooltip
    BackgroundClicked,
    /// The open tooltip itself; never reaches the dismiss handler
    TooltipClicked,
}

/// Present/absent tooltip
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Selection {
    active: Option<ActivePoint>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    /// Selection with the tooltip open on `index`, if the scene supports it
    pub fn at(scene: &ChartScene, index: usize) -> Self {
        Self::none().apply(scene, ChartEvent::PointClicked(index))
    }

    pub fn active(&self) -> Option<&ActivePoint> {
        self.active.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Next state after `event`
    ///
    /// Non-interactive charts never open a tooltip. Clicking an index that
    /// is not on the chart leaves the selection as it was.
    pub fn apply(&self, scene: &ChartScene, event: ChartEvent) -> Self {
        match event {
            ChartEvent::PointClicked(_) if !scene.is_interactive() => Self::none(),
            ChartEvent::PointClicked(index) => match scene.point(index) {
                Some(point) => Self {
                    active: Some(ActivePoint {
                        x: point.x,
                        y: point.y,
                        value: point.source.value_label(),
                        date: point.source.date_label(),
                    }),
                },
                None => {
                    tracing::debug!(index, points = scene.points.len(), "Click outside chart points");
                    self.clone()
                }
            },
            ChartEvent::BackgroundClicked => Self::none(),
            ChartEvent::TooltipClicked => self.clone(),
        }
    }
}
