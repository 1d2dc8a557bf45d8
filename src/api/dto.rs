//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::chart::{AxisDirection, ChartVariant, Theme};
use crate::weight::{SortOrder, WeightEntry};

// ============================================
// CHART DTOs
// ============================================

/// Chart render request
///
/// Every option falls back to the server's configured default.
#[derive(Debug, Deserialize)]
pub struct RenderChartRequest {
    /// Weight entries in any order
    pub entries: Vec<WeightEntry>,
    /// Order the caller's list is displayed in
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    /// Light or dark presentation
    #[serde(default)]
    pub theme: Option<Theme>,
    /// Basic or detailed chart
    #[serde(default)]
    pub variant: Option<ChartVariant>,
    /// Horizontal axis policy
    #[serde(default)]
    pub axis_direction: Option<AxisDirection>,
    /// Chronological index (`data-index`) of the point whose tooltip is open
    #[serde(default)]
    pub selected: Option<usize>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}
