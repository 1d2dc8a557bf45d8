//! Chart Routes
//!
//! - POST /api/v1/charts/weight - Render a weight chart as SVG
//! - POST /api/v1/charts/weight/scene - Positioned chart as JSON

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::RenderChartRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chart::{to_svg, ChartScene, Selection};

/// POST /api/v1/charts/weight
///
/// Returns `image/svg+xml`, or 204 when there are fewer than two entries.
pub async fn render_weight_chart(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderChartRequest>,
) -> ApiResult<Response> {
    let selected = req.selected;
    let Some(scene) = build(&state, req)? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let selection = selected
        .map(|index| Selection::at(&scene, index))
        .unwrap_or_default();
    let svg = to_svg(&scene, selection.active());

    tracing::debug!(
        points = scene.points.len(),
        tooltip = selection.is_open(),
        bytes = svg.len(),
        "Rendered weight chart"
    );

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

/// POST /api/v1/charts/weight/scene
///
/// Returns the positioned chart, or 204 when there are fewer than two entries.
pub async fn weight_chart_scene(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderChartRequest>,
) -> ApiResult<Response> {
    match build(&state, req)? {
        Some(scene) => Ok(Json(scene).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

fn build(state: &AppState, req: RenderChartRequest) -> ApiResult<Option<ChartScene>> {
    if req.entries.len() > state.config.max_entries {
        return Err(ApiError::Validation(format!(
            "Too many entries: {} (maximum {})",
            req.entries.len(),
            state.config.max_entries
        )));
    }

    let mut chart = state.chart;
    if let Some(theme) = req.theme {
        chart = chart.theme(theme);
    }
    if let Some(variant) = req.variant {
        chart = chart.variant(variant);
    }
    if let Some(direction) = req.axis_direction {
        chart = chart.axis_direction(direction);
    }

    let sort_order = req.sort_order.unwrap_or(state.sort_order);
    Ok(chart.render(&req.entries, sort_order))
}
