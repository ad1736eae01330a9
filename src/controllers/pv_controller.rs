use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::warn;

use crate::error::{ApiError, AppError};
use crate::models::pv::{PvRequest, PvResponse, RootMessage};
use crate::services::pv_estimator;
use crate::shared_state::AppState;

/// GET /
/// Liveness message
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = RootMessage)
    )
)]
pub async fn read_root() -> Json<RootMessage> {
    Json(RootMessage {
        message: "PV Calculator API is running!".to_string(),
    })
}

/// POST /calculate
/// Estimate yield, sizing and payback of a PV system
///
/// Peak sun hours are derived from the latitude and the current calendar month,
/// so results for the same input change from month to month.
#[utoipa::path(
    post,
    path = "/calculate",
    request_body = PvRequest,
    responses(
        (status = 200, description = "Estimate computed", body = PvResponse),
        (status = 400, description = "Body is not a valid PvRequest", body = ApiError),
        (status = 422, description = "A field is out of range", body = ApiError),
        (status = 500, description = "Computation failed", body = ApiError)
    )
)]
pub async fn calculate_pv(
    State(state): State<AppState>,
    payload: Result<Json<PvRequest>, JsonRejection>,
) -> Result<Json<PvResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if let Err(e) = request.validate() {
        warn!("Rejected request: {}", e);
        return Err(e.into());
    }

    let month = state.clock.current_month();
    let response = pv_estimator::estimate(&request, month)?;
    Ok(Json(response))
}
