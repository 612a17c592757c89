//! Handler for the emissions estimation endpoint.

use axum::extract::State;
use axum::Json;
use carbontune_core::estimation::{self, EstimationDisplay, EstimationRequest, EstimationResult};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::response::DataResponse;
use crate::state::AppState;

/// Full-precision result plus the rounded strings the dashboard shows.
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub result: EstimationResult,
    pub display: EstimationDisplay,
}

/// POST /api/estimates
///
/// Runs the engine synchronously; it performs no I/O.
pub async fn estimate(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<EstimationRequest>,
) -> AppResult<Json<DataResponse<EstimateResponse>>> {
    let kb = state.knowledge_base()?;
    let result = estimation::estimate(kb, &request).inspect_err(|err| {
        tracing::debug!(error = %err, "Estimation rejected");
    })?;
    tracing::debug!(
        energy_kwh = result.energy_kwh,
        emissions_g = result.emissions_g,
        runtime_seconds = result.runtime_seconds,
        "Estimation computed",
    );
    Ok(Json(DataResponse {
        data: EstimateResponse {
            display: result.display(),
            result,
        },
    }))
}
