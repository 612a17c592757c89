//! Handlers for the `/data` measurement record resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use carbontune_core::error::CoreError;
use carbontune_core::record_view::RecordViewState;
use carbontune_core::types::DbId;
use carbontune_db::models::measurement_record::{
    CreateMeasurementRecord, MeasurementRecordWithRate, UpdateMeasurementRecord,
};
use carbontune_db::repositories::MeasurementRecordRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{PathParam, ValidJson};
use crate::query::RecordListQuery;
use crate::response::MessageResponse;
use crate::state::AppState;

const ENTITY: &str = "Data entry";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// POST /api/data
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateMeasurementRecord>,
) -> AppResult<(StatusCode, Json<MessageResponse<MeasurementRecordWithRate>>)> {
    let record = MeasurementRecordRepo::create(&state.pool, &input).await?;
    tracing::info!(id = record.id, model = %record.model, gpu = %record.gpu, "Measurement record added");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Data added successfully!",
            data: record.into(),
        }),
    ))
}

/// GET /api/data
///
/// Accepts [`RecordListQuery`] filters and sort; without parameters the
/// records come back in store order.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RecordListQuery>,
) -> AppResult<Json<Vec<MeasurementRecordWithRate>>> {
    let records = MeasurementRecordRepo::list(&state.pool).await?;
    let view = RecordViewState::from(params);
    let visible = view
        .apply(records)
        .into_iter()
        .map(MeasurementRecordWithRate::from)
        .collect();
    Ok(Json(visible))
}

/// GET /api/data/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<MeasurementRecordWithRate>> {
    let record = MeasurementRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(record.into()))
}

/// PUT /api/data/{id}
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    ValidJson(input): ValidJson<UpdateMeasurementRecord>,
) -> AppResult<Json<MessageResponse<MeasurementRecordWithRate>>> {
    let record = MeasurementRecordRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "Measurement record updated");
    Ok(Json(MessageResponse {
        message: "Data entry updated successfully",
        data: record.into(),
    }))
}

/// DELETE /api/data/{id}
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<MessageResponse<MeasurementRecordWithRate>>> {
    let record = MeasurementRecordRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "Measurement record deleted");
    Ok(Json(MessageResponse {
        message: "Data entry deleted successfully",
        data: record.into(),
    }))
}
