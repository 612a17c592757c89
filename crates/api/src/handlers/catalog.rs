//! Knowledge Base read endpoints: catalogs, measurement slices and regions.

use axum::extract::{Query, State};
use axum::Json;
use carbontune_core::catalog::{self, Gpu, GpuInfo, Model, ModelInfo, Task, TaskInfo};
use carbontune_core::knowledge_base::{self, Selection, SelectionView};

use crate::error::{AppError, AppResult};
use crate::query::SelectionQuery;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/catalog/models
pub async fn list_models() -> Json<DataResponse<Vec<ModelInfo>>> {
    Json(DataResponse {
        data: catalog::model_catalog(),
    })
}

/// GET /api/catalog/tasks
pub async fn list_tasks() -> Json<DataResponse<Vec<TaskInfo>>> {
    Json(DataResponse {
        data: catalog::task_catalog(),
    })
}

/// GET /api/catalog/gpus
pub async fn list_gpus() -> Json<DataResponse<Vec<GpuInfo>>> {
    Json(DataResponse {
        data: catalog::gpu_catalog(),
    })
}

/// GET /api/measurements?model=&task=&gpu=
///
/// Empty parameters count as unselected. Names must match the catalog exactly.
pub async fn select_measurements(
    Query(params): Query<SelectionQuery>,
) -> AppResult<Json<DataResponse<SelectionView>>> {
    let selection = Selection {
        model: parse_param(params.model, Model::from_str_value)?,
        task: parse_param(params.task, Task::from_str_value)?,
        gpu: parse_param(params.gpu, Gpu::from_str_value)?,
    };
    let view = knowledge_base::select(selection)?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /api/regions
pub async fn list_regions(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let kb = state.knowledge_base()?;
    Ok(Json(DataResponse {
        data: kb.regions().map(str::to_string).collect(),
    }))
}

fn parse_param<T>(
    raw: Option<String>,
    parse: fn(&str) -> Result<T, String>,
) -> AppResult<Option<T>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse(value).map(Some).map_err(AppError::BadRequest),
    }
}
