//! Query parameter types shared by list handlers.

use carbontune_core::record_view::{
    RecordFilters, RecordViewState, SortConfig, SortDirection, SortKey,
};
use serde::Deserialize;

/// `GET /api/data` filter and sort parameters.
///
/// `?model=gem&gpu_location=eu&sort=emissions_rate&direction=descending`.
/// A `sort` without `direction` sorts ascending.
#[derive(Debug, Default, Deserialize)]
pub struct RecordListQuery {
    pub model: Option<String>,
    pub task: Option<String>,
    pub gpu: Option<String>,
    pub gpu_location: Option<String>,
    pub code_environment: Option<String>,
    pub github_user: Option<String>,
    pub sort: Option<SortKey>,
    pub direction: Option<SortDirection>,
}

impl From<RecordListQuery> for RecordViewState {
    fn from(query: RecordListQuery) -> Self {
        Self {
            filters: RecordFilters {
                model: query.model,
                task: query.task,
                gpu: query.gpu,
                gpu_location: query.gpu_location,
                code_environment: query.code_environment,
                github_user: query.github_user,
            },
            sort: SortConfig {
                key: query.sort,
                direction: query.direction.unwrap_or(SortDirection::Ascending),
            },
        }
    }
}

/// `GET /api/measurements` selection parameters, as raw catalog names.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub model: Option<String>,
    pub task: Option<String>,
    pub gpu: Option<String>,
}
