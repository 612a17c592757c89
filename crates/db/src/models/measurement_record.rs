//! Measurement record model and DTOs.

use carbontune_core::record::{emissions_rate, validate_date_added, validate_not_blank};
use carbontune_core::record_view::{FilterField, SortKey, ViewableRecord};
use carbontune_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `measurement_records` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct MeasurementRecord {
    pub id: DbId,
    pub model: String,
    pub task: String,
    pub gpu: String,
    /// kWh.
    pub energy: f64,
    /// g CO2e.
    pub emissions: f64,
    /// Minutes.
    pub runtime: f64,
    pub github_user: String,
    pub date_added: String,
    pub timestamp: Option<String>,
    pub gpu_location: Option<String>,
    pub code_environment: Option<String>,
    pub remarks: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MeasurementRecord {
    /// Grams CO2e per second of runtime.
    pub fn emissions_rate(&self) -> f64 {
        emissions_rate(self.emissions, self.runtime)
    }
}

impl ViewableRecord for MeasurementRecord {
    fn text(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Model => Some(self.model.as_str()),
            FilterField::Task => Some(self.task.as_str()),
            FilterField::Gpu => Some(self.gpu.as_str()),
            FilterField::GpuLocation => self.gpu_location.as_deref(),
            FilterField::CodeEnvironment => self.code_environment.as_deref(),
            FilterField::GithubUser => Some(self.github_user.as_str()),
        }
    }

    fn number(&self, key: SortKey) -> f64 {
        match key {
            SortKey::Energy => self.energy,
            SortKey::Emissions => self.emissions,
            SortKey::Runtime => self.runtime,
            SortKey::EmissionsRate => self.emissions_rate(),
        }
    }
}

/// A record as returned to clients, with the derived emissions rate.
#[derive(Debug, Clone, Serialize)]
pub struct MeasurementRecordWithRate {
    #[serde(flatten)]
    pub record: MeasurementRecord,
    pub emissions_rate: f64,
}

impl From<MeasurementRecord> for MeasurementRecordWithRate {
    fn from(record: MeasurementRecord) -> Self {
        let emissions_rate = record.emissions_rate();
        Self {
            record,
            emissions_rate,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for submitting a new measurement. `date_added` is assigned by the store.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMeasurementRecord {
    #[validate(custom(function = "validate_not_blank"))]
    pub model: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub task: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub gpu: String,
    #[validate(range(exclusive_min = 0.0))]
    pub energy: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub emissions: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub runtime: f64,
    #[validate(custom(function = "validate_not_blank"))]
    pub github_user: String,
    pub timestamp: Option<String>,
    pub gpu_location: Option<String>,
    pub code_environment: Option<String>,
    pub remarks: Option<String>,
}

/// DTO for a partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMeasurementRecord {
    #[validate(custom(function = "validate_not_blank"))]
    pub model: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub task: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub gpu: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub energy: Option<f64>,
    #[validate(range(exclusive_min = 0.0))]
    pub emissions: Option<f64>,
    #[validate(range(exclusive_min = 0.0))]
    pub runtime: Option<f64>,
    #[validate(custom(function = "validate_not_blank"))]
    pub github_user: Option<String>,
    #[validate(custom(function = "validate_date_added"))]
    pub date_added: Option<String>,
    pub timestamp: Option<String>,
    pub gpu_location: Option<String>,
    pub code_environment: Option<String>,
    pub remarks: Option<String>,
}
