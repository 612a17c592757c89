//! Fine-tuning energy, emissions and runtime estimation.
//!
//! Pure logic over the [`KnowledgeBase`]: no I/O, no clock, no randomness.
//! Identical requests always produce bit-identical results.
//!
//! ```text
//! runtime_s  = (dataset_size / batch_size) * num_epochs * batch_time_s
//! energy_kwh = power_w * runtime_s / 3_600_000
//! emissions  = energy_kwh * intensity_g_per_kwh
//! rate       = emissions / runtime_s
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{Gpu, Model, Task, GPU_A100};
use crate::format::format_fixed;
use crate::knowledge_base::KnowledgeBase;
use crate::reference::SECS_PER_MIN;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Joules per kilowatt-hour (watts x seconds -> kWh).
pub const JOULES_PER_KWH: f64 = 3_600_000.0;

/// Display precision for each result field.
pub const ENERGY_DECIMALS: usize = 3;
pub const EMISSIONS_DECIMALS: usize = 2;
pub const EMISSIONS_RATE_DECIMALS: usize = 3;
pub const RUNTIME_DECIMALS: usize = 2;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimationError {
    #[error("Please fill in all fields before estimating emissions (missing or invalid: {})", .0.join(", "))]
    IncompleteParameters(Vec<String>),

    #[error("{model} requires an A100 GPU for fine-tuning; {gpu} does not have enough memory")]
    UnsupportedConfiguration { model: String, gpu: String },

    #[error("No batch timing data for {model} / {task} / {gpu}")]
    MissingBatchTimingData {
        model: String,
        task: String,
        gpu: String,
    },

    #[error("Unknown region '{0}'")]
    UnknownRegion(String),

    #[error("Unknown GPU '{0}'")]
    UnknownGpu(String),

    #[error("Estimated runtime is zero; emissions rate is undefined")]
    DegenerateRuntime,
}

// ---------------------------------------------------------------------------
// Request / result
// ---------------------------------------------------------------------------

/// Raw estimation input as submitted by a client. Every field is optional so
/// omissions surface as [`EstimationError::IncompleteParameters`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    pub model: Option<String>,
    pub task: Option<String>,
    pub gpu: Option<String>,
    pub region: Option<String>,
    pub dataset_size: Option<i64>,
    pub batch_size: Option<i64>,
    pub num_epochs: Option<i64>,
}

/// Full-precision estimation output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimationResult {
    pub energy_kwh: f64,
    pub emissions_g: f64,
    pub emissions_rate_g_per_s: f64,
    pub runtime_seconds: f64,
    pub runtime_minutes: f64,
}

/// Rounded, display-ready rendering of an [`EstimationResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationDisplay {
    pub energy_kwh: String,
    pub emissions_g: String,
    pub emissions_rate_g_per_s: String,
    pub runtime_minutes: String,
}

impl EstimationResult {
    pub fn display(&self) -> EstimationDisplay {
        EstimationDisplay {
            energy_kwh: format_fixed(self.energy_kwh, ENERGY_DECIMALS),
            emissions_g: format_fixed(self.emissions_g, EMISSIONS_DECIMALS),
            emissions_rate_g_per_s: format_fixed(
                self.emissions_rate_g_per_s,
                EMISSIONS_RATE_DECIMALS,
            ),
            runtime_minutes: format_fixed(self.runtime_minutes, RUNTIME_DECIMALS),
        }
    }
}

/// A request that passed completeness checks, with identifiers resolved.
#[derive(Debug, Clone, PartialEq)]
struct Parameters<'a> {
    model: Model,
    task: Task,
    gpu: &'a str,
    region: &'a str,
    dataset_size: i64,
    batch_size: i64,
    num_epochs: i64,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Estimate energy, emissions and runtime for a fine-tuning run.
pub fn estimate(
    kb: &KnowledgeBase,
    request: &EstimationRequest,
) -> Result<EstimationResult, EstimationError> {
    let params = validate(request)?;
    let power_watts = kb.power_draw(params.gpu)?;
    let gpu = Gpu::from_str_value(params.gpu)
        .map_err(|_| EstimationError::UnknownGpu(params.gpu.to_string()))?;

    if params.model.requires_a100() && params.gpu != GPU_A100 {
        return Err(EstimationError::UnsupportedConfiguration {
            model: params.model.as_str().to_string(),
            gpu: params.gpu.to_string(),
        });
    }

    let batch_time_secs = kb
        .lookup_batch_time(params.model, params.task, gpu)
        .ok_or_else(|| EstimationError::MissingBatchTimingData {
            model: params.model.as_str().to_string(),
            task: params.task.as_str().to_string(),
            gpu: params.gpu.to_string(),
        })?;

    compute(&params, batch_time_secs, power_watts, |region| {
        kb.carbon_intensity(region)
    })
}

/// Completeness and sanity checks. Collects every offending field.
fn validate(request: &EstimationRequest) -> Result<Parameters<'_>, EstimationError> {
    let mut invalid = Vec::new();

    let model = non_empty(&request.model).and_then(|m| Model::from_str_value(m).ok());
    if model.is_none() {
        invalid.push("model");
    }
    let task = non_empty(&request.task).and_then(|t| Task::from_str_value(t).ok());
    if task.is_none() {
        invalid.push("task");
    }
    let gpu = non_empty(&request.gpu);
    if gpu.is_none() {
        invalid.push("gpu");
    }
    let region = non_empty(&request.region);
    if region.is_none() {
        invalid.push("region");
    }

    let dataset_size = request.dataset_size.filter(|n| *n >= 1);
    if dataset_size.is_none() {
        invalid.push("dataset_size");
    }
    let batch_size = request
        .batch_size
        .filter(|n| *n >= 1 && dataset_size.map_or(true, |d| *n <= d));
    if batch_size.is_none() {
        invalid.push("batch_size");
    }
    let num_epochs = request.num_epochs.filter(|n| *n >= 1);
    if num_epochs.is_none() {
        invalid.push("num_epochs");
    }

    match (model, task, gpu, region, dataset_size, batch_size, num_epochs) {
        (
            Some(model),
            Some(task),
            Some(gpu),
            Some(region),
            Some(dataset_size),
            Some(batch_size),
            Some(num_epochs),
        ) => Ok(Parameters {
            model,
            task,
            gpu,
            region,
            dataset_size,
            batch_size,
            num_epochs,
        }),
        _ => Err(EstimationError::IncompleteParameters(
            invalid.into_iter().map(str::to_string).collect(),
        )),
    }
}

/// The value as given, unless it is absent or blank. Identifiers are matched
/// exactly, so surrounding whitespace is never stripped.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Runtime, energy, emissions and rate once the lookups are resolved.
fn compute<F>(
    params: &Parameters<'_>,
    batch_time_secs: f64,
    power_watts: f64,
    intensity_for: F,
) -> Result<EstimationResult, EstimationError>
where
    F: Fn(&str) -> Option<f64>,
{
    let intensity = intensity_for(params.region)
        .ok_or_else(|| EstimationError::UnknownRegion(params.region.to_string()))?;

    let runtime_seconds = (params.dataset_size as f64 / params.batch_size as f64)
        * params.num_epochs as f64
        * batch_time_secs;
    if runtime_seconds == 0.0 {
        return Err(EstimationError::DegenerateRuntime);
    }
    let energy_kwh = power_watts * runtime_seconds / JOULES_PER_KWH;
    let emissions_g = energy_kwh * intensity;
    let emissions_rate_g_per_s = emissions_g / runtime_seconds;

    Ok(EstimationResult {
        energy_kwh,
        emissions_g,
        emissions_rate_g_per_s,
        runtime_seconds,
        runtime_minutes: runtime_seconds / SECS_PER_MIN,
    })
}
