//! Read-only Knowledge Base facade over the reference tables and the loaded
//! region carbon-intensity table.
//!
//! Built once per process after the region table loads; immutable afterwards,
//! so it can be shared behind an `Arc` without locking.

use serde::{Deserialize, Serialize};

use crate::carbon_intensity::RegionCarbonIntensity;
use crate::catalog::{Gpu, Model, Task};
use crate::error::CoreError;
use crate::estimation::EstimationError;
use crate::format::format_scientific;
use crate::reference::{self, MeasurementEntry};

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    regions: RegionCarbonIntensity,
}

impl KnowledgeBase {
    pub fn new(regions: RegionCarbonIntensity) -> Self {
        Self { regions }
    }

    pub fn lookup_measurement(&self, model: Model, task: Task, gpu: Gpu) -> Option<MeasurementEntry> {
        reference::measurement(model, task, gpu)
    }

    /// Mean seconds per batch of data for the combination.
    pub fn lookup_batch_time(&self, model: Model, task: Task, gpu: Gpu) -> Option<f64> {
        reference::batch_time_secs(model, task, gpu)
    }

    /// Rated power draw in watts for a GPU identifier such as `"A100"`.
    pub fn power_draw(&self, gpu: &str) -> Result<f64, EstimationError> {
        Gpu::from_str_value(gpu)
            .map(|g| g.power_watts())
            .map_err(|_| EstimationError::UnknownGpu(gpu.to_string()))
    }

    /// Carbon intensity (g CO2 / kWh) for an exact region name.
    pub fn carbon_intensity(&self, region: &str) -> Option<f64> {
        self.regions.get(region)
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.regions()
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }
}

// ---------------------------------------------------------------------------
// Selection views
// ---------------------------------------------------------------------------

/// A partial (model, task, GPU) choice from the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub model: Option<Model>,
    pub task: Option<Task>,
    pub gpu: Option<Gpu>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.model.is_none() && self.task.is_none() && self.gpu.is_none()
    }

    /// Dimensions left open, in `model`, `task`, `gpu` order.
    pub fn unselected(&self) -> Vec<Dimension> {
        let mut open = Vec::new();
        if self.model.is_none() {
            open.push(Dimension::Model);
        }
        if self.task.is_none() {
            open.push(Dimension::Task);
        }
        if self.gpu.is_none() {
            open.push(Dimension::Gpu);
        }
        open
    }
}

/// Slice the measurement table by a partial selection.
///
/// Unselected dimensions expand to every catalog value, iterated model ->
/// task -> GPU in catalog order. At least one dimension must be selected.
/// Only the embedded tables are read, so this works before regions load.
pub fn select(selection: Selection) -> Result<SelectionView, CoreError> {
    if selection.is_empty() {
        return Err(CoreError::Validation(
            "Please select a model, task, and/or GPU to view data".to_string(),
        ));
    }

    let models: Vec<Model> = selection.model.map_or(Model::ALL.to_vec(), |m| vec![m]);
    let tasks: Vec<Task> = selection.task.map_or(Task::ALL.to_vec(), |t| vec![t]);
    let gpus: Vec<Gpu> = selection.gpu.map_or(Gpu::ALL.to_vec(), |g| vec![g]);

    let mut rows = Vec::with_capacity(models.len() * tasks.len() * gpus.len());
    for &model in &models {
        for &task in &tasks {
            for &gpu in &gpus {
                rows.push(SelectionRow {
                    model,
                    task,
                    gpu,
                    measurement: reference::measurement(model, task, gpu)
                        .map(MeasurementView::from),
                });
            }
        }
    }

    Ok(SelectionView {
        varying: selection.unselected(),
        rows,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Model,
    Task,
    Gpu,
}

/// A measured run with its derived emissions rate filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementView {
    pub energy_kwh: f64,
    pub emissions_g: f64,
    pub emissions_rate_g_per_s: f64,
    /// The rate as the dashboard shows it, e.g. `"1.62 x 10^-2"`.
    pub emissions_rate_display: String,
    pub duration_min: f64,
}

impl From<MeasurementEntry> for MeasurementView {
    fn from(entry: MeasurementEntry) -> Self {
        let rate = entry.emissions_rate();
        Self {
            energy_kwh: entry.energy_kwh,
            emissions_g: entry.emissions_g,
            emissions_rate_g_per_s: rate,
            emissions_rate_display: format_scientific(rate),
            duration_min: entry.duration_min,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionRow {
    pub model: Model,
    pub task: Task,
    pub gpu: Gpu,
    /// `None` when the combination was never measured.
    pub measurement: Option<MeasurementView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionView {
    /// Dimensions that vary across `rows`; empty for a single cell.
    pub varying: Vec<Dimension>,
    pub rows: Vec<SelectionRow>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::new([("France", 56.04), ("India", 713.44)].into_iter().collect())
    }

    #[test]
    fn measurement_absent_is_not_zero() {
        let kb = kb();
        assert!(kb
            .lookup_measurement(Model::Gemma7b, Task::QuestionAnswering, Gpu::T4)
            .is_none());
        let present = kb
            .lookup_measurement(Model::Gemma7b, Task::QuestionAnswering, Gpu::A100)
            .unwrap();
        assert!(present.energy_kwh > 0.0);
    }

    #[test]
    fn power_draw_is_total_over_catalog() {
        let kb = kb();
        assert_eq!(kb.power_draw("T4").unwrap(), 120.23);
        assert_eq!(kb.power_draw("A100").unwrap(), 292.87);
        assert_matches!(kb.power_draw("H100"), Err(EstimationError::UnknownGpu(g)) if g == "H100");
    }

    #[test]
    fn carbon_intensity_exact_match() {
        let kb = kb();
        assert_eq!(kb.carbon_intensity("India"), Some(713.44));
        assert_eq!(kb.carbon_intensity("INDIA"), None);
        assert_eq!(kb.region_count(), 2);
    }

    #[test]
    fn full_selection_yields_single_cell() {
        let view = select(Selection {
            model: Some(Model::Gemma2b),
            task: Some(Task::QuestionAnswering),
            gpu: Some(Gpu::T4),
        })
        .unwrap();
        assert!(view.varying.is_empty());
        assert_eq!(view.rows.len(), 1);
        let m = view.rows[0].measurement.as_ref().unwrap();
        assert_eq!(m.energy_kwh, 0.052);
        assert!((m.emissions_rate_g_per_s - 25.36 / (25.95 * 60.0)).abs() < 1e-12);
        assert_eq!(m.emissions_rate_display, "1.63 x 10^-2");
    }

    #[test]
    fn two_selections_list_the_open_dimension() {
        let view = select(Selection {
            model: Some(Model::Gemma7b),
            task: Some(Task::TextSummarisation),
            gpu: None,
        })
        .unwrap();
        assert_eq!(view.varying, vec![Dimension::Gpu]);
        let gpus: Vec<_> = view.rows.iter().map(|r| r.gpu).collect();
        assert_eq!(gpus, Gpu::ALL.to_vec());
        assert!(view.rows[0].measurement.is_none());
        assert!(view.rows[1].measurement.is_none());
        assert!(view.rows[2].measurement.is_some());
    }

    #[test]
    fn single_selection_yields_grid_in_catalog_order() {
        let view = select(Selection {
            model: None,
            task: None,
            gpu: Some(Gpu::L4),
        })
        .unwrap();
        assert_eq!(view.varying, vec![Dimension::Model, Dimension::Task]);
        assert_eq!(view.rows.len(), 12);
        assert_eq!(view.rows[0].model, Model::Llama2_7b);
        assert_eq!(view.rows[1].task, Task::TextSummarisation);
        let missing = view.rows.iter().filter(|r| r.measurement.is_none()).count();
        // Mistral-7B sentiment analysis plus every Gemma-7B task.
        assert_eq!(missing, 4);
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert_matches!(select(Selection::default()), Err(CoreError::Validation(_)));
    }
}
