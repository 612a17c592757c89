//! Embedded empirical reference tables.
//!
//! Both tables are keyed by `(Model, Task, Gpu)` and are sparse: Gemma-7B was
//! only measured on the A100, and Mistral-7B sentiment analysis on the L4 has
//! batch timing but no full measurement run. Lookups return `Option` so a
//! missing combination is never confused with a zero reading.

use serde::Serialize;

use crate::catalog::{Gpu, Model, Task};

/// Seconds per minute, used to derive per-second emission rates.
pub const SECS_PER_MIN: f64 = 60.0;

// ---------------------------------------------------------------------------
// Measurement entries
// ---------------------------------------------------------------------------

/// One measured fine-tuning run.
///
/// The emission rate is not stored; [`MeasurementEntry::emissions_rate`]
/// derives it from the primary fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasurementEntry {
    /// Energy consumed, kWh.
    pub energy_kwh: f64,
    /// Emissions, grams CO2-equivalent.
    pub emissions_g: f64,
    /// Wall-clock duration, minutes.
    pub duration_min: f64,
}

impl MeasurementEntry {
    const fn new(energy_kwh: f64, emissions_g: f64, duration_min: f64) -> Self {
        Self {
            energy_kwh,
            emissions_g,
            duration_min,
        }
    }

    /// Emissions per second of run time (g CO2e / s).
    pub fn emissions_rate(&self) -> f64 {
        self.emissions_g / (self.duration_min * SECS_PER_MIN)
    }
}

/// Look up the measured run for a combination, if one exists.
pub fn measurement(model: Model, task: Task, gpu: Gpu) -> Option<MeasurementEntry> {
    use Gpu::*;
    use Model::*;
    use Task::*;

    let entry = match (model, task, gpu) {
        (Llama2_7b, QuestionAnswering, T4) => MeasurementEntry::new(0.139, 68.18, 70.02),
        (Llama2_7b, QuestionAnswering, L4) => MeasurementEntry::new(0.124, 58.57, 56.1),
        (Llama2_7b, QuestionAnswering, A100) => MeasurementEntry::new(0.121, 56.79, 24.41),
        (Llama2_7b, TextSummarisation, T4) => MeasurementEntry::new(0.176, 86.24, 88.94),
        (Llama2_7b, TextSummarisation, L4) => MeasurementEntry::new(0.158, 55.04, 80.0),
        (Llama2_7b, TextSummarisation, A100) => MeasurementEntry::new(0.143, 64.83, 25.04),
        (Llama2_7b, SentimentAnalysis, T4) => MeasurementEntry::new(0.175, 85.64, 88.09),
        (Llama2_7b, SentimentAnalysis, L4) => MeasurementEntry::new(0.267, 125.64, 119.77),
        (Llama2_7b, SentimentAnalysis, A100) => MeasurementEntry::new(0.257, 116.3, 52.38),

        (Mistral7b, QuestionAnswering, T4) => MeasurementEntry::new(0.142, 50.15, 70.32),
        (Mistral7b, QuestionAnswering, L4) => MeasurementEntry::new(0.132, 62.33, 59.89),
        (Mistral7b, QuestionAnswering, A100) => MeasurementEntry::new(0.13, 58.67, 27.5),
        (Mistral7b, TextSummarisation, T4) => MeasurementEntry::new(0.206, 71.85, 103.75),
        (Mistral7b, TextSummarisation, L4) => MeasurementEntry::new(0.167, 78.48, 75.18),
        (Mistral7b, TextSummarisation, A100) => MeasurementEntry::new(0.161, 75.83, 26.58),
        (Mistral7b, SentimentAnalysis, T4) => MeasurementEntry::new(0.174, 84.88, 87.04),
        // Not measured: the L4 run exceeded the available compute budget.
        (Mistral7b, SentimentAnalysis, L4) => return None,
        (Mistral7b, SentimentAnalysis, A100) => MeasurementEntry::new(0.139, 63.04, 30.09),

        (Gemma2b, QuestionAnswering, T4) => MeasurementEntry::new(0.052, 25.36, 25.95),
        (Gemma2b, QuestionAnswering, L4) => MeasurementEntry::new(0.051, 23.97, 23.2),
        (Gemma2b, QuestionAnswering, A100) => MeasurementEntry::new(0.071, 24.92, 21.95),
        (Gemma2b, TextSummarisation, T4) => MeasurementEntry::new(0.08, 39.13, 39.13),
        (Gemma2b, TextSummarisation, L4) => MeasurementEntry::new(0.067, 31.62, 30.37),
        (Gemma2b, TextSummarisation, A100) => MeasurementEntry::new(0.065, 30.38, 14.9),
        (Gemma2b, SentimentAnalysis, T4) => MeasurementEntry::new(0.06, 29.53, 29.53),
        (Gemma2b, SentimentAnalysis, L4) => MeasurementEntry::new(0.051, 24.12, 23.21),
        (Gemma2b, SentimentAnalysis, A100) => MeasurementEntry::new(0.06, 27.25, 16.47),

        (Gemma7b, QuestionAnswering, A100) => MeasurementEntry::new(0.15, 70.48, 32.28),
        (Gemma7b, TextSummarisation, A100) => MeasurementEntry::new(0.25, 117.93, 38.27),
        (Gemma7b, SentimentAnalysis, A100) => MeasurementEntry::new(0.14, 63.37, 27.05),
        (Gemma7b, _, T4 | L4) => return None,
    };
    Some(entry)
}

// ---------------------------------------------------------------------------
// Batch timing entries
// ---------------------------------------------------------------------------

/// Mean wall-clock seconds to process one batch of data for a combination.
pub fn batch_time_secs(model: Model, task: Task, gpu: Gpu) -> Option<f64> {
    use Gpu::*;
    use Model::*;
    use Task::*;

    let secs = match (model, task, gpu) {
        (Llama2_7b, QuestionAnswering, T4) => 1.0503,
        (Llama2_7b, QuestionAnswering, L4) => 0.8415,
        (Llama2_7b, QuestionAnswering, A100) => 0.36615,
        (Llama2_7b, TextSummarisation, T4) => 1.3341,
        (Llama2_7b, TextSummarisation, L4) => 1.2,
        (Llama2_7b, TextSummarisation, A100) => 0.3756,
        (Llama2_7b, SentimentAnalysis, T4) => 1.32135,
        (Llama2_7b, SentimentAnalysis, L4) => 1.79655,
        (Llama2_7b, SentimentAnalysis, A100) => 0.7857,

        (Mistral7b, QuestionAnswering, T4) => 1.0548,
        (Mistral7b, QuestionAnswering, L4) => 0.89835,
        (Mistral7b, QuestionAnswering, A100) => 0.4125,
        (Mistral7b, TextSummarisation, T4) => 1.55625,
        (Mistral7b, TextSummarisation, L4) => 1.1277,
        (Mistral7b, TextSummarisation, A100) => 0.3987,
        (Mistral7b, SentimentAnalysis, T4) => 1.3056,
        (Mistral7b, SentimentAnalysis, L4) => 1.013025,
        (Mistral7b, SentimentAnalysis, A100) => 0.45135,

        (Gemma2b, QuestionAnswering, T4) => 0.38925,
        (Gemma2b, QuestionAnswering, L4) => 0.348,
        (Gemma2b, QuestionAnswering, A100) => 0.32925,
        (Gemma2b, TextSummarisation, T4) => 0.58695,
        (Gemma2b, TextSummarisation, L4) => 0.45555,
        (Gemma2b, TextSummarisation, A100) => 0.2235,
        (Gemma2b, SentimentAnalysis, T4) => 0.44295,
        (Gemma2b, SentimentAnalysis, L4) => 0.34815,
        (Gemma2b, SentimentAnalysis, A100) => 0.24705,

        (Gemma7b, QuestionAnswering, A100) => 0.4842,
        (Gemma7b, TextSummarisation, A100) => 0.57405,
        (Gemma7b, SentimentAnalysis, A100) => 0.40575,
        (Gemma7b, _, T4 | L4) => return None,
    };
    Some(secs)
}
