//! Closed reference catalogs: fine-tuned models, NLP tasks and GPUs.
//!
//! Every identifier is the exact display string used across the dashboard
//! and the Record Store (`"Gemma-2B"`, `"Question Answering"`, `"A100"`).
//! Catalog order is significant: selection views list rows in this order.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identifier constants
// ---------------------------------------------------------------------------

pub const MODEL_LLAMA_2_7B: &str = "LLaMA-2-7B";
pub const MODEL_MISTRAL_7B: &str = "Mistral-7B";
pub const MODEL_GEMMA_2B: &str = "Gemma-2B";
pub const MODEL_GEMMA_7B: &str = "Gemma-7B";

/// All valid model identifiers, in catalog order.
pub const VALID_MODELS: &[&str] = &[
    MODEL_LLAMA_2_7B,
    MODEL_MISTRAL_7B,
    MODEL_GEMMA_2B,
    MODEL_GEMMA_7B,
];

pub const TASK_QUESTION_ANSWERING: &str = "Question Answering";
pub const TASK_TEXT_SUMMARISATION: &str = "Text Summarisation";
pub const TASK_SENTIMENT_ANALYSIS: &str = "Sentiment Analysis";

/// All valid task identifiers, in catalog order.
pub const VALID_TASKS: &[&str] = &[
    TASK_QUESTION_ANSWERING,
    TASK_TEXT_SUMMARISATION,
    TASK_SENTIMENT_ANALYSIS,
];

pub const GPU_T4: &str = "T4";
pub const GPU_L4: &str = "L4";
pub const GPU_A100: &str = "A100";

/// All valid GPU identifiers, in catalog order.
pub const VALID_GPUS: &[&str] = &[GPU_T4, GPU_L4, GPU_A100];

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// A fine-tuned LLM configuration under evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    #[serde(rename = "LLaMA-2-7B")]
    Llama2_7b,
    #[serde(rename = "Mistral-7B")]
    Mistral7b,
    #[serde(rename = "Gemma-2B")]
    Gemma2b,
    #[serde(rename = "Gemma-7B")]
    Gemma7b,
}

impl Model {
    pub const ALL: [Model; 4] = [
        Model::Llama2_7b,
        Model::Mistral7b,
        Model::Gemma2b,
        Model::Gemma7b,
    ];

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            MODEL_LLAMA_2_7B => Ok(Self::Llama2_7b),
            MODEL_MISTRAL_7B => Ok(Self::Mistral7b),
            MODEL_GEMMA_2B => Ok(Self::Gemma2b),
            MODEL_GEMMA_7B => Ok(Self::Gemma7b),
            _ => Err(format!(
                "Unknown model '{s}'. Must be one of: {}",
                VALID_MODELS.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Llama2_7b => MODEL_LLAMA_2_7B,
            Self::Mistral7b => MODEL_MISTRAL_7B,
            Self::Gemma2b => MODEL_GEMMA_2B,
            Self::Gemma7b => MODEL_GEMMA_7B,
        }
    }

    /// Whether fine-tuning this model needs the high-memory A100.
    ///
    /// Gemma-7B does not fit in T4 or L4 memory.
    pub fn requires_a100(&self) -> bool {
        matches!(self, Self::Gemma7b)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Llama2_7b => {
                "LLaMA-2 is a family of open-access pretrained and fine-tuned LLMs released by \
                 Meta in July 2023, available with 7B, 13B and 70B parameters. Only the \
                 7B-parameter configuration is evaluated. The architecture uses \
                 pre-normalisation, RoPE embeddings, SwiGLU activation and Grouped-Query \
                 Attention (GQA)."
            }
            Self::Mistral7b => {
                "Mistral 7B is a 7-billion parameter LLM released in October 2023, reported to \
                 outperform LLaMA-2 13B across evaluation benchmarks. The architecture uses \
                 Grouped-Query Attention, Sliding Window Attention, a Rolling Buffer Cache, \
                 and pre-fill and chunking."
            }
            Self::Gemma2b => {
                "Gemma is a family of open LLMs released by Google in February 2024 with 2B and \
                 7B parameters. The 2B configuration uses Multi-Query Attention, RoPE \
                 embeddings, GeGLU activation and RMSNorm normalisation."
            }
            Self::Gemma7b => {
                "Gemma is a family of open LLMs released by Google in February 2024 with 2B and \
                 7B parameters. The 7B configuration uses RoPE embeddings, GeGLU activation \
                 and RMSNorm normalisation."
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// An NLP workload type used for fine-tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    #[serde(rename = "Question Answering")]
    QuestionAnswering,
    #[serde(rename = "Text Summarisation")]
    TextSummarisation,
    #[serde(rename = "Sentiment Analysis")]
    SentimentAnalysis,
}

impl Task {
    pub const ALL: [Task; 3] = [
        Task::QuestionAnswering,
        Task::TextSummarisation,
        Task::SentimentAnalysis,
    ];

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            TASK_QUESTION_ANSWERING => Ok(Self::QuestionAnswering),
            TASK_TEXT_SUMMARISATION => Ok(Self::TextSummarisation),
            TASK_SENTIMENT_ANALYSIS => Ok(Self::SentimentAnalysis),
            _ => Err(format!(
                "Unknown task '{s}'. Must be one of: {}",
                VALID_TASKS.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuestionAnswering => TASK_QUESTION_ANSWERING,
            Self::TextSummarisation => TASK_TEXT_SUMMARISATION,
            Self::SentimentAnalysis => TASK_SENTIMENT_ANALYSIS,
        }
    }

    pub fn definition(&self) -> &'static str {
        match self {
            Self::QuestionAnswering => {
                "Generating accurate answers to questions based on a given context or \
                 knowledge source. Used to automate customer support from knowledge bases \
                 and to train virtual assistants."
            }
            Self::TextSummarisation => {
                "Producing a concise summary of a longer text while retaining its main points. \
                 Useful for aggregating long news articles or reviewing lengthy legal \
                 documents."
            }
            Self::SentimentAnalysis => {
                "Identifying and classifying the emotional tone of a text as positive, \
                 negative or neutral. Used in market research to gauge customer response to a \
                 product or brand."
            }
        }
    }
}

// ---------------------------------------------------------------------------
// GPU
// ---------------------------------------------------------------------------

/// Rated average power draw of an NVIDIA T4, in watts.
pub const T4_POWER_WATTS: f64 = 120.23;
/// Rated average power draw of an NVIDIA L4, in watts.
pub const L4_POWER_WATTS: f64 = 132.57;
/// Rated average power draw of an NVIDIA A100, in watts.
pub const A100_POWER_WATTS: f64 = 292.87;

/// An accelerator class with a known rated power draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gpu {
    T4,
    L4,
    A100,
}

impl Gpu {
    pub const ALL: [Gpu; 3] = [Gpu::T4, Gpu::L4, Gpu::A100];

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            GPU_T4 => Ok(Self::T4),
            GPU_L4 => Ok(Self::L4),
            GPU_A100 => Ok(Self::A100),
            _ => Err(format!(
                "Unknown GPU '{s}'. Must be one of: {}",
                VALID_GPUS.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::T4 => GPU_T4,
            Self::L4 => GPU_L4,
            Self::A100 => GPU_A100,
        }
    }

    /// Rated average power draw in watts.
    pub fn power_watts(&self) -> f64 {
        match self {
            Self::T4 => T4_POWER_WATTS,
            Self::L4 => L4_POWER_WATTS,
            Self::A100 => A100_POWER_WATTS,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::T4 => {
                "Mid-range accelerator for inference, light training and AI workloads, \
                 optimised for low power consumption. Uses less energy per second than the \
                 larger GPUs but takes longer to complete fine-tuning, which can balance out \
                 its overall emissions."
            }
            Self::L4 => {
                "Successor to the T4 with enhanced AI and graphics capabilities for \
                 multi-modal and generative workloads. Faster than the T4 while remaining \
                 energy-efficient; a middle ground between T4 cost and A100 power."
            }
            Self::A100 => {
                "High-performance accelerator for deep learning training and inference on \
                 large datasets. Tensor cores drastically reduce fine-tuning time; it draws \
                 more power and emits more CO2 per second, often offset by its shorter \
                 runtime."
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog entries (serializable views)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub name: Model,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskInfo {
    pub name: Task,
    pub definition: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GpuInfo {
    pub name: Gpu,
    pub description: &'static str,
    pub power_watts: f64,
}

pub fn model_catalog() -> Vec<ModelInfo> {
    Model::ALL
        .iter()
        .map(|m| ModelInfo {
            name: *m,
            description: m.description(),
        })
        .collect()
}

pub fn task_catalog() -> Vec<TaskInfo> {
    Task::ALL
        .iter()
        .map(|t| TaskInfo {
            name: *t,
            definition: t.definition(),
        })
        .collect()
}

pub fn gpu_catalog() -> Vec<GpuInfo> {
    Gpu::ALL
        .iter()
        .map(|g| GpuInfo {
            name: *g,
            description: g.description(),
            power_watts: g.power_watts(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_round_trips_through_str_value() {
        for model in Model::ALL {
            assert_eq!(Model::from_str_value(model.as_str()).unwrap(), model);
        }
    }

    #[test]
    fn unknown_model_lists_valid_values() {
        let err = Model::from_str_value("GPT-4").unwrap_err();
        assert!(err.contains("GPT-4"));
        assert!(err.contains(MODEL_GEMMA_7B));
    }

    #[test]
    fn identifiers_are_case_sensitive() {
        assert!(Gpu::from_str_value("a100").is_err());
        assert!(Task::from_str_value("question answering").is_err());
    }

    #[test]
    fn only_gemma_7b_requires_a100() {
        let requiring: Vec<_> = Model::ALL.iter().filter(|m| m.requires_a100()).collect();
        assert_eq!(requiring, vec![&Model::Gemma7b]);
    }

    #[test]
    fn gpu_power_table() {
        assert_eq!(Gpu::T4.power_watts(), 120.23);
        assert_eq!(Gpu::L4.power_watts(), 132.57);
        assert_eq!(Gpu::A100.power_watts(), 292.87);
    }

    #[test]
    fn serde_uses_display_names() {
        assert_eq!(
            serde_json::to_value(Model::Llama2_7b).unwrap(),
            serde_json::json!("LLaMA-2-7B")
        );
        assert_eq!(
            serde_json::to_value(Task::TextSummarisation).unwrap(),
            serde_json::json!("Text Summarisation")
        );
        let gpu: Gpu = serde_json::from_str("\"L4\"").unwrap();
        assert_eq!(gpu, Gpu::L4);
    }

    #[test]
    fn catalogs_follow_catalog_order() {
        let names: Vec<_> = model_catalog().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, VALID_MODELS);
        assert_eq!(task_catalog().len(), 3);
        let gpus = gpu_catalog();
        assert_eq!(gpus[2].name, Gpu::A100);
        assert_eq!(gpus[2].power_watts, A100_POWER_WATTS);
    }
}
