//! Model catalog
//!
//! Estimated RAM figures are for quantized GGUF/ONNX builds and include
//! roughly 1 GB of KV cache for the context window.

use crate::error::{CapacityError, IoResultExt, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Kind of inference workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelCategory {
    /// Text generation
    #[serde(rename = "LLM")]
    Llm,
    /// Multimodal image understanding
    Vision,
    /// Audio generation
    Audio,
    /// Image generation
    Image,
}

impl ModelCategory {
    /// Short label used in tables
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Llm => "LLM",
            Self::Vision => "Vision",
            Self::Audio => "Audio",
            Self::Image => "Image",
        }
    }

    /// Generative media workloads that saturate the CPU
    pub fn is_generative_media(&self) -> bool {
        matches!(self, Self::Image | Self::Audio)
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate model and its memory cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Unique identifier
    pub id: String,
    /// Workload kind
    pub category: ModelCategory,
    /// Name shown in reports
    #[serde(rename = "name")]
    pub display_name: String,
    /// Estimated resident RAM in GB
    #[serde(rename = "ram_gb")]
    pub ram_cost_gb: f64,
    /// One-line summary
    #[serde(rename = "desc", default)]
    pub description: String,
}

type BuiltinRow = (&'static str, ModelCategory, &'static str, f64, &'static str);

static BUILTIN_MODELS: &[BuiltinRow] = &[
    // Text
    ("qwen2.5-0.5b", ModelCategory::Llm, "Qwen 2.5 (0.5B)", 1.0, "Tiny, fast text classification/simple logic."),
    ("llama3.2-3b", ModelCategory::Llm, "Llama 3.2 (3B)", 3.5, "Best balance of speed/smarts for 4-core CPUs."),
    ("qwen2.5-7b", ModelCategory::Llm, "Qwen 2.5 (7B)", 6.5, "Coding capable. Comparable to GPT-3.5."),
    ("mistral-nemo-12b", ModelCategory::Llm, "Mistral NeMo (12B)", 10.0, "Smart, but slow on 4 cores."),
    ("qwen2.5-32b", ModelCategory::Llm, "Qwen 2.5 (32B)", 22.0, "Expert coder. Too heavy for concurrent game-server usage."),
    // Vision
    ("moondream2", ModelCategory::Vision, "Moondream 2", 2.5, "Very fast image description for CPUs."),
    ("llava-v1.6-7b", ModelCategory::Vision, "LLaVA v1.6 (7B)", 6.0, "Standard open-source vision model."),
    // Generative media
    ("musicgen-small", ModelCategory::Audio, "MusicGen Small", 4.0, "Generates short music loops. CPU heavy."),
    ("fastsd-cpu", ModelCategory::Image, "FastSD (OpenVINO)", 5.0, "Optimized Stable Diffusion for CPU. Expect 1-2 mins/image."),
    ("flux-schnell", ModelCategory::Image, "Flux Schnell (Quant)", 14.0, "High quality image gen. Will likely OOM kill the game servers."),
];

#[derive(Deserialize)]
struct CatalogFile {
    models: Vec<ModelSpec>,
}

/// Ordered, validated set of models
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    models: Vec<ModelSpec>,
}

impl Catalog {
    /// The built-in ten-model catalog
    pub fn builtin() -> Self {
        let models = BUILTIN_MODELS
            .iter()
            .map(|&(id, category, name, ram_gb, desc)| ModelSpec {
                id: id.to_string(),
                category,
                display_name: name.to_string(),
                ram_cost_gb: ram_gb,
                description: desc.to_string(),
            })
            .collect();
        Self { models }
    }

    /// Build a catalog from explicit models, keeping their order
    pub fn new(models: Vec<ModelSpec>) -> Result<Self> {
        if models.is_empty() {
            return Err(CapacityError::catalog("catalog contains no models"));
        }

        let mut seen = HashSet::new();
        for model in &models {
            if model.id.trim().is_empty() {
                return Err(CapacityError::catalog("model with empty id"));
            }
            if !seen.insert(model.id.as_str()) {
                return Err(CapacityError::catalog(format!("duplicate model id '{}'", model.id)));
            }
            if !model.ram_cost_gb.is_finite() || model.ram_cost_gb < 0.0 {
                return Err(CapacityError::catalog(format!(
                    "model '{}' has invalid RAM cost {}",
                    model.id, model.ram_cost_gb
                )));
            }
        }

        Ok(Self { models })
    }

    /// Parse a catalog from JSON of the form `{"models": [...]}`
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.models)
    }

    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).with_path(path)?;
        Self::from_json(&json)
            .map_err(|e| CapacityError::catalog(format!("{}: {e}", path.display())))
    }

    /// Models in declared order
    pub fn models(&self) -> &[ModelSpec] {
        &self.models
    }

    /// Number of models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
