//! Creative brief produced by the analysis stage.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, ModelResult};

/// Instruction pair consumed by the asset and video generation stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreativeBrief {
    /// Prompt for the polished product still
    pub image_prompt: String,
    /// Prompt for the animated scene
    pub video_prompt: String,
}

impl CreativeBrief {
    /// Parse the analysis model's text output.
    ///
    /// Markdown code fences around the JSON are tolerated. Both prompts must
    /// be present and non-blank.
    pub fn from_model_text(text: &str) -> ModelResult<Self> {
        let cleaned = strip_code_fences(text);
        let cleaned = if cleaned.is_empty() { "{}" } else { cleaned.as_str() };

        let value: Value = serde_json::from_str(cleaned).map_err(|e| {
            ModelError::incomplete_brief(format!("Failed to parse creative brief: {}", e))
        })?;
        let fields = value
            .as_object()
            .ok_or_else(|| ModelError::incomplete_brief("creative brief is not a JSON object"))?;

        let image_prompt = prompt_field(fields, "image_prompt")?;
        let video_prompt = prompt_field(fields, "video_prompt")?;

        Ok(Self {
            image_prompt,
            video_prompt,
        })
    }
}

/// A present, non-blank string field.
fn prompt_field(fields: &Map<String, Value>, name: &str) -> ModelResult<String> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| ModelError::incomplete_brief(format!("missing {}", name)))
}

/// Remove markdown code fences (```` ```json ```` and ```` ``` ````) and trim.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}
