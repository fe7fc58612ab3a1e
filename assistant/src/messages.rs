//! `generateContent` and `predict` request and response types

use crate::error::AssistantError;
use crate::types::Content;
use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation, oldest first
    pub contents: Vec<Content>,
    /// System instruction (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Generation settings (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Create a request from a conversation
    #[must_use]
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            system_instruction: None,
            generation_config: None,
        }
    }

    /// Single-prompt request
    #[must_use]
    pub fn prompt(text: impl Into<String>) -> Self {
        Self::new(vec![Content::user(text)])
    }

    /// Builder: Set system instruction
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::system(system));
        self
    }

    /// Builder: Disable model "thinking" for low-latency answers
    #[must_use]
    pub fn without_thinking(mut self) -> Self {
        self.generation_config = Some(GenerationConfig {
            thinking_config: Some(ThinkingConfig { thinking_budget: 0 }),
        });
        self
    }
}

/// Generation settings
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Thinking settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

/// Thinking budget, in tokens; 0 disables thinking
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    /// Token budget
    pub thinking_budget: u32,
}

/// Response from `generateContent`
#[derive(Clone, Debug, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidate answers
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One candidate answer
#[derive(Clone, Debug, Deserialize)]
pub struct Candidate {
    /// Answer content
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::EmptyResponse`] if the first candidate has no text.
    pub fn text(&self) -> Result<String, AssistantError> {
        let text: String = self
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        let trimmed = text.trim();
        if trimmed.is_empty() {
            Err(AssistantError::EmptyResponse("generateContent"))
        } else {
            Ok(trimmed.to_string())
        }
    }
}

/// Request body for `models/{model}:predict` (image generation)
#[derive(Clone, Debug, Serialize)]
pub struct PredictRequest {
    /// Prompts, one per instance
    pub instances: Vec<PredictInstance>,
    /// Output settings
    pub parameters: PredictParameters,
}

impl PredictRequest {
    /// One 16:9 image for a prompt
    #[must_use]
    pub fn image(prompt: impl Into<String>) -> Self {
        Self {
            instances: vec![PredictInstance {
                prompt: prompt.into(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: "16:9".to_string(),
                output_mime_type: "image/jpeg".to_string(),
            },
        }
    }
}

/// One image prompt
#[derive(Clone, Debug, Serialize)]
pub struct PredictInstance {
    /// Prompt text
    pub prompt: String,
}

/// Image output settings
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    /// Number of images
    pub sample_count: u32,
    /// Aspect ratio, e.g. `"16:9"`
    pub aspect_ratio: String,
    /// Encoded image format
    pub output_mime_type: String,
}

/// Response from `predict`
#[derive(Clone, Debug, Deserialize)]
pub struct PredictResponse {
    /// Generated images
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// A generated image
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Base64 image bytes
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    /// Image MIME type
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl PredictResponse {
    /// The first image as a `data:` URL
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::EmptyResponse`] if no image bytes came back.
    pub fn data_url(&self) -> Result<String, AssistantError> {
        let prediction = self
            .predictions
            .first()
            .ok_or(AssistantError::EmptyResponse("predict"))?;

        match prediction.bytes_base64_encoded.as_deref() {
            Some(bytes) if !bytes.is_empty() => {
                let mime = prediction.mime_type.as_deref().unwrap_or("image/jpeg");
                Ok(format!("data:{mime};base64,{bytes}"))
            }
            _ => Err(AssistantError::EmptyResponse("predict")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest::prompt("Hello")
            .with_system("Be brief")
            .without_thinking();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "Be brief");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(
            json["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            0
        );
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Hello "}, {"text": "there."}]}},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();

        assert_eq!(response.text().unwrap(), "Hello there.");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(matches!(
            response.text(),
            Err(AssistantError::EmptyResponse(_))
        ));
    }

    #[test]
    fn test_predict_request_shape() {
        let json = serde_json::to_value(PredictRequest::image("poster")).unwrap();
        assert_eq!(json["instances"][0]["prompt"], "poster");
        assert_eq!(json["parameters"]["sampleCount"], 1);
        assert_eq!(json["parameters"]["aspectRatio"], "16:9");
    }

    #[test]
    fn test_predict_response_data_url() {
        let response: PredictResponse = serde_json::from_value(serde_json::json!({
            "predictions": [{"bytesBase64Encoded": "QUJD", "mimeType": "image/jpeg"}]
        }))
        .unwrap();
        assert_eq!(response.data_url().unwrap(), "data:image/jpeg;base64,QUJD");

        let empty: PredictResponse =
            serde_json::from_value(serde_json::json!({"predictions": []})).unwrap();
        assert!(empty.data_url().is_err());
    }
}
