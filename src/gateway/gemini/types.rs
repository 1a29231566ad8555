use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequest {
    pub(super) contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) tools: Option<Vec<GeminiTool>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub(super) generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub(super) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) role: Option<String>,
    pub(super) parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub(super) struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub(super) inline_data: Option<GeminiInlineData>,
}

impl Part {
    pub(super) fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    pub(super) fn inline_data(data: GeminiInlineData) -> Self {
        Self {
            text: None,
            inline_data: Some(data),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    pub(super) mime_type: String,
    pub(super) data: String,
}

/// Tool entry enabling grounding via Google Search during brand analysis.
#[derive(Debug, Serialize)]
pub(super) struct GeminiTool {
    #[serde(rename = "googleSearch")]
    pub(super) google_search: Value,
}

impl GeminiTool {
    pub(super) fn google_search() -> Self {
        Self {
            google_search: Value::Object(serde_json::Map::new()),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub(super) struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub(super) response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub(super) response_schema: Option<Value>,
    #[serde(rename = "imageConfig", skip_serializing_if = "Option::is_none")]
    pub(super) image_config: Option<ImageConfig>,
}

impl GenerationConfig {
    pub(super) fn json_with_schema(schema: Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            image_config: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ImageConfig {
    #[serde(rename = "aspectRatio")]
    pub(super) aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponse {
    pub(super) candidates: Option<Vec<Candidate>>,
    pub(super) error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Candidate {
    pub(super) content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateContent {
    #[serde(default)]
    pub(super) parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponsePart {
    pub(super) text: Option<String>,
    #[serde(rename = "inlineData")]
    pub(super) inline_data: Option<GeminiInlineData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiError {
    pub(super) message: String,
}
