//! Gemini REST implementation of the capability gateway.
//!
//! Text operations use structured output (`responseSchema`) so responses
//! deserialize straight into the domain types; poster generation uses the
//! image model with an `imageConfig` aspect ratio.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use async_trait::async_trait;

use super::aspect::AspectRatio;
use super::http_client::build_gateway_client;
use super::{CapabilityGateway, prompts};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::model::{
    AiStrategies, BrandInputs, BrandProfile, CampaignConfig, CopyAssets, ImageAsset, ToneOptions,
    selected_copy_keys, selected_strategy_keys,
};

mod types;
use types::{
    Content, GeminiInlineData, GeminiTool, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, ImageConfig, Part,
};

pub struct GeminiGateway {
    api_key: Option<String>,
    base_url: String,
    text_model: String,
    image_model: String,
    client: Client,
}

impl GeminiGateway {
    /// Create a gateway from settings.
    ///
    /// API key resolution order: explicit key, then `GEMINI_API_KEY`, then
    /// `GOOGLE_API_KEY`.
    pub fn new(settings: &GatewayConfig, api_key: Option<&str>) -> Self {
        let resolved_key = api_key
            .map(String::from)
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok());

        Self {
            api_key: resolved_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            text_model: settings.text_model.clone(),
            image_model: settings.image_model.clone(),
            client: build_gateway_client(settings.request_timeout_secs),
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| GatewayError::Auth.into())
    }

    async fn call(
        &self,
        endpoint: &'static str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/models/{model}:generateContent?key={api_key}",
            self.base_url
        );

        tracing::debug!(endpoint, model, "gateway request");

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Request {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Request {
                endpoint: endpoint.to_string(),
                message: format!("{status}: {body}"),
            }
            .into());
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        if let Some(err) = result.error {
            return Err(GatewayError::Request {
                endpoint: endpoint.to_string(),
                message: err.message,
            }
            .into());
        }

        Ok(result)
    }

    /// Concatenated text of the first candidate's parts.
    fn response_text(response: &GenerateContentResponse) -> String {
        let mut out = String::new();
        if let Some(candidate) = response.candidates.as_ref().and_then(|c| c.first()) {
            for part in &candidate.content.parts {
                if let Some(text) = &part.text {
                    out.push_str(text);
                }
            }
        }
        out
    }

    fn parse_structured<T: DeserializeOwned>(
        response: &GenerateContentResponse,
    ) -> std::result::Result<T, String> {
        let text = Self::response_text(response);
        if text.is_empty() {
            return Err("empty response".to_string());
        }
        serde_json::from_str(&text).map_err(|e| format!("unparsable payload: {e}"))
    }

    /// First inline image in any returned part of the first candidate.
    fn extract_image(response: GenerateContentResponse) -> Result<ImageAsset> {
        if let Some(candidate) = response.candidates.and_then(|mut c| {
            if c.is_empty() {
                None
            } else {
                Some(c.remove(0))
            }
        }) {
            for part in candidate.content.parts {
                if let Some(inline) = part.inline_data {
                    return Ok(ImageAsset {
                        mime_type: inline.mime_type,
                        data: inline.data,
                    });
                }
            }
        }
        Err(GatewayError::Generation("no image payload in response".into()).into())
    }

    fn inline_part(image: &ImageAsset) -> Part {
        Part::inline_data(GeminiInlineData {
            mime_type: image.mime_type.clone(),
            data: image.data.clone(),
        })
    }

    fn user_content(parts: Vec<Part>) -> Vec<Content> {
        vec![Content {
            role: Some("user".to_string()),
            parts,
        }]
    }

    // ── Response schemas (structured output) ────────────────────────────

    fn profile_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "persona": { "type": "STRING" },
                "toneOfVoice": { "type": "STRING" },
                "visualStyle": { "type": "STRING" },
                "targetAudience": { "type": "STRING" },
                "brandKeywords": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["persona", "toneOfVoice", "visualStyle", "targetAudience", "brandKeywords"]
        })
    }

    fn strategy_item_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "features": { "type": "STRING" },
                "tactics": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["features", "tactics"]
        })
    }

    fn strategies_schema(keys: &[crate::model::StrategyKey]) -> Value {
        let mut properties = Map::new();
        for key in keys {
            properties.insert(key.as_str().to_string(), Self::strategy_item_schema());
        }
        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": keys.iter().map(|k| k.as_str()).collect::<Vec<_>>()
        })
    }

    fn copy_schema(keys: &[&str]) -> Value {
        let mut properties = Map::new();
        for key in keys {
            properties.insert((*key).to_string(), json!({ "type": "STRING" }));
        }
        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": keys
        })
    }

    fn themes_schema() -> Value {
        json!({ "type": "ARRAY", "items": { "type": "STRING" } })
    }
}

#[async_trait]
impl CapabilityGateway for GeminiGateway {
    async fn analyze_brand(&self, inputs: &BrandInputs) -> Result<BrandProfile> {
        let mut parts = vec![Part::text(prompts::analysis_prompt(inputs))];
        for image in inputs.visual_images.iter().chain(&inputs.menu_images) {
            parts.push(Self::inline_part(image));
        }

        let request = GenerateContentRequest {
            contents: Self::user_content(parts),
            tools: Some(vec![GeminiTool::google_search()]),
            generation_config: Some(GenerationConfig::json_with_schema(Self::profile_schema())),
        };

        let response = self.call("analyze-brand", &self.text_model, &request).await?;
        Self::parse_structured(&response)
            .map_err(|reason| GatewayError::Analysis(reason).into())
    }

    async fn suggest_themes(&self, profile: &BrandProfile) -> Result<Vec<String>> {
        let request = GenerateContentRequest {
            contents: Self::user_content(vec![Part::text(prompts::themes_prompt(profile))]),
            tools: None,
            generation_config: Some(GenerationConfig::json_with_schema(Self::themes_schema())),
        };

        let response = self
            .call("theme-suggestions", &self.text_model, &request)
            .await?;
        Self::parse_structured(&response)
            .map_err(|reason| GatewayError::Generation(reason).into())
    }

    async fn generate_strategies(
        &self,
        profile: &BrandProfile,
        campaign: &CampaignConfig,
    ) -> Result<AiStrategies> {
        let keys = selected_strategy_keys(&campaign.materials);
        if keys.is_empty() {
            tracing::debug!("no image deliverables selected, skipping strategies call");
            return Ok(AiStrategies::default());
        }

        let request = GenerateContentRequest {
            contents: Self::user_content(vec![Part::text(prompts::strategies_prompt(
                profile, campaign,
            ))]),
            tools: None,
            generation_config: Some(GenerationConfig::json_with_schema(Self::strategies_schema(
                &keys,
            ))),
        };

        let response = self
            .call("generate-strategies", &self.text_model, &request)
            .await?;
        Self::parse_structured(&response)
            .map_err(|reason| GatewayError::Generation(reason).into())
    }

    async fn generate_copy(
        &self,
        profile: &BrandProfile,
        campaign: &CampaignConfig,
        tone: &ToneOptions,
    ) -> Result<CopyAssets> {
        let keys = selected_copy_keys(&campaign.materials);
        if keys.is_empty() {
            tracing::debug!("no copy deliverables selected, skipping copy call");
            return Ok(CopyAssets::default());
        }

        let request = GenerateContentRequest {
            contents: Self::user_content(vec![Part::text(prompts::copy_prompt(
                profile, campaign, tone,
            ))]),
            tools: None,
            generation_config: Some(GenerationConfig::json_with_schema(Self::copy_schema(&keys))),
        };

        let response = self
            .call("generate-copy", &self.text_model, &request)
            .await?;
        Self::parse_structured(&response)
            .map_err(|reason| GatewayError::Generation(reason).into())
    }

    async fn generate_poster(
        &self,
        profile: &BrandProfile,
        campaign: &CampaignConfig,
        dimension_token: &str,
        tone: &ToneOptions,
        strategy_context: Option<&str>,
    ) -> Result<ImageAsset> {
        let aspect_ratio = AspectRatio::normalize(dimension_token);

        let mut parts = vec![Part::text(prompts::poster_prompt(
            profile,
            campaign,
            dimension_token,
            tone,
            strategy_context,
        ))];
        if let Some(incentive_image) = &campaign.incentive_image {
            parts.push(Self::inline_part(incentive_image));
        }

        let request = GenerateContentRequest {
            contents: Self::user_content(parts),
            tools: None,
            generation_config: Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: aspect_ratio.as_str().to_string(),
                }),
                ..GenerationConfig::default()
            }),
        };

        let response = self
            .call("generate-poster", &self.image_model, &request)
            .await?;
        Self::extract_image(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StrategyKey;

    #[test]
    fn strategies_schema_requires_exactly_the_selected_keys() {
        let schema =
            GeminiGateway::strategies_schema(&[StrategyKey::TableTent, StrategyKey::Moments]);
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required, &vec![json!("tableTent"), json!("moments")]);
        assert!(schema["properties"]["tableTent"]["properties"]["tactics"].is_object());
        assert!(schema["properties"].get("landingPage").is_none());
    }

    #[test]
    fn copy_schema_uses_wire_field_names() {
        let schema = GeminiGateway::copy_schema(&["wecomWelcome", "momentsCopy"]);
        assert_eq!(schema["properties"]["wecomWelcome"]["type"], "STRING");
        assert_eq!(schema["required"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn image_request_serializes_camel_case_config() {
        let request = GenerateContentRequest {
            contents: GeminiGateway::user_content(vec![Part::text("poster".into())]),
            tools: None,
            generation_config: Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: "9:16".into(),
                }),
                ..GenerationConfig::default()
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generationConfig"]["imageConfig"]["aspectRatio"], "9:16");
        assert!(json["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn analysis_request_carries_google_search_tool() {
        let request = GenerateContentRequest {
            contents: GeminiGateway::user_content(vec![Part::text("analyze".into())]),
            tools: Some(vec![GeminiTool::google_search()]),
            generation_config: Some(GenerationConfig::json_with_schema(
                GeminiGateway::profile_schema(),
            )),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["tools"][0]["googleSearch"].is_object());
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn inline_image_parts_serialize_with_mime_type() {
        let part = Part::inline_data(GeminiInlineData {
            mime_type: "image/png".into(),
            data: "QUJD".into(),
        });
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inlineData"]["mimeType"], "image/png");
        assert_eq!(json["inlineData"]["data"], "QUJD");
    }

    #[test]
    fn extract_image_scans_all_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"here is your poster"},
                {"inlineData":{"mimeType":"image/png","data":"UE5H"}}
            ]}}]}"#,
        )
        .unwrap();
        let image = GeminiGateway::extract_image(response).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "UE5H");
    }

    #[test]
    fn extract_image_without_payload_is_a_generation_error() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"sorry"}]}}]}"#,
        )
        .unwrap();
        let err = GeminiGateway::extract_image(response).unwrap_err();
        assert!(err.to_string().contains("no image payload"));
    }
}
