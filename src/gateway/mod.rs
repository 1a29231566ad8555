//! Capability gateway: the workflow's only I/O boundary. Everything behind it
//! is pure state transformation, which is what keeps the wizard testable with
//! an injected fake gateway.

pub mod aspect;
mod gemini;
mod http_client;
pub mod prompts;

pub use aspect::AspectRatio;
pub use gemini::GeminiGateway;
pub use http_client::build_gateway_client;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{
    AiStrategies, BrandInputs, BrandProfile, CampaignConfig, CopyAssets, ImageAsset, ToneOptions,
};

/// Request/response operations against the generative backend.
///
/// Precondition checks (e.g. a non-empty brand name) belong to the caller and
/// must reject before any of these is invoked.
#[async_trait]
pub trait CapabilityGateway: Send + Sync {
    /// Derive a brand profile from the uploaded material. Fails with an
    /// analysis error when the backend returns no parsable structured payload.
    async fn analyze_brand(&self, inputs: &BrandInputs) -> Result<BrandProfile>;

    /// Suggest campaign themes. Best-effort: callers substitute a fixed
    /// fallback list on failure instead of surfacing the error.
    async fn suggest_themes(&self, profile: &BrandProfile) -> Result<Vec<String>>;

    /// Design rationale per currently selected image deliverable. Returns an
    /// empty map, without calling the backend, when none is selected.
    async fn generate_strategies(
        &self,
        profile: &BrandProfile,
        campaign: &CampaignConfig,
    ) -> Result<AiStrategies>;

    /// Copy for exactly the selected text deliverables. Returns empty assets,
    /// without calling the backend, when none is selected.
    async fn generate_copy(
        &self,
        profile: &BrandProfile,
        campaign: &CampaignConfig,
        tone: &ToneOptions,
    ) -> Result<CopyAssets>;

    /// One poster image. `dimension_token` is normalized to a supported
    /// aspect ratio and also forwarded textually; `strategy_context` is the
    /// JSON-serialized rationale for this deliverable, when one exists.
    async fn generate_poster(
        &self,
        profile: &BrandProfile,
        campaign: &CampaignConfig,
        dimension_token: &str,
        tone: &ToneOptions,
        strategy_context: Option<&str>,
    ) -> Result<ImageAsset>;
}
