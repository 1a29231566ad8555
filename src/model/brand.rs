use serde::{Deserialize, Serialize};

use super::content::ImageAsset;

/// Brand profile derived once by the analysis call, then freely editable by
/// the operator until the session returns to the upload step.
///
/// Field names match the structured-output contract of the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    pub persona: String,
    pub tone_of_voice: String,
    pub visual_style: String,
    pub target_audience: String,
    pub brand_keywords: Vec<String>,
}

/// Raw material collected on the upload step and handed to brand analysis.
#[derive(Debug, Clone, Default)]
pub struct BrandInputs {
    pub brand_name: String,
    /// Free-text description of the brand's character and values.
    pub description: String,
    /// Key visuals and logos.
    pub visual_images: Vec<ImageAsset>,
    /// Menu photos, analyzed for product matrix and pricing position.
    pub menu_images: Vec<ImageAsset>,
}
