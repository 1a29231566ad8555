//! Session data model: wizard steps, brand profile, tone options, campaign
//! configuration and the generated-content record.

mod brand;
mod campaign;
mod content;
mod deliverable;
mod step;
mod tone;

pub use brand::{BrandInputs, BrandProfile};
pub use campaign::{ActivityType, CampaignConfig, MaterialDimensions, MaterialSelection};
pub use content::{
    AiStrategies, AiStrategyItem, ContentUpdate, CopyAssets, GeneratedContent, ImageAsset,
    PosterAssets, PosterSlot, RegenTarget, StrategyKey,
};
pub use deliverable::{
    COPY_DELIVERABLES, CopyDeliverable, POSTER_DELIVERABLES, PosterDeliverable,
    selected_copy_keys, selected_strategy_keys,
};
pub use step::Step;
pub use tone::{CopyLength, Tone, ToneOptions, VisualStyle};
