//! Scriptable in-memory gateway for workflow tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use brandloom::error::{GatewayError, Result};
use brandloom::gateway::CapabilityGateway;
use brandloom::model::{
    AiStrategies, AiStrategyItem, BrandInputs, BrandProfile, CampaignConfig, CopyAssets,
    ImageAsset, StrategyKey, ToneOptions, selected_copy_keys, selected_strategy_keys,
};

/// One recorded poster request: the literal dimension token and the strategy
/// context string, exactly as the gateway received them.
#[derive(Debug, Clone)]
pub struct PosterRequest {
    pub dimension_token: String,
    pub strategy_context: Option<String>,
}

#[derive(Default)]
pub struct Recorded {
    pub analyze_calls: usize,
    pub strategy_key_sets: Vec<Vec<StrategyKey>>,
    pub copy_key_sets: Vec<Vec<&'static str>>,
    pub copy_tone_instructions: Vec<String>,
    pub poster_requests: Vec<PosterRequest>,
}

/// Fake gateway returning canned values. Individual operations can be told to
/// fail, and poster generation can be slowed down to hold a target in flight.
#[derive(Default)]
pub struct FakeGateway {
    pub recorded: Mutex<Recorded>,
    pub fail_analysis: AtomicBool,
    pub fail_themes: AtomicBool,
    pub fail_copy: AtomicBool,
    pub fail_posters: AtomicBool,
    pub poster_delay: Mutex<Option<Duration>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile() -> BrandProfile {
        BrandProfile {
            persona: "贴心主理人".into(),
            tone_of_voice: "亲切活泼".into(),
            visual_style: "清新自然".into(),
            target_audience: "25-35岁白领".into(),
            brand_keywords: vec!["手作".into(), "新鲜".into()],
        }
    }

    pub fn poster(tag: &str) -> ImageAsset {
        ImageAsset::from_bytes("image/png", tag.as_bytes())
    }
}

#[async_trait]
impl CapabilityGateway for FakeGateway {
    async fn analyze_brand(&self, _inputs: &BrandInputs) -> Result<BrandProfile> {
        self.recorded.lock().unwrap().analyze_calls += 1;
        if self.fail_analysis.load(Ordering::SeqCst) {
            return Err(GatewayError::Analysis("unparsable payload".into()).into());
        }
        Ok(Self::profile())
    }

    async fn suggest_themes(&self, _profile: &BrandProfile) -> Result<Vec<String>> {
        if self.fail_themes.load(Ordering::SeqCst) {
            return Err(GatewayError::Generation("themes unavailable".into()).into());
        }
        Ok(vec!["中秋团圆季".into(), "开学第一杯".into()])
    }

    async fn generate_strategies(
        &self,
        _profile: &BrandProfile,
        campaign: &CampaignConfig,
    ) -> Result<AiStrategies> {
        let keys = selected_strategy_keys(&campaign.materials);
        self.recorded
            .lock()
            .unwrap()
            .strategy_key_sets
            .push(keys.clone());

        let mut strategies = AiStrategies::default();
        for key in keys {
            strategies.insert(
                key,
                AiStrategyItem {
                    features: format!("features for {key}"),
                    tactics: vec![format!("tactic for {key}")],
                },
            );
        }
        Ok(strategies)
    }

    async fn generate_copy(
        &self,
        _profile: &BrandProfile,
        campaign: &CampaignConfig,
        tone: &ToneOptions,
    ) -> Result<CopyAssets> {
        let keys = selected_copy_keys(&campaign.materials);
        {
            let mut recorded = self.recorded.lock().unwrap();
            recorded.copy_key_sets.push(keys.clone());
            recorded
                .copy_tone_instructions
                .push(tone.tone.instruction().to_string());
        }
        if self.fail_copy.load(Ordering::SeqCst) {
            return Err(GatewayError::Generation("copy rejected".into()).into());
        }

        let mut copy = CopyAssets::default();
        for key in keys {
            let text = Some(format!("copy for {key}"));
            match key {
                "wecomWelcome" => copy.wecom_welcome = text,
                "wecomNotification" => copy.wecom_notification = text,
                "groupWelcome" => copy.group_welcome = text,
                "groupNotification" => copy.group_notification = text,
                "momentsCopy" => copy.moments_copy = text,
                _ => {}
            }
        }
        Ok(copy)
    }

    async fn generate_poster(
        &self,
        _profile: &BrandProfile,
        _campaign: &CampaignConfig,
        dimension_token: &str,
        _tone: &ToneOptions,
        strategy_context: Option<&str>,
    ) -> Result<ImageAsset> {
        self.recorded
            .lock()
            .unwrap()
            .poster_requests
            .push(PosterRequest {
                dimension_token: dimension_token.to_string(),
                strategy_context: strategy_context.map(String::from),
            });
        let delay = *self.poster_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_posters.load(Ordering::SeqCst) {
            return Err(GatewayError::Generation("no image payload".into()).into());
        }
        Ok(Self::poster(dimension_token))
    }
}
