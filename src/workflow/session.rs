use std::sync::Arc;

use crate::error::{Result, WorkflowError};
use crate::gateway::CapabilityGateway;
use crate::model::{
    BrandInputs, BrandProfile, CampaignConfig, GeneratedContent, RegenTarget, Step, StrategyKey,
    ToneOptions,
};

use super::Orchestrator;

/// Substituted for theme suggestions when the gateway call fails. Suggestion
/// failures are recovered here, never surfaced.
pub const FALLBACK_THEMES: [&str; 3] = ["夏日新品季", "周末狂欢", "会员感谢日"];

/// All per-session wizard state, owned in one place: current step, collected
/// inputs, the derived brand profile, tone and campaign settings, and the
/// last committed generation results.
///
/// The presentation layer reads through the accessors and drives the wizard
/// through [`start`](Self::start)/[`advance`](Self::advance)/
/// [`back`](Self::back) and the generation methods.
pub struct Session {
    step: Step,
    inputs: BrandInputs,
    profile: Option<BrandProfile>,
    theme_suggestions: Vec<String>,
    tone: ToneOptions,
    campaign: CampaignConfig,
    content: Option<GeneratedContent>,
    gateway: Arc<dyn CapabilityGateway>,
    orchestrator: Orchestrator,
}

impl Session {
    pub fn new(gateway: Arc<dyn CapabilityGateway>) -> Self {
        Self {
            step: Step::Intro,
            inputs: BrandInputs::default(),
            profile: None,
            theme_suggestions: Vec::new(),
            tone: ToneOptions::default(),
            campaign: CampaignConfig::default(),
            content: None,
            orchestrator: Orchestrator::new(Arc::clone(&gateway)),
            gateway,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn inputs(&self) -> &BrandInputs {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut BrandInputs {
        &mut self.inputs
    }

    pub fn profile(&self) -> Option<&BrandProfile> {
        self.profile.as_ref()
    }

    /// The profile stays operator-editable between analysis and generation.
    pub fn profile_mut(&mut self) -> Option<&mut BrandProfile> {
        self.profile.as_mut()
    }

    pub fn theme_suggestions(&self) -> &[String] {
        &self.theme_suggestions
    }

    pub fn tone(&self) -> &ToneOptions {
        &self.tone
    }

    pub fn tone_mut(&mut self) -> &mut ToneOptions {
        &mut self.tone
    }

    pub fn campaign(&self) -> &CampaignConfig {
        &self.campaign
    }

    pub fn campaign_mut(&mut self) -> &mut CampaignConfig {
        &mut self.campaign
    }

    pub fn content(&self) -> Option<&GeneratedContent> {
        self.content.as_ref()
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    // ── Step transitions ────────────────────────────────────────────────

    /// Jump from the intro screen into the wizard proper. Only valid at
    /// [`Step::Intro`]; every later move goes through [`advance`](Self::advance).
    pub fn start(&mut self) -> Result<()> {
        if self.step != Step::Intro {
            return Err(WorkflowError::Transition {
                step: self.step,
                action: "start",
            }
            .into());
        }
        self.step = Step::Upload;
        Ok(())
    }

    /// Move exactly one step forward. Each step gates the move on its own
    /// precondition; a rejected advance leaves the step unchanged.
    pub fn advance(&mut self) -> Result<Step> {
        let next = match self.step {
            // The intro screen advances through start(), not here.
            Step::Intro => {
                return Err(WorkflowError::Transition {
                    step: self.step,
                    action: "advance",
                }
                .into());
            }
            Step::Upload => {
                if self.inputs.brand_name.trim().is_empty() {
                    return Err(WorkflowError::Validation(
                        "brand name is required".to_string(),
                    )
                    .into());
                }
                if self.profile.is_none() {
                    return Err(WorkflowError::Validation(
                        "brand analysis has not produced a profile yet".to_string(),
                    )
                    .into());
                }
                Step::AnalysisReview
            }
            Step::AnalysisReview => Step::CampaignConfig,
            Step::CampaignConfig => {
                if self.campaign.activity_name.trim().is_empty() {
                    return Err(WorkflowError::Validation(
                        "activity name is required".to_string(),
                    )
                    .into());
                }
                if self.campaign.incentive.trim().is_empty() {
                    return Err(
                        WorkflowError::Validation("incentive is required".to_string()).into(),
                    );
                }
                Step::FinalPreview
            }
            Step::FinalPreview => {
                return Err(WorkflowError::Transition {
                    step: self.step,
                    action: "advance",
                }
                .into());
            }
        };

        self.step = next;
        Ok(next)
    }

    /// Move one step backward, unconditionally. A no-op at the intro screen.
    /// Returning to the upload step discards the brand profile and theme
    /// suggestions (they derive from inputs about to be re-collected);
    /// generated content is kept.
    pub fn back(&mut self) -> Step {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
            if prev <= Step::Upload {
                self.profile = None;
                self.theme_suggestions.clear();
            }
        }
        self.step
    }

    // ── Gateway-backed operations ───────────────────────────────────────

    /// Run brand analysis on the collected inputs and store the profile.
    /// Rejected locally, without a gateway call, when the brand name is empty.
    pub async fn analyze(&mut self) -> Result<&BrandProfile> {
        if self.inputs.brand_name.trim().is_empty() {
            return Err(WorkflowError::Validation("brand name is required".to_string()).into());
        }

        tracing::info!(brand = %self.inputs.brand_name, "running brand analysis");
        let profile = self.gateway.analyze_brand(&self.inputs).await?;
        Ok(self.profile.insert(profile))
    }

    /// Fetch theme suggestions for the current profile. Gateway failures are
    /// recovered with [`FALLBACK_THEMES`], never surfaced.
    pub async fn suggest_themes(&mut self) -> Result<&[String]> {
        let profile = self
            .profile
            .as_ref()
            .ok_or_else(|| WorkflowError::Validation("no brand profile yet".to_string()))?;

        self.theme_suggestions = match self.gateway.suggest_themes(profile).await {
            Ok(themes) if !themes.is_empty() => themes,
            Ok(_) => {
                tracing::warn!("empty theme suggestions, using fallback list");
                FALLBACK_THEMES.iter().map(|t| (*t).to_string()).collect()
            }
            Err(err) => {
                tracing::warn!(error = %err, "theme suggestions failed, using fallback list");
                FALLBACK_THEMES.iter().map(|t| (*t).to_string()).collect()
            }
        };
        Ok(&self.theme_suggestions)
    }

    /// Run the full generation pass and commit the result atomically: on any
    /// failure the previously committed content is left untouched and the
    /// operation can simply be retried.
    pub async fn generate(&mut self) -> Result<&GeneratedContent> {
        let profile = self
            .profile
            .as_ref()
            .ok_or_else(|| WorkflowError::Validation("no brand profile yet".to_string()))?;
        if self.campaign.activity_name.trim().is_empty() {
            return Err(WorkflowError::Validation("activity name is required".to_string()).into());
        }

        let content = self
            .orchestrator
            .run_full_generation(profile, &self.campaign, &self.tone)
            .await?;
        Ok(self.content.insert(content))
    }

    /// Regenerate one entry of the committed content and apply the patch. The
    /// latest campaign and tone values are used, not a snapshot.
    pub async fn regenerate(&mut self, target: RegenTarget) -> Result<()> {
        let profile = self
            .profile
            .as_ref()
            .ok_or_else(|| WorkflowError::Validation("no brand profile yet".to_string()))?;
        let content = self.content.as_ref().ok_or(WorkflowError::NoContent)?;

        let update = self
            .orchestrator
            .regenerate_single(target, profile, &self.campaign, &self.tone, &content.strategies)
            .await?;

        if let Some(content) = self.content.as_mut() {
            content.apply(update);
        }
        Ok(())
    }

    // ── Strategy edit loop ──────────────────────────────────────────────

    /// Replace fields of one strategy entry in place. Pure state mutation;
    /// nothing is regenerated until
    /// [`regenerate_from_edit`](Self::regenerate_from_edit) is called.
    pub fn edit_strategy(
        &mut self,
        key: StrategyKey,
        features: Option<String>,
        tactics: Option<Vec<String>>,
    ) -> Result<()> {
        let content = self.content.as_mut().ok_or(WorkflowError::NoContent)?;
        let item = content
            .strategies
            .get_mut(key)
            .ok_or(WorkflowError::MissingStrategy(key))?;

        if let Some(features) = features {
            item.features = features;
        }
        if let Some(tactics) = tactics {
            item.tactics = tactics;
        }
        Ok(())
    }

    /// Regenerate the poster constrained by the (typically just edited)
    /// strategy entry for `key`.
    pub async fn regenerate_from_edit(&mut self, key: StrategyKey) -> Result<()> {
        self.regenerate(key.poster_target()).await
    }
}
