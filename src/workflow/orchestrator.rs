use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::join_all;

use crate::error::{Result, WorkflowError};
use crate::gateway::CapabilityGateway;
use crate::model::{
    AiStrategies, BrandProfile, CampaignConfig, ContentUpdate, GeneratedContent,
    POSTER_DELIVERABLES, RegenTarget, StrategyKey, ToneOptions,
};

type InFlightSet = Arc<Mutex<HashSet<RegenTarget>>>;

fn lock(set: &InFlightSet) -> MutexGuard<'_, HashSet<RegenTarget>> {
    set.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Removes the target from the in-flight set when the regeneration future
/// completes or is dropped mid-flight.
struct InFlightGuard {
    set: InFlightSet,
    target: RegenTarget,
}

impl InFlightGuard {
    fn acquire(set: &InFlightSet, target: RegenTarget) -> Option<Self> {
        if lock(set).insert(target) {
            Some(Self {
                set: Arc::clone(set),
                target,
            })
        } else {
            None
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.set).remove(&self.target);
    }
}

/// Fans generation requests out to the gateway and shapes the results into
/// whole values the session can commit atomically.
pub struct Orchestrator {
    gateway: Arc<dyn CapabilityGateway>,
    in_flight: InFlightSet,
}

impl Orchestrator {
    pub fn new(gateway: Arc<dyn CapabilityGateway>) -> Self {
        Self {
            gateway,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn is_in_flight(&self, target: RegenTarget) -> bool {
        lock(&self.in_flight).contains(&target)
    }

    /// The strategy entry for `key`, JSON-serialized for prompt embedding.
    /// Absent entry means no context, not an error.
    fn strategy_context(
        strategies: &AiStrategies,
        key: StrategyKey,
    ) -> Option<String> {
        strategies
            .get(key)
            .and_then(|item| serde_json::to_string(item).ok())
    }

    /// One full pass: strategies first (posters depend on them), then copy and
    /// every selected poster concurrently.
    ///
    /// All-or-nothing: the join waits for every request, and any failure
    /// discards the siblings' results and fails the pass. Nothing is written
    /// anywhere until the caller commits the returned value.
    pub async fn run_full_generation(
        &self,
        profile: &BrandProfile,
        campaign: &CampaignConfig,
        tone: &ToneOptions,
    ) -> Result<GeneratedContent> {
        let strategies = self.gateway.generate_strategies(profile, campaign).await?;
        tracing::info!(
            strategies = !strategies.is_empty(),
            "strategies pass complete, fanning out"
        );

        let copy_future = self.gateway.generate_copy(profile, campaign, tone);

        let poster_futures = POSTER_DELIVERABLES
            .iter()
            .filter(|d| (d.selected)(&campaign.materials))
            .map(|deliverable| {
                let context = Self::strategy_context(&strategies, deliverable.strategy_key);
                let dimension = (deliverable.dimension)(&campaign.material_dimensions);
                let slot = deliverable.slot;
                async move {
                    let image = self
                        .gateway
                        .generate_poster(profile, campaign, dimension, tone, context.as_deref())
                        .await?;
                    Ok::<_, crate::error::LoomError>((slot, image))
                }
            })
            .collect::<Vec<_>>();

        let (copy_result, poster_results) = tokio::join!(copy_future, join_all(poster_futures));

        let mut content = GeneratedContent {
            strategies,
            copy: copy_result?,
            ..GeneratedContent::default()
        };
        for result in poster_results {
            let (slot, image) = result?;
            content.posters.set(slot, image);
        }
        Ok(content)
    }

    /// Regenerate exactly one entry, returning the replacement as a patch the
    /// caller applies. Poster targets reuse the existing strategy entry for
    /// their deliverable and fail when none exists.
    ///
    /// A target already being regenerated is rejected; distinct targets run
    /// concurrently.
    pub async fn regenerate_single(
        &self,
        target: RegenTarget,
        profile: &BrandProfile,
        campaign: &CampaignConfig,
        tone: &ToneOptions,
        strategies: &AiStrategies,
    ) -> Result<ContentUpdate> {
        let _guard = InFlightGuard::acquire(&self.in_flight, target)
            .ok_or(WorkflowError::RegenerationInFlight(target))?;

        match (target.poster_slot(), target.strategy_key()) {
            (Some(slot), Some(key)) => {
                if strategies.get(key).is_none() {
                    return Err(WorkflowError::MissingStrategy(key).into());
                }
                let context = Self::strategy_context(strategies, key);
                let dimension = target
                    .dimension(&campaign.material_dimensions)
                    .unwrap_or_default();

                let image = self
                    .gateway
                    .generate_poster(profile, campaign, dimension, tone, context.as_deref())
                    .await?;
                Ok(ContentUpdate::Poster(slot, image))
            }
            _ => {
                let copy = self.gateway.generate_copy(profile, campaign, tone).await?;
                Ok(ContentUpdate::Copy(copy))
            }
        }
    }
}
