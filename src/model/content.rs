use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

// ─── Image payloads ─────────────────────────────────────────────────────────

/// One binary image, base64-encoded. Used both for ingested material (brand
/// visuals, menus, incentive image, QR code) and for generated posters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub mime_type: String,
    /// Base64 payload without the data-URI prefix.
    pub data: String,
}

impl ImageAsset {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: BASE64.encode(bytes),
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URI.
    pub fn from_data_uri(uri: &str) -> anyhow::Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .context("not a data URI")?;
        let (header, data) = rest.split_once(',').context("data URI has no payload")?;
        let mime_type = header
            .strip_suffix(";base64")
            .context("data URI is not base64-encoded")?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn decode(&self) -> anyhow::Result<Vec<u8>> {
        BASE64
            .decode(&self.data)
            .context("invalid base64 image payload")
    }
}

// ─── Strategies ─────────────────────────────────────────────────────────────

/// Keys of the per-deliverable design rationales. Only image deliverables get
/// a strategy entry; copy-only deliverables never do.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum StrategyKey {
    TableTent,
    Moments,
    LandingPage,
}

impl StrategyKey {
    /// Wire-level field name in the strategies payload.
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKey::TableTent => "tableTent",
            StrategyKey::Moments => "moments",
            StrategyKey::LandingPage => "landingPage",
        }
    }

    /// The regeneration target whose poster consumes this rationale.
    pub fn poster_target(self) -> RegenTarget {
        match self {
            StrategyKey::TableTent => RegenTarget::TableTent,
            StrategyKey::Moments => RegenTarget::MomentsPoster,
            StrategyKey::LandingPage => RegenTarget::LandingPage,
        }
    }
}

/// AI-authored design rationale for one image deliverable, reused verbatim as
/// an input constraint when that deliverable's image is (re)generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiStrategyItem {
    pub features: String,
    pub tactics: Vec<String>,
}

/// Rationale per requested image deliverable. A missing key means that
/// deliverable was not requested in the last strategies pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiStrategies {
    pub table_tent: Option<AiStrategyItem>,
    pub moments: Option<AiStrategyItem>,
    pub landing_page: Option<AiStrategyItem>,
}

impl AiStrategies {
    pub fn get(&self, key: StrategyKey) -> Option<&AiStrategyItem> {
        match key {
            StrategyKey::TableTent => self.table_tent.as_ref(),
            StrategyKey::Moments => self.moments.as_ref(),
            StrategyKey::LandingPage => self.landing_page.as_ref(),
        }
    }

    pub fn get_mut(&mut self, key: StrategyKey) -> Option<&mut AiStrategyItem> {
        match key {
            StrategyKey::TableTent => self.table_tent.as_mut(),
            StrategyKey::Moments => self.moments.as_mut(),
            StrategyKey::LandingPage => self.landing_page.as_mut(),
        }
    }

    pub fn insert(&mut self, key: StrategyKey, item: AiStrategyItem) {
        match key {
            StrategyKey::TableTent => self.table_tent = Some(item),
            StrategyKey::Moments => self.moments = Some(item),
            StrategyKey::LandingPage => self.landing_page = Some(item),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.table_tent.is_none() && self.moments.is_none() && self.landing_page.is_none()
    }
}

// ─── Copy ───────────────────────────────────────────────────────────────────

/// Generated copy texts, one optional entry per copy deliverable. Field names
/// match the structured-output contract of the copy endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyAssets {
    pub wecom_welcome: Option<String>,
    pub wecom_notification: Option<String>,
    pub group_welcome: Option<String>,
    pub group_notification: Option<String>,
    pub moments_copy: Option<String>,
}

impl CopyAssets {
    pub fn is_empty(&self) -> bool {
        self.wecom_welcome.is_none()
            && self.wecom_notification.is_none()
            && self.group_welcome.is_none()
            && self.group_notification.is_none()
            && self.moments_copy.is_none()
    }
}

// ─── Posters ────────────────────────────────────────────────────────────────

/// Addressable poster outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PosterSlot {
    TableTent,
    MomentsPoster,
    LandingPage,
}

/// Generated poster images keyed by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterAssets {
    pub table_tent: Option<ImageAsset>,
    pub moments_poster: Option<ImageAsset>,
    pub landing_page: Option<ImageAsset>,
}

impl PosterAssets {
    pub fn get(&self, slot: PosterSlot) -> Option<&ImageAsset> {
        match slot {
            PosterSlot::TableTent => self.table_tent.as_ref(),
            PosterSlot::MomentsPoster => self.moments_poster.as_ref(),
            PosterSlot::LandingPage => self.landing_page.as_ref(),
        }
    }

    pub fn set(&mut self, slot: PosterSlot, image: ImageAsset) {
        match slot {
            PosterSlot::TableTent => self.table_tent = Some(image),
            PosterSlot::MomentsPoster => self.moments_poster = Some(image),
            PosterSlot::LandingPage => self.landing_page = Some(image),
        }
    }
}

// ─── Regeneration targets ───────────────────────────────────────────────────

/// One independently regenerable entry of [`GeneratedContent`]: the copy map
/// as a whole, or a single poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum RegenTarget {
    Copy,
    TableTent,
    MomentsPoster,
    LandingPage,
}

impl RegenTarget {
    pub fn poster_slot(self) -> Option<PosterSlot> {
        match self {
            RegenTarget::Copy => None,
            RegenTarget::TableTent => Some(PosterSlot::TableTent),
            RegenTarget::MomentsPoster => Some(PosterSlot::MomentsPoster),
            RegenTarget::LandingPage => Some(PosterSlot::LandingPage),
        }
    }

    /// The strategy entry a poster regeneration must reuse. `None` for copy.
    pub fn strategy_key(self) -> Option<StrategyKey> {
        match self {
            RegenTarget::Copy => None,
            RegenTarget::TableTent => Some(StrategyKey::TableTent),
            RegenTarget::MomentsPoster => Some(StrategyKey::Moments),
            RegenTarget::LandingPage => Some(StrategyKey::LandingPage),
        }
    }

    /// Dimension token configured for this poster target.
    pub fn dimension(self, dims: &super::MaterialDimensions) -> Option<&str> {
        match self {
            RegenTarget::Copy => None,
            RegenTarget::TableTent => Some(&dims.table_tent),
            RegenTarget::MomentsPoster => Some(&dims.moments_poster),
            RegenTarget::LandingPage => Some(&dims.landing_page),
        }
    }
}

// ─── Generated content ──────────────────────────────────────────────────────

/// The result of one full generation pass. Individual copy/poster entries are
/// replaceable independently via [`ContentUpdate`]; strategy entries are
/// replaceable via the strategy edit loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub strategies: AiStrategies,
    pub copy: CopyAssets,
    pub posters: PosterAssets,
}

/// Replacement value for exactly one keyed entry of [`GeneratedContent`].
/// Computed fully before being committed, so no reader observes a torn state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentUpdate {
    Copy(CopyAssets),
    Poster(PosterSlot, ImageAsset),
}

impl GeneratedContent {
    /// Commit a single-entry replacement, leaving every other entry untouched.
    pub fn apply(&mut self, update: ContentUpdate) {
        match update {
            ContentUpdate::Copy(copy) => self.copy = copy,
            ContentUpdate::Poster(slot, image) => self.posters.set(slot, image),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image(tag: &str) -> ImageAsset {
        ImageAsset::from_bytes("image/png", tag.as_bytes())
    }

    #[test]
    fn data_uri_round_trip() {
        let asset = sample_image("poster-bytes");
        let parsed = ImageAsset::from_data_uri(&asset.to_data_uri()).unwrap();
        assert_eq!(parsed, asset);
        assert_eq!(parsed.decode().unwrap(), b"poster-bytes");
    }

    #[test]
    fn from_data_uri_rejects_plain_text() {
        assert!(ImageAsset::from_data_uri("hello.png").is_err());
        assert!(ImageAsset::from_data_uri("data:image/png,raw").is_err());
    }

    #[test]
    fn strategy_keys_map_to_their_poster_targets() {
        assert_eq!(
            StrategyKey::TableTent.poster_target(),
            RegenTarget::TableTent
        );
        assert_eq!(
            StrategyKey::Moments.poster_target(),
            RegenTarget::MomentsPoster
        );
        assert_eq!(
            StrategyKey::LandingPage.poster_target(),
            RegenTarget::LandingPage
        );
    }

    #[test]
    fn apply_poster_update_replaces_exactly_one_slot() {
        let mut content = GeneratedContent {
            strategies: AiStrategies {
                table_tent: Some(AiStrategyItem {
                    features: "on-table".into(),
                    tactics: vec!["big QR".into()],
                }),
                ..AiStrategies::default()
            },
            copy: CopyAssets {
                wecom_welcome: Some("hi".into()),
                ..CopyAssets::default()
            },
            posters: PosterAssets {
                table_tent: Some(sample_image("old")),
                moments_poster: Some(sample_image("moments")),
                ..PosterAssets::default()
            },
        };
        let before = content.clone();

        content.apply(ContentUpdate::Poster(
            PosterSlot::TableTent,
            sample_image("new"),
        ));

        assert_eq!(content.posters.table_tent, Some(sample_image("new")));
        assert_eq!(content.posters.moments_poster, before.posters.moments_poster);
        assert_eq!(content.copy, before.copy);
        assert_eq!(content.strategies, before.strategies);
    }

    #[test]
    fn apply_copy_update_leaves_posters_untouched() {
        let mut content = GeneratedContent {
            posters: PosterAssets {
                landing_page: Some(sample_image("lp")),
                ..PosterAssets::default()
            },
            ..GeneratedContent::default()
        };

        content.apply(ContentUpdate::Copy(CopyAssets {
            group_welcome: Some("welcome".into()),
            ..CopyAssets::default()
        }));

        assert_eq!(content.copy.group_welcome, Some("welcome".into()));
        assert_eq!(content.posters.landing_page, Some(sample_image("lp")));
    }

    #[test]
    fn strategies_deserialize_partial_map() {
        let json = r#"{"tableTent":{"features":"f","tactics":["t1","t2"]}}"#;
        let strategies: AiStrategies = serde_json::from_str(json).unwrap();
        assert!(strategies.get(StrategyKey::TableTent).is_some());
        assert!(strategies.get(StrategyKey::Moments).is_none());
        assert!(strategies.get(StrategyKey::LandingPage).is_none());
    }

    #[test]
    fn regen_target_display_matches_wire_names() {
        assert_eq!(RegenTarget::MomentsPoster.to_string(), "momentsPoster");
        assert_eq!(RegenTarget::Copy.to_string(), "copy");
        assert_eq!(StrategyKey::TableTent.to_string(), "tableTent");
    }
}
