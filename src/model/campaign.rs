use serde::{Deserialize, Serialize};
use strum::Display;

use super::content::ImageAsset;

/// Campaign flavor. Switching it resets the material selection to the fixed
/// preset for the new type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityType {
    Acquisition,
    Marketing,
}

/// Which of the seven deliverables the operator wants produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSelection {
    /// 1v1 welcome message.
    pub wecom_welcome: bool,
    /// 1v1 campaign notification.
    pub wecom_notification: bool,
    /// Group-chat welcome message.
    pub group_welcome: bool,
    /// Group-chat campaign notification.
    pub group_notification: bool,
    /// Moments copy; implies the moments poster.
    pub moments_copy: bool,
    /// In-store table tent poster.
    pub table_tent: bool,
    /// Mini-program coupon landing page poster.
    pub landing_page: bool,
}

impl MaterialSelection {
    /// Fixed default selection for the given activity type.
    pub fn preset(activity_type: ActivityType) -> Self {
        match activity_type {
            ActivityType::Acquisition => Self {
                wecom_welcome: true,
                wecom_notification: false,
                group_welcome: true,
                group_notification: false,
                moments_copy: true,
                table_tent: true,
                landing_page: false,
            },
            ActivityType::Marketing => Self {
                wecom_welcome: false,
                wecom_notification: true,
                group_welcome: false,
                group_notification: true,
                moments_copy: true,
                table_tent: true,
                landing_page: false,
            },
        }
    }
}

/// Free-text size token per image deliverable, forwarded verbatim to poster
/// generation and normalized separately into a supported aspect ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDimensions {
    pub table_tent: String,
    pub moments_poster: String,
    pub landing_page: String,
}

impl Default for MaterialDimensions {
    fn default() -> Self {
        Self {
            table_tent: "A5".into(),
            moments_poster: "9:16".into(),
            landing_page: "9:16".into(),
        }
    }
}

/// Campaign parameters collected on the configuration step. Mutable until
/// generation starts; a regeneration reuses the latest value, not a snapshot.
///
/// `activity_type` is private so the preset reset cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignConfig {
    activity_type: ActivityType,
    pub activity_name: String,
    pub campaign_theme: Option<String>,
    pub incentive: String,
    pub incentive_image: Option<ImageAsset>,
    pub wecom_qr_code: Option<ImageAsset>,
    pub start_time: String,
    pub end_time: String,
    pub rules: String,
    pub promotion_details: String,
    pub materials: MaterialSelection,
    pub material_dimensions: MaterialDimensions,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            activity_type: ActivityType::Acquisition,
            activity_name: String::new(),
            campaign_theme: None,
            incentive: String::new(),
            incentive_image: None,
            wecom_qr_code: None,
            start_time: String::new(),
            end_time: String::new(),
            rules: String::new(),
            promotion_details: String::new(),
            materials: MaterialSelection::preset(ActivityType::Acquisition),
            material_dimensions: MaterialDimensions::default(),
        }
    }
}

impl CampaignConfig {
    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    /// Switch the activity type. Always resets the material selection to the
    /// preset for `activity_type`, even when re-selecting the current value;
    /// any prior selection is discarded.
    pub fn set_activity_type(&mut self, activity_type: ActivityType) {
        self.activity_type = activity_type;
        self.materials = MaterialSelection::preset(activity_type);
    }

    /// True iff the campaign is an acquisition push (vs day-to-day marketing).
    pub fn is_acquisition(&self) -> bool {
        self.activity_type == ActivityType::Acquisition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquisition_preset_selects_welcome_series() {
        let materials = MaterialSelection::preset(ActivityType::Acquisition);
        assert!(materials.wecom_welcome);
        assert!(!materials.wecom_notification);
        assert!(materials.group_welcome);
        assert!(!materials.group_notification);
        assert!(materials.moments_copy);
        assert!(materials.table_tent);
        assert!(!materials.landing_page);
    }

    #[test]
    fn marketing_preset_selects_notifications() {
        let materials = MaterialSelection::preset(ActivityType::Marketing);
        assert!(!materials.wecom_welcome);
        assert!(materials.wecom_notification);
        assert!(!materials.group_welcome);
        assert!(materials.group_notification);
        assert!(materials.moments_copy);
        assert!(materials.table_tent);
        assert!(!materials.landing_page);
    }

    #[test]
    fn switching_activity_type_discards_manual_selection() {
        let mut campaign = CampaignConfig::default();
        campaign.materials.landing_page = true;
        campaign.materials.wecom_welcome = false;

        campaign.set_activity_type(ActivityType::Marketing);
        assert_eq!(
            campaign.materials,
            MaterialSelection::preset(ActivityType::Marketing)
        );
    }

    #[test]
    fn reselecting_the_same_type_still_resets_to_preset() {
        let mut campaign = CampaignConfig::default();
        campaign.materials.landing_page = true;
        campaign.materials.table_tent = false;

        campaign.set_activity_type(ActivityType::Acquisition);
        assert_eq!(
            campaign.materials,
            MaterialSelection::preset(ActivityType::Acquisition)
        );
    }

    #[test]
    fn default_dimensions_match_deliverable_formats() {
        let dims = MaterialDimensions::default();
        assert_eq!(dims.table_tent, "A5");
        assert_eq!(dims.moments_poster, "9:16");
        assert_eq!(dims.landing_page, "9:16");
    }
}
