//! Declarative deliverable tables. Prompt construction, response-schema
//! shaping and generation fan-out all iterate these instead of special-casing
//! each deliverable.

use super::campaign::{MaterialDimensions, MaterialSelection};
use super::content::{PosterSlot, StrategyKey};

/// One image deliverable: which selection flag requests it, which strategy
/// entry constrains it, and which dimension token it renders at.
pub struct PosterDeliverable {
    pub strategy_key: StrategyKey,
    pub slot: PosterSlot,
    /// Scene description appended to the strategies prompt.
    pub brief: &'static str,
    pub selected: fn(&MaterialSelection) -> bool,
    pub dimension: fn(&MaterialDimensions) -> &str,
}

pub const POSTER_DELIVERABLES: [PosterDeliverable; 3] = [
    PosterDeliverable {
        strategy_key: StrategyKey::TableTent,
        slot: PosterSlot::TableTent,
        brief: "拉新台卡 (Table Tent): 放在餐桌上，用户正在进食，距离近，扫码方便。",
        selected: |m| m.table_tent,
        dimension: |d| &d.table_tent,
    },
    PosterDeliverable {
        strategy_key: StrategyKey::Moments,
        slot: PosterSlot::MomentsPoster,
        brief: "朋友圈/社群活动海报 (Moments): 社交属性强，需要引发兴趣，通知性强。",
        // The moments poster rides on the moments-copy flag.
        selected: |m| m.moments_copy,
        dimension: |d| &d.moments_poster,
    },
    PosterDeliverable {
        strategy_key: StrategyKey::LandingPage,
        slot: PosterSlot::LandingPage,
        brief: "小程序领券落地页海报 (Landing Page): 用户扫码后看到的详细领券页面，重点在转化。",
        selected: |m| m.landing_page,
        dimension: |d| &d.landing_page,
    },
];

/// One copy deliverable: its wire field name and the request line the copy
/// prompt carries for it.
pub struct CopyDeliverable {
    /// Field name in the structured copy response.
    pub key: &'static str,
    pub request_line: &'static str,
    pub selected: fn(&MaterialSelection) -> bool,
}

pub const COPY_DELIVERABLES: [CopyDeliverable; 5] = [
    CopyDeliverable {
        key: "wecomWelcome",
        request_line: "企微1v1欢迎语 (wecomWelcome)：亲切自然，引导添加社群或领券。",
        selected: |m| m.wecom_welcome,
    },
    CopyDeliverable {
        key: "wecomNotification",
        request_line: "1v1活动通知 (wecomNotification)：简洁明了，通知用户有新活动，唤醒沉睡用户。",
        selected: |m| m.wecom_notification,
    },
    CopyDeliverable {
        key: "groupWelcome",
        request_line: "社群进群欢迎语 (groupWelcome)：活跃氛围，突出入群福利，强调限时。",
        selected: |m| m.group_welcome,
    },
    CopyDeliverable {
        key: "groupNotification",
        request_line: "社群活动通知 (groupNotification)：群公告风格，号召大家参与。",
        selected: |m| m.group_notification,
    },
    CopyDeliverable {
        key: "momentsCopy",
        request_line: "朋友圈宣传文案 (momentsCopy)：吸引眼球，配图建议。",
        selected: |m| m.moments_copy,
    },
];

/// Strategy keys for the currently selected image deliverables, in table order.
pub fn selected_strategy_keys(materials: &MaterialSelection) -> Vec<StrategyKey> {
    POSTER_DELIVERABLES
        .iter()
        .filter(|d| (d.selected)(materials))
        .map(|d| d.strategy_key)
        .collect()
}

/// Wire keys for the currently selected copy deliverables, in table order.
pub fn selected_copy_keys(materials: &MaterialSelection) -> Vec<&'static str> {
    COPY_DELIVERABLES
        .iter()
        .filter(|d| (d.selected)(materials))
        .map(|d| d.key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActivityType;

    #[test]
    fn strategy_keys_track_image_flags_only() {
        let mut materials = MaterialSelection::preset(ActivityType::Acquisition);
        materials.table_tent = true;
        materials.moments_copy = false;
        materials.landing_page = false;
        // Copy-only flags never produce a strategy entry.
        materials.wecom_welcome = true;
        materials.group_welcome = true;

        assert_eq!(selected_strategy_keys(&materials), vec![StrategyKey::TableTent]);
    }

    #[test]
    fn no_image_deliverables_means_no_strategy_keys() {
        let mut materials = MaterialSelection::preset(ActivityType::Acquisition);
        materials.table_tent = false;
        materials.moments_copy = false;
        materials.landing_page = false;

        assert!(selected_strategy_keys(&materials).is_empty());
    }

    #[test]
    fn moments_poster_rides_on_the_copy_flag() {
        let mut materials = MaterialSelection::preset(ActivityType::Acquisition);
        materials.table_tent = false;
        materials.moments_copy = true;
        materials.landing_page = false;

        assert_eq!(selected_strategy_keys(&materials), vec![StrategyKey::Moments]);
    }

    #[test]
    fn copy_keys_follow_the_five_flags() {
        let materials = MaterialSelection::preset(ActivityType::Marketing);
        assert_eq!(
            selected_copy_keys(&materials),
            vec!["wecomNotification", "groupNotification", "momentsCopy"]
        );
    }
}
