//! Prompt construction for the five gateway operations. Selection-dependent
//! sections iterate the deliverable tables; nothing is special-cased per
//! deliverable here.

use std::fmt::Write as _;

use crate::model::{
    BrandInputs, BrandProfile, CampaignConfig, COPY_DELIVERABLES, POSTER_DELIVERABLES, ToneOptions,
};

pub fn analysis_prompt(inputs: &BrandInputs) -> String {
    format!(
        "作为资深品牌专家，请针对品牌 \"{brand}\" 进行深度分析。\n\
         \n\
         你目前拥有以下资源：\n\
         1. 品牌名称: {brand} (请使用 googleSearch 工具联网搜索该品牌的最新定位、门店信息、大众点评/社交媒体评价等)。\n\
         2. 用户补充描述: {description}\n\
         3. 视觉素材 (KV/Logo): 已通过图片零件上传。\n\
         4. 门店菜单: 已上传图片，请分析产品矩阵与定价逻辑。\n\
         \n\
         任务：输出一份针对该品牌的私域调性分析文档。\n\
         要求：\n\
         - 使用中文输出。\n\
         - 结合联网搜索到的品牌真实市场地位，验证或补充用户描述的准确性。\n\
         - 分析菜单价格，判断属于\"快消\"、\"轻奢\"还是\"精品\"定位。\n\
         - 确立在企微私域中应扮演的人设（如：贴心主理人、专业茶师、福利官等）。\n\
         \n\
         输出包含：\n\
         1. 私域人设基石 (Persona)\n\
         2. 文案风格 (Tone of Voice)\n\
         3. 视觉风格建议 (Visual Style)\n\
         4. 核心受众 (Target Audience)\n\
         5. 品牌关键词 (Keywords)",
        brand = inputs.brand_name,
        description = inputs.description,
    )
}

/// Design-strategy prompt covering every currently selected image deliverable.
/// Callers must not issue this request when no image deliverable is selected.
pub fn strategies_prompt(profile: &BrandProfile, campaign: &CampaignConfig) -> String {
    let mut prompt = format!(
        "作为餐饮营销视觉策划专家，请为活动 \"{name}\" 的物料制定设计策略。\n\
         品牌风格: {style}\n\
         受众: {audience}\n\
         营销主题 (Campaign Theme): {theme}\n\
         \n\
         请分析以下需要生成场景的特征 (features) 和对应的 AI 设计策略 (tactics, 列出3-4点):",
        name = campaign.activity_name,
        style = profile.visual_style,
        audience = profile.target_audience,
        theme = campaign
            .campaign_theme
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("无特定节日主题，保持品牌通用风格"),
    );

    for deliverable in POSTER_DELIVERABLES
        .iter()
        .filter(|d| (d.selected)(&campaign.materials))
    {
        let dimension = (deliverable.dimension)(&campaign.material_dimensions);
        let _ = write!(prompt, "\n- {} 尺寸: {dimension}", deliverable.brief);
    }

    prompt.push_str("\n请用中文简洁回答。如果涉及节日主题，请在策略中体现节日元素。");
    prompt
}

pub fn copy_prompt(
    profile: &BrandProfile,
    campaign: &CampaignConfig,
    tone: &ToneOptions,
) -> String {
    let mut requests = String::from("生成以下私域文案，必须使用中文：\n");
    for (index, deliverable) in COPY_DELIVERABLES
        .iter()
        .filter(|d| (d.selected)(&campaign.materials))
        .enumerate()
    {
        let _ = writeln!(requests, "{}. {}", index + 1, deliverable.request_line);
    }

    format!(
        "根据品牌调性：{profile_json}\n\
         以及活动详情：\n\
         - 活动类型: {activity_kind}\n\
         - 活动名称: {name}\n\
         - 营销主题: {theme}\n\
         - 利益点: {incentive}\n\
         - 活动时间: {start} 至 {end}\n\
         - 活动规则: {rules}\n\
         \n\
         请在文案中巧妙融入营销主题（如有），并符合品牌人设。\n\
         [重要调整指令]：\n\
         1. 文案语气请务必调整为：{tone_instruction}。\n\
         2. 文案篇幅请严格控制为：{length_instruction}。\n\
         \n\
         {requests}",
        profile_json = serde_json::to_string(profile).unwrap_or_default(),
        activity_kind = if campaign.is_acquisition() {
            "拉新活动"
        } else {
            "日常营销活动"
        },
        name = campaign.activity_name,
        theme = campaign
            .campaign_theme
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("无特定节日主题，保持日常风格"),
        incentive = campaign.incentive,
        start = campaign.start_time,
        end = campaign.end_time,
        rules = campaign.rules,
        tone_instruction = tone.tone.instruction(),
        length_instruction = tone.length_instruction(),
    )
}

/// Poster prompt. `dimension_token` is the operator's literal size token; it
/// travels here as text even when the rendered aspect ratio had to fall back.
pub fn poster_prompt(
    profile: &BrandProfile,
    campaign: &CampaignConfig,
    dimension_token: &str,
    tone: &ToneOptions,
    strategy_context: Option<&str>,
) -> String {
    let strategy_instruction = strategy_context
        .map(|context| {
            format!(
                "IMPORTANT DESIGN STRATEGY / LAYOUT RULES:\n{context}\n\
                 (Strictly follow the above strategy regarding layout, font size, and element placement.)\n"
            )
        })
        .unwrap_or_default();

    format!(
        "Create a high-end F&B marketing poster for activity \"{name}\".\n\
         Campaign/Holiday Theme: {theme}.\n\
         Target Dimensions/Size: \"{dimension_token}\" (Ensure composition fits this aspect ratio).\n\
         Base Brand Style: {brand_style}.\n\
         {style_modifier}\n\
         \n\
         {strategy_instruction}\n\
         Brand Persona: {persona}.\n\
         Main Incentive: \"{incentive}\".\n\
         Activity Duration: \"{start} - {end}\".\n\
         Composition: Professional typography, premium food photography style.\n\
         Text on poster should be in Chinese.",
        name = campaign.activity_name,
        theme = campaign
            .campaign_theme
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("General Brand Style"),
        brand_style = profile.visual_style,
        style_modifier = tone.style_modifier(),
        persona = profile.persona,
        incentive = campaign.incentive,
        start = campaign.start_time,
        end = campaign.end_time,
    )
}

pub fn themes_prompt(profile: &BrandProfile) -> String {
    let today = chrono::Local::now().format("%Y-%m-%d");
    format!(
        "Based on the brand profile and today's date ({today}), suggest 5 creative marketing \
         campaign themes suitable for a F&B brand.\n\
         \n\
         Brand Profile:\n\
         - Persona: {persona}\n\
         - Tone: {tone}\n\
         - Audience: {audience}\n\
         \n\
         Consider upcoming holidays in China, seasonal characteristics, or generic engagement \
         themes.\n\
         Return ONLY a JSON array of strings in Chinese. Example: [\"夏季清凉节\", \"七夕限定礼\", \"周末放松日\"]",
        persona = profile.persona,
        tone = profile.tone_of_voice,
        audience = profile.target_audience,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActivityType;

    fn profile() -> BrandProfile {
        BrandProfile {
            persona: "贴心主理人".into(),
            tone_of_voice: "亲切活泼".into(),
            visual_style: "清新自然".into(),
            target_audience: "25-35岁白领".into(),
            brand_keywords: vec!["手作".into()],
        }
    }

    fn campaign() -> CampaignConfig {
        let mut campaign = CampaignConfig::default();
        campaign.activity_name = "夏日会员日".into();
        campaign.incentive = "免费领经典美式券".into();
        campaign
    }

    #[test]
    fn strategies_prompt_lists_only_selected_scenes() {
        let mut campaign = campaign();
        campaign.materials.table_tent = true;
        campaign.materials.moments_copy = false;
        campaign.materials.landing_page = false;

        let prompt = strategies_prompt(&profile(), &campaign);
        assert!(prompt.contains("Table Tent"));
        assert!(prompt.contains("尺寸: A5"));
        assert!(!prompt.contains("Moments"));
        assert!(!prompt.contains("Landing Page"));
    }

    #[test]
    fn copy_prompt_carries_tone_and_incentive() {
        let prompt = copy_prompt(&profile(), &campaign(), &ToneOptions::default());
        assert!(prompt.contains("免费领经典美式券"));
        assert!(prompt.contains("亲切活泼"));
        assert!(prompt.contains("详略得当"));
        assert!(prompt.contains("拉新活动"));
    }

    #[test]
    fn copy_prompt_numbers_only_selected_lines() {
        let mut campaign = campaign();
        campaign.set_activity_type(ActivityType::Marketing);

        let prompt = copy_prompt(&profile(), &campaign, &ToneOptions::default());
        assert!(prompt.contains("wecomNotification"));
        assert!(!prompt.contains("wecomWelcome"));
        assert!(prompt.contains("1. 1v1活动通知"));
    }

    #[test]
    fn poster_prompt_forwards_the_literal_dimension_token() {
        let prompt = poster_prompt(
            &profile(),
            &campaign(),
            "poster-xl",
            &ToneOptions::default(),
            None,
        );
        assert!(prompt.contains("\"poster-xl\""));
        assert!(!prompt.contains("DESIGN STRATEGY"));
    }

    #[test]
    fn poster_prompt_embeds_the_strategy_context_verbatim() {
        let prompt = poster_prompt(
            &profile(),
            &campaign(),
            "A5",
            &ToneOptions::default(),
            Some(r#"{"features":"on-table","tactics":["oversized QR code"]}"#),
        );
        assert!(prompt.contains("oversized QR code"));
        assert!(prompt.contains("DESIGN STRATEGY"));
    }

    #[test]
    fn theme_fallback_text_used_when_theme_empty() {
        let mut campaign = campaign();
        campaign.campaign_theme = Some(String::new());
        let prompt = strategies_prompt(&profile(), &campaign);
        assert!(prompt.contains("无特定节日主题"));
    }
}
