//! Interactive wizard front-end. Drives a [`Session`] through every step and
//! renders the results; all rules live in the workflow layer, this module
//! only collects input and prints.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use strum::IntoEnumIterator;

use crate::model::{
    ActivityType, CopyLength, ImageAsset, POSTER_DELIVERABLES, PosterSlot, RegenTarget, Step,
    StrategyKey, Tone, VisualStyle,
};
use crate::workflow::Session;

use super::view;

pub async fn run(mut session: Session, output_dir: &Path) -> Result<()> {
    view::print_welcome_banner();

    if !Confirm::new()
        .with_prompt("  开始创建营销活动?")
        .default(true)
        .interact()?
    {
        return Ok(());
    }
    session.start()?;

    view::print_step(Step::Upload, "品牌素材 (Brand Material)");
    collect_inputs(&mut session)?;
    if !analyze_with_retry(&mut session).await? {
        return Ok(());
    }
    session.advance()?;

    view::print_step(Step::AnalysisReview, "调性确认 (Analysis Review)");
    review_profile(&mut session)?;
    view::print_status("fetching theme suggestions…");
    session.suggest_themes().await?;
    session.advance()?;

    view::print_step(Step::CampaignConfig, "活动配置 (Campaign Setup)");
    configure_campaign(&mut session)?;
    configure_tone(&mut session)?;
    if !generate_with_retry(&mut session).await? {
        return Ok(());
    }
    session.advance()?;

    view::print_step(Step::FinalPreview, "成品预览 (Final Preview)");
    preview_loop(&mut session, output_dir).await
}

// ── Upload ──────────────────────────────────────────────────────────────

fn collect_inputs(session: &mut Session) -> Result<()> {
    let brand_name: String = Input::new()
        .with_prompt("  品牌名称")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("brand name is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let description: String = Input::new()
        .with_prompt("  品牌补充描述 (可留空)")
        .allow_empty(true)
        .interact_text()?;

    let visual_images = prompt_images("  视觉素材图片路径 (KV/Logo, 逗号分隔, 可留空)")?;
    let menu_images = prompt_images("  菜单图片路径 (逗号分隔, 可留空)")?;

    let inputs = session.inputs_mut();
    inputs.brand_name = brand_name;
    inputs.description = description;
    inputs.visual_images = visual_images;
    inputs.menu_images = menu_images;
    Ok(())
}

fn prompt_images(prompt: &str) -> Result<Vec<ImageAsset>> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(load_image)
        .collect()
}

fn load_image(path: &str) -> Result<ImageAsset> {
    let bytes = fs::read(path).with_context(|| format!("reading image {path}"))?;
    let mime = match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/png",
    };
    Ok(ImageAsset::from_bytes(mime, &bytes))
}

async fn analyze_with_retry(session: &mut Session) -> Result<bool> {
    loop {
        view::print_status("analyzing brand material…");
        match session.analyze().await {
            Ok(profile) => {
                view::print_profile(profile);
                return Ok(true);
            }
            Err(err) => {
                view::print_error(&err.to_string());
                if !Confirm::new()
                    .with_prompt("  重试品牌分析?")
                    .default(true)
                    .interact()?
                {
                    return Ok(false);
                }
            }
        }
    }
}

// ── Analysis review ─────────────────────────────────────────────────────

fn review_profile(session: &mut Session) -> Result<()> {
    if !Confirm::new()
        .with_prompt("  调整分析结果?")
        .default(false)
        .interact()?
    {
        return Ok(());
    }

    let Some(profile) = session.profile_mut() else {
        return Ok(());
    };
    profile.persona = Input::new()
        .with_prompt("  人设 (Persona)")
        .with_initial_text(profile.persona.clone())
        .interact_text()?;
    profile.tone_of_voice = Input::new()
        .with_prompt("  文案风格 (Tone)")
        .with_initial_text(profile.tone_of_voice.clone())
        .interact_text()?;
    profile.visual_style = Input::new()
        .with_prompt("  视觉风格 (Visual)")
        .with_initial_text(profile.visual_style.clone())
        .interact_text()?;
    profile.target_audience = Input::new()
        .with_prompt("  核心受众 (Audience)")
        .with_initial_text(profile.target_audience.clone())
        .interact_text()?;
    Ok(())
}

// ── Campaign configuration ──────────────────────────────────────────────

fn configure_campaign(session: &mut Session) -> Result<()> {
    let kinds = ["拉新活动 (Acquisition)", "日常营销活动 (Marketing)"];
    let kind_idx = Select::new()
        .with_prompt("  活动类型")
        .items(&kinds)
        .default(0)
        .interact()?;
    session.campaign_mut().set_activity_type(if kind_idx == 0 {
        ActivityType::Acquisition
    } else {
        ActivityType::Marketing
    });

    let activity_name: String = Input::new()
        .with_prompt("  活动名称")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("activity name is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    session.campaign_mut().activity_name = activity_name;

    let theme = prompt_theme(session.theme_suggestions().to_vec())?;
    session.campaign_mut().campaign_theme = theme;

    let campaign = session.campaign_mut();
    campaign.incentive = Input::new()
        .with_prompt("  利益点 (如: 免费领经典美式券)")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("incentive is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    campaign.start_time = Input::new()
        .with_prompt("  开始时间")
        .allow_empty(true)
        .interact_text()?;
    campaign.end_time = Input::new()
        .with_prompt("  结束时间")
        .allow_empty(true)
        .interact_text()?;
    campaign.rules = Input::new()
        .with_prompt("  活动规则 (可留空)")
        .allow_empty(true)
        .interact_text()?;
    campaign.promotion_details = Input::new()
        .with_prompt("  推广详情 (可留空)")
        .allow_empty(true)
        .interact_text()?;

    if let Some(path) = prompt_optional_path("  利益点图片路径 (可留空)")? {
        campaign.incentive_image = Some(load_image(&path)?);
    }
    if let Some(path) = prompt_optional_path("  企微二维码图片路径 (可留空)")? {
        campaign.wecom_qr_code = Some(load_image(&path)?);
    }

    select_materials(session)?;
    Ok(())
}

fn prompt_theme(suggestions: Vec<String>) -> Result<Option<String>> {
    let mut items: Vec<String> = suggestions;
    items.push("自定义主题…".to_string());
    items.push("不使用节日主题".to_string());

    let idx = Select::new()
        .with_prompt("  营销主题")
        .items(&items)
        .default(0)
        .interact()?;

    if idx == items.len() - 1 {
        Ok(None)
    } else if idx == items.len() - 2 {
        let custom: String = Input::new()
            .with_prompt("  输入自定义主题")
            .interact_text()?;
        Ok(Some(custom))
    } else {
        Ok(items.into_iter().nth(idx))
    }
}

fn prompt_optional_path(prompt: &str) -> Result<Option<String>> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let trimmed = raw.trim();
    Ok(if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    })
}

fn select_materials(session: &mut Session) -> Result<()> {
    let labels = [
        "企微1v1欢迎语",
        "1v1活动通知",
        "社群进群欢迎语",
        "社群活动通知",
        "朋友圈文案+海报",
        "拉新台卡",
        "落地页海报",
    ];
    let campaign = session.campaign_mut();
    let defaults = [
        campaign.materials.wecom_welcome,
        campaign.materials.wecom_notification,
        campaign.materials.group_welcome,
        campaign.materials.group_notification,
        campaign.materials.moments_copy,
        campaign.materials.table_tent,
        campaign.materials.landing_page,
    ];

    let picked = MultiSelect::new()
        .with_prompt("  需要生成的物料 (空格选择, 回车确认)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    let materials = &mut campaign.materials;
    materials.wecom_welcome = picked.contains(&0);
    materials.wecom_notification = picked.contains(&1);
    materials.group_welcome = picked.contains(&2);
    materials.group_notification = picked.contains(&3);
    materials.moments_copy = picked.contains(&4);
    materials.table_tent = picked.contains(&5);
    materials.landing_page = picked.contains(&6);

    for deliverable in POSTER_DELIVERABLES
        .iter()
        .filter(|d| (d.selected)(&campaign.materials))
    {
        let current = (deliverable.dimension)(&campaign.material_dimensions).to_string();
        let token: String = Input::new()
            .with_prompt(format!("  {} 尺寸", deliverable.slot))
            .with_initial_text(current)
            .interact_text()?;
        match deliverable.slot {
            PosterSlot::TableTent => campaign.material_dimensions.table_tent = token,
            PosterSlot::MomentsPoster => campaign.material_dimensions.moments_poster = token,
            PosterSlot::LandingPage => campaign.material_dimensions.landing_page = token,
        }
    }
    Ok(())
}

fn configure_tone(session: &mut Session) -> Result<()> {
    let tones: Vec<Tone> = Tone::iter().collect();
    let tone_labels: Vec<String> = tones.iter().map(|t| t.instruction().to_string()).collect();
    let tone_idx = Select::new()
        .with_prompt("  文案语气")
        .items(&tone_labels)
        .default(1)
        .interact()?;

    let styles: Vec<VisualStyle> = VisualStyle::iter().collect();
    let style_labels: Vec<String> = styles
        .iter()
        .map(|s| s.description().unwrap_or("自定义…").to_string())
        .collect();
    let style_idx = Select::new()
        .with_prompt("  视觉风格")
        .items(&style_labels)
        .default(0)
        .interact()?;

    let lengths: Vec<CopyLength> = CopyLength::iter().collect();
    let length_labels = ["短小精悍", "详略得当", "详细丰富", "清单体", "自定义…"];
    let length_idx = Select::new()
        .with_prompt("  文案篇幅")
        .items(&length_labels)
        .default(1)
        .interact()?;

    let tone = session.tone_mut();
    tone.tone = tones[tone_idx];
    tone.visual_style = styles[style_idx];
    tone.custom_visual_style = if tone.visual_style == VisualStyle::Custom {
        Some(
            Input::new()
                .with_prompt("  描述你想要的视觉风格")
                .interact_text()?,
        )
    } else {
        None
    };
    tone.copy_length = lengths[length_idx];
    tone.custom_copy_length = if tone.copy_length == CopyLength::Custom {
        Some(
            Input::new()
                .with_prompt("  描述你想要的篇幅")
                .interact_text()?,
        )
    } else {
        None
    };
    Ok(())
}

async fn generate_with_retry(session: &mut Session) -> Result<bool> {
    loop {
        view::print_status("generating strategies, copy and posters…");
        match session.generate().await {
            Ok(content) => {
                view::print_generation_summary(content);
                return Ok(true);
            }
            Err(err) => {
                view::print_error(&err.to_string());
                if !Confirm::new()
                    .with_prompt("  重新生成?")
                    .default(true)
                    .interact()?
                {
                    return Ok(false);
                }
            }
        }
    }
}

// ── Final preview ───────────────────────────────────────────────────────

async fn preview_loop(session: &mut Session, output_dir: &Path) -> Result<()> {
    render_results(session, output_dir)?;

    loop {
        let mut actions: Vec<(String, Option<RegenTarget>)> =
            vec![("重新生成全部文案".to_string(), Some(RegenTarget::Copy))];
        if let Some(content) = session.content() {
            for slot in [
                PosterSlot::TableTent,
                PosterSlot::MomentsPoster,
                PosterSlot::LandingPage,
            ] {
                if content.posters.get(slot).is_some() {
                    let target = match slot {
                        PosterSlot::TableTent => RegenTarget::TableTent,
                        PosterSlot::MomentsPoster => RegenTarget::MomentsPoster,
                        PosterSlot::LandingPage => RegenTarget::LandingPage,
                    };
                    actions.push((format!("重新生成 {}", view::poster_label(slot)), Some(target)));
                }
            }
        }
        let edit_idx = actions.len();
        actions.push(("编辑设计策略并重绘海报".to_string(), None));
        let tune_idx = actions.len();
        actions.push(("调整语气/风格并重新生成全部".to_string(), None));
        let done_idx = actions.len();
        actions.push(("完成".to_string(), None));

        let labels: Vec<&str> = actions.iter().map(|(label, _)| label.as_str()).collect();
        let idx = Select::new()
            .with_prompt("  下一步")
            .items(&labels)
            .default(done_idx)
            .interact()?;

        if idx == done_idx {
            return Ok(());
        }
        if idx == edit_idx {
            edit_strategy_flow(session).await?;
            render_results(session, output_dir)?;
            continue;
        }
        if idx == tune_idx {
            configure_tone(session)?;
            view::print_status("regenerating everything with the new style…");
            match session.generate().await {
                Ok(_) => render_results(session, output_dir)?,
                Err(err) => view::print_error(&err.to_string()),
            }
            continue;
        }
        if let Some(target) = actions[idx].1 {
            view::print_status("regenerating…");
            match session.regenerate(target).await {
                Ok(()) => render_results(session, output_dir)?,
                Err(err) => view::print_error(&err.to_string()),
            }
        }
    }
}

async fn edit_strategy_flow(session: &mut Session) -> Result<()> {
    let keys: Vec<StrategyKey> = session
        .content()
        .map(|content| {
            [
                StrategyKey::TableTent,
                StrategyKey::Moments,
                StrategyKey::LandingPage,
            ]
            .into_iter()
            .filter(|key| content.strategies.get(*key).is_some())
            .collect()
        })
        .unwrap_or_default();

    if keys.is_empty() {
        view::print_error("no strategies to edit");
        return Ok(());
    }

    let labels: Vec<String> = keys.iter().map(ToString::to_string).collect();
    let idx = Select::new()
        .with_prompt("  编辑哪个策略")
        .items(&labels)
        .default(0)
        .interact()?;
    let key = keys[idx];

    let (features, tactics) = match session.content().and_then(|c| c.strategies.get(key)) {
        Some(item) => (item.features.clone(), item.tactics.join("；")),
        None => return Ok(()),
    };

    let new_features: String = Input::new()
        .with_prompt("  特征 (features)")
        .with_initial_text(features)
        .interact_text()?;
    let new_tactics: String = Input::new()
        .with_prompt("  策略 (tactics, 用；分隔)")
        .with_initial_text(tactics)
        .interact_text()?;
    let tactics_list: Vec<String> = new_tactics
        .split('；')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect();

    session.edit_strategy(key, Some(new_features), Some(tactics_list))?;

    if Confirm::new()
        .with_prompt("  按新策略重绘海报?")
        .default(true)
        .interact()?
    {
        view::print_status("regenerating poster…");
        if let Err(err) = session.regenerate_from_edit(key).await {
            view::print_error(&err.to_string());
        }
    }
    Ok(())
}

fn render_results(session: &Session, output_dir: &Path) -> Result<()> {
    let Some(content) = session.content() else {
        return Ok(());
    };

    view::print_copy(&content.copy);
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    for slot in [
        PosterSlot::TableTent,
        PosterSlot::MomentsPoster,
        PosterSlot::LandingPage,
    ] {
        if let Some(image) = content.posters.get(slot) {
            let ext = image.mime_type.rsplit('/').next().unwrap_or("png");
            let path = output_dir.join(format!("{slot}.{ext}"));
            fs::write(&path, image.decode()?)
                .with_context(|| format!("writing {}", path.display()))?;
            println!(
                "  {} {} -> {}",
                style("✓").green(),
                view::poster_label(slot),
                style(path.display()).green()
            );
        }
    }
    Ok(())
}
