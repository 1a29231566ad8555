use console::style;

use crate::model::{BrandProfile, CopyAssets, GeneratedContent, PosterSlot, Step};

pub fn print_welcome_banner() {
    println!();
    println!("  {}", style("Brandloom").cyan().bold());
    println!(
        "  {}",
        style("AI 私域营销物料生成向导 — brand analysis, copy and posters in one pass").dim()
    );
    println!();
}

pub fn print_step(step: Step, title: &str) {
    println!();
    println!(
        "  {} {}",
        style(format!("[{step}]")).cyan().bold(),
        style(title).white().bold()
    );
    println!("  {}", style("─".repeat(50)).dim());
}

pub fn print_bullet(text: &str) {
    println!("  {} {}", style("›").cyan(), text);
}

pub fn print_status(text: &str) {
    println!("  {} {}", style("…").dim(), style(text).dim());
}

pub fn print_error(text: &str) {
    println!("  {} {}", style("✗").red().bold(), style(text).red());
}

pub fn print_profile(profile: &BrandProfile) {
    print_bullet(&format!("人设 (Persona): {}", profile.persona));
    print_bullet(&format!("文案风格 (Tone): {}", profile.tone_of_voice));
    print_bullet(&format!("视觉风格 (Visual): {}", profile.visual_style));
    print_bullet(&format!("核心受众 (Audience): {}", profile.target_audience));
    print_bullet(&format!(
        "关键词 (Keywords): {}",
        profile.brand_keywords.join(" / ")
    ));
}

fn print_copy_entry(label: &str, text: Option<&str>) {
    if let Some(text) = text {
        println!();
        println!("  {}", style(label).white().bold());
        for line in text.lines() {
            println!("    {line}");
        }
    }
}

pub fn print_copy(copy: &CopyAssets) {
    print_copy_entry("企微1v1欢迎语", copy.wecom_welcome.as_deref());
    print_copy_entry("1v1活动通知", copy.wecom_notification.as_deref());
    print_copy_entry("社群进群欢迎语", copy.group_welcome.as_deref());
    print_copy_entry("社群活动通知", copy.group_notification.as_deref());
    print_copy_entry("朋友圈宣传文案", copy.moments_copy.as_deref());
}

pub fn poster_label(slot: PosterSlot) -> &'static str {
    match slot {
        PosterSlot::TableTent => "拉新台卡 (Table Tent)",
        PosterSlot::MomentsPoster => "朋友圈海报 (Moments)",
        PosterSlot::LandingPage => "落地页海报 (Landing Page)",
    }
}

pub fn print_generation_summary(content: &GeneratedContent) {
    let poster_count = [
        PosterSlot::TableTent,
        PosterSlot::MomentsPoster,
        PosterSlot::LandingPage,
    ]
    .into_iter()
    .filter(|slot| content.posters.get(*slot).is_some())
    .count();

    println!();
    println!(
        "  {} {}",
        style("✓").green().bold(),
        style(format!("generation complete — {poster_count} poster(s)")).green()
    );
}
