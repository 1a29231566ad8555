use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Copy voice applied to every subsequent text generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Professional,
    Friendly,
    Humorous,
    Enthusiastic,
    Elegant,
}

impl Tone {
    /// Prompt instruction for this voice.
    pub fn instruction(self) -> &'static str {
        match self {
            Tone::Professional => "专业严谨",
            Tone::Friendly => "亲切活泼",
            Tone::Humorous => "幽默风趣",
            Tone::Enthusiastic => "热情洋溢，充满感染力",
            Tone::Elegant => "优雅知性，富有格调",
        }
    }
}

/// Poster visual direction. `Custom` carries operator-provided text in
/// [`ToneOptions::custom_visual_style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VisualStyle {
    Minimalist,
    Vibrant,
    Luxury,
    Retro,
    Natural,
    Custom,
}

impl VisualStyle {
    /// Image-prompt style description; `None` for `Custom`.
    pub fn description(self) -> Option<&'static str> {
        match self {
            VisualStyle::Minimalist => {
                Some("Minimalist, Clean, High-end, lots of white space")
            }
            VisualStyle::Vibrant => Some("Vibrant, Colorful, Pop Art, High Energy"),
            VisualStyle::Luxury => {
                Some("Dark mode, Gold accents, Premium texture, Cinematic lighting")
            }
            VisualStyle::Retro => {
                Some("Retro style, Vintage aesthetics, Nostalgic colors, Grainy texture")
            }
            VisualStyle::Natural => Some("Natural, Organic, Fresh, Greenery, Soft sunlight"),
            VisualStyle::Custom => None,
        }
    }
}

/// Target length for generated copy. `Custom` carries operator-provided text
/// in [`ToneOptions::custom_copy_length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CopyLength {
    Concise,
    Balanced,
    Detailed,
    Bullet,
    Custom,
}

impl CopyLength {
    fn instruction(self) -> Option<&'static str> {
        match self {
            CopyLength::Concise => Some("短小精悍，一目了然"),
            CopyLength::Balanced => Some("详略得当，重点突出"),
            CopyLength::Detailed => Some("详细丰富，情感充沛"),
            CopyLength::Bullet => Some("清单体，要点清晰，结构化强"),
            CopyLength::Custom => None,
        }
    }
}

/// Global generation modifier. Mutable at any time on the preview step;
/// changing it does not itself trigger regeneration — an explicit regenerate
/// action picks up the latest value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneOptions {
    pub tone: Tone,
    pub visual_style: VisualStyle,
    pub custom_visual_style: Option<String>,
    pub copy_length: CopyLength,
    pub custom_copy_length: Option<String>,
}

impl Default for ToneOptions {
    fn default() -> Self {
        Self {
            tone: Tone::Friendly,
            visual_style: VisualStyle::Minimalist,
            custom_visual_style: None,
            copy_length: CopyLength::Balanced,
            custom_copy_length: None,
        }
    }
}

impl ToneOptions {
    /// Length instruction for the copy prompt, resolving the custom override.
    pub fn length_instruction(&self) -> &str {
        match self.copy_length.instruction() {
            Some(fixed) => fixed,
            None => self
                .custom_copy_length
                .as_deref()
                .unwrap_or("根据上下文自动调整"),
        }
    }

    /// Style line for the poster prompt, resolving the custom override.
    pub fn style_modifier(&self) -> String {
        let style = match self.visual_style.description() {
            Some(fixed) => fixed,
            None => self
                .custom_visual_style
                .as_deref()
                .unwrap_or("Professional High-end"),
        };
        format!("Visual Style Adjustment: strictly follow this style -> {style}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_friendly_minimalist_balanced() {
        let options = ToneOptions::default();
        assert_eq!(options.tone, Tone::Friendly);
        assert_eq!(options.visual_style, VisualStyle::Minimalist);
        assert_eq!(options.copy_length, CopyLength::Balanced);
    }

    #[test]
    fn custom_length_falls_back_when_text_missing() {
        let mut options = ToneOptions {
            copy_length: CopyLength::Custom,
            ..ToneOptions::default()
        };
        assert_eq!(options.length_instruction(), "根据上下文自动调整");

        options.custom_copy_length = Some("不超过50字".into());
        assert_eq!(options.length_instruction(), "不超过50字");
    }

    #[test]
    fn custom_style_text_is_used_verbatim() {
        let options = ToneOptions {
            visual_style: VisualStyle::Custom,
            custom_visual_style: Some("Cyberpunk neon".into()),
            ..ToneOptions::default()
        };
        assert!(options.style_modifier().contains("Cyberpunk neon"));
    }
}
