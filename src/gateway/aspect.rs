/// Aspect ratios the image backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Square,
    Portrait,
    Landscape,
    Tall,
    Wide,
}

impl AspectRatio {
    /// Safe fallback for tokens the backend cannot render directly.
    pub const DEFAULT: AspectRatio = AspectRatio::Portrait;

    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Tall => "9:16",
            AspectRatio::Wide => "16:9",
        }
    }

    /// Exact-match normalization of a free-text dimension token. Paper sizes
    /// fold to portrait; anything unrecognized falls back to the default
    /// ratio, with the literal token still forwarded inside the prompt text.
    pub fn normalize(token: &str) -> AspectRatio {
        match token.trim().to_lowercase().as_str() {
            "1:1" => AspectRatio::Square,
            "3:4" => AspectRatio::Portrait,
            "4:3" => AspectRatio::Landscape,
            "9:16" => AspectRatio::Tall,
            "16:9" => AspectRatio::Wide,
            "a3" | "a4" | "a5" => AspectRatio::Portrait,
            _ => AspectRatio::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_sizes_fold_to_portrait() {
        assert_eq!(AspectRatio::normalize("A5"), AspectRatio::Portrait);
        assert_eq!(AspectRatio::normalize("a5"), AspectRatio::Portrait);
        assert_eq!(AspectRatio::normalize("A4"), AspectRatio::Portrait);
        assert_eq!(AspectRatio::normalize("a3"), AspectRatio::Portrait);
    }

    #[test]
    fn supported_ratios_normalize_to_themselves() {
        assert_eq!(AspectRatio::normalize("9:16"), AspectRatio::Tall);
        assert_eq!(AspectRatio::normalize("1:1"), AspectRatio::Square);
        assert_eq!(AspectRatio::normalize(" 16:9 "), AspectRatio::Wide);
    }

    #[test]
    fn unrecognized_tokens_fall_back_to_default() {
        assert_eq!(AspectRatio::normalize("poster-xl"), AspectRatio::DEFAULT);
        assert_eq!(AspectRatio::normalize(""), AspectRatio::DEFAULT);
        assert_eq!(AspectRatio::DEFAULT.as_str(), "3:4");
    }
}
