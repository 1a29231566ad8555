use serde::{Deserialize, Serialize};

/// Ordered wizard steps. The current step fully determines which surface the
/// front-end presents; no step renders state belonging to a later step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, strum::Display,
)]
pub enum Step {
    Intro,
    Upload,
    AnalysisReview,
    CampaignConfig,
    FinalPreview,
}

impl Step {
    /// The step immediately after this one, if any.
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Intro => Some(Step::Upload),
            Step::Upload => Some(Step::AnalysisReview),
            Step::AnalysisReview => Some(Step::CampaignConfig),
            Step::CampaignConfig => Some(Step::FinalPreview),
            Step::FinalPreview => None,
        }
    }

    /// The step immediately before this one. `Intro` has no predecessor.
    pub fn prev(self) -> Option<Step> {
        match self {
            Step::Intro => None,
            Step::Upload => Some(Step::Intro),
            Step::AnalysisReview => Some(Step::Upload),
            Step::CampaignConfig => Some(Step::AnalysisReview),
            Step::FinalPreview => Some(Step::CampaignConfig),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_ordered() {
        assert!(Step::Intro < Step::Upload);
        assert!(Step::Upload < Step::AnalysisReview);
        assert!(Step::AnalysisReview < Step::CampaignConfig);
        assert!(Step::CampaignConfig < Step::FinalPreview);
    }

    #[test]
    fn next_and_prev_are_inverse_in_the_middle() {
        let mut step = Step::Intro;
        while let Some(next) = step.next() {
            assert_eq!(next.prev(), Some(step));
            step = next;
        }
        assert_eq!(step, Step::FinalPreview);
    }

    #[test]
    fn intro_has_no_predecessor() {
        assert_eq!(Step::Intro.prev(), None);
        assert_eq!(Step::FinalPreview.next(), None);
    }
}
