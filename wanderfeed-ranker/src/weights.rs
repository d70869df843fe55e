//! Tunable weights for preference updates and trending ranking.
#![forbid(unsafe_code)]

use wanderfeed_core::{EngagementStats, InteractionKind};

use crate::RankerError;

/// Score delta applied to each tag of an interacted post, per interaction.
///
/// Negative weights push tags down. The dismissive swipe defaults to a
/// smaller magnitude than the approving one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionWeights {
    /// Applied on an impression.
    pub view: f64,
    /// Applied when the post is saved.
    pub save: f64,
    /// Applied on an approving swipe.
    pub swipe_right: f64,
    /// Applied on a dismissive swipe.
    pub swipe_left: f64,
    /// Applied when the post is shared.
    pub share: f64,
    /// Applied when the post is reposted.
    pub repost: f64,
}

impl InteractionWeights {
    /// Return the weight for `kind`.
    ///
    /// # Examples
    /// ```
    /// use wanderfeed_core::InteractionKind;
    /// use wanderfeed_ranker::InteractionWeights;
    ///
    /// let weights = InteractionWeights::default();
    /// assert_eq!(weights.weight(InteractionKind::Repost), 2.5);
    /// ```
    #[must_use]
    pub const fn weight(&self, kind: InteractionKind) -> f64 {
        match kind {
            InteractionKind::View => self.view,
            InteractionKind::Save => self.save,
            InteractionKind::SwipeRight => self.swipe_right,
            InteractionKind::SwipeLeft => self.swipe_left,
            InteractionKind::Share => self.share,
            InteractionKind::Repost => self.repost,
        }
    }

    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`RankerError::InvalidTuning`] naming the first non-finite
    /// weight.
    pub fn validate(self) -> Result<Self, RankerError> {
        for kind in InteractionKind::ALL {
            let value = self.weight(kind);
            if !value.is_finite() {
                return Err(RankerError::InvalidTuning {
                    parameter: kind.as_str(),
                    value,
                });
            }
        }
        Ok(self)
    }
}

impl Default for InteractionWeights {
    fn default() -> Self {
        Self {
            view: 0.1,
            save: 1.5,
            swipe_right: 1.5,
            swipe_left: -0.8,
            share: 2.0,
            repost: 2.5,
        }
    }
}

/// Integer multipliers for the trending formula.
///
/// The default is `saves * 2 + reposts * 3 + shares`; views do not count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementWeights {
    /// Multiplier for saves.
    pub saves: u64,
    /// Multiplier for reposts.
    pub reposts: u64,
    /// Multiplier for shares.
    pub shares: u64,
    /// Multiplier for views.
    pub views: u64,
}

impl EngagementWeights {
    /// Compute the engagement score of `stats`, saturating on overflow.
    ///
    /// # Examples
    /// ```
    /// use wanderfeed_core::EngagementStats;
    /// use wanderfeed_ranker::EngagementWeights;
    ///
    /// let stats = EngagementStats { saves: 1, reposts: 1, shares: 1, views: 100 };
    /// assert_eq!(EngagementWeights::default().score(stats), 6);
    /// ```
    #[must_use]
    pub const fn score(&self, stats: EngagementStats) -> u64 {
        stats
            .saves
            .saturating_mul(self.saves)
            .saturating_add(stats.reposts.saturating_mul(self.reposts))
            .saturating_add(stats.shares.saturating_mul(self.shares))
            .saturating_add(stats.views.saturating_mul(self.views))
    }
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            saves: 2,
            reposts: 3,
            shares: 1,
            views: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(InteractionKind::SwipeRight, 1.5)]
    #[case(InteractionKind::Save, 1.5)]
    #[case(InteractionKind::SwipeLeft, -0.8)]
    #[case(InteractionKind::View, 0.1)]
    #[case(InteractionKind::Share, 2.0)]
    #[case(InteractionKind::Repost, 2.5)]
    fn default_weights_match_table(#[case] kind: InteractionKind, #[case] expected: f64) {
        assert_eq!(InteractionWeights::default().weight(kind), expected);
    }

    #[rstest]
    fn validation_rejects_non_finite() {
        let weights = InteractionWeights {
            share: f64::NAN,
            ..InteractionWeights::default()
        };
        let err = weights.validate().expect_err("NaN weight");
        assert!(matches!(
            err,
            RankerError::InvalidTuning {
                parameter: "share",
                ..
            }
        ));
    }

    #[rstest]
    fn engagement_score_saturates() {
        let stats = EngagementStats {
            saves: u64::MAX,
            reposts: 1,
            shares: 0,
            views: 0,
        };
        assert_eq!(EngagementWeights::default().score(stats), u64::MAX);
    }
}
