//! Bounded exploration noise that keeps feeds from collapsing onto a user's
//! historically strongest tags.
#![forbid(unsafe_code)]

use rand::Rng;

use crate::RankerError;

/// Uniform noise in `[0, bound)` added to each personalised score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorationNoise {
    bound: f64,
}

impl ExplorationNoise {
    /// Default exclusive upper bound for the noise.
    pub const DEFAULT_BOUND: f64 = 0.3;

    /// Build a noise source with a custom exclusive upper bound.
    ///
    /// # Errors
    /// Returns [`RankerError::InvalidTuning`] when `bound` is not a finite,
    /// strictly positive number.
    ///
    /// # Examples
    /// ```
    /// use wanderfeed_ranker::ExplorationNoise;
    ///
    /// assert!(ExplorationNoise::new(0.5).is_ok());
    /// assert!(ExplorationNoise::new(0.0).is_err());
    /// ```
    pub fn new(bound: f64) -> Result<Self, RankerError> {
        if bound.is_finite() && bound > 0.0 {
            Ok(Self { bound })
        } else {
            Err(RankerError::InvalidTuning {
                parameter: "exploration_bound",
                value: bound,
            })
        }
    }

    /// Exclusive upper bound of the noise.
    #[must_use]
    pub const fn bound(self) -> f64 {
        self.bound
    }

    /// Draw one noise value from `rng`.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        rng.gen_range(0.0..self.bound)
    }
}

impl Default for ExplorationNoise {
    fn default() -> Self {
        Self {
            bound: Self::DEFAULT_BOUND,
        }
    }
}
