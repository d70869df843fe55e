//! Per-user preference models: real-valued scores keyed by tag.
//!
//! Scores are unbounded in both directions. Models are values: the engine
//! never edits one in place, it returns a replacement the caller persists.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::Tag;

/// A user's learned affinity for each tag.
///
/// Stored keys that normalise to the same tag, such as `"Beach"` and
/// `"beach"`, are summed when a model is decoded.
///
/// # Examples
/// ```
/// use wanderfeed_core::PreferenceModel;
///
/// let model = PreferenceModel::new()
///     .with_score("Beach", 2.0)
///     .with_score("hiking", -0.8);
/// assert_eq!(model.score("beach"), Some(2.0));
/// assert!(model.score("museums").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PreferenceModel {
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "merge_normalised_scores")
    )]
    tag_scores: BTreeMap<Tag, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    last_updated: Option<DateTime<Utc>>,
}

impl PreferenceModel {
    /// Construct an empty model that has never been updated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a model from precomputed scores.
    #[must_use]
    pub const fn from_scores(
        tag_scores: BTreeMap<Tag, f64>,
        last_updated: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            tag_scores,
            last_updated,
        }
    }

    /// Return the score for a tag, if the model has seen it.
    ///
    /// The lookup is normalised, so `"Beach"` and `"beach"` agree.
    #[must_use]
    pub fn score(&self, tag: &str) -> Option<f64> {
        self.tag_scores
            .get(tag)
            .or_else(|| self.tag_scores.get(Tag::new(tag).as_str()))
            .copied()
    }

    /// Return the score for a tag, treating unseen tags as zero.
    #[must_use]
    pub fn score_or_zero(&self, tag: &Tag) -> f64 {
        self.tag_scores.get(tag).copied().unwrap_or(0.0)
    }

    /// Borrow the full score map.
    #[must_use]
    pub const fn tag_scores(&self) -> &BTreeMap<Tag, f64> {
        &self.tag_scores
    }

    /// When the model last changed, if ever.
    #[must_use]
    pub const fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Number of scored tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tag_scores.len()
    }

    /// Report whether no tag has a score.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag_scores.is_empty()
    }

    /// Insert or overwrite a tag score while returning `self` for chaining.
    #[must_use]
    pub fn with_score(mut self, tag: impl Into<Tag>, score: f64) -> Self {
        self.tag_scores.insert(tag.into(), score);
        self
    }

    /// Stamp the model with a modification time.
    #[must_use]
    pub const fn touched_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = Some(at);
        self
    }
}

#[cfg(feature = "serde")]
#[expect(
    clippy::float_arithmetic,
    reason = "colliding keys accumulate their scores"
)]
fn merge_normalised_scores<'de, D>(deserializer: D) -> Result<BTreeMap<Tag, f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: BTreeMap<String, f64> = serde::Deserialize::deserialize(deserializer)?;
    let mut scores = BTreeMap::new();
    for (tag, score) in raw {
        *scores.entry(Tag::from(tag)).or_insert(0.0) += score;
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_model_is_empty_and_untouched() {
        let model = PreferenceModel::new();
        assert!(model.is_empty());
        assert!(model.last_updated().is_none());
    }

    #[rstest]
    fn keys_are_normalised() {
        let model = PreferenceModel::new().with_score("SURF", 1.0);
        assert_eq!(model.tag_scores().keys().next(), Some(&Tag::new("surf")));
        assert_eq!(model.score("Surf"), Some(1.0));
    }

    #[rstest]
    fn unseen_tags_score_zero() {
        let model = PreferenceModel::new().with_score("food", 0.4);
        assert_eq!(model.score_or_zero(&Tag::new("nightlife")), 0.0);
        assert_eq!(model.score_or_zero(&Tag::new("food")), 0.4);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn round_trips_through_json() {
        let model = PreferenceModel::new()
            .with_score("beach", 1.5)
            .touched_at(DateTime::<Utc>::UNIX_EPOCH);
        let json = serde_json::to_string(&model).expect("encode model");
        assert!(json.contains("\"tagScores\""));
        let decoded: PreferenceModel = serde_json::from_str(&json).expect("decode model");
        assert_eq!(decoded, model);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn decoding_sums_keys_that_normalise_alike() {
        let json = r#"{"tagScores":{"Beach":1.5,"beach":0.5,"surf":-0.8}}"#;
        let decoded: PreferenceModel = serde_json::from_str(json).expect("decode model");
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.score("beach"), Some(2.0));
        assert_eq!(decoded.score("surf"), Some(-0.8));
        assert!(decoded.last_updated().is_none());
    }
}
