//! Learning, seeding and decaying per-user preference models.
#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use wanderfeed_core::{InteractionEvent, PreferenceModel, Tag};

use crate::{InteractionWeights, RankerError};

/// Initial score given to each interest picked during onboarding.
pub const SEED_SCORE: f64 = 1.0;

/// Fold `event` into `model` using the default weights and the current time.
///
/// The returned model is new; `model` is left untouched so callers can diff,
/// audit or roll back.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use wanderfeed_core::{InteractionEvent, InteractionKind, PreferenceModel, Tag};
/// use wanderfeed_ranker::update_preferences;
///
/// let event = InteractionEvent {
///     id: "e1".into(),
///     user_id: "u1".into(),
///     post_id: "p1".into(),
///     kind: InteractionKind::SwipeRight,
///     tags: vec![Tag::new("beach"), Tag::new("hiking")],
///     created_at: Utc::now(),
/// };
/// let before = PreferenceModel::new();
/// let after = update_preferences(&before, &event);
/// assert_eq!(after.score("beach"), Some(1.5));
/// assert!(before.is_empty());
/// ```
#[must_use]
pub fn update_preferences(model: &PreferenceModel, event: &InteractionEvent) -> PreferenceModel {
    apply_interaction(model, event, &InteractionWeights::default(), Utc::now())
}

/// Fold `event` into `model` with explicit weights and timestamp.
///
/// Each distinct tag of the event receives the interaction's weight once. An
/// event without tags changes no score but still stamps `now`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "preference learning accumulates floating-point weights"
)]
pub fn apply_interaction(
    model: &PreferenceModel,
    event: &InteractionEvent,
    weights: &InteractionWeights,
    now: DateTime<Utc>,
) -> PreferenceModel {
    let weight = weights.weight(event.kind);
    let distinct: BTreeSet<&Tag> = event.tags.iter().collect();
    let mut scores = model.tag_scores().clone();
    for tag in &distinct {
        *scores.entry((*tag).clone()).or_insert(0.0) += weight;
    }
    log::debug!(
        "applied {} (weight {weight}) to {} tags for user {}",
        event.kind,
        distinct.len(),
        event.user_id
    );
    PreferenceModel::from_scores(scores, Some(now))
}

/// Seed a model from onboarding interests, each scoring [`SEED_SCORE`].
///
/// # Examples
/// ```
/// use wanderfeed_ranker::initial_preferences;
///
/// let model = initial_preferences(["food", "hiking"]);
/// assert_eq!(model.score("food"), Some(1.0));
/// assert_eq!(model.len(), 2);
/// ```
#[must_use]
pub fn initial_preferences<I, T>(selected: I) -> PreferenceModel
where
    I: IntoIterator<Item = T>,
    T: Into<Tag>,
{
    initial_preferences_at(selected, Utc::now())
}

/// Seed a model from onboarding interests with an explicit timestamp.
#[must_use]
pub fn initial_preferences_at<I, T>(selected: I, now: DateTime<Utc>) -> PreferenceModel
where
    I: IntoIterator<Item = T>,
    T: Into<Tag>,
{
    let scores = selected
        .into_iter()
        .map(|tag| (tag.into(), SEED_SCORE))
        .collect();
    PreferenceModel::from_scores(scores, Some(now))
}

/// Scale every score in `model` by `factor`.
///
/// Scores otherwise grow without bound. Nothing in this crate calls this
/// implicitly; callers opt in, for example on a periodic schedule.
///
/// # Errors
/// Returns [`RankerError::InvalidTuning`] when `factor` is outside
/// `0.0..=1.0` or not finite.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use wanderfeed_core::PreferenceModel;
/// use wanderfeed_ranker::decay_preferences;
///
/// let model = PreferenceModel::new().with_score("beach", 4.0);
/// let halved = decay_preferences(&model, 0.5, Utc::now()).unwrap();
/// assert_eq!(halved.score("beach"), Some(2.0));
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "decay multiplies each score by the factor"
)]
pub fn decay_preferences(
    model: &PreferenceModel,
    factor: f64,
    now: DateTime<Utc>,
) -> Result<PreferenceModel, RankerError> {
    if !(0.0..=1.0).contains(&factor) {
        return Err(RankerError::InvalidTuning {
            parameter: "decay_factor",
            value: factor,
        });
    }
    let scores = model
        .tag_scores()
        .iter()
        .map(|(tag, score)| (tag.clone(), score * factor))
        .collect();
    Ok(PreferenceModel::from_scores(scores, Some(now)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use wanderfeed_core::InteractionKind;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 14, 8, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn event(kind: InteractionKind, tags: &[&str]) -> InteractionEvent {
        InteractionEvent {
            id: "e".into(),
            user_id: "u".into(),
            post_id: "p".into(),
            kind,
            tags: tags.iter().copied().map(Tag::new).collect(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[rstest]
    fn duplicate_event_tags_count_once(now: DateTime<Utc>) {
        let model = apply_interaction(
            &PreferenceModel::new(),
            &event(InteractionKind::Share, &["beach", "Beach", "beach"]),
            &InteractionWeights::default(),
            now,
        );
        assert_eq!(model.score("beach"), Some(2.0));
        assert_eq!(model.len(), 1);
    }

    #[rstest]
    fn tagless_event_only_stamps_time(now: DateTime<Utc>) {
        let before = PreferenceModel::new().with_score("food", 1.0);
        let after = apply_interaction(
            &before,
            &event(InteractionKind::Repost, &[]),
            &InteractionWeights::default(),
            now,
        );
        assert_eq!(after.tag_scores(), before.tag_scores());
        assert_eq!(after.last_updated(), Some(now));
    }

    #[rstest]
    fn custom_weights_apply(now: DateTime<Utc>) {
        let weights = InteractionWeights {
            view: 1.0,
            ..InteractionWeights::default()
        };
        let model = apply_interaction(
            &PreferenceModel::new(),
            &event(InteractionKind::View, &["museum"]),
            &weights,
            now,
        );
        assert_eq!(model.score("museum"), Some(1.0));
    }

    #[rstest]
    fn seeding_stamps_time(now: DateTime<Utc>) {
        let model = initial_preferences_at(["Food", "hiking"], now);
        assert_eq!(model.score("food"), Some(SEED_SCORE));
        assert_eq!(model.last_updated(), Some(now));
    }

    #[rstest]
    #[case(-0.5)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn decay_rejects_out_of_range(#[case] factor: f64, now: DateTime<Utc>) {
        let model = PreferenceModel::new().with_score("beach", 1.0);
        assert!(decay_preferences(&model, factor, now).is_err());
    }

    #[rstest]
    fn decay_preserves_sign(now: DateTime<Utc>) {
        let model = PreferenceModel::new()
            .with_score("beach", 3.0)
            .with_score("clubs", -1.6);
        let decayed = decay_preferences(&model, 0.5, now).expect("valid factor");
        assert_eq!(decayed.score("beach"), Some(1.5));
        assert_eq!(decayed.score("clubs"), Some(-0.8));
        assert_eq!(model.score("beach"), Some(3.0));
    }
}
