//! Store-backed recording of interactions.
//!
//! The ranker itself is pure. This module shows the read-modify-write
//! contract a persistence layer must honour: load the model with its
//! revision, derive the new model, and save it only if nobody else has saved
//! in between.
#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use wanderfeed_core::{
    InteractionEvent, PreferenceModel, PreferenceStore, StoreError, StoredPreferences,
};

use crate::{InteractionWeights, RankerError, apply_interaction};

/// Apply `event` to the stored model of `event.user_id` and persist it.
///
/// Users without a stored model start from an empty one. A concurrent save
/// surfaces as [`StoreError::Conflict`] wrapped in [`RankerError::Store`];
/// this function never retries, leaving that policy to the caller.
///
/// # Errors
/// Propagates [`StoreError`] from loading or saving.
pub fn record_interaction<S>(
    store: &S,
    event: &InteractionEvent,
    weights: &InteractionWeights,
    now: DateTime<Utc>,
) -> Result<StoredPreferences, RankerError>
where
    S: PreferenceStore + ?Sized,
{
    let (current, expected_revision) = match store.load(&event.user_id)? {
        Some(stored) => (stored.model, Some(stored.revision)),
        None => (PreferenceModel::new(), None),
    };
    let model = apply_interaction(&current, event, weights, now);
    let revision = store
        .save(&event.user_id, &model, expected_revision)
        .inspect_err(|err| {
            if let StoreError::Conflict { user_id, .. } = err {
                log::warn!("lost update race recording {} for user {user_id}", event.id);
            }
        })?;
    Ok(StoredPreferences { model, revision })
}
