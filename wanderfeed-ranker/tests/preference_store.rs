#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Integration coverage for store-backed interaction recording.

use chrono::{DateTime, Utc};
use rstest::rstest;
use wanderfeed_core::test_support::MemoryPreferenceStore;
use wanderfeed_core::{
    InteractionEvent, InteractionKind, PreferenceModel, PreferenceStore, StoreError,
    StoredPreferences, Tag,
};
use wanderfeed_ranker::{InteractionWeights, RankerError, initial_preferences, record_interaction};

/// Store whose reads let a competing writer save before the caller does.
struct RacingStore {
    inner: MemoryPreferenceStore,
    competitor: PreferenceModel,
}

impl PreferenceStore for RacingStore {
    fn load(&self, user_id: &str) -> Result<Option<StoredPreferences>, StoreError> {
        let before = self.inner.load(user_id)?;
        self.inner.save(
            user_id,
            &self.competitor,
            before.as_ref().map(|stored| stored.revision),
        )?;
        Ok(before)
    }

    fn save(
        &self,
        user_id: &str,
        model: &PreferenceModel,
        expected_revision: Option<u64>,
    ) -> Result<u64, StoreError> {
        self.inner.save(user_id, model, expected_revision)
    }
}

fn beach_swipe() -> InteractionEvent {
    InteractionEvent {
        id: "evt-1".into(),
        user_id: "user-1".into(),
        post_id: "post-1".into(),
        kind: InteractionKind::SwipeRight,
        tags: vec![Tag::new("beach")],
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

#[rstest]
fn first_interaction_creates_the_model() {
    let swipe = beach_swipe();
    let store = MemoryPreferenceStore::default();
    let now = DateTime::<Utc>::UNIX_EPOCH;

    let stored = record_interaction(&store, &swipe, &InteractionWeights::default(), now)
        .expect("recording succeeds");

    assert_eq!(stored.revision, 1);
    assert_eq!(stored.model.score("beach"), Some(1.5));
    assert_eq!(stored.model.last_updated(), Some(now));
    let reloaded = store
        .load("user-1")
        .expect("load succeeds")
        .expect("model was saved");
    assert_eq!(reloaded, stored);
}

#[rstest]
fn later_interactions_build_on_the_stored_model() {
    let swipe = beach_swipe();
    let store = MemoryPreferenceStore::with_model("user-1", initial_preferences(["beach"]));
    let now = DateTime::<Utc>::UNIX_EPOCH;

    let stored = record_interaction(&store, &swipe, &InteractionWeights::default(), now)
        .expect("recording succeeds");

    assert_eq!(stored.revision, 2);
    assert_eq!(stored.model.score("beach"), Some(2.5));
}

#[rstest]
fn stale_revisions_are_rejected() {
    let swipe = beach_swipe();
    let store = MemoryPreferenceStore::with_model("user-1", initial_preferences(["beach"]));
    let stale = store
        .load("user-1")
        .expect("load succeeds")
        .expect("model exists");
    record_interaction(
        &store,
        &swipe,
        &InteractionWeights::default(),
        DateTime::<Utc>::UNIX_EPOCH,
    )
    .expect("first writer wins");

    let err = store
        .save("user-1", &stale.model, Some(stale.revision))
        .expect_err("second writer loses");

    assert!(matches!(
        err,
        StoreError::Conflict {
            expected: Some(1),
            actual: Some(2),
            ..
        }
    ));
}

#[rstest]
fn conflicts_surface_through_the_ranker_error() {
    let err: RankerError = StoreError::Conflict {
        user_id: "user-1".to_owned(),
        expected: None,
        actual: Some(1),
    }
    .into();
    assert!(matches!(err, RankerError::Store(StoreError::Conflict { .. })));
}

#[rstest]
fn concurrent_writers_surface_a_conflict_without_retrying() {
    let swipe = beach_swipe();
    let competitor = initial_preferences(["hiking"]);
    let store = RacingStore {
        inner: MemoryPreferenceStore::default(),
        competitor: competitor.clone(),
    };

    let err = record_interaction(
        &store,
        &swipe,
        &InteractionWeights::default(),
        DateTime::<Utc>::UNIX_EPOCH,
    )
    .expect_err("the competing save wins");

    assert!(matches!(
        err,
        RankerError::Store(StoreError::Conflict {
            expected: None,
            actual: Some(1),
            ..
        })
    ));
    let stored = store
        .inner
        .load("user-1")
        .expect("load succeeds")
        .expect("competitor saved a model");
    assert_eq!(stored.revision, 1);
    assert_eq!(stored.model, competitor);
    assert!(stored.model.score("beach").is_none());
}
