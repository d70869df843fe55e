//! Facade crate for the Wanderfeed recommendation engine.
//!
//! This crate re-exports the core domain types and the ranking operations so
//! applications can depend on a single crate. JSON support for the domain
//! types sits behind the `serde` feature; the in-memory preference store used
//! by tests sits behind `test-support`.

#![forbid(unsafe_code)]

pub use wanderfeed_core::{
    EngagementStats, InteractionError, InteractionEvent, InteractionKind, Post, PostError,
    PostRecord, PreferenceModel, PreferenceStore, StoreError, StoredPreferences, Tag,
};

pub use wanderfeed_ranker::{
    DEFAULT_FEED_LIMIT, DEFAULT_SIMILAR_LIMIT, DEFAULT_TRENDING_LIMIT, EngagementWeights,
    ExplorationNoise, InteractionWeights, RankerError, SEED_SCORE, ScoredPost, SimilarPost,
    apply_interaction, decay_preferences, initial_preferences, initial_preferences_at,
    personalized_feed, rank_posts, record_interaction, score_candidates, score_post,
    shared_tag_count, similar_posts, trending_posts, trending_posts_with, update_preferences,
};

#[cfg(feature = "test-support")]
pub use wanderfeed_core::test_support;
