//! Tag-based personalisation for the Wanderfeed trip-sharing feed.
//!
//! The crate is a set of pure transforms over caller-owned values:
//! - **Preference learning** folds weighted
//!   [`InteractionEvent`](wanderfeed_core::InteractionEvent)s into a
//!   [`PreferenceModel`](wanderfeed_core::PreferenceModel), always returning
//!   a new model and leaving the input untouched. Models can be seeded from
//!   onboarding interests and, on request, decayed.
//! - **Personalised ranking** scores each post by the mean of its tag scores,
//!   optionally perturbs the scores with bounded exploration noise drawn from
//!   a caller-supplied random source, and orders the candidates.
//! - **Global ranking** orders posts by engagement (trending) or by shared
//!   tags with a reference post (similar items), without consulting any
//!   preference model.
//!
//! Persisting models is the caller's job. [`record_interaction`] shows the
//! read-modify-write contract against a
//! [`PreferenceStore`](wanderfeed_core::PreferenceStore).
//!
//! # Examples
//!
//! ```
//! use std::collections::HashSet;
//! use chrono::Utc;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use wanderfeed_core::{EngagementStats, InteractionEvent, InteractionKind, Post};
//! use wanderfeed_ranker::{
//!     ExplorationNoise, initial_preferences, personalized_feed, update_preferences,
//! };
//!
//! let posts = vec![
//!     Post::new("surf", ["beach", "surf"], EngagementStats::default()),
//!     Post::new("alps", ["hiking", "mountains"], EngagementStats::default()),
//! ];
//! let model = initial_preferences(["hiking"]);
//! let event = InteractionEvent::for_post("e1", "u1", &posts[1], InteractionKind::Save, Utc::now());
//! let model = update_preferences(&model, &event);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let seen: HashSet<String> = HashSet::new();
//! let noise = ExplorationNoise::default();
//! let feed = personalized_feed(&posts, &model, &seen, 20, noise, &mut rng);
//! assert_eq!(feed[0].id(), "alps");
//! ```

#![forbid(unsafe_code)]

mod error;
mod exploration;
mod preferences;
mod ranking;
mod session;
mod similar;
mod trending;
mod weights;

pub use error::RankerError;
pub use exploration::ExplorationNoise;
pub use preferences::{
    SEED_SCORE, apply_interaction, decay_preferences, initial_preferences, initial_preferences_at,
    update_preferences,
};
pub use ranking::{
    DEFAULT_FEED_LIMIT, ScoredPost, personalized_feed, rank_posts, score_candidates, score_post,
};
pub use session::record_interaction;
pub use similar::{DEFAULT_SIMILAR_LIMIT, SimilarPost, shared_tag_count, similar_posts};
pub use trending::{DEFAULT_TRENDING_LIMIT, trending_posts, trending_posts_with};
pub use weights::{EngagementWeights, InteractionWeights};
