//! Core domain types for the Wanderfeed recommendation engine.
//!
//! These models keep downstream components honest: tags are normalised on
//! construction, posts without a tag collection are rejected, and interaction
//! kinds outside the known set cannot be represented. The persistence seam
//! used to thread preference models between calls lives in [`store`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod interaction;
pub mod post;
pub mod preferences;
pub mod store;
pub mod tag;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use interaction::{InteractionError, InteractionEvent, InteractionKind};
pub use post::{EngagementStats, Post, PostError, PostRecord};
pub use preferences::PreferenceModel;
pub use store::{PreferenceStore, StoreError, StoredPreferences};
pub use tag::Tag;
