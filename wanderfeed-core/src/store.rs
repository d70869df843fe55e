//! Persistence seam for preference models.
//!
//! The engine is a pure function of `(old model, event)`, so concurrent
//! updates for one user race unless storage serialises them. Stores enforce
//! this with revision numbers: every save names the revision it was derived
//! from and a stale revision is rejected with [`StoreError::Conflict`].

use thiserror::Error;

use crate::PreferenceModel;

/// A persisted model together with its optimistic-concurrency revision.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPreferences {
    /// The stored model.
    pub model: PreferenceModel,
    /// Monotonic revision, incremented on every successful save.
    pub revision: u64,
}

/// Errors raised by [`PreferenceStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another writer saved a newer model since it was loaded.
    #[error("preference model for user {user_id} changed concurrently (expected revision {expected:?}, found {actual:?})")]
    Conflict {
        /// User whose model was being saved.
        user_id: String,
        /// Revision the caller loaded, or `None` for a first save.
        expected: Option<u64>,
        /// Revision currently held by the store.
        actual: Option<u64>,
    },
    /// The backing storage failed.
    #[error("preference store backend failed for user {user_id}")]
    Backend {
        /// User whose model was being read or written.
        user_id: String,
        /// Underlying failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Durable storage for per-user preference models.
///
/// Implementations must be `Send + Sync` so request handlers can share them.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use std::sync::Mutex;
/// use wanderfeed_core::{PreferenceModel, PreferenceStore, StoreError, StoredPreferences};
///
/// #[derive(Default)]
/// struct Naive(Mutex<HashMap<String, StoredPreferences>>);
///
/// impl PreferenceStore for Naive {
///     fn load(&self, user_id: &str) -> Result<Option<StoredPreferences>, StoreError> {
///         let guard = self.0.lock().map_err(|_| StoreError::Backend {
///             user_id: user_id.to_owned(),
///             source: "poisoned".into(),
///         })?;
///         Ok(guard.get(user_id).cloned())
///     }
///
///     fn save(
///         &self,
///         user_id: &str,
///         model: &PreferenceModel,
///         _expected_revision: Option<u64>,
///     ) -> Result<u64, StoreError> {
///         let mut guard = self.0.lock().map_err(|_| StoreError::Backend {
///             user_id: user_id.to_owned(),
///             source: "poisoned".into(),
///         })?;
///         let stored = StoredPreferences { model: model.clone(), revision: 1 };
///         guard.insert(user_id.to_owned(), stored);
///         Ok(1)
///     }
/// }
///
/// let store = Naive::default();
/// assert!(store.load("u1").unwrap().is_none());
/// ```
pub trait PreferenceStore: Send + Sync {
    /// Load the current model for `user_id`, if one has been saved.
    ///
    /// # Errors
    /// Returns [`StoreError::Backend`] when storage cannot be read.
    fn load(&self, user_id: &str) -> Result<Option<StoredPreferences>, StoreError>;

    /// Persist `model` if the stored revision still equals
    /// `expected_revision`, returning the new revision.
    ///
    /// # Errors
    /// Returns [`StoreError::Conflict`] when the stored revision differs and
    /// [`StoreError::Backend`] when storage cannot be written.
    fn save(
        &self,
        user_id: &str,
        model: &PreferenceModel,
        expected_revision: Option<u64>,
    ) -> Result<u64, StoreError>;
}
