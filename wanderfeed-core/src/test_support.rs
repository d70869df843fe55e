//! Test-only, in-memory `PreferenceStore` implementation used by unit and
//! behaviour tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::{PreferenceModel, PreferenceStore, StoreError, StoredPreferences};

/// In-memory `PreferenceStore` with revision checking.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    models: Mutex<HashMap<String, StoredPreferences>>,
}

impl MemoryPreferenceStore {
    /// Create a store holding `model` for `user_id` at revision 1.
    #[must_use]
    pub fn with_model(user_id: impl Into<String>, model: PreferenceModel) -> Self {
        let stored = StoredPreferences { model, revision: 1 };
        Self {
            models: Mutex::new(HashMap::from([(user_id.into(), stored)])),
        }
    }

    fn guard(
        &self,
        user_id: &str,
    ) -> Result<MutexGuard<'_, HashMap<String, StoredPreferences>>, StoreError> {
        self.models.lock().map_err(|_| StoreError::Backend {
            user_id: user_id.to_owned(),
            source: "memory store lock poisoned".into(),
        })
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, user_id: &str) -> Result<Option<StoredPreferences>, StoreError> {
        Ok(self.guard(user_id)?.get(user_id).cloned())
    }

    fn save(
        &self,
        user_id: &str,
        model: &PreferenceModel,
        expected_revision: Option<u64>,
    ) -> Result<u64, StoreError> {
        let mut models = self.guard(user_id)?;
        let actual = models.get(user_id).map(|stored| stored.revision);
        if actual != expected_revision {
            return Err(StoreError::Conflict {
                user_id: user_id.to_owned(),
                expected: expected_revision,
                actual,
            });
        }
        let revision = actual.map_or(1, |current| current.saturating_add(1));
        models.insert(
            user_id.to_owned(),
            StoredPreferences {
                model: model.clone(),
                revision,
            },
        );
        Ok(revision)
    }
}
