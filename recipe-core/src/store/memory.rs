//! In-memory recipe store for tests.

use super::RecipeStore;
use crate::error::StoreError;
use crate::types::Recipe;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Number of calls made against an [`InMemoryRecipeStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub reads: usize,
    pub writes: usize,
    pub deletes: usize,
}

/// A [`RecipeStore`] keeping records in a map keyed by name.
///
/// Like a database with a unique index on `name`, inserting a second record
/// with a taken name fails with [`StoreError::Conflict`].
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    records: Mutex<BTreeMap<String, Recipe>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records (ids are assigned if missing).
    pub fn with_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let store = Self::new();
        {
            let mut records = store.lock();
            for mut recipe in recipes {
                recipe.id.get_or_insert_with(Uuid::new_v4);
                records.insert(recipe.name.clone(), recipe);
            }
        }
        store
    }

    pub fn call_counts(&self) -> CallCounts {
        CallCounts {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
        }
    }

    /// Snapshot of a record without counting it as a read.
    pub fn get(&self, name: &str) -> Option<Recipe> {
        self.lock().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned lock only means another test thread panicked mid-call; the
    // map itself is still consistent.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Recipe>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecipeStore for InMemoryRecipeStore {
    fn find_by_name(&self, name: &str) -> Result<Option<Recipe>, StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.lock().get(name).cloned())
    }

    fn save(&self, mut recipe: Recipe) -> Result<Recipe, StoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        let mut records = self.lock();

        match recipe.id {
            None => {
                if records.contains_key(&recipe.name) {
                    return Err(StoreError::Conflict(recipe.name));
                }
                recipe.id = Some(Uuid::new_v4());
            }
            Some(id) => {
                let previous = records
                    .iter()
                    .find(|(_, existing)| existing.id == Some(id))
                    .map(|(name, _)| name.clone())
                    .ok_or_else(|| StoreError::Backend(format!("No record with id {id}")))?;
                if previous != recipe.name && records.contains_key(&recipe.name) {
                    return Err(StoreError::Conflict(recipe.name));
                }
                records.remove(&previous);
            }
        }

        records.insert(recipe.name.clone(), recipe.clone());
        Ok(recipe)
    }

    fn delete_by_name(&self, name: &str) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::Relaxed);
        self.lock().remove(name);
        Ok(())
    }
}
