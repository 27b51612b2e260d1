//! Storage abstraction for recipe records.
//!
//! Records are addressed by their unique `name`. The Postgres implementation
//! lives in the server crate; [`InMemoryRecipeStore`] backs tests and local
//! experiments.

pub mod memory;

pub use memory::InMemoryRecipeStore;

use crate::error::StoreError;
use crate::types::Recipe;
use std::sync::Arc;

/// Storage collaborator used by [`crate::RecipeService`].
///
/// Implementations own the records exclusively. Calls are synchronous and are
/// expected to be cheap enough to run on a request task.
pub trait RecipeStore: Send + Sync {
    /// Look up a record by exact (case-sensitive) name.
    fn find_by_name(&self, name: &str) -> Result<Option<Recipe>, StoreError>;

    /// Insert the record when `id` is `None`, otherwise replace the record with
    /// that `id`. Returns the stored record with its `id` assigned.
    fn save(&self, recipe: Recipe) -> Result<Recipe, StoreError>;

    fn delete_by_name(&self, name: &str) -> Result<(), StoreError>;
}

impl<S: RecipeStore + ?Sized> RecipeStore for Box<S> {
    fn find_by_name(&self, name: &str) -> Result<Option<Recipe>, StoreError> {
        (**self).find_by_name(name)
    }

    fn save(&self, recipe: Recipe) -> Result<Recipe, StoreError> {
        (**self).save(recipe)
    }

    fn delete_by_name(&self, name: &str) -> Result<(), StoreError> {
        (**self).delete_by_name(name)
    }
}

impl<S: RecipeStore + ?Sized> RecipeStore for Arc<S> {
    fn find_by_name(&self, name: &str) -> Result<Option<Recipe>, StoreError> {
        (**self).find_by_name(name)
    }

    fn save(&self, recipe: Recipe) -> Result<Recipe, StoreError> {
        (**self).save(recipe)
    }

    fn delete_by_name(&self, name: &str) -> Result<(), StoreError> {
        (**self).delete_by_name(name)
    }
}
