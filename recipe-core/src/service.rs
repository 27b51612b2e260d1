//! The four recipe use-cases.
//!
//! Each mutating call looks the record up by name before writing so that callers
//! get `DuplicateEntry`/`NotFound` rather than a raw storage failure. The lookup
//! and the write are not atomic; two concurrent creates of the same name can
//! both pass the check. A store that enforces unique names (the Postgres schema
//! does) reports the loser as [`StoreError::Conflict`], which `create` turns
//! into `DuplicateEntry`.

use crate::error::{RecipeError, StoreError};
use crate::mapper::{to_persisted, to_transfer};
use crate::store::RecipeStore;
use crate::types::RecipeTransfer;
use chrono::Utc;

pub struct RecipeService<S> {
    store: S,
}

impl<S: RecipeStore> RecipeService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a new recipe. Fails with `DuplicateEntry` if the name is taken.
    pub fn create(&self, transfer: &RecipeTransfer) -> Result<(), RecipeError> {
        let name = transfer.name.clone().unwrap_or_default();

        if self.store.find_by_name(&name)?.is_some() {
            return Err(RecipeError::DuplicateEntry(name));
        }

        let mut recipe = to_persisted(transfer)?;
        recipe.creation_date_time = Some(Utc::now());

        match self.store.save(recipe) {
            Ok(_) => Ok(()),
            Err(StoreError::Conflict(_)) => Err(RecipeError::DuplicateEntry(name)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn read(&self, name: &str) -> Result<RecipeTransfer, RecipeError> {
        let recipe = self
            .store
            .find_by_name(name)?
            .ok_or_else(|| RecipeError::NotFound(name.to_string()))?;

        Ok(to_transfer(&recipe)?)
    }

    /// Replace every field of an existing recipe except its id and creation time.
    pub fn update(&self, transfer: &RecipeTransfer) -> Result<(), RecipeError> {
        let name = transfer.name.clone().unwrap_or_default();

        let existing = self
            .store
            .find_by_name(&name)?
            .ok_or(RecipeError::NotFound(name))?;

        let mut recipe = to_persisted(transfer)?;
        recipe.id = existing.id;
        recipe.creation_date_time = existing.creation_date_time;

        self.store.save(recipe)?;
        Ok(())
    }

    pub fn delete(&self, name: &str) -> Result<(), RecipeError> {
        if self.store.find_by_name(name)?.is_none() {
            return Err(RecipeError::NotFound(name.to_string()));
        }

        self.store.delete_by_name(name)?;
        Ok(())
    }
}
