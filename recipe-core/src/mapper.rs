//! Conversions between the wire and storage shapes of a recipe.

use crate::error::MappingError;
use crate::types::{Recipe, RecipeTransfer};
use chrono::{DateTime, Utc};

/// chrono pattern for `dd-MM-yyyy HH:mm`.
pub const CREATION_DATE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Build a storage record from a validated payload.
///
/// `id` and `creation_date_time` are left unset; the caller decides whether the
/// record is new or replaces an existing one.
pub fn to_persisted(transfer: &RecipeTransfer) -> Result<Recipe, MappingError> {
    let ingredients = transfer
        .ingredients
        .as_ref()
        .ok_or(MappingError::MissingField("ingredients"))?
        .iter()
        .map(|item| {
            item.clone()
                .ok_or(MappingError::InvalidListValue("ingredients"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Recipe {
        id: None,
        creation_date_time: None,
        name: transfer
            .name
            .clone()
            .ok_or(MappingError::MissingField("name"))?,
        vegetarian: transfer
            .vegetarian
            .ok_or(MappingError::MissingField("vegetarian"))?,
        servings: transfer
            .servings
            .ok_or(MappingError::MissingField("servings"))?,
        ingredients,
        cooking_instructions: transfer
            .cooking_instructions
            .clone()
            .ok_or(MappingError::MissingField("cookingInstructions"))?,
    })
}

/// Build the client view of a stored record.
pub fn to_transfer(recipe: &Recipe) -> Result<RecipeTransfer, MappingError> {
    let created = recipe
        .creation_date_time
        .ok_or_else(|| MappingError::MissingCreationDateTime(recipe.name.clone()))?;

    Ok(RecipeTransfer {
        creation_date_time: Some(format_creation_date_time(created)),
        name: Some(recipe.name.clone()),
        vegetarian: Some(recipe.vegetarian),
        servings: Some(recipe.servings),
        ingredients: Some(recipe.ingredients.iter().cloned().map(Some).collect()),
        cooking_instructions: Some(recipe.cooking_instructions.clone()),
    })
}

pub fn format_creation_date_time(timestamp: DateTime<Utc>) -> String {
    timestamp.format(CREATION_DATE_TIME_FORMAT).to_string()
}
