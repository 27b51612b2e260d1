use chrono::{DateTime, Utc};
use diesel::prelude::*;
use recipe_core::{Recipe, StoreError};
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: Uuid,
    pub creation_date_time: DateTime<Utc>,
    pub name: String,
    pub vegetarian: bool,
    pub servings: i32,
    pub ingredients: Vec<Option<String>>,
    pub cooking_instructions: String,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = StoreError;

    /// Fails on a NULL ingredient element rather than dropping it.
    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let ingredients = row
            .ingredients
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                StoreError::Backend(format!("Recipe {} has a NULL ingredient", row.name))
            })?;

        Ok(Recipe {
            id: Some(row.id),
            creation_date_time: Some(row.creation_date_time),
            name: row.name,
            vegetarian: row.vegetarian,
            servings: row.servings,
            ingredients,
            cooking_instructions: row.cooking_instructions,
        })
    }
}

/// Column values for both inserts and full-row replacement.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeValues<'a> {
    pub creation_date_time: DateTime<Utc>,
    pub name: &'a str,
    pub vegetarian: bool,
    pub servings: i32,
    pub ingredients: &'a [Option<String>],
    pub cooking_instructions: &'a str,
}
