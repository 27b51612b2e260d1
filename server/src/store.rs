//! Postgres-backed [`RecipeStore`].

use crate::db::DbPool;
use crate::models::{RecipeRow, RecipeValues};
use crate::schema::recipes;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use recipe_core::{Recipe, RecipeStore, StoreError};

type Conn = PooledConnection<ConnectionManager<PgConnection>>;

pub struct PgRecipeStore {
    pool: DbPool,
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<Conn, StoreError> {
        self.pool
            .get()
            .map_err(|e| StoreError::Backend(format!("Database connection failed: {e}")))
    }
}

fn store_error(err: DieselError, name: &str) -> StoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StoreError::Conflict(name.to_string())
        }
        other => StoreError::Backend(other.to_string()),
    }
}

impl RecipeStore for PgRecipeStore {
    fn find_by_name(&self, name: &str) -> Result<Option<Recipe>, StoreError> {
        let _span = tracing::info_span!("db.query", op = "select", table = "recipes").entered();
        let mut conn = self.conn()?;

        recipes::table
            .filter(recipes::name.eq(name))
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| store_error(e, name))?
            .map(Recipe::try_from)
            .transpose()
    }

    fn save(&self, recipe: Recipe) -> Result<Recipe, StoreError> {
        let creation_date_time = recipe.creation_date_time.ok_or_else(|| {
            StoreError::Backend(format!("Recipe {} has no creation time", recipe.name))
        })?;
        let ingredients: Vec<Option<String>> =
            recipe.ingredients.iter().cloned().map(Some).collect();
        let values = RecipeValues {
            creation_date_time,
            name: &recipe.name,
            vegetarian: recipe.vegetarian,
            servings: recipe.servings,
            ingredients: &ingredients,
            cooking_instructions: &recipe.cooking_instructions,
        };

        let row: RecipeRow = match recipe.id {
            None => {
                let _span =
                    tracing::info_span!("db.query", op = "insert", table = "recipes").entered();
                let mut conn = self.conn()?;
                diesel::insert_into(recipes::table)
                    .values(&values)
                    .returning(RecipeRow::as_returning())
                    .get_result(&mut conn)
            }
            Some(id) => {
                let _span =
                    tracing::info_span!("db.query", op = "update", table = "recipes").entered();
                let mut conn = self.conn()?;
                diesel::update(recipes::table.find(id))
                    .set(&values)
                    .returning(RecipeRow::as_returning())
                    .get_result(&mut conn)
            }
        }
        .map_err(|e| store_error(e, &recipe.name))?;

        Recipe::try_from(row)
    }

    fn delete_by_name(&self, name: &str) -> Result<(), StoreError> {
        let _span = tracing::info_span!("db.query", op = "delete", table = "recipes").entered();
        let mut conn = self.conn()?;

        diesel::delete(recipes::table.filter(recipes::name.eq(name)))
            .execute(&mut conn)
            .map(|_| ())
            .map_err(|e| store_error(e, name))
    }
}
