pub mod error;
pub mod mapper;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{MappingError, RecipeError, StoreError};
pub use mapper::{format_creation_date_time, to_persisted, to_transfer, CREATION_DATE_TIME_FORMAT};
pub use service::RecipeService;
pub use store::{InMemoryRecipeStore, RecipeStore};
pub use types::{Recipe, RecipeTransfer};
pub use validation::{
    validate_recipe, validate_recipe_name, FieldError, ValidationCode, RECIPE_NAME_PARAM,
};
