//! Field-level validation of [`RecipeTransfer`] payloads.
//!
//! Every field is checked independently and all violations are collected, so a
//! client sees the full list of problems in a single response.

use crate::types::RecipeTransfer;
use serde_json::Value;
use std::fmt;

/// Field name reported when a recipe name arrives through the URL path.
pub const RECIPE_NAME_PARAM: &str = "recipeName";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCode {
    NotNull,
    NotEmpty,
    GreaterThanZero,
    InvalidListValue,
}

impl ValidationCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationCode::NotNull => "non-null",
            ValidationCode::NotEmpty => "non_empty",
            ValidationCode::GreaterThanZero => "greater_than_zero",
            ValidationCode::InvalidListValue => "invalid_list_value",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ValidationCode::NotNull => "Value may not be null.",
            ValidationCode::NotEmpty => "Value may not be empty.",
            ValidationCode::GreaterThanZero => "Please specify a value greater than zero.",
            ValidationCode::InvalidListValue => "One or more values in the list are null or empty",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why one field of a payload was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field_name: String,
    pub code: ValidationCode,
    /// The offending value, `None` when the field was absent.
    pub rejected_value: Option<Value>,
}

impl FieldError {
    fn new(field_name: &str, code: ValidationCode, rejected_value: Option<Value>) -> Self {
        Self {
            field_name: field_name.to_string(),
            code,
            rejected_value,
        }
    }

    pub fn message(&self) -> &'static str {
        self.code.message()
    }
}

/// Validate a recipe payload, returning every violation found (empty if valid).
pub fn validate_recipe(recipe: &RecipeTransfer) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_text(recipe.name.as_deref(), "name", &mut errors);
    check_present(recipe.vegetarian, "vegetarian", &mut errors);
    check_positive(recipe.servings, "servings", &mut errors);
    check_ingredients(recipe.ingredients.as_deref(), "ingredients", &mut errors);
    check_text(
        recipe.cooking_instructions.as_deref(),
        "cookingInstructions",
        &mut errors,
    );

    errors
}

/// Validate a recipe name taken from a request path.
pub fn validate_recipe_name(name: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_text(Some(name), RECIPE_NAME_PARAM, &mut errors);
    errors
}

fn check_text(value: Option<&str>, field: &str, errors: &mut Vec<FieldError>) {
    match value {
        None => errors.push(FieldError::new(field, ValidationCode::NotNull, None)),
        Some(text) if text.trim().is_empty() => errors.push(FieldError::new(
            field,
            ValidationCode::NotEmpty,
            Some(Value::from(text)),
        )),
        Some(_) => {}
    }
}

fn check_present(value: Option<bool>, field: &str, errors: &mut Vec<FieldError>) {
    if value.is_none() {
        errors.push(FieldError::new(field, ValidationCode::NotNull, None));
    }
}

fn check_positive(value: Option<i32>, field: &str, errors: &mut Vec<FieldError>) {
    match value {
        None => errors.push(FieldError::new(field, ValidationCode::NotNull, None)),
        Some(n) if n <= 0 => errors.push(FieldError::new(
            field,
            ValidationCode::GreaterThanZero,
            Some(Value::from(n)),
        )),
        Some(_) => {}
    }
}

fn check_ingredients(value: Option<&[Option<String>]>, field: &str, errors: &mut Vec<FieldError>) {
    let Some(items) = value else {
        errors.push(FieldError::new(field, ValidationCode::NotNull, None));
        return;
    };

    if items.is_empty() {
        errors.push(FieldError::new(
            field,
            ValidationCode::NotEmpty,
            Some(Value::Array(Vec::new())),
        ));
    } else if items
        .iter()
        .any(|item| item.as_deref().map_or(true, |s| s.trim().is_empty()))
    {
        let rejected = items
            .iter()
            .map(|item| item.as_deref().map_or(Value::Null, Value::from))
            .collect();
        errors.push(FieldError::new(
            field,
            ValidationCode::InvalidListValue,
            Some(Value::Array(rejected)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pizza() -> RecipeTransfer {
        RecipeTransfer {
            creation_date_time: None,
            name: Some("four_cheese_pizza".to_string()),
            vegetarian: Some(true),
            servings: Some(1),
            ingredients: Some(vec![
                Some("pizza crust".to_string()),
                Some("mozzarella".to_string()),
            ]),
            cooking_instructions: Some("bake it".to_string()),
        }
    }

    fn codes(errors: &[FieldError]) -> Vec<(&str, &str)> {
        errors
            .iter()
            .map(|e| (e.field_name.as_str(), e.code.as_str()))
            .collect()
    }

    #[test]
    fn test_valid_recipe_has_no_errors() {
        assert!(validate_recipe(&pizza()).is_empty());
    }

    #[test]
    fn test_empty_payload_reports_every_field() {
        let errors = validate_recipe(&RecipeTransfer::default());
        assert_eq!(
            codes(&errors),
            vec![
                ("name", "non-null"),
                ("vegetarian", "non-null"),
                ("servings", "non-null"),
                ("ingredients", "non-null"),
                ("cookingInstructions", "non-null"),
            ]
        );
        assert!(errors.iter().all(|e| e.rejected_value.is_none()));
        assert_eq!(errors[0].message(), "Value may not be null.");
    }

    #[test]
    fn test_blank_name() {
        let recipe = RecipeTransfer {
            name: Some("   ".to_string()),
            ..pizza()
        };
        let errors = validate_recipe(&recipe);
        assert_eq!(codes(&errors), vec![("name", "non_empty")]);
        assert_eq!(errors[0].rejected_value, Some(json!("   ")));
        assert_eq!(errors[0].message(), "Value may not be empty.");
    }

    #[test]
    fn test_non_positive_servings() {
        for servings in [0, -1] {
            let recipe = RecipeTransfer {
                servings: Some(servings),
                ..pizza()
            };
            let errors = validate_recipe(&recipe);
            assert_eq!(codes(&errors), vec![("servings", "greater_than_zero")]);
            assert_eq!(errors[0].rejected_value, Some(json!(servings)));
            assert_eq!(
                errors[0].message(),
                "Please specify a value greater than zero."
            );
        }
    }

    #[test]
    fn test_empty_ingredient_list() {
        let recipe = RecipeTransfer {
            ingredients: Some(vec![]),
            ..pizza()
        };
        assert_eq!(
            codes(&validate_recipe(&recipe)),
            vec![("ingredients", "non_empty")]
        );
    }

    #[test]
    fn test_blank_and_null_ingredients() {
        let blank = RecipeTransfer {
            ingredients: Some(vec![Some("pizza crust".to_string()), Some("".to_string())]),
            ..pizza()
        };
        let errors = validate_recipe(&blank);
        assert_eq!(codes(&errors), vec![("ingredients", "invalid_list_value")]);
        assert_eq!(errors[0].rejected_value, Some(json!(["pizza crust", ""])));

        let null = RecipeTransfer {
            ingredients: Some(vec![None, Some("fontina".to_string())]),
            ..pizza()
        };
        let errors = validate_recipe(&null);
        assert_eq!(codes(&errors), vec![("ingredients", "invalid_list_value")]);
        assert_eq!(errors[0].rejected_value, Some(json!([null, "fontina"])));
    }

    #[test]
    fn test_violations_are_not_short_circuited() {
        let recipe = RecipeTransfer {
            vegetarian: None,
            servings: Some(-1),
            ingredients: Some(vec![]),
            cooking_instructions: Some("".to_string()),
            ..pizza()
        };
        assert_eq!(
            codes(&validate_recipe(&recipe)),
            vec![
                ("vegetarian", "non-null"),
                ("servings", "greater_than_zero"),
                ("ingredients", "non_empty"),
                ("cookingInstructions", "non_empty"),
            ]
        );
    }

    #[test]
    fn test_validate_recipe_name() {
        assert!(validate_recipe_name("four_cheese_pizza").is_empty());
        assert_eq!(
            codes(&validate_recipe_name(" ")),
            vec![(RECIPE_NAME_PARAM, "non_empty")]
        );
    }
}
