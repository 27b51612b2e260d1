use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recipe as the storage layer holds it.
///
/// `id` and `creation_date_time` are `None` until the record has been
/// persisted for the first time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: Option<Uuid>,
    pub creation_date_time: Option<DateTime<Utc>>,
    pub name: String,
    pub vegetarian: bool,
    pub servings: i32,
    pub ingredients: Vec<String>,
    pub cooking_instructions: String,
}

/// A recipe as exchanged with clients.
///
/// Every field is optional so that missing values survive deserialization and
/// can be reported by the validator instead of failing the JSON parse.
/// `creation_date_time` is display-only: it is filled in on the way out and
/// ignored on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RecipeTransfer {
    /// Creation time formatted as `dd-MM-yyyy HH:mm` (UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "09-03-2022 19:39"))]
    pub creation_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "four_cheese_pizza"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vegetarian: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case() {
        let transfer: RecipeTransfer = serde_json::from_value(json!({
            "name": "four_cheese_pizza",
            "vegetarian": true,
            "servings": 1,
            "ingredients": ["pizza crust", "mozzarella"],
            "cookingInstructions": "bake it"
        }))
        .unwrap();

        assert_eq!(transfer.name.as_deref(), Some("four_cheese_pizza"));
        assert_eq!(transfer.vegetarian, Some(true));
        assert_eq!(transfer.servings, Some(1));
        assert_eq!(
            transfer.ingredients,
            Some(vec![
                Some("pizza crust".to_string()),
                Some("mozzarella".to_string())
            ])
        );
        assert_eq!(transfer.cooking_instructions.as_deref(), Some("bake it"));
        assert!(transfer.creation_date_time.is_none());
    }

    #[test]
    fn test_deserialize_nulls_and_unknown_fields() {
        let transfer: RecipeTransfer = serde_json::from_value(json!({
            "name": null,
            "ingredients": ["pizza crust", null],
            "calories": 900
        }))
        .unwrap();

        assert!(transfer.name.is_none());
        assert!(transfer.vegetarian.is_none());
        assert_eq!(
            transfer.ingredients,
            Some(vec![Some("pizza crust".to_string()), None])
        );
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let transfer = RecipeTransfer {
            name: Some("soup".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&transfer).unwrap();
        assert_eq!(value, json!({ "name": "soup" }));
    }
}
