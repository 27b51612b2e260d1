use thiserror::Error;

/// Failures reported by a [`crate::RecipeStore`] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend rejected a write because the name is already taken.
    #[error("A record with name {0} already exists in storage")]
    Conflict(String),

    #[error("Storage backend failed: {0}")]
    Backend(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} contains a null element")]
    InvalidListValue(&'static str),

    #[error("Persisted recipe {0} has no creation time")]
    MissingCreationDateTime(String),
}

/// Outcome of a failed recipe operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    #[error("A recipe with name {0} already exists.")]
    DuplicateEntry(String),

    #[error("Could not find recipe with name {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl RecipeError {
    /// True for failures caused by the request rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RecipeError::DuplicateEntry(_) | RecipeError::NotFound(_)
        )
    }
}
