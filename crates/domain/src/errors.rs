use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Version conflict on {key}: expected {expected}, current {}", current.map(|v| v.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    VersionConflict {
        key: String,
        expected: i64,
        current: Option<i64>,
    },

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Cannot delete category {0} while it has subcategories")]
    CategoryHasSubcategories(i64),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Errors the caller can correct by changing the request.
    pub fn is_caller_correctable(&self) -> bool {
        matches!(
            self,
            DomainError::ProductNotFound(_)
                | DomainError::CategoryNotFound(_)
                | DomainError::NotFound(_)
                | DomainError::VersionConflict { .. }
                | DomainError::AlreadyExists(_)
                | DomainError::CategoryHasSubcategories(_)
                | DomainError::Validation(_)
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::VersionConflict { .. }
                | DomainError::AlreadyExists(_)
                | DomainError::CategoryHasSubcategories(_)
        )
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, DomainError::Unavailable(_))
    }
}
