use catalog_domain::{Category, CategoryTree};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
    pub is_active: bool,
    pub display_order: Option<i32>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl CategoryResponse {
    pub fn from_domain(c: Category) -> Self {
        Self {
            id: c.id.unwrap_or(0),
            name: c.name.to_string(),
            slug: c.slug.to_string(),
            description: c.description.as_ref().map(|s| s.to_string()),
            parent_id: c.parent_id,
            is_active: c.is_active,
            display_order: c.display_order,
            created_at: c.created_at.map(|t| t.to_rfc3339()),
            updated_at: c.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTreeResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub children: Vec<CategoryTreeResponse>,
}

impl CategoryTreeResponse {
    pub fn from_domain(tree: CategoryTree) -> Self {
        Self {
            category: CategoryResponse::from_domain(tree.category),
            children: tree
                .children
                .into_iter()
                .map(CategoryTreeResponse::from_domain)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
    pub display_order: Option<i32>,
}

/// Full replacement of the editable fields. Omitted optional fields are
/// cleared; `is_active` is kept when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}
