use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::DomainError;

pub const MAX_CATEGORY_NAME_LEN: usize = 100;
pub const MAX_CATEGORY_DESCRIPTION_LEN: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<i64>,
    pub name: Arc<str>,
    pub slug: Arc<str>,
    pub description: Option<Arc<str>>,
    pub parent_id: Option<i64>,
    pub is_active: bool,
    pub display_order: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(
        name: Arc<str>,
        slug: Option<Arc<str>>,
        description: Option<Arc<str>>,
        parent_id: Option<i64>,
        display_order: Option<i32>,
    ) -> Self {
        let slug = slug
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Arc::from(Self::generate_slug(&name)));
        Self {
            id: None,
            name,
            slug,
            description,
            parent_id,
            is_active: true,
            display_order,
            created_at: None,
            updated_at: None,
        }
    }

    /// Lowercases the name and collapses every run of non-alphanumeric
    /// characters into a single hyphen.
    pub fn generate_slug(name: &str) -> String {
        let mut slug = String::with_capacity(name.len());
        let mut pending_dash = false;
        for c in name.trim().chars() {
            if c.is_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.extend(c.to_lowercase());
            } else {
                pending_dash = true;
            }
        }
        slug
    }

    pub fn validate_name(name: &str) -> Result<(), String> {
        if name.trim().is_empty() {
            return Err("Category name is required".to_string());
        }
        if name.len() > MAX_CATEGORY_NAME_LEN {
            return Err(format!(
                "Category name cannot exceed {} characters",
                MAX_CATEGORY_NAME_LEN
            ));
        }
        Ok(())
    }

    pub fn validate_slug(slug: &str) -> Result<(), String> {
        if slug.is_empty() {
            return Err("Category slug cannot be empty".to_string());
        }
        if slug.len() > MAX_CATEGORY_NAME_LEN {
            return Err(format!(
                "Category slug cannot exceed {} characters",
                MAX_CATEGORY_NAME_LEN
            ));
        }
        if !slug
            .chars()
            .all(|c| (c.is_alphanumeric() && !c.is_uppercase()) || c == '-')
        {
            return Err(
                "Category slug may only contain lowercase letters, digits and hyphens".to_string(),
            );
        }
        Ok(())
    }

    pub fn validate_description(description: Option<&str>) -> Result<(), String> {
        if let Some(d) = description {
            if d.len() > MAX_CATEGORY_DESCRIPTION_LEN {
                return Err(format!(
                    "Category description cannot exceed {} characters",
                    MAX_CATEGORY_DESCRIPTION_LEN
                ));
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        Self::validate_name(&self.name)
            .and_then(|_| Self::validate_slug(&self.slug))
            .and_then(|_| Self::validate_description(self.description.as_deref()))
            .map_err(DomainError::Validation)?;
        if self.id.is_some() && self.parent_id == self.id {
            return Err(DomainError::Validation(
                "Category cannot be its own parent".to_string(),
            ));
        }
        Ok(())
    }
}

/// A category with its active descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
    pub category: Category,
    pub children: Vec<CategoryTree>,
}

impl CategoryTree {
    /// Builds the subtree under `root` from a flat list. Inactive children are
    /// pruned along with everything beneath them. Children are ordered by
    /// display order, then name.
    pub fn build(root: Category, all: &[Category]) -> Self {
        let mut visited = HashSet::new();
        if let Some(id) = root.id {
            visited.insert(id);
        }
        Self::build_inner(root, all, &mut visited)
    }

    fn build_inner(root: Category, all: &[Category], visited: &mut HashSet<i64>) -> Self {
        let mut children: Vec<&Category> = all
            .iter()
            .filter(|c| c.is_active && c.parent_id.is_some() && c.parent_id == root.id)
            .collect();
        children.sort_by(|a, b| {
            a.display_order
                .unwrap_or(i32::MAX)
                .cmp(&b.display_order.unwrap_or(i32::MAX))
                .then_with(|| a.name.cmp(&b.name))
        });

        let children = children
            .into_iter()
            .filter(|c| c.id.is_some_and(|id| visited.insert(id)))
            .cloned()
            .collect::<Vec<_>>()
            .into_iter()
            .map(|c| Self::build_inner(c, all, visited))
            .collect();

        Self {
            category: root,
            children,
        }
    }

    /// Ids of this category and all of its descendants in the tree.
    pub fn ids(&self) -> Vec<i64> {
        let mut out = Vec::new();
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids(&self, out: &mut Vec<i64>) {
        if let Some(id) = self.category.id {
            out.push(id);
        }
        for child in &self.children {
            child.collect_ids(out);
        }
    }
}
