use catalog_domain::{Category, DomainError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::CategoryRepository;

pub struct UpdateCategoryUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl UpdateCategoryUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Replaces the editable fields of category `id`. A blank slug is
    /// regenerated from the name.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip(self, description))]
    pub async fn execute(
        &self,
        id: i64,
        name: String,
        slug: Option<String>,
        description: Option<String>,
        parent_id: Option<i64>,
        display_order: Option<i32>,
        is_active: Option<bool>,
    ) -> Result<Category, DomainError> {
        let existing = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(DomainError::CategoryNotFound(id))?;

        let mut category = Category::new(
            Arc::from(name.trim()),
            slug.as_deref().map(Arc::from),
            description.as_deref().map(Arc::from),
            parent_id,
            display_order,
        );
        category.id = Some(id);
        category.is_active = is_active.unwrap_or(existing.is_active);
        category.created_at = existing.created_at;
        category.validate()?;

        if let Some(pid) = parent_id {
            self.ensure_parent_allowed(id, pid).await?;
        }

        let updated = self.repo.update(category).await?;

        info!(
            category_id = id,
            name = %updated.name,
            slug = %updated.slug,
            is_active = updated.is_active,
            "Category updated successfully"
        );

        Ok(updated)
    }

    /// The new parent must exist and must not sit below `id`.
    async fn ensure_parent_allowed(&self, id: i64, parent_id: i64) -> Result<(), DomainError> {
        let all = self.repo.get_all().await?;
        let parents: HashMap<i64, Option<i64>> = all
            .iter()
            .filter_map(|c| c.id.map(|cid| (cid, c.parent_id)))
            .collect();

        if !parents.contains_key(&parent_id) {
            return Err(DomainError::CategoryNotFound(parent_id));
        }

        let mut cursor = Some(parent_id);
        let mut steps = 0usize;
        while let Some(current) = cursor {
            if current == id {
                return Err(DomainError::Validation(format!(
                    "Category {} cannot be moved under its own descendant {}",
                    id, parent_id
                )));
            }
            steps += 1;
            if steps > parents.len() {
                break;
            }
            cursor = parents.get(&current).copied().flatten();
        }

        Ok(())
    }
}
