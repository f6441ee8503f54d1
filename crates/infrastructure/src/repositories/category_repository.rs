use async_trait::async_trait;
use catalog_application::ports::CategoryRepository;
use catalog_domain::{Category, DomainError};
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, instrument};

use crate::database::{format_timestamp, parse_timestamp};

type CategoryRow = (
    i64,
    String,
    String,
    Option<String>,
    Option<i64>,
    i64,
    Option<i32>,
    String,
    String,
);

const CATEGORY_SELECT: &str = "SELECT id, name, slug, description, parent_id, is_active, \
     display_order, created_at, updated_at FROM categories";

const ORDER_BY: &str = " ORDER BY display_order IS NULL, display_order ASC, name ASC";

pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_category(row: CategoryRow) -> Result<Category, DomainError> {
        let (id, name, slug, description, parent_id, is_active, display_order, created, updated) =
            row;

        Ok(Category {
            id: Some(id),
            name: Arc::from(name.as_str()),
            slug: Arc::from(slug.as_str()),
            description: description.map(|s| Arc::from(s.as_str())),
            parent_id,
            is_active: is_active != 0,
            display_order,
            created_at: Some(parse_timestamp(&created)?),
            updated_at: Some(parse_timestamp(&updated)?),
        })
    }

    fn write_error(e: sqlx::Error, category: &Category, context: &'static str) -> DomainError {
        let message = e.to_string();
        if message.contains("UNIQUE constraint failed") {
            DomainError::AlreadyExists(format!("Category '{}'", category.name))
        } else if message.contains("FOREIGN KEY constraint failed") {
            DomainError::CategoryNotFound(category.parent_id.unwrap_or_default())
        } else {
            error!(error = %e, "{}", context);
            DomainError::DatabaseError(message)
        }
    }

    async fn fetch_all(&self, filter: &str, context: &'static str) -> Result<Vec<Category>, DomainError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!("{}{}{}", CATEGORY_SELECT, filter, ORDER_BY))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "{}", context);
                DomainError::DatabaseError(e.to_string())
            })?;

        rows.into_iter().map(Self::row_to_category).collect()
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    #[instrument(skip(self, category), fields(name = %category.name))]
    async fn create(&self, category: Category) -> Result<Category, DomainError> {
        let now = format_timestamp(Utc::now());

        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name, slug, description, parent_id, is_active, display_order,
                                     created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id, name, slug, description, parent_id, is_active, display_order,
                       created_at, updated_at",
        )
        .bind(category.name.as_ref())
        .bind(category.slug.as_ref())
        .bind(category.description.as_deref())
        .bind(category.parent_id)
        .bind(category.is_active as i64)
        .bind(category.display_order)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::write_error(e, &category, "Failed to create category"))?;

        Self::row_to_category(row)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Option<Category>, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!("{} WHERE id = ?", CATEGORY_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query category by id");
                DomainError::DatabaseError(e.to_string())
            })?;

        row.map(Self::row_to_category).transpose()
    }

    #[instrument(skip(self))]
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!("{} WHERE slug = ?", CATEGORY_SELECT))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query category by slug");
                DomainError::DatabaseError(e.to_string())
            })?;

        row.map(Self::row_to_category).transpose()
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Category>, DomainError> {
        self.fetch_all("", "Failed to query all categories").await
    }

    #[instrument(skip(self))]
    async fn get_active(&self) -> Result<Vec<Category>, DomainError> {
        self.fetch_all(" WHERE is_active = 1", "Failed to query active categories")
            .await
    }

    #[instrument(skip(self))]
    async fn get_roots(&self) -> Result<Vec<Category>, DomainError> {
        self.fetch_all(
            " WHERE is_active = 1 AND parent_id IS NULL",
            "Failed to query root categories",
        )
        .await
    }

    #[instrument(skip(self, category), fields(id = ?category.id))]
    async fn update(&self, category: Category) -> Result<Category, DomainError> {
        let id = category
            .id
            .ok_or_else(|| DomainError::Validation("Category id is required".to_string()))?;
        let now = format_timestamp(Utc::now());

        let row = sqlx::query_as::<_, CategoryRow>(
            "UPDATE categories
             SET name = ?, slug = ?, description = ?, parent_id = ?, is_active = ?,
                 display_order = ?, updated_at = ?
             WHERE id = ?
             RETURNING id, name, slug, description, parent_id, is_active, display_order,
                       created_at, updated_at",
        )
        .bind(category.name.as_ref())
        .bind(category.slug.as_ref())
        .bind(category.description.as_deref())
        .bind(category.parent_id)
        .bind(category.is_active as i64)
        .bind(category.display_order)
        .bind(&now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::write_error(e, &category, "Failed to update category"))?;

        match row {
            Some(row) => Self::row_to_category(row),
            None => Err(DomainError::CategoryNotFound(id)),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.to_string().contains("FOREIGN KEY constraint failed") {
                    DomainError::CategoryHasSubcategories(id)
                } else {
                    error!(error = %e, "Failed to delete category");
                    DomainError::DatabaseError(e.to_string())
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CategoryNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_children(&self, id: i64) -> Result<u64, DomainError> {
        let (count,) =
            sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM categories WHERE parent_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to count child categories");
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(count.max(0) as u64)
    }
}
