use async_trait::async_trait;
use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use catalog_application::ports::{Committed, ProductRepository};
use catalog_domain::{
    ChangeEvent, ChangeKind, DomainError, NewProduct, Page, PageRequest, Product, ProductPatch,
    ProductSearch,
};
use catalog_domain::product::PRICE_SCALE;
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use tracing::{debug, error, instrument};

use super::product_row_mapper::{encode_attributes, row_to_product, ProductRow, PRODUCT_COLUMNS};
use crate::database::{format_timestamp, now};

/// Search bound in price minor units. Rounds toward the inside of the range
/// and saturates past the i64 range.
fn price_bound(bound: &BigDecimal, mode: RoundingMode) -> i64 {
    let (units, _) = bound
        .with_scale_round(PRICE_SCALE, mode)
        .as_bigint_and_exponent();
    units.to_i64().unwrap_or(if *bound < BigDecimal::from(0) {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// SQLite store adapter with optimistic concurrency.
///
/// A mutation reads the current row, applies the change in memory, then
/// commits a single `UPDATE ... WHERE sku = ? AND version = ?` together with
/// the outbox row for its change event. Zero affected rows means another
/// writer got there first.
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
        move |e| {
            error!(error = %e, "{}", context);
            DomainError::DatabaseError(e.to_string())
        }
    }

    fn write_error(e: sqlx::Error, product: &Product, context: &'static str) -> DomainError {
        let message = e.to_string();
        if message.contains("UNIQUE constraint failed") {
            DomainError::AlreadyExists(format!("Product '{}'", product.sku))
        } else if message.contains("FOREIGN KEY constraint failed") {
            DomainError::CategoryNotFound(product.category_id.unwrap_or_default())
        } else {
            error!(error = %e, sku = %product.sku, "{}", context);
            DomainError::DatabaseError(message)
        }
    }

    /// Current row for `sku` including tombstones, as `(product, deleted)`.
    async fn fetch_row(&self, sku: &str) -> Result<Option<(Product, bool)>, DomainError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE sku = ?",
            PRODUCT_COLUMNS
        ))
        .bind(sku)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::db_error("Failed to query product"))?;

        match row {
            Some(row) => {
                let deleted = row.12 != 0;
                Ok(Some((row_to_product(row)?, deleted)))
            }
            None => Ok(None),
        }
    }

    /// Live row at exactly `expected_version`, or the matching error.
    async fn fetch_expected(
        &self,
        sku: &str,
        expected_version: i64,
    ) -> Result<Product, DomainError> {
        match self.fetch_row(sku).await? {
            Some((product, false)) if product.version == expected_version => Ok(product),
            Some((product, false)) => Err(DomainError::VersionConflict {
                key: sku.to_string(),
                expected: expected_version,
                current: Some(product.version),
            }),
            _ => Err(DomainError::ProductNotFound(sku.to_string())),
        }
    }

    /// Explains why a conditional write touched no rows.
    async fn classify_lost_race(&self, sku: &str, expected_version: i64) -> DomainError {
        match self.fetch_row(sku).await {
            Ok(Some((product, false))) => DomainError::VersionConflict {
                key: sku.to_string(),
                expected: expected_version,
                current: Some(product.version),
            },
            Ok(_) => DomainError::ProductNotFound(sku.to_string()),
            Err(e) => e,
        }
    }

    async fn stage_event(
        tx: &mut Transaction<'_, Sqlite>,
        kind: ChangeKind,
        product: &Product,
    ) -> Result<ChangeEvent, DomainError> {
        let mut event = ChangeEvent::for_product(kind, product);
        let payload =
            serde_json::to_string(&event).map_err(|e| DomainError::Serialization(e.to_string()))?;
        let occurred_at = format_timestamp(event.occurred_at);

        let (id,) = sqlx::query_as::<_, (i64,)>(
            "INSERT INTO outbox (sku, kind, version, payload, occurred_at, next_attempt_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(event.sku.as_ref())
        .bind(kind.to_str())
        .bind(event.version)
        .bind(&payload)
        .bind(&occurred_at)
        .bind(&occurred_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(Self::db_error("Failed to stage change event"))?;

        event.id = Some(id);
        Ok(event)
    }

    fn price_minor(product: &Product) -> Result<i64, DomainError> {
        Product::price_minor_units(&product.price).ok_or_else(|| {
            DomainError::Validation(format!("Price {} is out of range", product.price))
        })
    }

    async fn write_product(
        tx: &mut Transaction<'_, Sqlite>,
        product: &Product,
        expected_version: i64,
        expect_deleted: bool,
    ) -> Result<u64, DomainError> {
        let (attributes, images) = encode_attributes(product)?;
        let price_minor = Self::price_minor(product)?;
        let result = sqlx::query(
            "UPDATE products
             SET name = ?, description = ?, price = ?, price_minor = ?, stock_quantity = ?,
                 category_id = ?,
                 inventory_id = ?, is_active = ?, is_visible = ?, attributes = ?, images = ?,
                 version = ?, deleted = 0, created_at = ?, updated_at = ?
             WHERE sku = ? AND version = ? AND deleted = ?",
        )
        .bind(product.name.as_ref())
        .bind(product.description.as_deref())
        .bind(product.price.to_string())
        .bind(price_minor)
        .bind(product.stock_quantity)
        .bind(product.category_id)
        .bind(product.inventory_id)
        .bind(product.is_active as i64)
        .bind(product.is_visible as i64)
        .bind(&attributes)
        .bind(&images)
        .bind(product.version)
        .bind(format_timestamp(product.created_at))
        .bind(format_timestamp(product.updated_at))
        .bind(product.sku.as_ref())
        .bind(expected_version)
        .bind(expect_deleted as i64)
        .execute(&mut **tx)
        .await
        .map_err(|e| Self::write_error(e, product, "Failed to update product"))?;

        Ok(result.rows_affected())
    }

    async fn insert_product(
        tx: &mut Transaction<'_, Sqlite>,
        product: &Product,
    ) -> Result<(), DomainError> {
        let (attributes, images) = encode_attributes(product)?;
        let price_minor = Self::price_minor(product)?;
        sqlx::query(
            "INSERT INTO products (sku, name, description, price, price_minor, stock_quantity,
                                   category_id, inventory_id, is_active, is_visible, attributes,
                                   images, version, deleted, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)",
        )
        .bind(product.sku.as_ref())
        .bind(product.name.as_ref())
        .bind(product.description.as_deref())
        .bind(product.price.to_string())
        .bind(price_minor)
        .bind(product.stock_quantity)
        .bind(product.category_id)
        .bind(product.inventory_id)
        .bind(product.is_active as i64)
        .bind(product.is_visible as i64)
        .bind(&attributes)
        .bind(&images)
        .bind(product.version)
        .bind(format_timestamp(product.created_at))
        .bind(format_timestamp(product.updated_at))
        .execute(&mut **tx)
        .await
        .map_err(|e| Self::write_error(e, product, "Failed to insert product"))?;

        Ok(())
    }

    async fn begin(&self) -> Result<Transaction<'static, Sqlite>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(Self::db_error("Failed to begin transaction"))
    }

    async fn commit(tx: Transaction<'_, Sqlite>) -> Result<(), DomainError> {
        tx.commit()
            .await
            .map_err(Self::db_error("Failed to commit transaction"))
    }

    async fn fetch_page(
        &self,
        filters: impl Fn(&mut QueryBuilder<'_, Sqlite>),
        page: &PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products WHERE deleted = 0");
        filters(&mut count);
        let (total,) = count
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await
            .map_err(Self::db_error("Failed to count products"))?;

        let mut select = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM products WHERE deleted = 0",
            PRODUCT_COLUMNS
        ));
        filters(&mut select);
        select.push(format!(
            " ORDER BY {} {}, sku ASC LIMIT ",
            page.sort_by.column(),
            page.direction.to_sql()
        ));
        select.push_bind(page.limit());
        select.push(" OFFSET ");
        select.push_bind(page.offset());

        let rows = select
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(Self::db_error("Failed to list products"))?;

        let items = rows
            .into_iter()
            .map(row_to_product)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = items.len(), total, "Products page fetched");
        Ok(Page::new(items, page, total.max(0) as u64))
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    #[instrument(skip(self))]
    async fn get(&self, sku: &str) -> Result<Option<Product>, DomainError> {
        Ok(self
            .fetch_row(sku)
            .await?
            .and_then(|(product, deleted)| (!deleted).then_some(product)))
    }

    #[instrument(skip(self, product), fields(sku = %product.sku))]
    async fn create(&self, product: NewProduct) -> Result<Committed, DomainError> {
        let existing = self.fetch_row(&product.sku).await?;
        let created_at = now();

        let mut tx = self.begin().await?;
        let created = match existing {
            Some((_, false)) => {
                return Err(DomainError::AlreadyExists(format!(
                    "Product '{}'",
                    product.sku
                )));
            }
            Some((tombstone, true)) => {
                let created = product.into_product(tombstone.version + 1, created_at);
                let affected = Self::write_product(&mut tx, &created, tombstone.version, true).await?;
                if affected == 0 {
                    return Err(DomainError::AlreadyExists(format!(
                        "Product '{}'",
                        created.sku
                    )));
                }
                created
            }
            None => {
                let created = product.into_product(1, created_at);
                Self::insert_product(&mut tx, &created).await?;
                created
            }
        };

        let event = Self::stage_event(&mut tx, ChangeKind::Created, &created).await?;
        Self::commit(tx).await?;

        Ok(Committed {
            product: created,
            event,
        })
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        sku: &str,
        patch: &ProductPatch,
        expected_version: i64,
    ) -> Result<Committed, DomainError> {
        let mut product = self.fetch_expected(sku, expected_version).await?;
        patch.apply(&mut product, now());

        let mut tx = self.begin().await?;
        let affected = Self::write_product(&mut tx, &product, expected_version, false).await?;
        if affected == 0 {
            drop(tx);
            return Err(self.classify_lost_race(sku, expected_version).await);
        }

        let event = Self::stage_event(&mut tx, ChangeKind::Updated, &product).await?;
        Self::commit(tx).await?;

        Ok(Committed { product, event })
    }

    #[instrument(skip(self))]
    async fn delete(&self, sku: &str, expected_version: i64) -> Result<Committed, DomainError> {
        let mut product = self.fetch_expected(sku, expected_version).await?;
        product.version += 1;
        product.updated_at = now();

        let mut tx = self.begin().await?;
        let affected = sqlx::query(
            "UPDATE products SET deleted = 1, version = ?, updated_at = ?
             WHERE sku = ? AND version = ? AND deleted = 0",
        )
        .bind(product.version)
        .bind(format_timestamp(product.updated_at))
        .bind(sku)
        .bind(expected_version)
        .execute(&mut *tx)
        .await
        .map_err(Self::db_error("Failed to delete product"))?
        .rows_affected();

        if affected == 0 {
            drop(tx);
            return Err(self.classify_lost_race(sku, expected_version).await);
        }

        let event = Self::stage_event(&mut tx, ChangeKind::Deleted, &product).await?;
        Self::commit(tx).await?;

        Ok(Committed { product, event })
    }

    #[instrument(skip(self))]
    async fn list_visible(&self, page: &PageRequest) -> Result<Page<Product>, DomainError> {
        self.fetch_page(
            |q| {
                q.push(" AND is_active = 1 AND is_visible = 1");
            },
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        criteria: &ProductSearch,
        page: &PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        self.fetch_page(
            |q| {
                if let Some(ref name) = criteria.name {
                    q.push(" AND instr(LOWER(name), LOWER(");
                    q.push_bind(name.clone());
                    q.push(")) > 0");
                }
                if let Some(category_id) = criteria.category_id {
                    q.push(" AND category_id = ");
                    q.push_bind(category_id);
                }
                if let Some(ref min) = criteria.min_price {
                    q.push(" AND price_minor >= ");
                    q.push_bind(price_bound(min, RoundingMode::Ceiling));
                }
                if let Some(ref max) = criteria.max_price {
                    q.push(" AND price_minor <= ");
                    q.push_bind(price_bound(max, RoundingMode::Floor));
                }
                if let Some(active) = criteria.is_active {
                    q.push(" AND is_active = ");
                    q.push_bind(active as i64);
                }
                if let Some(visible) = criteria.is_visible {
                    q.push(" AND is_visible = ");
                    q.push_bind(visible as i64);
                }
            },
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_by_category(
        &self,
        category_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        self.fetch_page(
            |q| {
                q.push(" AND category_id = ");
                q.push_bind(category_id);
            },
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn count_in_category(&self, category_id: i64) -> Result<u64, DomainError> {
        let (count,) = sqlx::query_as::<_, (i64,)>(
            "SELECT COUNT(*) FROM products WHERE category_id = ? AND deleted = 0",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::db_error("Failed to count products in category"))?;

        Ok(count.max(0) as u64)
    }
}
