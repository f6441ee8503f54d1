use bigdecimal::BigDecimal;
use catalog_domain::{DomainError, Product, ProductAttribute, ProductImage};
use std::str::FromStr;
use std::sync::Arc;

use crate::database::parse_timestamp;

pub(super) const PRODUCT_COLUMNS: &str = "sku, name, description, price, stock_quantity, \
     category_id, inventory_id, is_active, is_visible, attributes, images, version, deleted, \
     created_at, updated_at";

pub(super) type ProductRow = (
    String,
    String,
    Option<String>,
    String,
    i64,
    Option<i64>,
    Option<i64>,
    i64,
    i64,
    String,
    String,
    i64,
    i64,
    String,
    String,
);

pub(super) fn row_to_product(row: ProductRow) -> Result<Product, DomainError> {
    let (
        sku,
        name,
        description,
        price,
        stock_quantity,
        category_id,
        inventory_id,
        is_active,
        is_visible,
        attributes,
        images,
        version,
        _deleted,
        created_at,
        updated_at,
    ) = row;

    let price = BigDecimal::from_str(&price).map_err(|e| {
        DomainError::Serialization(format!("invalid price '{}' for {}: {}", price, sku, e))
    })?;
    let attributes: Vec<ProductAttribute> = serde_json::from_str(&attributes)
        .map_err(|e| DomainError::Serialization(format!("attributes of {}: {}", sku, e)))?;
    let images: Vec<ProductImage> = serde_json::from_str(&images)
        .map_err(|e| DomainError::Serialization(format!("images of {}: {}", sku, e)))?;

    Ok(Product {
        sku: Arc::from(sku.as_str()),
        name: Arc::from(name.as_str()),
        description: description.map(|d| Arc::from(d.as_str())),
        price,
        stock_quantity,
        category_id,
        inventory_id,
        is_active: is_active != 0,
        is_visible: is_visible != 0,
        attributes,
        images,
        version,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

pub(super) fn encode_attributes(product: &Product) -> Result<(String, String), DomainError> {
    let attributes = serde_json::to_string(&product.attributes)
        .map_err(|e| DomainError::Serialization(e.to_string()))?;
    let images = serde_json::to_string(&product.images)
        .map_err(|e| DomainError::Serialization(e.to_string()))?;
    Ok((attributes, images))
}
