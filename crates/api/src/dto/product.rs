use bigdecimal::BigDecimal;
use catalog_application::services::EnrichedProduct;
use catalog_domain::{
    DomainError, NewProduct, Product, ProductAttribute, ProductImage, ProductPatch, ProductSearch,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::nullable;
use super::paging::page_request;
use catalog_domain::PageRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock_quantity: i64,
    pub category_id: Option<i64>,
    pub inventory_id: Option<i64>,
    pub is_active: bool,
    pub is_visible: bool,
    pub attributes: Vec<ProductAttribute>,
    pub images: Vec<ProductImage>,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub available_quantity: Option<i64>,
}

impl ProductResponse {
    pub fn from_domain(p: Product) -> Self {
        Self {
            sku: p.sku.to_string(),
            name: p.name.to_string(),
            description: p.description.as_ref().map(|s| s.to_string()),
            price: p.price,
            stock_quantity: p.stock_quantity,
            category_id: p.category_id,
            inventory_id: p.inventory_id,
            is_active: p.is_active,
            is_visible: p.is_visible,
            attributes: p.attributes,
            images: p.images,
            version: p.version,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
            available_quantity: None,
        }
    }

    pub fn from_enriched(e: EnrichedProduct) -> Self {
        let available = e.available_quantity;
        Self {
            available_quantity: available,
            ..Self::from_domain(e.product)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock_quantity: i64,
    pub category_id: Option<i64>,
    pub inventory_id: Option<i64>,
    pub is_active: Option<bool>,
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            sku: self.sku.trim().to_string(),
            name: self.name,
            description: self.description,
            price: self.price,
            stock_quantity: self.stock_quantity,
            category_id: self.category_id,
            inventory_id: self.inventory_id,
            is_active: self.is_active.unwrap_or(true),
            is_visible: self.is_visible.unwrap_or(true),
            attributes: self.attributes,
            images: self.images,
        }
    }
}

/// Partial update. `null` clears an optional field, an absent key leaves it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductRequest {
    pub expected_version: i64,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub price: Option<BigDecimal>,
    pub stock_quantity: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub category_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub inventory_id: Option<Option<i64>>,
    pub is_active: Option<bool>,
    pub is_visible: Option<bool>,
    pub attributes: Option<Vec<ProductAttribute>>,
    pub images: Option<Vec<ProductImage>>,
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> (ProductPatch, i64) {
        let patch = ProductPatch {
            name: self.name,
            description: self.description,
            price: self.price,
            stock_quantity: self.stock_quantity,
            category_id: self.category_id,
            inventory_id: self.inventory_id,
            is_active: self.is_active,
            is_visible: self.is_visible,
            attributes: self.attributes,
            images: self.images,
        };
        (patch, self.expected_version)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionRequest {
    pub expected_version: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteProductQuery {
    pub expected_version: i64,
}

/// Query string for `/products/search`. Prices arrive as decimal strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub is_active: Option<bool>,
    pub is_visible: Option<bool>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

impl SearchQuery {
    pub fn criteria(&self) -> Result<ProductSearch, DomainError> {
        Ok(ProductSearch {
            name: self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            category_id: self.category_id,
            min_price: parse_price("min_price", self.min_price.as_deref())?,
            max_price: parse_price("max_price", self.max_price.as_deref())?,
            is_active: self.is_active,
            is_visible: self.is_visible,
        })
    }

    pub fn to_page_request(&self) -> Result<PageRequest, DomainError> {
        page_request(
            self.page,
            self.size,
            self.sort_by.as_deref(),
            self.direction.as_deref(),
        )
    }
}

fn parse_price(field: &str, raw: Option<&str>) -> Result<Option<BigDecimal>, DomainError> {
    raw.map(|s| {
        BigDecimal::from_str(s.trim())
            .map_err(|_| DomainError::Validation(format!("{} must be a decimal number", field)))
    })
    .transpose()
}
