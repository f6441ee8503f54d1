use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::DomainError;

pub const MAX_SKU_LEN: usize = 64;
pub const MAX_NAME_LEN: usize = 255;
pub const MAX_DESCRIPTION_LEN: usize = 5_000;
pub const MAX_IMAGE_URL_LEN: usize = 1_000;
/// Fractional digits kept for prices. Stored prices are also written as
/// integer minor units at this scale for filtering and sorting.
pub const PRICE_SCALE: i64 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub name: Arc<str>,
    pub value: Option<Arc<str>>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub image_url: Arc<str>,
    pub alt_text: Option<Arc<str>>,
    pub is_primary: bool,
    pub display_order: Option<i32>,
}

/// A versioned catalog item. `sku` is the identity and never changes once
/// assigned; `version` grows by one on every committed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub sku: Arc<str>,
    pub name: Arc<str>,
    pub description: Option<Arc<str>>,
    pub price: BigDecimal,
    pub stock_quantity: i64,
    pub category_id: Option<i64>,
    pub inventory_id: Option<i64>,
    pub is_active: bool,
    pub is_visible: bool,
    pub attributes: Vec<ProductAttribute>,
    pub images: Vec<ProductImage>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn validate_sku(sku: &str) -> Result<(), String> {
        if sku.is_empty() {
            return Err("SKU is required".to_string());
        }
        if sku.len() > MAX_SKU_LEN {
            return Err(format!("SKU cannot exceed {} characters", MAX_SKU_LEN));
        }
        let valid = sku
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
        if !valid {
            return Err(
                "SKU contains invalid characters (only alphanumeric, hyphens, dots and underscores are allowed)"
                    .to_string(),
            );
        }
        Ok(())
    }

    pub fn validate_name(name: &str) -> Result<(), String> {
        if name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if name.len() > MAX_NAME_LEN {
            return Err(format!("Name cannot exceed {} characters", MAX_NAME_LEN));
        }
        Ok(())
    }

    pub fn validate_description(description: Option<&str>) -> Result<(), String> {
        if let Some(d) = description {
            if d.len() > MAX_DESCRIPTION_LEN {
                return Err(format!(
                    "Description cannot exceed {} characters",
                    MAX_DESCRIPTION_LEN
                ));
            }
        }
        Ok(())
    }

    pub fn validate_price(price: &BigDecimal) -> Result<(), String> {
        if *price <= BigDecimal::from(0) {
            return Err("Price must be positive".to_string());
        }
        if price.normalized().fractional_digit_count() > PRICE_SCALE {
            return Err(format!(
                "Price cannot have more than {} decimal places",
                PRICE_SCALE
            ));
        }
        if Self::price_minor_units(price).is_none() {
            return Err("Price is too large".to_string());
        }
        Ok(())
    }

    /// `price` in units of 10^-PRICE_SCALE. Digits past the scale are
    /// truncated; `None` when the result does not fit in an i64.
    pub fn price_minor_units(price: &BigDecimal) -> Option<i64> {
        price
            .with_scale(PRICE_SCALE)
            .as_bigint_and_exponent()
            .0
            .to_i64()
    }

    pub fn validate_stock_quantity(quantity: i64) -> Result<(), String> {
        if quantity < 0 {
            return Err("Stock quantity cannot be negative".to_string());
        }
        Ok(())
    }

    pub fn validate_attributes(attributes: &[ProductAttribute]) -> Result<(), String> {
        for attribute in attributes {
            if attribute.name.trim().is_empty() {
                return Err("Attribute name is required".to_string());
            }
        }
        Ok(())
    }

    pub fn validate_images(images: &[ProductImage]) -> Result<(), String> {
        for image in images {
            if image.image_url.trim().is_empty() {
                return Err("Image URL is required".to_string());
            }
            if image.image_url.len() > MAX_IMAGE_URL_LEN {
                return Err(format!(
                    "Image URL cannot exceed {} characters",
                    MAX_IMAGE_URL_LEN
                ));
            }
        }
        Ok(())
    }
}

/// Attributes of a product that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
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
}

impl NewProduct {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: BigDecimal, stock_quantity: i64) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            description: None,
            price,
            stock_quantity,
            category_id: None,
            inventory_id: None,
            is_active: true,
            is_visible: true,
            attributes: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        Product::validate_sku(&self.sku)
            .and_then(|_| Product::validate_name(&self.name))
            .and_then(|_| Product::validate_description(self.description.as_deref()))
            .and_then(|_| Product::validate_price(&self.price))
            .and_then(|_| Product::validate_stock_quantity(self.stock_quantity))
            .and_then(|_| Product::validate_attributes(&self.attributes))
            .and_then(|_| Product::validate_images(&self.images))
            .map_err(DomainError::Validation)
    }

    /// Builds the first committed state of this product at `version`.
    pub fn into_product(self, version: i64, now: DateTime<Utc>) -> Product {
        Product {
            sku: Arc::from(self.sku.as_str()),
            name: Arc::from(self.name.as_str()),
            description: self.description.as_deref().map(Arc::from),
            price: self.price,
            stock_quantity: self.stock_quantity,
            category_id: self.category_id,
            inventory_id: self.inventory_id,
            is_active: self.is_active,
            is_visible: self.is_visible,
            attributes: self.attributes,
            images: self.images,
            version,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The mutator applied by an optimistic update. Unset fields keep their
/// current value; `category_id: Some(None)` detaches the category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<BigDecimal>,
    pub stock_quantity: Option<i64>,
    pub category_id: Option<Option<i64>>,
    pub inventory_id: Option<Option<i64>>,
    pub is_active: Option<bool>,
    pub is_visible: Option<bool>,
    pub attributes: Option<Vec<ProductAttribute>>,
    pub images: Option<Vec<ProductImage>>,
}

impl ProductPatch {
    pub fn deactivate() -> Self {
        Self {
            is_active: Some(false),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut checks: Vec<Result<(), String>> = Vec::new();
        if let Some(ref name) = self.name {
            checks.push(Product::validate_name(name));
        }
        if let Some(ref description) = self.description {
            checks.push(Product::validate_description(description.as_deref()));
        }
        if let Some(ref price) = self.price {
            checks.push(Product::validate_price(price));
        }
        if let Some(quantity) = self.stock_quantity {
            checks.push(Product::validate_stock_quantity(quantity));
        }
        if let Some(ref attributes) = self.attributes {
            checks.push(Product::validate_attributes(attributes));
        }
        if let Some(ref images) = self.images {
            checks.push(Product::validate_images(images));
        }
        checks
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map(|_| ())
            .map_err(DomainError::Validation)
    }

    /// Applies the patch and stamps the next version. The sku is untouched.
    pub fn apply(&self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(ref name) = self.name {
            product.name = Arc::from(name.as_str());
        }
        if let Some(ref description) = self.description {
            product.description = description.as_deref().map(Arc::from);
        }
        if let Some(ref price) = self.price {
            product.price = price.clone();
        }
        if let Some(quantity) = self.stock_quantity {
            product.stock_quantity = quantity;
        }
        if let Some(category_id) = self.category_id {
            product.category_id = category_id;
        }
        if let Some(inventory_id) = self.inventory_id {
            product.inventory_id = inventory_id;
        }
        if let Some(active) = self.is_active {
            product.is_active = active;
        }
        if let Some(visible) = self.is_visible {
            product.is_visible = visible;
        }
        if let Some(ref attributes) = self.attributes {
            product.attributes = attributes.clone();
        }
        if let Some(ref images) = self.images {
            product.images = images.clone();
        }
        product.version += 1;
        product.updated_at = now;
    }
}
