#![allow(dead_code)]
use bigdecimal::BigDecimal;
use catalog_domain::{NewProduct, Product, ProductAttribute, ProductImage};
use chrono::{TimeZone, Utc};
use std::str::FromStr;
use std::sync::Arc;

pub struct ProductBuilder {
    sku: String,
    name: String,
    price: BigDecimal,
    stock_quantity: i64,
    version: i64,
    attributes: Vec<ProductAttribute>,
    images: Vec<ProductImage>,
}

impl ProductBuilder {
    pub fn new() -> Self {
        Self {
            sku: "sku-1".to_string(),
            name: "Widget".to_string(),
            price: BigDecimal::from(10),
            stock_quantity: 5,
            version: 1,
            attributes: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn sku(mut self, sku: &str) -> Self {
        self.sku = sku.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn price(mut self, price: &str) -> Self {
        self.price = BigDecimal::from_str(price).unwrap();
        self
    }

    pub fn stock_quantity(mut self, quantity: i64) -> Self {
        self.stock_quantity = quantity;
        self
    }

    pub fn version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(ProductAttribute {
            name: Arc::from(name),
            value: Some(Arc::from(value)),
            display_order: None,
        });
        self
    }

    pub fn image(mut self, url: &str) -> Self {
        self.images.push(ProductImage {
            image_url: Arc::from(url),
            alt_text: None,
            is_primary: self.images.is_empty(),
            display_order: None,
        });
        self
    }

    pub fn new_product(self) -> NewProduct {
        let mut product = NewProduct::new(self.sku, self.name, self.price, self.stock_quantity);
        product.attributes = self.attributes;
        product.images = self.images;
        product
    }

    pub fn build(self) -> Product {
        let version = self.version;
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        self.new_product().into_product(version, now)
    }
}
