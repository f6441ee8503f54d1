use bigdecimal::BigDecimal;
use catalog_domain::{NewProduct, ProductAttribute, ProductImage};
use std::str::FromStr;
use std::sync::Arc;

pub fn new_product(sku: &str, price: &str, stock_quantity: i64) -> NewProduct {
    NewProduct::new(
        sku,
        format!("Product {}", sku),
        BigDecimal::from_str(price).unwrap(),
        stock_quantity,
    )
}

pub fn decorated_product(sku: &str) -> NewProduct {
    let mut product = new_product(sku, "49.90", 7);
    product.description = Some("Stainless steel kettle".to_string());
    product.attributes = vec![ProductAttribute {
        name: Arc::from("capacity"),
        value: Some(Arc::from("1.7l")),
        display_order: Some(1),
    }];
    product.images = vec![ProductImage {
        image_url: Arc::from("https://img.example.com/kettle.png"),
        alt_text: Some(Arc::from("kettle")),
        is_primary: true,
        display_order: Some(0),
    }];
    product
}
