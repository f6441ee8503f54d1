mod lru_product_cache;

pub use lru_product_cache::LruProductCache;
