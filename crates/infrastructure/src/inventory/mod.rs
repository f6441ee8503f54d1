mod http_inventory_provider;

pub use http_inventory_provider::HttpInventoryProvider;
