//! Catalog Service Domain Layer
pub mod category;
pub mod change_event;
pub mod config;
pub mod errors;
pub mod paging;
pub mod product;

pub use category::{Category, CategoryTree};
pub use change_event::{ChangeEvent, ChangeKind, OutboxEntry};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use paging::{Page, PageRequest, ProductSearch, SortDirection, SortField};
pub use product::{NewProduct, Product, ProductAttribute, ProductImage, ProductPatch};
