pub mod cache;
pub mod database;
pub mod events;
pub mod inventory;
pub mod repositories;
