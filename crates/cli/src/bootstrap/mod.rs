mod config;
mod database;
mod logging;

pub use config::{config_source, load_config};
pub use database::init_database;
pub use logging::init_logging;
