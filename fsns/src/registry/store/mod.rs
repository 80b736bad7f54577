//! SQLite persistence for the type registry.

mod config;
mod connection;
mod migrations;
mod schema;

pub use config::{default_data_dir, resolve_registry_path, RegistryConfig, REGISTRY_FILE_NAME};
pub use connection::SqliteRegistry;
