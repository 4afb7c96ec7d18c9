//! Concrete adapter implementations for ports.

pub mod csv_import;
pub mod file_config_adapter;
pub mod json_store_adapter;
#[cfg(feature = "sqlite")]
pub mod sqlite_store_adapter;
#[cfg(feature = "web")]
pub mod web;
