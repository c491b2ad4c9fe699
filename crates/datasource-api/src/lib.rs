//! # datasource-api
//!
//! Dialect-independent contract for the scheduler's pluggable datasources.
//!
//! A dialect crate implements [`DataSourceProcessor`](processor::DataSourceProcessor)
//! and registers it in a [`ProcessorRegistry`](registry::ProcessorRegistry) at
//! process start. Callers then look processors up by [`DbType`] and use them to
//!
//! - map submitted [`DataSourceParamDto`](param::DataSourceParamDto)s to
//!   persisted [`ConnectionParam`](param::ConnectionParam)s and back,
//! - build connection URLs and open connections through a
//!   [`DriverManager`](connection::DriverManager),
//! - split SQL scripts into executable statements.
//!
//! Stored passwords go through a [`PasswordCodec`](password::PasswordCodec)
//! configured by [`DatasourceConfig`](config::DatasourceConfig).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod connection;
pub mod db_type;
pub mod error;
pub mod param;
pub mod password;
pub mod processor;
pub mod registry;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{DatasourceConfig, EncryptionConfig};
    pub use crate::connection::{Connection, Driver, DriverManager};
    pub use crate::db_type::DbType;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::param::{transform_other, ConnectionParam, DataSourceParamDto};
    pub use crate::password::PasswordCodec;
    pub use crate::processor::DataSourceProcessor;
    pub use crate::registry::ProcessorRegistry;
}

pub use db_type::DbType;
pub use error::{Error, Result};
