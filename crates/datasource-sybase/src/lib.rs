//! # datasource-sybase
//!
//! Sybase implementation of the datasource processor contract.
//!
//! - Maps user parameters to `jdbc:sybase:Tds:<host>:<port>/<database>`
//!   connection records and back
//! - Appends extra options as `;key=value;` pairs when connecting
//! - Splits Transact-SQL scripts into `;`-terminated statements
//! - Optionally (`tds` feature) opens connections over TDS with tiberius
//!
//! ```rust,ignore
//! use datasource_api::prelude::*;
//!
//! let mut registry = ProcessorRegistry::new();
//! datasource_sybase::register(&mut registry, PasswordCodec::disabled());
//!
//! let processor = registry.processor(DbType::Sybase)?;
//! let dto = DataSourceParamDto::new("localhost", 5000, "pubs2").with_credentials("sa", "secret");
//! let param = processor.create_connection_params(&dto);
//! assert_eq!(param.jdbc_url, "jdbc:sybase:Tds:localhost:5000/pubs2");
//! ```
//!
//! ## Feature Flags
//!
//! - `tds` - TDS driver via tiberius

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod processor;
pub mod splitter;
pub mod url;

#[cfg(feature = "tds")]
pub mod tds;

use datasource_api::password::PasswordCodec;
use datasource_api::registry::ProcessorRegistry;

pub use processor::SybaseDataSourceProcessor;
pub use splitter::{split_and_remove_comment, SybaseDialect};
pub use url::SybaseUrl;

/// Driver class name the Sybase processor looks up
pub const COM_SYBASE_JDBC_DRIVER: &str = "com.sybase.jdbc4.jdbc.SybDriver";

/// Query used by connection health checks
pub const SYBASE_VALIDATION_QUERY: &str = "select 1";

/// Address prefix of every Sybase connection URL
pub const JDBC_SYBASE: &str = "jdbc:sybase:Tds:";

/// Register the Sybase processor
pub fn register(registry: &mut ProcessorRegistry, codec: PasswordCodec) {
    registry.register(Box::new(SybaseDataSourceProcessor::new(codec)));
}

/// Register the TDS driver under the Sybase driver class name
#[cfg(feature = "tds")]
pub fn register_driver(drivers: &mut datasource_api::connection::DriverManager) {
    drivers.register(std::sync::Arc::new(tds::TdsDriver));
}
