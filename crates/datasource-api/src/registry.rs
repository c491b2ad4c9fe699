//! Processor registry
//!
//! Maps a dialect tag to a prototype processor. The registry is filled once
//! at process start by each dialect crate's `register` function; lookups
//! hand out a fresh instance per request.
//!
//! ```rust,ignore
//! let mut registry = ProcessorRegistry::new();
//! datasource_sybase::register(&mut registry, PasswordCodec::disabled());
//!
//! let processor = registry.processor(DbType::Sybase)?;
//! let param = processor.create_connection_params(&dto);
//! ```

use std::collections::HashMap;

use crate::db_type::DbType;
use crate::error::{Error, Result};
use crate::processor::DataSourceProcessor;

/// Registry of available datasource processors
#[derive(Default)]
pub struct ProcessorRegistry {
    processors: HashMap<DbType, Box<dyn DataSourceProcessor>>,
}

impl ProcessorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processor under the dialect it serves
    ///
    /// A later registration for the same dialect replaces the earlier one.
    pub fn register(&mut self, processor: Box<dyn DataSourceProcessor>) {
        let db_type = processor.db_type();
        tracing::debug!(%db_type, "Registering datasource processor");
        self.processors.insert(db_type, processor);
    }

    /// Get a new processor instance for a dialect
    pub fn processor(&self, db_type: DbType) -> Result<Box<dyn DataSourceProcessor>> {
        self.processors
            .get(&db_type)
            .map(|prototype| prototype.create())
            .ok_or_else(|| {
                Error::unsupported(format!("no datasource processor registered for {}", db_type))
            })
    }

    /// Check if a dialect is registered
    pub fn contains(&self, db_type: DbType) -> bool {
        self.processors.contains_key(&db_type)
    }

    /// Registered dialects, sorted
    pub fn db_types(&self) -> Vec<DbType> {
        let mut types: Vec<DbType> = self.processors.keys().copied().collect();
        types.sort();
        types
    }

    /// Number of registered processors
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

impl std::fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("db_types", &self.db_types())
            .finish()
    }
}
