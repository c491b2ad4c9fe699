//! Drivers and live connections
//!
//! - Connection: a live handle owned by whoever asked for it
//! - Driver: opens connections for a JDBC-style URL
//! - DriverManager: drivers keyed by their class name

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};

/// A connection to a database
///
/// Connections are not pooled or tracked; dropping the handle closes it.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Execute a statement, returns affected row count
    async fn execute(&self, sql: &str) -> Result<u64>;

    /// Check if connection is valid/alive
    async fn is_valid(&self) -> bool;

    /// Close the connection
    async fn close(&self) -> Result<()>;
}

/// Opens connections for one database product
#[async_trait]
pub trait Driver: Send + Sync {
    /// Driver class name the driver is registered under
    fn name(&self) -> &str;

    /// Open a connection
    async fn connect(&self, url: &str, user: &str, password: &str) -> Result<Box<dyn Connection>>;
}

/// Registered drivers, looked up by class name
#[derive(Clone, Default)]
pub struct DriverManager {
    drivers: HashMap<String, Arc<dyn Driver>>,
}

impl std::fmt::Debug for DriverManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.drivers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("DriverManager")
            .field("drivers", &names)
            .finish()
    }
}

impl DriverManager {
    /// Create an empty driver manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver under its class name, replacing any previous one
    pub fn register(&mut self, driver: Arc<dyn Driver>) {
        tracing::debug!(driver = driver.name(), "Registering datasource driver");
        self.drivers.insert(driver.name().to_string(), driver);
    }

    /// Look up a driver by class name
    pub fn driver(&self, name: &str) -> Result<Arc<dyn Driver>> {
        self.drivers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::driver_not_found(name))
    }

    /// Check if a driver is registered
    pub fn contains(&self, name: &str) -> bool {
        self.drivers.contains_key(name)
    }

    /// Number of registered drivers
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Check if no driver is registered
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Open a connection with the named driver
    ///
    /// Single attempt: no retry, no pooling and no timeout beyond what the
    /// driver applies itself.
    pub async fn get_connection(
        &self,
        driver: &str,
        url: &str,
        user: &str,
        password: &str,
    ) -> Result<Box<dyn Connection>> {
        let driver = self.driver(driver)?;
        tracing::debug!(driver = driver.name(), url, user, "Opening datasource connection");
        driver.connect(url, user, password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullConnection;

    #[async_trait]
    impl Connection for NullConnection {
        async fn execute(&self, _sql: &str) -> Result<u64> {
            Ok(0)
        }

        async fn is_valid(&self) -> bool {
            true
        }

        async fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    struct NullDriver;

    #[async_trait]
    impl Driver for NullDriver {
        fn name(&self) -> &str {
            "org.example.NullDriver"
        }

        async fn connect(
            &self,
            _url: &str,
            _user: &str,
            _password: &str,
        ) -> Result<Box<dyn Connection>> {
            Ok(Box::new(NullConnection))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut manager = DriverManager::new();
        assert!(manager.is_empty());

        manager.register(Arc::new(NullDriver));
        assert_eq!(manager.len(), 1);
        assert!(manager.contains("org.example.NullDriver"));
        assert!(manager.driver("org.example.NullDriver").is_ok());
    }

    #[test]
    fn test_missing_driver() {
        let manager = DriverManager::new();
        let err = match manager.driver("com.sybase.jdbc4.jdbc.SybDriver") {
            Err(e) => e,
            Ok(_) => panic!("expected driver lookup to fail"),
        };
        assert!(matches!(err, Error::DriverNotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_connection() {
        let mut manager = DriverManager::new();
        manager.register(Arc::new(NullDriver));

        let conn = manager
            .get_connection("org.example.NullDriver", "jdbc:null:", "u", "p")
            .await
            .unwrap();
        assert!(conn.is_valid().await);
        assert_eq!(conn.execute("select 1").await.unwrap(), 0);
    }

    #[test]
    fn test_debug_lists_driver_names() {
        let mut manager = DriverManager::new();
        manager.register(Arc::new(NullDriver));
        assert!(format!("{:?}", manager).contains("org.example.NullDriver"));
    }
}
