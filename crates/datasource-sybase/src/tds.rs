//! TDS driver for Sybase URLs
//!
//! Speaks the TDS wire protocol through tiberius. The driver is registered
//! under the Sybase driver class name so processors find it the same way
//! they would find any other driver.
//!
//! Recognized URL options:
//! - `trust_cert=true`: accept the server certificate without validation
//! - `encrypt=true|false`: require or disable TLS

use async_trait::async_trait;
use tiberius::{AuthMethod, Client, Config, EncryptionLevel};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use datasource_api::connection::{Connection, Driver};
use datasource_api::error::{Error, Result};

use crate::url::SybaseUrl;
use crate::{COM_SYBASE_JDBC_DRIVER, SYBASE_VALIDATION_QUERY};

/// Connection over TDS
///
/// The client is dropped on [`Connection::close`]; later calls fail with a
/// connection error.
pub struct TdsConnection {
    client: Mutex<Option<Client<Compat<TcpStream>>>>,
}

impl TdsConnection {
    /// Connect to the server named by a parsed URL
    pub async fn connect(url: &SybaseUrl, user: &str, password: &str) -> Result<Self> {
        let mut config = Config::new();

        config.host(&url.host);
        config.port(url.port);
        if let Some(database) = &url.database {
            config.database(database);
        }
        config.authentication(AuthMethod::sql_server(user, password));

        if url.option("trust_cert") == Some("true") {
            config.trust_cert();
        }
        match url.option("encrypt") {
            Some("true") => config.encryption(EncryptionLevel::Required),
            Some("false") => config.encryption(EncryptionLevel::NotSupported),
            _ => {}
        }

        let tcp = TcpStream::connect(config.get_addr()).await.map_err(|e| {
            Error::connection_with_source(
                format!("Failed to connect to {}:{}", url.host, url.port),
                e,
            )
        })?;

        tcp.set_nodelay(true).ok();

        let client = Client::connect(config, tcp.compat_write())
            .await
            .map_err(|e| Error::connection_with_source("Failed to authenticate", e))?;

        Ok(Self {
            client: Mutex::new(Some(client)),
        })
    }
}

#[async_trait]
impl Connection for TdsConnection {
    async fn execute(&self, sql: &str) -> Result<u64> {
        let mut guard = self.client.lock().await;
        let client = guard
            .as_mut()
            .ok_or_else(|| Error::connection("connection is closed"))?;

        let result = client
            .execute(sql, &[])
            .await
            .map_err(|e| Error::connection_with_source("Execute failed", e))?;

        Ok(result.total())
    }

    async fn is_valid(&self) -> bool {
        let mut guard = self.client.lock().await;
        match guard.as_mut() {
            Some(client) => client.execute(SYBASE_VALIDATION_QUERY, &[]).await.is_ok(),
            None => false,
        }
    }

    async fn close(&self) -> Result<()> {
        let client = self.client.lock().await.take();
        if let Some(client) = client {
            client
                .close()
                .await
                .map_err(|e| Error::connection_with_source("Failed to close connection", e))?;
        }
        Ok(())
    }
}

/// Driver opening [`TdsConnection`]s for `jdbc:sybase:Tds:` URLs
#[derive(Debug, Clone, Copy, Default)]
pub struct TdsDriver;

#[async_trait]
impl Driver for TdsDriver {
    fn name(&self) -> &str {
        COM_SYBASE_JDBC_DRIVER
    }

    async fn connect(&self, url: &str, user: &str, password: &str) -> Result<Box<dyn Connection>> {
        let url = SybaseUrl::parse(url)?;
        let conn = TdsConnection::connect(&url, user, password).await?;
        Ok(Box::new(conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasource_api::error::ErrorCategory;

    #[test]
    fn test_driver_name() {
        assert_eq!(TdsDriver.name(), "com.sybase.jdbc4.jdbc.SybDriver");
    }

    #[tokio::test]
    async fn test_connect_rejects_foreign_url() {
        let err = match TdsDriver.connect("jdbc:mysql://localhost/db", "sa", "").await {
            Err(e) => e,
            Ok(_) => panic!("expected a parse error"),
        };
        assert_eq!(err.category(), ErrorCategory::Parse);
    }

    #[tokio::test]
    async fn test_connect_refused() {
        // port 1 on loopback has no listener
        let err = match TdsDriver
            .connect("jdbc:sybase:Tds:127.0.0.1:1/master", "sa", "secret")
            .await
        {
            Err(e) => e,
            Ok(_) => panic!("expected the connection to be refused"),
        };
        assert_eq!(err.category(), ErrorCategory::Connection);
        assert!(!err.to_string().contains("secret"));
    }
}
