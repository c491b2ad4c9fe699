//! The contract every dialect implements
//!
//! A processor maps user parameters to persisted connection parameters and
//! back, builds connection URLs, opens connections through a
//! [`DriverManager`] and splits SQL scripts into statements. Processors hold
//! no per-call state; [`DataSourceProcessor::create`] hands out a fresh
//! instance for every request.

use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::connection::{Connection, DriverManager};
use crate::db_type::DbType;
use crate::error::{Error, Result};
use crate::param::{ConnectionParam, DataSourceParamDto};
use crate::password::PasswordCodec;

static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_\-.,]+$").expect("host pattern is invalid - this is a bug")
});

static IPV6_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_\-.:\[\],]+$").expect("host pattern is invalid - this is a bug")
});

static DATABASE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_\-.]+$").expect("database pattern is invalid - this is a bug")
});

static PARAMS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9\-_/@.:]+$").expect("params pattern is invalid - this is a bug")
});

/// Reject hosts with characters outside host names, IPv4 and IPv6 literals
pub fn check_host(host: &str) -> Result<()> {
    if IPV4_PATTERN.is_match(host) || IPV6_PATTERN.is_match(host) {
        Ok(())
    } else {
        Err(Error::invalid_param(format!("datasource host illegal: {}", host)))
    }
}

/// Reject database names with characters outside `[a-zA-Z0-9_\-.]`
pub fn check_database(database: &str) -> Result<()> {
    if DATABASE_PATTERN.is_match(database) {
        Ok(())
    } else {
        Err(Error::invalid_param(format!(
            "database name illegal: {}",
            database
        )))
    }
}

/// Reject extra option values that could smuggle additional URL options
pub fn check_other(other: &HashMap<String, String>) -> Result<()> {
    match other.iter().find(|(_, value)| !PARAMS_PATTERN.is_match(value)) {
        Some((key, _)) => Err(Error::invalid_param(format!(
            "datasource other params illegal: {}",
            key
        ))),
        None => Ok(()),
    }
}

/// Dialect-specific datasource processor
#[async_trait]
pub trait DataSourceProcessor: Send + Sync {
    /// Parse submitted user parameters
    fn cast_datasource_param_dto(&self, param_json: &str) -> Result<DataSourceParamDto> {
        DataSourceParamDto::from_json(param_json)
    }

    /// Validate user parameters before they are mapped
    fn check_datasource_param(&self, dto: &DataSourceParamDto) -> Result<()> {
        check_host(&dto.host)?;
        check_database(&dto.database)?;
        check_other(&dto.other)
    }

    /// Identity of a datasource: dialect, user, encoded password and URL
    fn datasource_unique_id(&self, param: &ConnectionParam) -> String {
        format!(
            "{}@{}@{}@{}",
            self.db_type().descp(),
            param.user,
            self.password_codec().encode(&param.password),
            param.jdbc_url
        )
    }

    /// Rebuild user parameters from a persisted JSON record
    fn create_datasource_param_dto(&self, connection_json: &str) -> Result<DataSourceParamDto> {
        let param = self.create_connection_params_from_json(connection_json)?;
        self.datasource_param_dto(&param)
    }

    /// Rebuild user parameters from a persisted record (password excluded)
    fn datasource_param_dto(&self, param: &ConnectionParam) -> Result<DataSourceParamDto>;

    /// Map user parameters to a persisted record
    fn create_connection_params(&self, dto: &DataSourceParamDto) -> ConnectionParam;

    /// Parse a persisted JSON record
    fn create_connection_params_from_json(&self, connection_json: &str) -> Result<ConnectionParam> {
        ConnectionParam::from_json(connection_json)
    }

    /// Driver class name for this dialect
    fn datasource_driver(&self) -> &'static str;

    /// Cheap query used by connection health checks
    fn validation_query(&self) -> &'static str;

    /// Connection URL including extra options
    fn jdbc_url(&self, param: &ConnectionParam) -> String;

    /// Open a live connection
    async fn get_connection(
        &self,
        param: &ConnectionParam,
        drivers: &DriverManager,
    ) -> Result<Box<dyn Connection>>;

    /// Check that a connection can be opened
    ///
    /// Failures are logged and reported as `false`.
    async fn check_datasource_connectivity(
        &self,
        param: &ConnectionParam,
        drivers: &DriverManager,
    ) -> bool {
        match self.get_connection(param, drivers).await {
            Ok(conn) => {
                if let Err(e) = conn.close().await {
                    tracing::warn!(db_type = %self.db_type(), "Failed to close connectivity check connection: {}", e);
                }
                true
            }
            Err(e) => {
                tracing::error!(db_type = %self.db_type(), "Check datasource connectivity failed: {}", e);
                false
            }
        }
    }

    /// Dialect tag this processor serves
    fn db_type(&self) -> DbType;

    /// Codec used for stored passwords
    fn password_codec(&self) -> &PasswordCodec;

    /// New processor instance for one request
    fn create(&self) -> Box<dyn DataSourceProcessor>;

    /// Strip comments and split a script into `;`-terminated statements
    fn split_and_remove_comment(&self, sql: &str) -> Result<Vec<String>>;
}
