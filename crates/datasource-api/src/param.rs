//! Datasource parameter records
//!
//! - [`DataSourceParamDto`]: what a user submits (host, port, plaintext password)
//! - [`ConnectionParam`]: what the scheduler's metadata store persists
//!
//! Both tolerate missing and `null` JSON fields so records written by older
//! releases keep loading.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::db_type::DbType;
use crate::error::{Error, Result};

/// Deserialize `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// User-facing datasource parameters
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceParamDto {
    /// Datasource id assigned by the metadata store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Database host
    #[serde(default, deserialize_with = "null_as_default")]
    pub host: String,
    /// Database port
    #[serde(default, deserialize_with = "null_as_default")]
    pub port: u16,
    /// Database name
    #[serde(default, deserialize_with = "null_as_default")]
    pub database: String,
    /// Login user
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_name: String,
    /// Plaintext password (accepted on input, never written back out)
    #[serde(default, skip_serializing, deserialize_with = "null_as_default")]
    pub password: String,
    /// Extra driver options
    #[serde(default, deserialize_with = "null_as_default")]
    pub other: HashMap<String, String>,
    /// Dialect tag
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub db_type: Option<DbType>,
}

impl std::fmt::Debug for DataSourceParamDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSourceParamDto")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user_name", &self.user_name)
            .field("password", &"***")
            .field("other", &self.other)
            .field("db_type", &self.db_type)
            .finish()
    }
}

impl DataSourceParamDto {
    /// Create parameters for a host, port and database
    pub fn new(host: impl Into<String>, port: u16, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            ..Default::default()
        }
    }

    /// Set login credentials
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user_name = user.into();
        self.password = password.into();
        self
    }

    /// Add an extra driver option
    pub fn with_other(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.other.insert(key.into(), value.into());
        self
    }

    /// Set the dialect tag
    pub fn with_db_type(mut self, db_type: DbType) -> Self {
        self.db_type = Some(db_type);
        self
    }

    /// Parse submitted JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::deserialization("invalid datasource parameter json", e))
    }
}

/// Persisted connection parameters
///
/// `jdbc_url` is always `address + "/" + database`; the password is stored
/// in its encoded form.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionParam {
    /// Login user
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,
    /// Encoded password
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
    /// `<scheme><host>:<port>`
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// Database name
    #[serde(default, deserialize_with = "null_as_default")]
    pub database: String,
    /// `address/database`, without extra options
    #[serde(default, deserialize_with = "null_as_default")]
    pub jdbc_url: String,
    /// Extra driver options
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub other: HashMap<String, String>,
    /// Driver name used to look up the driver
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub driver_class_name: String,
    /// Health-check query
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub validation_query: String,
}

impl std::fmt::Debug for ConnectionParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParam")
            .field("user", &self.user)
            .field("password", &"***")
            .field("address", &self.address)
            .field("database", &self.database)
            .field("jdbc_url", &self.jdbc_url)
            .field("other", &self.other)
            .field("driver_class_name", &self.driver_class_name)
            .field("validation_query", &self.validation_query)
            .finish()
    }
}

impl ConnectionParam {
    /// Parse a persisted record
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::deserialization("invalid connection parameter json", e))
    }

    /// Serialize for the metadata store
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::serialization("failed to serialize connection parameters", e))
    }
}

/// Render extra options as `key=value;` pairs
///
/// Returns `None` for an empty map. Entries follow the map's iteration
/// order, which is unspecified for more than one entry.
pub fn transform_other(other: &HashMap<String, String>) -> Option<String> {
    if other.is_empty() {
        return None;
    }
    let mut rendered = String::new();
    for (key, value) in other {
        rendered.push_str(key);
        rendered.push('=');
        rendered.push_str(value);
        rendered.push(';');
    }
    Some(rendered)
}
