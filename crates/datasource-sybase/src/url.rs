//! Sybase JDBC URL parsing
//!
//! `jdbc:sybase:Tds:<host>:<port>[/<database>][;key=value;...]`

use datasource_api::error::{Error, Result};

use crate::JDBC_SYBASE;

/// Components of a Sybase JDBC URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SybaseUrl {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database, when the URL names one
    pub database: Option<String>,
    /// Extra options in URL order
    pub options: Vec<(String, String)>,
}

impl SybaseUrl {
    /// Parse a URL produced by the Sybase processor
    pub fn parse(url: &str) -> Result<Self> {
        let rest = url.strip_prefix(JDBC_SYBASE).ok_or_else(|| {
            Error::parse(format!(
                "Invalid Sybase URL: expected prefix '{}'",
                JDBC_SYBASE
            ))
        })?;

        let (location, options) = rest.split_once(';').unwrap_or((rest, ""));
        let (host_port, database) = match location.split_once('/') {
            Some((host_port, database)) if !database.is_empty() => {
                (host_port, Some(database.to_string()))
            }
            Some((host_port, _)) => (host_port, None),
            None => (location, None),
        };

        let (host, port) = host_port
            .rsplit_once(':')
            .ok_or_else(|| Error::parse("Invalid Sybase URL: missing port"))?;
        if host.is_empty() {
            return Err(Error::parse("Invalid Sybase URL: missing host"));
        }
        let port = port
            .parse::<u16>()
            .map_err(|e| Error::parse(format!("Invalid Sybase URL port '{}': {}", port, e)))?;

        let options = options
            .split(';')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();

        Ok(Self {
            host: host.to_string(),
            port,
            database,
            options,
        })
    }

    /// Look up an option, ignoring key case; the last occurrence wins
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
