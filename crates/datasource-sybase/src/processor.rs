//! Sybase datasource processor

use async_trait::async_trait;
use std::sync::Arc;

use datasource_api::connection::{Connection, DriverManager};
use datasource_api::db_type::DbType;
use datasource_api::error::{Error, Result};
use datasource_api::param::{transform_other, ConnectionParam, DataSourceParamDto};
use datasource_api::password::PasswordCodec;
use datasource_api::processor::DataSourceProcessor;

use crate::splitter;
use crate::{COM_SYBASE_JDBC_DRIVER, JDBC_SYBASE, SYBASE_VALIDATION_QUERY};

const DOUBLE_SLASH: &str = "//";
const COMMA: char = ',';
const COLON: char = ':';

/// Recover host and port from a stored address
///
/// Accepts `[jdbc:sybase:Tds:][failover-prefix//]host1:port1[,host2:port2,...]`;
/// only the primary `host:port` pair is read.
fn parse_address(address: &str) -> Result<(String, u16)> {
    let address = address.strip_prefix(JDBC_SYBASE).unwrap_or(address);
    let host_list = address
        .split(DOUBLE_SLASH)
        .filter(|segment| !segment.is_empty())
        .last()
        .unwrap_or("");
    let primary = host_list.split(COMMA).next().unwrap_or("");

    let mut parts = primary.split(COLON);
    let host = parts.next().unwrap_or("");
    let port = parts
        .next()
        .ok_or_else(|| Error::parse(format!("address '{}' has no port", address)))?;
    let port = port
        .parse::<u16>()
        .map_err(|e| Error::parse(format!("invalid port '{}' in address: {}", port, e)))?;

    Ok((host.to_string(), port))
}

/// Processor for Sybase (Adaptive Server Enterprise) datasources
#[derive(Debug, Clone, Default)]
pub struct SybaseDataSourceProcessor {
    codec: Arc<PasswordCodec>,
}

impl SybaseDataSourceProcessor {
    /// Create a processor using the given password codec
    pub fn new(codec: PasswordCodec) -> Self {
        Self {
            codec: Arc::new(codec),
        }
    }
}

#[async_trait]
impl DataSourceProcessor for SybaseDataSourceProcessor {
    fn datasource_param_dto(&self, param: &ConnectionParam) -> Result<DataSourceParamDto> {
        let (host, port) = parse_address(&param.address)?;

        Ok(DataSourceParamDto {
            host,
            port,
            database: param.database.clone(),
            user_name: param.user.clone(),
            other: param.other.clone(),
            db_type: Some(DbType::Sybase),
            ..Default::default()
        })
    }

    fn create_connection_params(&self, dto: &DataSourceParamDto) -> ConnectionParam {
        let address = format!("{}{}:{}", JDBC_SYBASE, dto.host, dto.port);
        let jdbc_url = format!("{}/{}", address, dto.database);
        tracing::debug!(%jdbc_url, user = %dto.user_name, "Creating Sybase connection parameters");

        ConnectionParam {
            user: dto.user_name.clone(),
            password: self.codec.encode(&dto.password),
            address,
            database: dto.database.clone(),
            jdbc_url,
            other: dto.other.clone(),
            driver_class_name: self.datasource_driver().to_string(),
            validation_query: self.validation_query().to_string(),
        }
    }

    fn datasource_driver(&self) -> &'static str {
        COM_SYBASE_JDBC_DRIVER
    }

    fn validation_query(&self) -> &'static str {
        SYBASE_VALIDATION_QUERY
    }

    fn jdbc_url(&self, param: &ConnectionParam) -> String {
        match transform_other(&param.other) {
            Some(other) => format!("{};{}", param.jdbc_url, other),
            None => param.jdbc_url.clone(),
        }
    }

    async fn get_connection(
        &self,
        param: &ConnectionParam,
        drivers: &DriverManager,
    ) -> Result<Box<dyn Connection>> {
        let jdbc_url = self.jdbc_url(param);
        let password = self.codec.decode(&param.password)?;

        drivers
            .get_connection(self.datasource_driver(), &jdbc_url, &param.user, &password)
            .await
    }

    fn db_type(&self) -> DbType {
        DbType::Sybase
    }

    fn password_codec(&self) -> &PasswordCodec {
        &self.codec
    }

    fn create(&self) -> Box<dyn DataSourceProcessor> {
        Box::new(self.clone())
    }

    fn split_and_remove_comment(&self, sql: &str) -> Result<Vec<String>> {
        splitter::split_and_remove_comment(sql)
    }
}
