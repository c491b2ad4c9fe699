//! Dialect tags used to route requests to a processor

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// Database dialect identifier
///
/// Serialized in upper case (`"SYBASE"`), displayed with the lower-case
/// description used in unique ids and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DbType {
    /// MySQL
    Mysql,
    /// PostgreSQL
    Postgresql,
    /// Apache Hive
    Hive,
    /// Spark SQL
    Spark,
    /// ClickHouse
    Clickhouse,
    /// Oracle
    Oracle,
    /// SQL Server
    Sqlserver,
    /// IBM DB2
    Db2,
    /// Presto
    Presto,
    /// H2
    H2,
    /// Amazon Redshift
    Redshift,
    /// Amazon Athena
    Athena,
    /// Trino
    Trino,
    /// StarRocks
    Starrocks,
    /// Azure SQL
    Azuresql,
    /// Dameng
    Dameng,
    /// OceanBase
    Oceanbase,
    /// Snowflake
    Snowflake,
    /// Vertica
    Vertica,
    /// SAP HANA
    Hana,
    /// Apache Doris
    Doris,
    /// Sybase (Adaptive Server Enterprise)
    Sybase,
}

impl DbType {
    /// Every known dialect tag
    pub const ALL: [DbType; 22] = [
        DbType::Mysql,
        DbType::Postgresql,
        DbType::Hive,
        DbType::Spark,
        DbType::Clickhouse,
        DbType::Oracle,
        DbType::Sqlserver,
        DbType::Db2,
        DbType::Presto,
        DbType::H2,
        DbType::Redshift,
        DbType::Athena,
        DbType::Trino,
        DbType::Starrocks,
        DbType::Azuresql,
        DbType::Dameng,
        DbType::Oceanbase,
        DbType::Snowflake,
        DbType::Vertica,
        DbType::Hana,
        DbType::Doris,
        DbType::Sybase,
    ];

    /// Lower-case description of the dialect
    pub fn descp(&self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Postgresql => "postgresql",
            Self::Hive => "hive",
            Self::Spark => "spark",
            Self::Clickhouse => "clickhouse",
            Self::Oracle => "oracle",
            Self::Sqlserver => "sqlserver",
            Self::Db2 => "db2",
            Self::Presto => "presto",
            Self::H2 => "h2",
            Self::Redshift => "redshift",
            Self::Athena => "athena",
            Self::Trino => "trino",
            Self::Starrocks => "starrocks",
            Self::Azuresql => "azuresql",
            Self::Dameng => "dameng",
            Self::Oceanbase => "oceanbase",
            Self::Snowflake => "snowflake",
            Self::Vertica => "vertica",
            Self::Hana => "hana",
            Self::Doris => "doris",
            Self::Sybase => "sybase",
        }
    }
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.descp())
    }
}

impl FromStr for DbType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DbType::ALL
            .iter()
            .copied()
            .find(|t| t.descp().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unsupported(format!("unknown database type: {}", s)))
    }
}
