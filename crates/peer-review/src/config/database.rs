use std::fmt;
use std::time::Duration;

use super::{parse_number, var_or, ConfigError};

/// SQL backends a connection factory can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseDialect {
    MySql,
    MariaDb,
    Postgres,
    Sqlite,
    MsSql,
}

impl DatabaseDialect {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "mariadb" => Ok(Self::MariaDb),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            "mssql" => Ok(Self::MsSql),
            other => Err(ConfigError::UnknownDialect(other.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
            Self::MsSql => "mssql",
        }
    }
}

/// Connection pool sizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub max: u32,
    pub min: u32,
    pub acquire: Duration,
    pub idle: Duration,
}

/// Store connection settings. Loaded at startup; the document path never queries a store.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub dialect: DatabaseDialect,
    pub timezone: String,
    pub pool: PoolConfig,
}

impl DatabaseConfig {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        let pool = PoolConfig {
            max: parse_number("DB_POOL_MAX", "5")?,
            min: parse_number("DB_POOL_MIN", "0")?,
            acquire: Duration::from_millis(parse_number("DB_POOL_ACQUIRE_MS", "30000")?),
            idle: Duration::from_millis(parse_number("DB_POOL_IDLE_MS", "10000")?),
        };
        if pool.min > pool.max {
            return Err(ConfigError::PoolBounds {
                min: pool.min,
                max: pool.max,
            });
        }

        Ok(Self {
            host: var_or("DB_HOST", "localhost"),
            port: parse_number("DB_PORT", "3306")?,
            user: var_or("DB_USER", "root"),
            password: var_or("DB_PASSWORD", ""),
            name: var_or("DB_NAME", "peer_review"),
            dialect: DatabaseDialect::parse(&var_or("DB_DIALECT", "mysql"))?,
            timezone: var_or("DB_TIMEZONE", "+05:30"),
            pool,
        })
    }

    /// Connection target without credentials, safe for logs.
    pub fn display_target(&self) -> String {
        format!(
            "{}://{}@{}:{}/{}",
            self.dialect.label(),
            self.user,
            self.host,
            self.port,
            self.name
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("dialect", &self.dialect)
            .field("timezone", &self.timezone)
            .field("pool", &self.pool)
            .finish()
    }
}
