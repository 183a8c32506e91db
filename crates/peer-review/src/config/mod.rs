use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

mod database;

pub use database::{DatabaseConfig, DatabaseDialect, PoolConfig};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub storage: StorageConfig,
    pub document: DocumentConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(&var_or("APP_ENV", "development"));

        let host = var_or("APP_HOST", "127.0.0.1");
        let port = var_or("APP_PORT", "3000")
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = var_or("APP_LOG_LEVEL", "info");

        let storage = StorageConfig {
            static_dir: PathBuf::from(var_or("APP_STATIC_DIR", "views")),
            output_dir: PathBuf::from(var_or("APP_OUTPUT_DIR", "pdfs")),
        };

        let timeout_secs = parse_number::<u64>("APP_CONVERT_TIMEOUT_SECS", "60")?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber {
                key: "APP_CONVERT_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }
        let date_format = var_or("APP_DATE_FORMAT", DocumentConfig::DEFAULT_DATE_FORMAT);
        if date_format.trim().is_empty() {
            return Err(ConfigError::EmptyDateFormat);
        }

        let document = DocumentConfig {
            converter_bin: var_or("APP_CONVERTER_BIN", "wkhtmltopdf"),
            timeout: Duration::from_secs(timeout_secs),
            date_format,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            storage,
            document,
            database: DatabaseConfig::from_env()?,
        })
    }
}

pub(crate) fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn parse_number<T: std::str::FromStr>(
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError> {
    let raw = var_or(key, default);
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber { key, value: raw })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Directories the service reads the form page from and writes documents into.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub static_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Rendering and conversion settings for generated documents.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    pub converter_bin: String,
    pub timeout: Duration,
    pub date_format: String,
}

impl DocumentConfig {
    /// en-US short date, e.g. `4/1/2024`.
    pub const DEFAULT_DATE_FORMAT: &'static str = "%-m/%-d/%Y";
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            converter_bin: "wkhtmltopdf".to_string(),
            timeout: Duration::from_secs(60),
            date_format: Self::DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
    UnknownDialect(String),
    PoolBounds { min: u32, max: u32 },
    EmptyDateFormat,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a positive number (got '{value}')")
            }
            ConfigError::UnknownDialect(value) => write!(
                f,
                "DB_DIALECT '{value}' is not one of mysql, mariadb, postgres, sqlite, mssql"
            ),
            ConfigError::PoolBounds { min, max } => {
                write!(f, "DB_POOL_MIN ({min}) must not exceed DB_POOL_MAX ({max})")
            }
            ConfigError::EmptyDateFormat => write!(f, "APP_DATE_FORMAT must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    pub(crate) fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    pub(crate) fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_STATIC_DIR",
            "APP_OUTPUT_DIR",
            "APP_CONVERTER_BIN",
            "APP_CONVERT_TIMEOUT_SECS",
            "APP_DATE_FORMAT",
            "DB_HOST",
            "DB_PORT",
            "DB_USER",
            "DB_PASSWORD",
            "DB_NAME",
            "DB_DIALECT",
            "DB_TIMEZONE",
            "DB_POOL_MAX",
            "DB_POOL_MIN",
            "DB_POOL_ACQUIRE_MS",
            "DB_POOL_IDLE_MS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.storage.output_dir, PathBuf::from("pdfs"));
        assert_eq!(config.storage.static_dir, PathBuf::from("views"));
        assert_eq!(config.document.timeout, Duration::from_secs(60));
        assert_eq!(config.document.converter_bin, "wkhtmltopdf");
        assert_eq!(config.document.date_format, "%-m/%-d/%Y");
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_zero_conversion_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_CONVERT_TIMEOUT_SECS", "0");
        let err = AppConfig::load().expect_err("zero timeout rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                key: "APP_CONVERT_TIMEOUT_SECS",
                ..
            }
        ));
        reset_env();
    }

    #[test]
    fn overrides_directories_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_OUTPUT_DIR", "/var/lib/peer-review/pdfs");
        env::set_var("APP_ENV", "production");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.storage.output_dir,
            PathBuf::from("/var/lib/peer-review/pdfs")
        );
        assert_eq!(config.environment, AppEnvironment::Production);
        reset_env();
    }
}
