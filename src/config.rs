use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Runtime configuration, read once at startup and handed to whatever needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub cors: CorsPolicy,
    pub static_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseEndpoint {
    /// A full connection string, used as-is.
    Url(String),
    Tcp { host: String, port: u16 },
    /// Directory holding the server's Unix socket (Cloud SQL style).
    Socket(PathBuf),
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub endpoint: DatabaseEndpoint,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub require_tls: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Reflect any requesting origin.
    AnyOrigin,
    Origin(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").or_else(|| lookup("NODE_ENV")).as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        };

        let port = match ["PORT", "BACKEND_PORT"]
            .into_iter()
            .find_map(|name| lookup(name).map(|raw| (name, raw)))
        {
            Some((name, raw)) => parse_value(name, &raw)?,
            None => DEFAULT_PORT,
        };
        let host = get_env_or(&lookup, "SERVER_HOST", "0.0.0.0");

        let cors = match environment {
            Environment::Production => CorsPolicy::AnyOrigin,
            Environment::Development => {
                CorsPolicy::Origin(get_env_or(&lookup, "FRONTEND_URL", DEFAULT_FRONTEND_URL))
            }
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            server_address: format!("{}:{}", host, port),
            environment,
            database: DatabaseConfig::from_lookup(&lookup, environment)?,
            cors,
            static_dir: lookup("STATIC_DIR").map(PathBuf::from),
            log_format,
        })
    }
}

impl DatabaseConfig {
    fn from_lookup<F>(lookup: &F, environment: Environment) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("DATABASE_BACKEND").as_deref() {
            None | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(Error::Config(format!(
                    "Invalid value for DATABASE_BACKEND: {}",
                    other
                )))
            }
        };

        let host = get_env_or(lookup, "DB_HOST", "localhost");
        let endpoint = if let Some(url) = lookup("DATABASE_URL") {
            DatabaseEndpoint::Url(url)
        } else if host.starts_with("/cloudsql/") {
            DatabaseEndpoint::Socket(PathBuf::from(host))
        } else {
            DatabaseEndpoint::Tcp {
                host,
                port: get_env_parse_or(lookup, "DB_PORT", 5432)?,
            }
        };

        // Remote TCP connections in production go over TLS.
        let require_tls = environment == Environment::Production
            && matches!(&endpoint, DatabaseEndpoint::Tcp { host, .. } if host != "localhost");

        Ok(Self {
            backend,
            endpoint,
            user: get_env_or(lookup, "DB_USER", "devfest_user"),
            password: get_env_or(lookup, "DB_PASSWORD", ""),
            name: get_env_or(lookup, "DB_NAME", "devfest_db"),
            max_connections: get_env_parse_or(lookup, "DB_MAX_CONNECTIONS", 10)?,
            require_tls,
        })
    }
}

fn get_env_or<F>(lookup: &F, name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).unwrap_or_else(|| default.to_string())
}

fn get_env_parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}
