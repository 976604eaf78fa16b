use std::time::Duration;

use interfaces_github_search::index::{SearchTarget, DEFAULT_API_BASE, DEFAULT_USER_AGENT};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("InvalidNumber: {key}={value}: {source}")]
    InvalidNumber {
        key: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },
    #[error("InvalidBool: {key}={value}")]
    InvalidBool { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub github: GitHubConfig,
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub server: ServerConfig,
    /// When false no store is wired and search results are not written.
    pub persistence_enabled: bool,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub user_agent: String,
    pub api_base: String,
    pub api_version: Option<String>,
    pub timeout_sec: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Log upsert SQL at debug level.
    pub echo: bool,
    pub connect_timeout_sec: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub project_name: String,
    pub build_tag: String,
    pub build_commit: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            owner: None,
            repo: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_version: None,
            timeout_sec: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            username: "user".to_string(),
            password: "password".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            name: "github_etl".to_string(),
            echo: false,
            connect_timeout_sec: 5,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_name: "GitHub ETL".to_string(),
            build_tag: "dev".to_string(),
            build_commit: "local".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            database: DatabaseConfig::default(),
            app: AppConfig::default(),
            server: ServerConfig::default(),
            persistence_enabled: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("GITHUB_OWNER") {
            config.github.owner = Some(v);
        }
        if let Some(v) = lookup("GITHUB_REPO") {
            config.github.repo = Some(v);
        }
        if let Some(v) = lookup("USER_AGENT") {
            config.github.user_agent = v;
        }
        if let Some(v) = lookup("API_BASE") {
            config.github.api_base = v;
        }
        if let Some(v) = lookup("API_VERSION") {
            config.github.api_version = Some(v);
        }
        if let Some(v) = lookup("TIMEOUT_SEC") {
            config.github.timeout_sec = Some(parse_number("TIMEOUT_SEC", v)?);
        }

        if let Some(v) = lookup("DATABASE_USERNAME") {
            config.database.username = v;
        }
        if let Some(v) = lookup("DATABASE_PASSWORD") {
            config.database.password = v;
        }
        if let Some(v) = lookup("DATABASE_HOST") {
            config.database.host = v;
        }
        if let Some(v) = lookup("DATABASE_PORT") {
            config.database.port = parse_number("DATABASE_PORT", v)?;
        }
        if let Some(v) = lookup("DATABASE_NAME") {
            config.database.name = v;
        }
        if let Some(v) = lookup("DATABASE_ECHO") {
            config.database.echo = parse_bool("DATABASE_ECHO", v)?;
        }
        if let Some(v) = lookup("DATABASE_CONNECT_TIMEOUT_SEC") {
            config.database.connect_timeout_sec = parse_number("DATABASE_CONNECT_TIMEOUT_SEC", v)?;
        }

        if let Some(v) = lookup("PERSISTENCE_ENABLED") {
            config.persistence_enabled = parse_bool("PERSISTENCE_ENABLED", v)?;
        }

        if let Some(v) = lookup("PROJECT_NAME") {
            config.app.project_name = v;
        }
        if let Some(v) = lookup("BUILD_TAG") {
            config.app.build_tag = v;
        }
        if let Some(v) = lookup("BUILD_COMMIT") {
            config.app.build_commit = v;
        }

        if let Some(v) = lookup("BIND_ADDR") {
            config.server.bind_addr = v;
        }
        if let Some(v) = lookup("PORT") {
            config.server.port = parse_number("PORT", v)?;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        Ok(config)
    }
}

impl GitHubConfig {
    pub fn target(&self) -> SearchTarget<'_> {
        SearchTarget {
            api_base: &self.api_base,
            user_agent: &self.user_agent,
            api_version: self.api_version.as_deref(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_sec.map(Duration::from_secs)
    }
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_sec.max(1))
    }
}

impl AppConfig {
    pub fn version(&self) -> String {
        format!("{}-{}", self.build_tag, self.build_commit)
    }
}

fn parse_number<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidNumber { key, value, source })
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { key, value }),
    }
}
