use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DB_NAME: &str = "animal_shelter_actual";
const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: DEFAULT_PORT, worker_threads: Some(DEFAULT_WORKER_THREADS) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub uri: String,
    #[serde(default = "default_db_name")]
    pub name: String,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            name: default_db_name(),
            app_name: default_app_name(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_db_name() -> String { DEFAULT_DB_NAME.to_string() }
fn default_app_name() -> String { "animal-shelter".to_string() }
fn default_connect_timeout() -> u64 { 10 }

/// Values taken from the process environment after the file is read.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub mongo_uri: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
}

impl EnvOverrides {
    /// Reads `MONGO_URI`, `IP` and `PORT`.
    pub fn from_env() -> Self {
        Self {
            mongo_uri: std::env::var("MONGO_URI").ok(),
            host: std::env::var("IP").ok(),
            port: std::env::var("PORT").ok(),
        }
    }
}

/// Reads `$CONFIG_PATH` (default `config.toml`); a missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File (if present) + environment, normalized and validated.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_overrides(EnvOverrides::from_env())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn apply_overrides(&mut self, env: EnvOverrides) -> Result<()> {
        if let Some(uri) = env.mongo_uri.filter(|u| !u.trim().is_empty()) {
            self.database.uri = uri;
        }
        if let Some(host) = env.host.filter(|h| !h.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = env.port.filter(|p| !p.trim().is_empty()) {
            self.server.port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("PORT is not a valid port number ({port}): {e}"))?;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            return Err(anyhow!("database.uri is empty; set it in config.toml or via MONGO_URI"));
        }
        let lower = self.uri.to_lowercase();
        if !(lower.starts_with("mongodb://") || lower.starts_with("mongodb+srv://")) {
            return Err(anyhow!("database.uri must start with mongodb:// or mongodb+srv://"));
        }
        if self.name.trim().is_empty() {
            return Err(anyhow!("database.name must not be empty"));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.host, DEFAULT_HOST);
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert_eq!(cfg.database.name, DEFAULT_DB_NAME);
        assert_eq!(cfg.database.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn file_values_are_read() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            worker_threads = 2

            [database]
            uri = "mongodb://db:27017"
            name = "shelter"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.database.uri, "mongodb://db:27017");
        assert_eq!(cfg.database.name, "shelter");
    }

    #[test]
    fn env_overrides_win_over_file() {
        let mut cfg = parse("[server]\nhost = \"10.0.0.1\"\nport = 81\n").unwrap();
        cfg.apply_overrides(EnvOverrides {
            mongo_uri: Some("mongodb+srv://cluster.example.net".into()),
            host: Some("0.0.0.0".into()),
            port: Some("5050".into()),
        })
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:5050");
        assert_eq!(cfg.database.uri, "mongodb+srv://cluster.example.net");
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(EnvOverrides { mongo_uri: None, host: Some("  ".into()), port: Some(String::new()) })
            .unwrap();
        assert_eq!(cfg.server.host, DEFAULT_HOST);
        assert_eq!(cfg.server.port, DEFAULT_PORT);
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let mut cfg = AppConfig::default();
        let res = cfg.apply_overrides(EnvOverrides { port: Some("http".into()), ..Default::default() });
        assert!(res.is_err());
    }

    #[test]
    fn validation_requires_mongo_uri() {
        let mut cfg = AppConfig::default();
        assert!(cfg.normalize_and_validate().is_err());

        cfg.database.uri = "postgres://localhost".into();
        assert!(cfg.normalize_and_validate().is_err());

        cfg.database.uri = "mongodb://localhost:27017".into();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn zero_port_is_invalid() {
        let mut cfg = AppConfig::default();
        cfg.database.uri = "mongodb://localhost".into();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }
}
