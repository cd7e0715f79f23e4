// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_ENV: &str = "LEADS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "leads.toml";

/// Application settings. Every field has a default, so an empty or missing
/// config file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: String,
    pub schema_path: String,
    pub bind_addr: String,
    pub max_workers: usize,
    /// Statuses that count as a closed sale in the dashboard report.
    pub sold_statuses: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: "leads.sqlite3".into(),
            schema_path: "sql/schema.sql".into(),
            bind_addr: "127.0.0.1:3000".into(),
            max_workers: 8,
            sold_statuses: vec!["Satıldı".into(), "sold".into(), "closed".into()],
        }
    }
}

impl AppConfig {
    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Config file named by `LEADS_CONFIG` (or `leads.toml`), then
    /// `LEADS_DB` / `LEADS_BIND` overrides.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load(Path::new(&path))?;

        if let Ok(db) = std::env::var("LEADS_DB") {
            config.database_path = db;
        }
        if let Ok(bind) = std::env::var("LEADS_BIND") {
            config.bind_addr = bind;
        }

        Ok(config)
    }
}
