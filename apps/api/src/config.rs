use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which `MessageStore` backend the server persists contact messages to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    File,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreKind::Memory),
            "file" => Ok(StoreKind::File),
            other => bail!("CONTACT_STORE must be 'memory' or 'file', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable is optional; startup fails only on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub resume_path: PathBuf,
    pub store_kind: StoreKind,
    pub store_path: PathBuf,
    /// Built site to serve for non-API paths. Unset in development.
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 5000,
            rust_log: "info".to_string(),
            resume_path: PathBuf::from("./attached_assets/UmeshmResume.pdf"),
            store_kind: StoreKind::Memory,
            store_path: PathBuf::from("./data/contact_messages.json"),
            static_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => defaults.port,
        };
        let store_kind = match lookup("CONTACT_STORE") {
            Some(raw) => raw.parse()?,
            None => defaults.store_kind,
        };

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            resume_path: lookup("RESUME_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.resume_path),
            store_kind,
            store_path: lookup("CONTACT_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            static_dir: lookup("STATIC_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.store_kind, StoreKind::Memory);
        assert_eq!(
            config.resume_path,
            PathBuf::from("./attached_assets/UmeshmResume.pdf")
        );
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("CONTACT_STORE", "File"),
            ("CONTACT_STORE_PATH", "/tmp/messages.json"),
            ("STATIC_DIR", "dist/public"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_kind, StoreKind::File);
        assert_eq!(config.store_path, PathBuf::from("/tmp/messages.json"));
        assert_eq!(config.static_dir, Some(PathBuf::from("dist/public")));
    }

    #[test]
    fn test_invalid_port_fails() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_unknown_store_fails() {
        assert!(load(&[("CONTACT_STORE", "postgres")]).is_err());
    }

    #[test]
    fn test_blank_static_dir_ignored() {
        assert!(load(&[("STATIC_DIR", "  ")]).unwrap().static_dir.is_none());
    }
}
