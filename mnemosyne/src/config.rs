use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::models::IngestProfile;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Bearer tokens accepted by the v1 API. Empty means the API is open.
    pub api_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub snapshot_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Profile applied when a request does not name one.
    pub default_profile: IngestProfile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("MNEMOSYNE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_env_or("MNEMOSYNE_PORT", 8000),
                api_keys: env::var("MNEMOSYNE_API_KEYS")
                    .map(|keys| {
                        keys.split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            store: StoreConfig {
                path: env::var("MNEMOSYNE_STORE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("data/memories.json")),
                snapshot_dir: env::var("MNEMOSYNE_SNAPSHOT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("data/snapshots")),
            },
            ingest: IngestConfig {
                default_profile: parse_env_or("MNEMOSYNE_DEFAULT_PROFILE", IngestProfile::Default),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
