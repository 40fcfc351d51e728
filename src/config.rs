/*
Startup configuration, read once from the environment.
*/

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const ADDR_VAR: &str = "DISPATCH_ADDR";
pub const DB_VAR: &str = "DISPATCH_DB";
pub const SEED_VAR: &str = "DISPATCH_SEED";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DB_PATH: &str = "data/roster.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    /// Seed for reproducible tie-breaks; `None` uses the thread RNG.
    pub rng_seed: Option<u64>,
}

impl ServerConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr.trim().parse().map_err(|e| AppError::Config {
            key: ADDR_VAR,
            reason: format!("{addr:?}: {e}"),
        })?;

        let db_path = get(DB_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let rng_seed = get(SEED_VAR)
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|e| AppError::Config {
                    key: SEED_VAR,
                    reason: format!("{raw:?}: {e}"),
                })
            })
            .transpose()?;

        Ok(ServerConfig { bind_addr, db_path, rng_seed })
    }
}
