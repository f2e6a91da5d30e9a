//! Environment-driven configuration.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub struct Config {
    pub bind_addr: SocketAddr,
    /// Optional JSON rate card overriding the built-in catalog. The numbers
    /// are business-owned and change independently of the code.
    pub catalog_path: Option<PathBuf>,
    /// Price at recommended tier escalations instead of only surfacing them.
    pub auto_apply_upgrades: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;
        let catalog_path = env::var("CATALOG_PATH").ok().map(PathBuf::from);
        let auto_apply_upgrades = env::var("AUTO_APPLY_UPGRADES")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self { bind_addr, catalog_path, auto_apply_upgrades })
    }
}
