//! Settings discovery and effective configuration resolution.
//!
//! Mtxsync reads `mtxsync.toml|yaml|yml` from the working root and merges
//! it with environment variables and CLI flags into an `Effective` config.
//! Defaults:
//! - `host`: `localhost` (API URL derived as
//!   `http://<host>:9997/v3/config/paths/list`)
//! - `config_path`: `./mediamtx.yml`
//! - `username`/`password`: `admin`/`adminpass`
//! - `interval`: 60 seconds
//! - `output`: `human`
//!
//! Overrides precedence: CLI > environment > config file > defaults. The
//! environment names match the original deployment: `MEDIAMTX_HOST`,
//! `MEDIAMTX_API_URL`, `MEDIAMTX_CONFIG_PATH`, `MEDIAMTX_USERNAME`,
//! `MEDIAMTX_PASSWORD`, `UPDATE_INTERVAL`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_CONFIG_PATH: &str = "./mediamtx.yml";
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "adminpass";
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `mtxsync.toml|yaml`.
pub struct MtxsyncConfig {
    pub host: Option<String>,
    pub api_url: Option<String>,
    pub config_path: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub interval_secs: Option<u64>,
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub api_url: String,
    pub config_path: PathBuf,
    pub username: String,
    pub password: String,
    pub interval: Duration,
    pub output: String,
}

/// CLI-provided overrides, all optional.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub api_url: Option<String>,
    pub config_path: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub interval_secs: Option<u64>,
    pub output: Option<String>,
}

/// Load `MtxsyncConfig` from `mtxsync.toml` or `mtxsync.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<MtxsyncConfig> {
    let toml_path = root.join("mtxsync.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: MtxsyncConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["mtxsync.yaml", "mtxsync.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: MtxsyncConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// Resolve `Effective` by merging CLI flags, environment variables, the
/// discovered config file, and defaults.
pub fn resolve_effective(root: &Path, cli: &CliOverrides) -> Effective {
    let cfg = load_config(root).unwrap_or_default();

    let host = cli
        .host
        .clone()
        .or_else(|| env_var("MEDIAMTX_HOST"))
        .or(cfg.host)
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    // An explicit URL wins over one derived from the host.
    let api_url = cli
        .api_url
        .clone()
        .or_else(|| env_var("MEDIAMTX_API_URL"))
        .or(cfg.api_url)
        .unwrap_or_else(|| format!("http://{}:9997/v3/config/paths/list", host));

    let config_path = cli
        .config_path
        .clone()
        .or_else(|| env_var("MEDIAMTX_CONFIG_PATH"))
        .or(cfg.config_path)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let username = cli
        .username
        .clone()
        .or_else(|| env_var("MEDIAMTX_USERNAME"))
        .or(cfg.username)
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

    let password = cli
        .password
        .clone()
        .or_else(|| env_var("MEDIAMTX_PASSWORD"))
        .or(cfg.password)
        .unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

    // A malformed UPDATE_INTERVAL falls through to the next source.
    let interval_secs = cli
        .interval_secs
        .or_else(|| env_var("UPDATE_INTERVAL").and_then(|s| s.parse().ok()))
        .or(cfg.interval_secs)
        .unwrap_or(DEFAULT_INTERVAL_SECS);

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    Effective {
        api_url,
        config_path: PathBuf::from(config_path),
        username,
        password,
        interval: Duration::from_secs(interval_secs),
        output,
    }
}
