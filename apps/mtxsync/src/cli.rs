//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mtxsync",
    version,
    about = "Mirror MediaMTX API paths into the local mediamtx.yml"
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for syncing and connectivity checks.
pub enum Commands {
    /// Show version
    Version,
    /// Run a single synchronization cycle
    Once {
        #[command(flatten)]
        opts: CommonOpts,
    },
    /// Poll the API forever, rewriting the paths section each interval
    Run {
        #[command(flatten)]
        opts: CommonOpts,
    },
    /// Probe API connectivity and credentials
    Check {
        #[command(flatten)]
        opts: CommonOpts,
    },
}

#[derive(Args, Debug, Default)]
/// Connection and target options shared by all commands.
pub struct CommonOpts {
    /// MediaMTX host (API URL is derived from it)
    #[arg(long)]
    pub host: Option<String>,
    /// Full API URL, overriding the host-derived one
    #[arg(long)]
    pub api_url: Option<String>,
    /// Target mediamtx.yml to rewrite
    #[arg(long)]
    pub config_path: Option<String>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    /// Seconds between cycles (run command)
    #[arg(long)]
    pub interval: Option<u64>,
    /// Output format: human|json
    #[arg(long)]
    pub output: Option<String>,
}

impl CommonOpts {
    pub fn to_overrides(&self) -> crate::config::CliOverrides {
        crate::config::CliOverrides {
            host: self.host.clone(),
            api_url: self.api_url.clone(),
            config_path: self.config_path.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            interval_secs: self.interval,
            output: self.output.clone(),
        }
    }
}
