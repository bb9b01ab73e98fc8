//! Command-line and environment configuration.
//!
//! Every option can come from a flag or its `USRAPI_*` environment variable;
//! [`Settings`] is the resolved form the rest of the crate uses.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const APP_DIR_NAME: &str = "usrapi-manager";
pub const KEYBINDS_FILE: &str = "keybinds.conf";

/// TUI to view and manage user records served by a REST collection endpoint.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "usrapi-manager", version, about, long_about = None)]
pub struct Cli {
    /// API base URL; the collection lives at `<base-url>/users`.
    #[arg(long, env = "USRAPI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds. Requests wait indefinitely when unset.
    #[arg(long, env = "USRAPI_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Directory holding `keybinds.conf`.
    #[arg(long, env = "USRAPI_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Write logs to this file. Logging is off when unset.
    #[arg(long, env = "USRAPI_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `usrapi_manager=trace`.
    #[arg(long, env = "USRAPI_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub config_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Self {
        let config_dir = cli.config_dir.unwrap_or_else(default_config_dir);
        Self {
            base_url: cli.base_url,
            timeout: cli.timeout_secs.map(Duration::from_secs),
            config_dir,
            log_file: cli.log_file,
            log_level: cli.log_level,
        }
    }

    pub fn keybinds_path(&self) -> PathBuf {
        self.config_dir.join(KEYBINDS_FILE)
    }
}

/// `$XDG_CONFIG_HOME/usrapi-manager` (or the platform equivalent), else the working directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}
