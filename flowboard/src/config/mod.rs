//! Configuration system for the Flowboard service.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/flowboard/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use crate::advisor::DEFAULT_ADVISOR_TIMEOUT;
use crate::chat::DEFAULT_USER;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    service: ServiceFileConfig,
    advisor: AdvisorFileConfig,
    board: BoardFileConfig,
}

/// `[service]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServiceFileConfig {
    socket_path: Option<PathBuf>,
}

/// `[advisor]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct AdvisorFileConfig {
    socket_path: Option<PathBuf>,
    timeout_secs: Option<u64>,
}

/// `[board]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct BoardFileConfig {
    demo_data: Option<bool>,
    chat_user: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Unix socket path the board service listens on.
    pub socket_path: PathBuf,
    /// Unix socket path of the advisor, if one is configured.
    pub advisor_socket: Option<PathBuf>,
    /// How long to wait for an advisor reply.
    pub advisor_timeout: Duration,
    /// Whether to start with the built-in demo board and chat log.
    pub demo_data: bool,
    /// Sender name used when a frontend posts chat without a user.
    pub chat_user: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            socket_path: std::env::temp_dir().join("flowboard.sock"),
            advisor_socket: None,
            advisor_timeout: DEFAULT_ADVISOR_TIMEOUT,
            demo_data: true,
            chat_user: DEFAULT_USER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// CLI args and env vars are parsed via `clap`. If `--config` is given
    /// and the file does not exist, returns an error. If no `--config` is
    /// given, the default path (`~/.config/flowboard/config.toml`) is tried
    /// and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve an `AppConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. This is separated from `load()` to
    /// enable unit testing without CLI parsing.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            socket_path: cli
                .socket
                .clone()
                .or_else(|| file.service.socket_path.clone())
                .unwrap_or(defaults.socket_path),
            advisor_socket: cli
                .advisor_socket
                .clone()
                .or_else(|| file.advisor.socket_path.clone()),
            advisor_timeout: cli
                .advisor_timeout_secs
                .or(file.advisor.timeout_secs)
                .map_or(defaults.advisor_timeout, Duration::from_secs),
            demo_data: if cli.no_demo_data {
                false
            } else {
                file.board.demo_data.unwrap_or(defaults.demo_data)
            },
            chat_user: cli
                .chat_user
                .clone()
                .or_else(|| file.board.chat_user.clone())
                .unwrap_or(defaults.chat_user),
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Kanban board service with chat and priority advisor")]
pub struct CliArgs {
    /// Unix socket path to listen on.
    #[arg(long, env = "FLOWBOARD_SOCKET")]
    pub socket: Option<PathBuf>,

    /// Unix socket path of the priority advisor.
    #[arg(long, env = "FLOWBOARD_ADVISOR_SOCKET")]
    pub advisor_socket: Option<PathBuf>,

    /// Advisor reply timeout in seconds.
    #[arg(long)]
    pub advisor_timeout_secs: Option<u64>,

    /// Start with an empty board instead of demo data.
    #[arg(long)]
    pub no_demo_data: bool,

    /// Default chat sender name.
    #[arg(long)]
    pub chat_user: Option<String>,

    /// Path to config file (default: `~/.config/flowboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "FLOWBOARD_LOG")]
    pub log_level: String,

    /// Path to log file (default: stdout).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available — use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join("flowboard").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
