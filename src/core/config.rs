//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.sentichat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{Level, LevelFilter, log};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Locale;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SentichatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub locale: Option<Locale>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "sentichat.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub locale: Locale,
    pub connect_timeout: Duration,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

// ============================================================================
// Startup Log
// ============================================================================

/// Log records produced while loading config, before the logger exists.
///
/// The log file and level come from the config itself, so `main` replays
/// these once `WriteLogger` is initialized.
#[derive(Debug, Default)]
pub struct StartupLog {
    records: Vec<(Level, String)>,
}

impl StartupLog {
    fn push(&mut self, level: Level, message: String) {
        self.records.push((level, message));
    }

    pub fn records(&self) -> &[(Level, String)] {
        &self.records
    }

    /// Sends every buffered record to the `log` facade, oldest first.
    pub fn replay(self) {
        for (level, message) in self.records {
            log!(level, "{}", message);
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.sentichat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".sentichat").join("config.toml"))
}

/// Load config from `~/.sentichat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SentichatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(startup: &mut StartupLog) -> Result<SentichatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            startup.push(
                Level::Warn,
                "Could not determine home directory, using default config".to_string(),
            );
            return Ok(SentichatConfig::default());
        }
    };

    if !path.exists() {
        startup.push(
            Level::Info,
            format!("No config file found, generating default at {}", path.display()),
        );
        generate_default_config(&path, startup);
        return Ok(SentichatConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    startup.push(Level::Info, format!("Loaded config from {}", path.display()));
    startup.push(Level::Debug, format!("Config: {:?}", config));
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<SentichatConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path, startup: &mut StartupLog) {
    let default_content = r#"# sentichat configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# locale = "ja"                      # "ja" or "en"  (env: SENTICHAT_LOCALE)
# log_file = "sentichat.log"
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"

# [server]
# base_url = "http://localhost:5000" # env: SENTICHAT_BASE_URL
# connect_timeout_secs = 10
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            startup.push(
                Level::Warn,
                format!("Failed to create config directory: {}", e),
            );
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        startup.push(Level::Warn, format!("Failed to write default config: {}", e));
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Values taken from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub locale: Option<Locale>,
    pub log_file: Option<String>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &SentichatConfig,
    cli: &CliOverrides,
    startup: &mut StartupLog,
) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok(), startup)
}

fn resolve_with_env(
    config: &SentichatConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
    startup: &mut StartupLog,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("SENTICHAT_BASE_URL"))
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Locale: CLI → env → config → default. Unknown env values are ignored.
    let locale = cli
        .locale
        .or_else(|| {
            env("SENTICHAT_LOCALE").and_then(|value| match value.to_lowercase().as_str() {
                "ja" => Some(Locale::Ja),
                "en" => Some(Locale::En),
                other => {
                    startup.push(
                        Level::Warn,
                        format!("Ignoring unknown SENTICHAT_LOCALE '{}'", other),
                    );
                    None
                }
            })
        })
        .or(config.general.locale)
        .unwrap_or_default();

    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level.parse().unwrap_or_else(|_| {
            startup.push(
                Level::Warn,
                format!("Unknown log_level '{}', using {}", level, DEFAULT_LOG_LEVEL),
            );
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    ResolvedConfig {
        base_url,
        locale,
        connect_timeout: Duration::from_secs(
            config
                .server
                .connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        ),
        log_file: PathBuf::from(
            cli.log_file
                .clone()
                .or_else(|| config.general.log_file.clone())
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        ),
        log_level,
    }
}
