//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--data`, `--theme`, `--settle-ms`, etc.)
//! 2. Explicit `--config <file>`
//! 3. `$FCAB_CONFIG` environment variable (path to config file)
//! 4. Project-local `.fcab.toml` in the current working directory
//! 5. Global `~/.config/fcab/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Folder id shown at startup (overridden by CLI positional arg).
    pub initial_folder: Option<String>,
    /// Ask before deleting an item.
    pub confirm_delete: Option<bool>,
    /// Redraw interval in milliseconds.
    pub tick_rate_ms: Option<u64>,
}

/// Folder data source settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SourceConfig {
    /// JSON file with folder listings. Without one the built-in listing is used.
    pub data_file: Option<PathBuf>,
    /// Artificial delay before the built-in listing is returned.
    pub fetch_delay_ms: Option<u64>,
}

/// Upload action settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct UploadConfig {
    /// How long the upload control stays busy after the upload returns.
    pub settle_ms: Option<u64>,
    /// Simulated upload latency.
    pub latency_ms: Option<u64>,
}

/// Log file settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: Option<String>,
    /// Directory for the rolling log file.
    pub directory: Option<PathBuf>,
}

/// Color overrides for the custom theme.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub row_selected_bg: Option<String>,
    pub row_selected_fg: Option<String>,
    pub folder_fg: Option<String>,
    pub file_fg: Option<String>,
    pub version_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub dialog_border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub source: SourceConfig,
    pub upload: UploadConfig,
    pub logging: LoggingConfig,
    pub theme: ThemeConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

pub const DEFAULT_INITIAL_FOLDER: &str = "root";
pub const DEFAULT_TICK_RATE_MS: u64 = 16;
pub const DEFAULT_FETCH_DELAY_MS: u64 = 1;
/// Default time the upload control stays busy after the upload returns.
pub const DEFAULT_SETTLE_MS: u64 = 2000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path, which is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("FCAB_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".fcab.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fcab").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
///
/// Config is loaded before logging starts, hence stderr.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                initial_folder: other
                    .general
                    .initial_folder
                    .clone()
                    .or(self.general.initial_folder),
                confirm_delete: other.general.confirm_delete.or(self.general.confirm_delete),
                tick_rate_ms: other.general.tick_rate_ms.or(self.general.tick_rate_ms),
            },
            source: SourceConfig {
                data_file: other.source.data_file.clone().or(self.source.data_file),
                fetch_delay_ms: other.source.fetch_delay_ms.or(self.source.fetch_delay_ms),
            },
            upload: UploadConfig {
                settle_ms: other.upload.settle_ms.or(self.upload.settle_ms),
                latency_ms: other.upload.latency_ms.or(self.upload.latency_ms),
            },
            logging: LoggingConfig {
                level: other.logging.level.clone().or(self.logging.level),
                directory: other.logging.directory.clone().or(self.logging.directory),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: other.theme.custom.clone().or(self.theme.custom),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    pub fn initial_folder(&self) -> &str {
        self.general
            .initial_folder
            .as_deref()
            .unwrap_or(DEFAULT_INITIAL_FOLDER)
    }

    /// Whether to confirm before delete. Off by default: delete is immediate.
    pub fn confirm_delete(&self) -> bool {
        self.general.confirm_delete.unwrap_or(false)
    }

    pub fn tick_rate_ms(&self) -> u64 {
        self.general.tick_rate_ms.unwrap_or(DEFAULT_TICK_RATE_MS)
    }

    pub fn data_file(&self) -> Option<&Path> {
        self.source.data_file.as_deref()
    }

    pub fn fetch_delay_ms(&self) -> u64 {
        self.source.fetch_delay_ms.unwrap_or(DEFAULT_FETCH_DELAY_MS)
    }

    pub fn settle_ms(&self) -> u64 {
        self.upload.settle_ms.unwrap_or(DEFAULT_SETTLE_MS)
    }

    pub fn upload_latency_ms(&self) -> u64 {
        self.upload.latency_ms.unwrap_or(0)
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Log directory, defaulting to `<data_local_dir>/fcab/logs`.
    pub fn log_directory(&self) -> PathBuf {
        self.logging.directory.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("fcab")
                .join("logs")
        })
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
