//! Game configuration: defaults, validation and loading from disk.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{GameError, GameResult},
    grid,
};

/// Directory under the user's config directory holding `config.toml`.
pub const CONFIG_DIR: &str = "matchgrid";
/// Prefix for environment overrides, e.g. `MATCHGRID__GAME__COLUMNS=4`.
pub const ENV_PREFIX: &str = "MATCHGRID";

const DEFAULT_CONFIG: &str = r#"# MatchGrid settings. Every key is optional.

[game]
card_width = 50
card_height = 50
columns = 2
rows = 2
time_limit = 60
# "light" or "dark"
theme = "light"

[timing]
mismatch_settle_ms = 600
result_delay_ms = 600
# Set to 0 to skip the opening preview.
preview_ms = 1200
"#;

/// Colour scheme of the play area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// Lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Stylesheet a web front-end should load for this theme.
    pub fn stylesheet(self) -> &'static str {
        match self {
            Theme::Light => "css/themes/light.css",
            Theme::Dark => "css/themes/dark.css",
        }
    }

    /// Caption shown next to the theme switch.
    pub fn label(self) -> String {
        format!("{} theme", self.as_str())
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Player-facing settings used when a game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Card width in pixels.
    pub card_width: u32,
    /// Card height in pixels.
    pub card_height: u32,
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Countdown length in seconds.
    pub time_limit: u32,
    /// Colour scheme.
    pub theme: Theme,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            card_width: 50,
            card_height: 50,
            columns: 2,
            rows: 2,
            time_limit: 60,
            theme: Theme::Light,
        }
    }
}

impl SessionConfig {
    /// Reject zero sizes, a zero time limit and grids with an odd card count.
    pub fn validate(&self) -> GameResult<()> {
        if self.card_width == 0 || self.card_height == 0 {
            return Err(GameError::InvalidArgument(format!(
                "card size must be positive, got {}x{}px",
                self.card_width, self.card_height
            )));
        }
        if self.time_limit == 0 {
            return Err(GameError::InvalidArgument(
                "time limit must be positive".to_string(),
            ));
        }
        grid::validate_dimensions(self.columns, self.rows)
    }
}

/// Durations of the deferred settle steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// How long a mismatched pair stays face up.
    pub mismatch_settle_ms: u64,
    /// Delay between the end of a game and the result dialog.
    pub result_delay_ms: u64,
    /// How long every card is shown when a grid is dealt. Zero disables it.
    pub preview_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            mismatch_settle_ms: 600,
            result_delay_ms: 600,
            preview_ms: 1200,
        }
    }
}

impl TimingConfig {
    pub(crate) fn mismatch_settle(&self) -> Duration {
        Duration::from_millis(self.mismatch_settle_ms)
    }

    pub(crate) fn result_delay(&self) -> Duration {
        Duration::from_millis(self.result_delay_ms)
    }

    pub(crate) fn preview(&self) -> Option<Duration> {
        (self.preview_ms > 0).then(|| Duration::from_millis(self.preview_ms))
    }
}

/// Everything read from `config.toml` and the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for the session settings.
    pub game: SessionConfig,
    /// Settle delays.
    pub timing: TimingConfig,
}

impl AppConfig {
    /// Load from the default config file with environment overrides.
    pub fn load() -> Result<Self> {
        Self::from_sources(Some(config_path().as_path()), Some(ENV_PREFIX))
    }

    /// Load from an optional file and an optional environment prefix.
    ///
    /// Missing files and keys fall back to defaults.
    pub fn from_sources(path: Option<&Path>, env_prefix: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        if let Some(prefix) = env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let config: AppConfig = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("failed to parse configuration")?;
        config
            .game
            .validate()
            .context("configured game settings are invalid")?;
        Ok(config)
    }
}

/// Default location of `config.toml`.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write the commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    ensure_default_config_at(&path)?;
    Ok(path)
}

/// Write the default config to `path` unless a file is already there.
pub fn ensure_default_config_at(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote default configuration");
    Ok(())
}
