//! Site configuration at ~/.config/parlamento/config.toml

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::calendar::{Locale, WeekStart};
use crate::constants::{DEFAULT_DURATION, DEFAULT_STEP_DELAY, DEFAULT_THRESHOLD};
use crate::error::{ParlamentoError, ParlamentoResult};
use crate::reveal::Threshold;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub calendar: CalendarSettings,

    #[serde(default)]
    pub reveal: RevealSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarSettings {
    #[serde(default)]
    pub week_start: WeekStart,

    #[serde(default)]
    pub locale: Locale,
}

/// Defaults applied to sections that don't set their own timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealSettings {
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default = "default_step_delay", with = "humantime_str")]
    pub step_delay: Duration,

    #[serde(default = "default_duration", with = "humantime_str")]
    pub duration: Duration,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_step_delay() -> Duration {
    DEFAULT_STEP_DELAY
}

fn default_duration() -> Duration {
    DEFAULT_DURATION
}

impl Default for RevealSettings {
    fn default() -> Self {
        RevealSettings {
            threshold: DEFAULT_THRESHOLD,
            step_delay: DEFAULT_STEP_DELAY,
            duration: DEFAULT_DURATION,
        }
    }
}

impl RevealSettings {
    pub fn threshold(&self) -> ParlamentoResult<Threshold> {
        Threshold::new(self.threshold)
    }
}

/// Durations written the way people write them: "150ms", "1s 200ms".
mod humantime_str {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(D::Error::custom)
    }
}

impl SiteConfig {
    pub fn config_path() -> ParlamentoResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ParlamentoError::Config("Could not determine config directory".into()))?
            .join("parlamento");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first if
    /// there is no file yet.
    pub fn load() -> ParlamentoResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load `path` (optional) layered under `PARLAMENTO__SECTION__KEY`
    /// environment overrides.
    pub fn load_from(path: &Path) -> ParlamentoResult<Self> {
        let config: SiteConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("PARLAMENTO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ParlamentoError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ParlamentoError::Config(e.to_string()))?;

        config.reveal.threshold()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> ParlamentoResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ParlamentoError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create a config file with every option commented out.
    pub fn create_default_config(path: &Path) -> ParlamentoResult<()> {
        let contents = format!(
            "\
# parlamento configuration

[calendar]
# First column of the month grid: \"sunday\" or \"monday\"
# week_start = \"sunday\"

# Month and weekday names: \"es\" or \"en\"
# locale = \"es\"

[reveal]
# Visible fraction of a section before it reveals, in (0, 1]
# threshold = {}

# Delay added per element within a section
# step_delay = \"{}\"

# Length of each element's transition
# duration = \"{}\"
",
            DEFAULT_THRESHOLD,
            humantime::format_duration(DEFAULT_STEP_DELAY),
            humantime::format_duration(DEFAULT_DURATION),
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ParlamentoError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ParlamentoError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
