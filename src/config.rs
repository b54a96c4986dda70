//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dtviz/dtviz.toml`
//! 3. Local config: `<dir>/.dtviz.toml` (usually the working directory)
//! 4. Environment variables: `DTVIZ_*` prefix, `__` between nested keys

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::Domain;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// Step playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay between animation steps in milliseconds
    pub interval_ms: u64,
    /// Start playing as soon as a trace is shown
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1500,
            autoplay: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawPlaybackConfig {
    pub interval_ms: Option<u64>,
    pub autoplay: Option<bool>,
}

/// Raw settings for intermediate parsing.
///
/// `None` means the layer did not mention the key and the lower layer wins.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_domain: Option<Domain>,
    pub format: Option<OutputFormat>,
    pub strict_input: Option<bool>,
    pub color: Option<bool>,
    pub playback: RawPlaybackConfig,
}

/// Unified configuration for dtviz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Scenario used when a command does not name one
    pub default_domain: Domain,
    pub format: OutputFormat,
    /// Refuse out-of-range attributes instead of classifying them
    pub strict_input: bool,
    pub color: bool,
    pub playback: PlaybackConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_domain: Domain::Student,
            format: OutputFormat::Text,
            strict_input: true,
            color: true,
            playback: PlaybackConfig::default(),
        }
    }
}

/// Get the XDG config directory for dtviz.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dtviz").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("dtviz.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".dtviz.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it names a key.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_domain: overlay.default_domain.unwrap_or(self.default_domain),
            format: overlay.format.unwrap_or(self.format),
            strict_input: overlay.strict_input.unwrap_or(self.strict_input),
            color: overlay.color.unwrap_or(self.color),
            playback: PlaybackConfig {
                interval_ms: overlay
                    .playback
                    .interval_ms
                    .unwrap_or(self.playback.interval_ms),
                autoplay: overlay.playback.autoplay.unwrap_or(self.playback.autoplay),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.dtviz.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current, None)
    }

    /// Apply DTVIZ_* environment variables as explicit overrides.
    ///
    /// `source` replaces the process environment, which keeps tests hermetic.
    pub fn apply_env_overrides(
        mut settings: Self,
        source: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("DTVIZ")
                    .prefix_separator("_")
                    .separator("__")
                    .source(source),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("default_domain") {
            settings.default_domain = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("DTVIZ_DEFAULT_DOMAIN: {e}"),
            })?;
        }
        if let Ok(val) = config.get_string("format") {
            settings.format = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("DTVIZ_FORMAT: {e}"),
            })?;
        }
        if let Ok(val) = config.get_string("strict_input") {
            settings.strict_input = parse_flag("DTVIZ_STRICT_INPUT", &val)?;
        }
        if let Ok(val) = config.get_string("color") {
            settings.color = parse_flag("DTVIZ_COLOR", &val)?;
        }
        if let Ok(val) = config.get_string("playback.interval_ms") {
            settings.playback.interval_ms =
                val.trim().parse().map_err(|e| ApplicationError::Config {
                    message: format!("DTVIZ_PLAYBACK__INTERVAL_MS: {e}"),
                })?;
        }
        if let Ok(val) = config.get_string("playback.autoplay") {
            settings.playback.autoplay = parse_flag("DTVIZ_PLAYBACK__AUTOPLAY", &val)?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# dtviz configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/dtviz/dtviz.toml
#   Local:  ./.dtviz.toml
#   Env:    DTVIZ_* environment variables, e.g. DTVIZ_PLAYBACK__INTERVAL_MS=800

# Scenario used when a command does not name one: "student" or "cardiology"
# default_domain = "student"

# Output format: "text" or "json"
# format = "text"

# Refuse attributes outside their documented ranges
# strict_input = true

# Colored terminal output
# color = true

[playback]
# Delay between animation steps
# interval_ms = 1500

# Play the trace immediately instead of printing it at once
# autoplay = true
"#
        .to_string()
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, ApplicationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ApplicationError::Config {
            message: format!("{name}: expected a boolean, got '{other}'"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn given_defaults_when_created_then_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.default_domain, Domain::Student);
        assert_eq!(settings.format, OutputFormat::Text);
        assert!(settings.strict_input);
        assert_eq!(settings.playback.interval_ms, 1500);
        assert!(settings.playback.autoplay);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unnamed_keys() {
        let overlay: RawSettings = toml::from_str(
            r#"
default_domain = "cardiologist"

[playback]
interval_ms = 400
"#,
        )
        .unwrap();

        let merged = Settings::default().merge_with(&overlay);

        assert_eq!(merged.default_domain, Domain::Cardiology);
        assert_eq!(merged.playback.interval_ms, 400);
        assert!(merged.playback.autoplay);
        assert_eq!(merged.format, OutputFormat::Text);
    }

    #[test]
    fn given_env_source_when_applying_overrides_then_replaces_values() {
        let settings = Settings::apply_env_overrides(
            Settings::default(),
            env(&[
                ("DTVIZ_DEFAULT_DOMAIN", "cardiology"),
                ("DTVIZ_FORMAT", "json"),
                ("DTVIZ_STRICT_INPUT", "false"),
                ("DTVIZ_PLAYBACK__INTERVAL_MS", "250"),
                ("DTVIZ_PLAYBACK__AUTOPLAY", "no"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.default_domain, Domain::Cardiology);
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(!settings.strict_input);
        assert_eq!(settings.playback.interval_ms, 250);
        assert!(!settings.playback.autoplay);
    }

    #[test]
    fn given_bad_env_value_when_applying_overrides_then_config_error() {
        let result = Settings::apply_env_overrides(
            Settings::default(),
            env(&[("DTVIZ_DEFAULT_DOMAIN", "astrology")]),
        );
        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }

    #[test]
    fn given_settings_when_rendering_toml_then_round_trips() {
        let settings = Settings {
            default_domain: Domain::Cardiology,
            ..Settings::default()
        };
        let text = settings.to_toml().unwrap();
        assert!(text.contains("default_domain = \"cardiology\""));
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.default_domain.is_none());
    }
}
