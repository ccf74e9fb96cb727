//! Layered configuration: defaults, TOML file, environment

use std::path::Path;

use clap::ValueEnum;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use kpi::KpiConfig;
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when no file is given
pub const DEFAULT_CONFIG_FILE: &str = "parking-kpi";

/// Environment variable prefix, e.g. `PARKING_KPI__KPI__MIN_RECALL=0.7`
pub const ENV_PREFIX: &str = "PARKING_KPI";

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Max level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Named KPI thresholds the configuration file and environment build on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    #[default]
    Default,
    Strict,
    Lenient,
}

impl Preset {
    pub fn kpi_config(self) -> KpiConfig {
        match self {
            Preset::Default => KpiConfig::default(),
            Preset::Strict => KpiConfig::strict(),
            Preset::Lenient => KpiConfig::lenient(),
        }
    }
}

#[derive(Serialize)]
struct PresetLayer {
    kpi: KpiConfig,
}

/// Evaluator settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log: LogSettings,
    pub kpi: KpiConfig,
    /// Include per-frame results in the printed summary
    pub include_frames: bool,
}

impl Settings {
    /// Load `preset`, then `path` (or the optional default file), then the
    /// environment. Later layers override earlier ones.
    pub fn load(path: Option<&Path>, preset: Preset) -> Result<Self, ConfigError> {
        let builder = Self::preset_builder(preset)?;
        let builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );
        Self::build(builder)
    }

    fn preset_builder(preset: Preset) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let layer = Config::try_from(&PresetLayer {
            kpi: preset.kpi_config(),
        })?;
        Ok(Config::builder().add_source(layer))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use association::AlgoType;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        with_preset(Preset::Default, toml)
    }

    fn with_preset(preset: Preset, toml: &str) -> Settings {
        let builder = Settings::preset_builder(preset).unwrap();
        Settings::build(builder.add_source(File::from_str(toml, FileFormat::Toml))).unwrap()
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = from_toml("");
        assert_eq!(settings.log.level, "info");
        assert!(!settings.include_frames);
        assert_eq!(settings.kpi.min_precision, 0.9);
        assert_eq!(settings.kpi.association.hangout_threshold_m, 0.6);
    }

    #[test]
    fn test_nested_overrides() {
        let settings = from_toml(
            r#"
            include_frames = true

            [log]
            level = "debug"
            json = true

            [kpi]
            min_recall = 0.7
            detection_source = "all"

            [kpi.association]
            algo = "rectangle"
            angle_threshold_deg = 6.0

            [kpi.association.boundary]
            close_boundary = true
            "#,
        );
        assert!(settings.include_frames);
        assert_eq!(settings.log.level, "debug");
        assert!(settings.log.json);
        assert_eq!(settings.kpi.min_recall, 0.7);
        assert_eq!(settings.kpi.association.algo, AlgoType::Rectangle);
        assert_eq!(settings.kpi.association.angle_threshold_deg, 6.0);
        assert_eq!(settings.kpi.association.hangout_threshold_m, 0.6);
        assert!(settings.kpi.association.boundary.close_boundary);
    }

    #[test]
    fn test_strict_preset_with_file_override() {
        let settings = with_preset(
            Preset::Strict,
            r#"
            [kpi]
            min_recall = 0.5
            "#,
        );
        assert_eq!(settings.kpi.association.hangout_threshold_m, 0.3);
        assert_eq!(settings.kpi.association.angle_threshold_deg, 2.0);
        assert_eq!(settings.kpi.min_precision, 0.95);
        assert_eq!(settings.kpi.min_recall, 0.5);
    }

    #[test]
    fn test_lenient_preset() {
        let settings = with_preset(Preset::Lenient, "");
        assert_eq!(settings.kpi.association.hangout_threshold_m, 1.0);
        assert_eq!(settings.kpi.min_recall, 0.6);
        assert_eq!(settings.kpi.max_mean_hangout_m, 0.5);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = Path::new("/nonexistent/parking-kpi.toml");
        assert!(Settings::load(Some(path), Preset::Default).is_err());
    }
}
