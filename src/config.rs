use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::DEFAULT_TIER_THRESHOLD_TOKENS;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

/// One configured price tier, quoted in USD per million tokens
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ModelPriceConfig {
    pub(crate) key: String,
    pub(crate) input_low: f64,
    /// Defaults to `input_low` (flat pricing)
    #[serde(default)]
    pub(crate) input_high: Option<f64>,
    pub(crate) output_low: f64,
    #[serde(default)]
    pub(crate) output_high: Option<f64>,
    #[serde(default = "default_threshold")]
    pub(crate) threshold_tokens: u64,
}

fn default_threshold() -> u64 {
    DEFAULT_TIER_THRESHOLD_TOKENS
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PricingConfig {
    #[serde(default)]
    pub(crate) replace_defaults: bool,
    #[serde(default)]
    pub(crate) models: Vec<ModelPriceConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) max_content_length: Option<usize>,
    #[serde(default)]
    pub(crate) max_depth: Option<usize>,
    #[serde(default)]
    pub(crate) pricing: PricingConfig,
}

/// Result of config discovery, reported once logging is up
#[derive(Debug)]
pub(crate) enum ConfigSource {
    Loaded(PathBuf),
    Invalid { path: PathBuf, message: String },
    Missing,
}

impl Config {
    /// Load an explicitly requested config file; any failure is an error
    pub(crate) fn load_from(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|message| AppError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Try the default locations in order of priority. A file that fails to
    /// parse is skipped.
    pub(crate) fn discover() -> (Self, ConfigSource) {
        let mut source = ConfigSource::Missing;

        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match Self::parse(&content) {
                    Ok(config) => return (config, ConfigSource::Loaded(path)),
                    Err(message) => {
                        if matches!(source, ConfigSource::Missing) {
                            source = ConfigSource::Invalid { path, message };
                        }
                    }
                }
            }
        }

        (Self::default(), source)
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str::<Config>(content).map_err(|e| e.to_string())
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/msgcost/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("msgcost").join("config.toml"));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support/msgcost/config.toml)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("msgcost").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.msgcost.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".msgcost.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("msgcost")));
    }

    #[test]
    fn parse_empty_is_default() {
        let config = Config::parse("").unwrap();
        assert!(!config.debug);
        assert!(config.pricing.models.is_empty());
        assert!(!config.pricing.replace_defaults);
    }

    #[test]
    fn parse_full_config() {
        let config = Config::parse(
            r#"
debug = true
color = "never"
max_content_length = 200
max_depth = 3

[pricing]
replace_defaults = true

[[pricing.models]]
key = "gemini-2.5-pro"
input_low = 1.25
input_high = 2.5
output_low = 10.0
output_high = 15.0

[[pricing.models]]
key = "gemini-2.0-flash"
input_low = 0.1
output_low = 0.4
threshold_tokens = 128000
"#,
        )
        .unwrap();
        assert!(config.debug);
        assert!(matches!(config.color, Some(ConfigColorMode::Never)));
        assert_eq!(config.max_content_length, Some(200));
        assert_eq!(config.max_depth, Some(3));
        assert!(config.pricing.replace_defaults);
        assert_eq!(config.pricing.models.len(), 2);
        assert_eq!(config.pricing.models[0].threshold_tokens, 200_000);
        assert_eq!(config.pricing.models[1].key, "gemini-2.0-flash");
        assert_eq!(config.pricing.models[1].input_high, None);
        assert_eq!(config.pricing.models[1].threshold_tokens, 128_000);
    }

    #[test]
    fn parse_rejects_bad_color() {
        assert!(Config::parse(r#"color = "sometimes""#).is_err());
    }

    #[test]
    fn load_from_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "debug = \"yes\"").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }
}
