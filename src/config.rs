use crate::arbitrary::ArbitraryPreset;
use crate::bridge::LoadRequest;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "classlint/config.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Catalog file describing the design system. The embedded catalog is used when unset.
    pub catalog: Option<PathBuf>,
    /// Required class prefix, overriding the catalog's.
    pub prefix: Option<String>,
    pub cache_ttl_seconds: u64,
    pub disabled_rules: Vec<String>,
    /// Keep whitespace runs containing a line break.
    pub allow_multiline: bool,
    pub max_fix_passes: usize,
    /// Additional `utility-[value]` equivalences for `no-unnecessary-arbitrary-value`.
    pub arbitrary_presets: Vec<ArbitraryPreset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: None,
            prefix: None,
            cache_ttl_seconds: 5,
            disabled_rules: Vec::new(),
            allow_multiline: true,
            max_fix_passes: 10,
            arbitrary_presets: Vec::new(),
        }
    }
}

impl Config {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// The design system this configuration asks for.
    pub fn load_request(&self) -> LoadRequest {
        LoadRequest {
            catalog: self.catalog.clone(),
            prefix: self.prefix.clone(),
        }
    }

    /// Replaces values that cannot be meant literally with their defaults.
    fn with_fallbacks(self) -> Self {
        let default_config = Config::default();
        Config {
            max_fix_passes: if self.max_fix_passes == 0 {
                log::warn!(
                    "max_fix_passes = 0 would disable fixing; using {}",
                    default_config.max_fix_passes
                );
                default_config.max_fix_passes
            } else {
                self.max_fix_passes
            },
            prefix: self.prefix.filter(|prefix| !prefix.is_empty()),
            ..self
        }
    }
}

/// Loads `path` if given, the per-user configuration otherwise.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_from(path),
        None => load_or_create(),
    }
}

/// Loads an explicit configuration file. The file is never rewritten.
pub fn load_from(path: &Path) -> Result<Config> {
    let config_string = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config '{}'", path.display()))?;
    let config: Config = toml::from_str(&config_string)
        .with_context(|| format!("Invalid config '{}'", path.display()))?;
    Ok(config.with_fallbacks())
}

/// Loads `$XDG_CONFIG_HOME/classlint/config.toml`, creating it with defaults on first use.
pub fn load_or_create() -> Result<Config> {
    let xdg_dirs = xdg::BaseDirectories::new();
    let config_path = xdg_dirs.place_config_file(CONFIG_FILE)?;
    load_or_create_at(&config_path)
}

fn load_or_create_at(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        let default_config = Config::default();
        let toml_string = toml::to_string_pretty(&default_config)?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, toml_string)?;

        log::info!("Created default config at: {}", config_path.display());
        return Ok(default_config);
    }

    let config_string = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&config_string)
        .with_context(|| format!("Invalid config '{}'", config_path.display()))?;
    let final_config = config.with_fallbacks();

    // Write the complete config back so users can see every available option.
    let final_toml_string = toml::to_string_pretty(&final_config)?;
    if final_toml_string != config_string {
        fs::write(config_path, final_toml_string)?;
    }

    Ok(final_config)
}
