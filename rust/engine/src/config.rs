use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cumulative score at which a player leaves the game.
pub const DEFAULT_ELIMINATION_THRESHOLD: i32 = 100;

pub const ENV_CONFIG_PATH: &str = "CHINCHON_CONFIG";
pub const ENV_ELIMINATION_THRESHOLD: &str = "CHINCHON_ELIMINATION_THRESHOLD";
pub const ENV_SEED: &str = "CHINCHON_SEED";

/// House rules the engine enforces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesConfig {
    /// Players whose points reach this value are eliminated after a meld
    pub elimination_threshold: i32,
    /// Seed for the default shuffler; `None` uses [`crate::deck::DEFAULT_SEED`]
    pub seed: Option<u64>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            elimination_threshold: DEFAULT_ELIMINATION_THRESHOLD,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub elimination_threshold: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            elimination_threshold: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: RulesConfig,
    pub sources: ConfigSources,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    elimination_threshold: Option<i32>,
    #[serde(default)]
    seed: Option<u64>,
}

/// Loads the rules from the file named by `CHINCHON_CONFIG` (if set) and the process
/// environment.
pub fn load() -> Result<RulesConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let file = match std::env::var(ENV_CONFIG_PATH) {
        Ok(path) if !path.is_empty() => Some(read_file(path)?),
        _ => None,
    };
    resolve(file.as_deref(), |key| std::env::var(key).ok())
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String, ConfigError> {
    Ok(fs::read_to_string(path)?)
}

/// Layers defaults, then the TOML text in `file`, then values returned by `env`.
///
/// # Examples
///
/// ```
/// use chinchon_engine::config::{resolve, ValueSource};
///
/// let resolved = resolve(Some("elimination_threshold = 30"), |_| None).unwrap();
/// assert_eq!(resolved.config.elimination_threshold, 30);
/// assert_eq!(resolved.sources.elimination_threshold, ValueSource::File);
/// ```
pub fn resolve<F>(file: Option<&str>, env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = RulesConfig::default();
    let mut sources = ConfigSources::default();

    if let Some(text) = file {
        let f: FileConfig = toml::from_str(text)?;
        if let Some(v) = f.elimination_threshold {
            cfg.elimination_threshold = v;
            sources.elimination_threshold = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(threshold) = env(ENV_ELIMINATION_THRESHOLD).filter(|s| !s.is_empty()) {
        cfg.elimination_threshold = threshold
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid("elimination threshold must be an integer".into()))?;
        sources.elimination_threshold = ValueSource::Env;
    }
    if let Some(seed) = env(ENV_SEED).filter(|s| !s.is_empty()) {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("seed must be an unsigned integer".into()))?,
        );
        sources.seed = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn validate(cfg: &RulesConfig) -> Result<(), ConfigError> {
    if cfg.elimination_threshold <= 0 {
        return Err(ConfigError::Invalid(
            "elimination_threshold must be > 0".into(),
        ));
    }
    Ok(())
}
