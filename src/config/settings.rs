use crate::source::directory::DEFAULT_PATTERNS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "MATCH_REPORT_CONFIG";
pub const SOURCE_DIR_ENV: &str = "MATCH_REPORT_SOURCE_DIR";
pub const SENDER_ENV: &str = "MATCH_REPORT_SENDER";
pub const STORE_DIR_ENV: &str = "MATCH_REPORT_STORE_DIR";

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "match-report.yaml";

const DEFAULT_SOURCE_DIR: &str = "inbox";
const DEFAULT_STORE_DIR: &str = "store";

/// On-disk YAML layout. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub store: StoreSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    pub dir: Option<PathBuf>,
    pub sender: Option<String>,
    pub patterns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    pub dir: Option<PathBuf>,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub sender: Option<String>,
    pub store_dir: Option<PathBuf>,
}

/// Fully resolved settings for an ingest run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source_dir: PathBuf,
    pub sender: Option<String>,
    pub patterns: Vec<String>,
    pub store_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            sender: None,
            patterns: DEFAULT_PATTERNS.iter().map(|p| (*p).to_owned()).collect(),
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
        }
    }
}

impl Config {
    /// Resolve defaults, config file, environment and CLI overrides, in that order.
    pub fn resolve(overrides: &Overrides) -> Result<Self, String> {
        resolve_with_env(overrides, |key| std::env::var(key).ok())
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(dir) = file.source.dir {
            self.source_dir = dir;
        }
        if let Some(sender) = file.source.sender {
            self.sender = Some(sender);
        }
        if let Some(patterns) = file.source.patterns {
            self.patterns = patterns;
        }
        if let Some(dir) = file.store.dir {
            self.store_dir = dir;
        }
    }
}

/// Parse a YAML config file.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, String> {
    let content = fs::read_to_string(path)
        .map_err(|error| format!("failed to read config '{}': {error}", path.display()))?;
    parse_config(&content)
        .map_err(|error| format!("invalid config '{}': {error}", path.display()))
}

fn parse_config(content: &str) -> Result<ConfigFile, String> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(content).map_err(|error| error.to_string())
}

fn resolve_with_env<F>(overrides: &Overrides, get_env: F) -> Result<Config, String>
where
    F: Fn(&str) -> Option<String>,
{
    let env = |key: &str| get_env(key).filter(|value| !value.trim().is_empty());
    let mut config = Config::default();

    if let Some(path) = config_path(overrides, &env) {
        config.apply_file(load_config_file(&path)?);
    }

    if let Some(dir) = env(SOURCE_DIR_ENV) {
        config.source_dir = PathBuf::from(dir);
    }
    if let Some(sender) = env(SENDER_ENV) {
        config.sender = Some(sender);
    }
    if let Some(dir) = env(STORE_DIR_ENV) {
        config.store_dir = PathBuf::from(dir);
    }

    if let Some(dir) = &overrides.source_dir {
        config.source_dir = dir.clone();
    }
    if let Some(sender) = &overrides.sender {
        config.sender = Some(sender.clone());
    }
    if let Some(dir) = &overrides.store_dir {
        config.store_dir = dir.clone();
    }

    Ok(config)
}

// An explicitly named config must exist; the working-directory default is optional.
fn config_path<F>(overrides: &Overrides, env: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = &overrides.config_path {
        return Some(path.clone());
    }
    if let Some(path) = env(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }

    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.is_file().then_some(default)
}
