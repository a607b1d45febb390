use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use shared::domain::SortMode;
use storage::DEFAULT_STORAGE_KEY;

/// Optional settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "roster.toml";
const ENV_PREFIX: &str = "APP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub data_file: PathBuf,
    pub storage_key: String,
    pub default_sort: SortMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            default_sort: SortMode::default(),
        }
    }
}

pub fn default_data_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|base| base.join("roster"))
        .unwrap_or_else(|| PathBuf::from(".roster"))
        .join("storage.json")
}

/// Defaults, then `settings_file` if present, then `APP__*` environment variables.
pub fn load_settings(settings_file: &Path) -> anyhow::Result<Settings> {
    let env = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__");
    build_settings(settings_file, env)
}

fn build_settings(settings_file: &Path, env: Environment) -> anyhow::Result<Settings> {
    let defaults = Settings::default();
    let raw = Config::builder()
        .set_default("data_file", defaults.data_file.to_string_lossy().into_owned())?
        .set_default("storage_key", defaults.storage_key)?
        .set_default("default_sort", defaults.default_sort.as_str())?
        .add_source(File::from(settings_file).required(false))
        .add_source(env)
        .build()
        .with_context(|| format!("failed to read settings from '{}'", settings_file.display()))?;

    let mut settings: Settings = raw
        .try_deserialize()
        .context("invalid roster settings")?;
    settings.data_file = data_file_override(&settings.data_file);
    if settings.storage_key.trim().is_empty() {
        settings.storage_key = DEFAULT_STORAGE_KEY.into();
    }
    Ok(settings)
}

/// Blank falls back to the default location; a leading `~/` expands to the home dir.
pub fn normalize_data_file(raw: &str) -> PathBuf {
    let raw = raw.trim();

    if raw.is_empty() {
        return default_data_file();
    }

    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    PathBuf::from(raw)
}

/// `--data-file` value: normalized when it is UTF-8, otherwise used verbatim.
pub fn data_file_override(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(raw) => normalize_data_file(raw),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
