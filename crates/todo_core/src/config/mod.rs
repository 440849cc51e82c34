use crate::error::AppError;
use crate::storage::json_store::DEFAULT_STORE_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_DIR_NAME: &str = "todo";
pub const CONFIG_ENV_VAR: &str = "TODO_CONFIG_PATH";
pub const STORE_ENV_VAR: &str = "TODO_STORE_PATH";
pub const NO_COLOR_ENV_VAR: &str = "NO_COLOR";

/// ANSI escapes used when rendering the task table.
#[derive(Debug, Clone)]
pub struct Palette {
    pub task: &'static str,
    pub done: &'static str,
    pub pending: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn task(&self, text: &str) -> String {
        self.paint(self.task, text)
    }

    pub fn done(&self, text: &str) -> String {
        self.paint(self.done, text)
    }

    pub fn pending(&self, text: &str) -> String {
        self.paint(self.pending, text)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if color.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", color, text, self.reset)
        }
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    match theme.and_then(canonical_theme_name).as_deref() {
        Some("plain") => Palette {
            task: "",
            done: "",
            pending: "",
            reset: "",
        },
        _ => Palette {
            task: "\x1b[1;34m",
            done: "\x1b[1;32m",
            pending: "\x1b[1;31m",
            reset: "\x1b[0m",
        },
    }
}

pub fn canonical_theme_name(raw: &str) -> Option<String> {
    let trimmed = canonical_key(raw);
    if trimmed.is_empty() {
        return Some("default".into());
    }

    match trimmed.as_str() {
        "color" | "colour" | "colors" => Some("default".to_string()),
        "none" | "no_color" | "mono" | "monochrome" => Some("plain".to_string()),
        other => Some(other.to_string()),
    }
}

/// Lowercases and collapses any run of non-alphanumerics to one `_`.
pub fn canonical_key(raw: &str) -> String {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    cleaned.trim_matches('_').to_string()
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub theme: Option<String>,
    pub store_path: Option<PathBuf>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_input("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_input("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }
}

/// Loads the config file, falling back to defaults when it is missing or
/// unreadable. A broken file is reported through `ConfigLoad::error`.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

pub fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable config");
            ConfigLoad {
                config: Config::default(),
                error: Some(err),
            }
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::decode(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    config.theme = config.theme.and_then(|name| canonical_theme_name(&name));
    Ok(config)
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(theme) = overrides.theme.as_deref()
        && let Some(normalized) = canonical_theme_name(theme)
    {
        merged.theme = Some(normalized);
    }
    if let Some(store_path) = overrides.store_path.as_ref() {
        merged.store_path = Some(store_path.clone());
    }
    merged
}

/// Picks the task file: explicit flag, then `TODO_STORE_PATH`, then the
/// config file, then `.todo.json` in the working directory.
pub fn resolve_store_path(config: &Config, flag: Option<&Path>) -> PathBuf {
    let env_path = std::env::var(STORE_ENV_VAR)
        .ok()
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from);
    resolve_store_path_from(config, flag, env_path)
}

fn resolve_store_path_from(
    config: &Config,
    flag: Option<&Path>,
    env_path: Option<PathBuf>,
) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or(env_path)
        .or_else(|| config.store_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE_NAME))
}

/// Theme to render with; `NO_COLOR` wins over any configured theme.
pub fn effective_theme(config: &Config) -> Option<String> {
    let no_color = std::env::var_os(NO_COLOR_ENV_VAR).is_some_and(|value| !value.is_empty());
    if no_color {
        Some("plain".to_string())
    } else {
        config.theme.clone()
    }
}
