use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todo_core::config::{ConfigOverrides, canonical_key};
use todo_core::error::AppError;

#[derive(Parser, Debug)]
#[command(name = "todo", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Task file to read and write (defaults to .todo.json)
    #[arg(long, value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: todo add buy milk
    /// Example: echo "pay bills" | todo add
    Add {
        /// Task text; read from stdin when omitted
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Mark a task as completed
    ///
    /// Example: todo complete 1
    #[command(visible_alias = "done", alias = "completed")]
    Complete {
        /// 1-based position shown by `todo list`
        index: usize,
    },
    /// Remove a task; later tasks move up one position
    ///
    /// Example: todo remove 2
    #[command(visible_aliases = ["delete", "rm"])]
    Remove {
        /// 1-based position shown by `todo list`
        index: usize,
    },
    /// Print all tasks with a pending-count footer
    ///
    /// Example: todo list
    #[command(visible_alias = "ls")]
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    StorePath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, AppError> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| AppError::invalid_input("override must be in KEY=VALUE format"))?;

    let key = canonical_key(key_raw);
    let target = match key.as_str() {
        "" => return Err(AppError::invalid_input("override key cannot be empty")),
        "theme" => ConfigOverrideTarget::Theme,
        "store_path" | "store" | "file" => ConfigOverrideTarget::StorePath,
        other => {
            return Err(AppError::invalid_input(format!(
                "unknown config field '{other}'"
            )));
        }
    };

    let value = value_raw.trim();
    if value.is_empty() {
        return Err(AppError::invalid_input(format!("{key} override needs a value")));
    }

    Ok(ParsedConfigOverride {
        target,
        value: value.to_string(),
    })
}

/// Folds every `--config-override` into one set; later values win.
pub fn collect_config_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::StorePath => {
                overrides.store_path = Some(PathBuf::from(parsed.value));
            }
        }
    }
    Ok(overrides)
}
