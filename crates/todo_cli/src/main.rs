use clap::Parser;
use clap::error::ErrorKind;
use std::io;
use std::path::PathBuf;
use todo_cli::cli::{Cli, Command, collect_config_overrides};
use todo_cli::{input, render};
use todo_core::config::{self, Config};
use todo_core::error::AppError;
use todo_core::model::Task;
use todo_core::task_api;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "TODO_LOG";
const INVALID_COMMAND: &str = "invalid command";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or(INVALID_COMMAND).trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn load_config(cli: &Cli) -> Result<Config, AppError> {
    let overrides = collect_config_overrides(&cli.config_override)?;
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        eprintln!("WARNING: {err}");
    }
    Ok(config::merge_overrides(&loaded.config, &overrides))
}

fn print_task_json(index: usize, task: &Task) -> Result<(), AppError> {
    println!("{}", render::task_json(index, task)?);
    Ok(())
}

fn run_command(cli: Cli, command: Command) -> Result<(), AppError> {
    let config = load_config(&cli)?;
    let path: PathBuf = config::resolve_store_path(&config, cli.file.as_deref());
    tracing::debug!(path = %path.display(), "using task file");

    match command {
        Command::Add { text } => {
            let text = input::resolve_task_text(&text, io::stdin().lock())?;
            let added = task_api::add_task(&path, &text)?;
            if cli.json {
                print_task_json(added.index, &added.task)?;
            } else {
                println!("Added task {}: {}", added.index, added.task.text);
            }
        }
        Command::Complete { index } => {
            let task = task_api::complete_task(&path, index)?;
            if cli.json {
                print_task_json(index, &task)?;
            } else {
                println!("Completed task {}: {}", index, task.text);
            }
        }
        Command::Remove { index } => {
            let task = task_api::delete_task(&path, index)?;
            if cli.json {
                print_task_json(index, &task)?;
            } else {
                println!("Removed task {}: {}", index, task.text);
            }
        }
        Command::List => {
            let result = task_api::list_tasks(&path)?;
            if cli.json {
                println!("{}", render::render_json(&result.tasks, result.pending)?);
            } else {
                let theme = config::effective_theme(&config);
                let palette = config::palette_for_theme(theme.as_deref());
                let table = render::render_table(
                    &result.tasks,
                    result.pending,
                    &palette,
                    render::local_offset(),
                )?;
                println!("{table}");
            }
        }
    }

    Ok(())
}

fn main() {
    let mut cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => {
            println!("{INVALID_COMMAND}");
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose);

    let Some(command) = cli.command.take() else {
        println!("{INVALID_COMMAND}");
        return;
    };

    if let Err(err) = run_command(cli, command) {
        tracing::debug!(code = err.code(), "command failed");
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
