use crate::error::AppError;
use crate::list::TaskList;
use crate::model::Task;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_FILE_NAME: &str = ".todo.json";

/// Reads the task list stored at `path`.
///
/// A missing file, a zero-length file and a literal `null` all mean "no
/// tasks yet" and load as an empty list.
pub fn load_tasks(path: &Path) -> Result<TaskList, AppError> {
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "store file absent, starting empty");
            return Ok(TaskList::new());
        }
        Err(err) => return Err(AppError::io(format!("{}: {}", path.display(), err))),
    };

    let tasks = decode(&content)
        .map_err(|err| AppError::decode(format!("{}: {}", path.display(), err.message())))?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "tasks loaded");
    Ok(tasks)
}

/// Replaces the content of `path` with the full task list.
///
/// The encoded list goes to a sibling temp file first and is renamed over
/// the store file, so readers see either the old or the new list. A
/// symlinked `path` is written through: the link stays and its target is
/// replaced.
pub fn save_tasks(path: &Path, tasks: &TaskList) -> Result<(), AppError> {
    let content = encode(tasks)?;
    let target = resolve_target(path)?;

    let parent = target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent)
            .map_err(|err| AppError::io(format!("{}: {}", parent.display(), err)))?;
    }

    let existing_permissions = std::fs::metadata(&target)
        .ok()
        .map(|metadata| metadata.permissions());
    let temp_path = temp_sibling(&target);
    if let Err(err) = write_synced(&temp_path, content.as_bytes(), existing_permissions) {
        std::fs::remove_file(&temp_path).ok();
        return Err(err);
    }
    if let Err(err) = std::fs::rename(&temp_path, &target) {
        std::fs::remove_file(&temp_path).ok();
        return Err(AppError::io(format!("{}: {}", target.display(), err)));
    }

    tracing::debug!(path = %target.display(), count = tasks.len(), "tasks stored");
    Ok(())
}

/// The file a store through `path` should replace: `path` itself, or the
/// end of its symlink chain. A dangling link resolves to its target path.
fn resolve_target(path: &Path) -> Result<PathBuf, AppError> {
    let to_io = |err: std::io::Error| AppError::io(format!("{}: {}", path.display(), err));

    let is_link = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata.file_type().is_symlink(),
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(path.to_path_buf()),
        Err(err) => return Err(to_io(err)),
    };
    if !is_link {
        return Ok(path.to_path_buf());
    }

    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            let link = std::fs::read_link(path).map_err(to_io)?;
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            Ok(base.join(link))
        }
        Err(err) => Err(to_io(err)),
    }
}

pub fn encode(tasks: &TaskList) -> Result<String, AppError> {
    serde_json::to_string_pretty(tasks.tasks()).map_err(|err| AppError::encode(err.to_string()))
}

pub fn decode(content: &[u8]) -> Result<TaskList, AppError> {
    if content.is_empty() {
        return Ok(TaskList::new());
    }

    let tasks: Option<Vec<Task>> =
        serde_json::from_slice(content).map_err(|err| AppError::decode(err.to_string()))?;
    Ok(TaskList::from_tasks(tasks.unwrap_or_default()))
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_STORE_FILE_NAME.to_string());
    path.with_file_name(format!("{file_name}.tmp.{}", std::process::id()))
}

fn write_synced(
    path: &Path,
    bytes: &[u8],
    permissions: Option<std::fs::Permissions>,
) -> Result<(), AppError> {
    let to_io = |err: std::io::Error| AppError::io(format!("{}: {}", path.display(), err));

    let mut file = std::fs::File::create(path).map_err(to_io)?;

    match permissions {
        Some(permissions) => file.set_permissions(permissions).map_err(to_io)?,
        #[cfg(unix)]
        None => {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .map_err(to_io)?;
        }
        #[cfg(not(unix))]
        None => {}
    }

    file.write_all(bytes).map_err(to_io)?;
    file.sync_all().map_err(to_io)?;
    Ok(())
}
