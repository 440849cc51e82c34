//! One load → mutate → store cycle per command.
//!
//! Every function takes the store path explicitly. Mutations are applied to
//! the freshly loaded list and written back only when they succeed, so a
//! rejected command never touches the file.

use crate::error::AppError;
use crate::list::TaskList;
use crate::model::Task;
use crate::storage::json_store;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedTask {
    pub index: usize,
    pub task: Task,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResult {
    pub tasks: TaskList,
    pub pending: usize,
}

pub fn add_task(path: &Path, text: &str) -> Result<AddedTask, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::EmptyInput);
    }

    let mut tasks = json_store::load_tasks(path)?;
    let task = tasks.add(trimmed).clone();
    let index = tasks.len();
    json_store::save_tasks(path, &tasks)?;

    Ok(AddedTask { index, task })
}

pub fn complete_task(path: &Path, index: usize) -> Result<Task, AppError> {
    let mut tasks = json_store::load_tasks(path)?;
    let completed = tasks.complete(index)?.clone();
    json_store::save_tasks(path, &tasks)?;

    Ok(completed)
}

pub fn delete_task(path: &Path, index: usize) -> Result<Task, AppError> {
    let mut tasks = json_store::load_tasks(path)?;
    let removed = tasks.delete(index)?;
    json_store::save_tasks(path, &tasks)?;

    Ok(removed)
}

pub fn list_tasks(path: &Path) -> Result<ListResult, AppError> {
    let tasks = json_store::load_tasks(path)?;
    let pending = tasks.pending_count();
    Ok(ListResult { tasks, pending })
}
