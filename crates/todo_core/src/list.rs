use crate::error::AppError;
use crate::model::Task;
use time::OffsetDateTime;

/// Ordered task list addressed by 1-based positions.
///
/// Positions are not stable identifiers: removing a task shifts every task
/// after it down by one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Yields `(position, task)` pairs with 1-based positions.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(offset, task)| (offset + 1, task))
    }

    pub fn get(&self, index: usize) -> Result<&Task, AppError> {
        let offset = self.offset(index)?;
        Ok(&self.tasks[offset])
    }

    pub fn add(&mut self, text: &str) -> &Task {
        self.add_at(text, OffsetDateTime::now_utc())
    }

    pub fn add_at(&mut self, text: &str, now: OffsetDateTime) -> &Task {
        self.tasks.push(Task::new(text, now));
        tracing::debug!(index = self.tasks.len(), "task added");
        &self.tasks[self.tasks.len() - 1]
    }

    pub fn complete(&mut self, index: usize) -> Result<&Task, AppError> {
        self.complete_at(index, OffsetDateTime::now_utc())
    }

    /// Marks the task at `index` done. Completing an already-completed task
    /// succeeds again and moves its completion time to `now`.
    pub fn complete_at(&mut self, index: usize, now: OffsetDateTime) -> Result<&Task, AppError> {
        let offset = self.offset(index)?;
        let task = &mut self.tasks[offset];
        task.mark_done(now);
        tracing::debug!(index, "task completed");
        Ok(task)
    }

    pub fn delete(&mut self, index: usize) -> Result<Task, AppError> {
        let offset = self.offset(index)?;
        let removed = self.tasks.remove(offset);
        tracing::debug!(index, remaining = self.tasks.len(), "task removed");
        Ok(removed)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_pending()).count()
    }

    fn offset(&self, index: usize) -> Result<usize, AppError> {
        if index == 0 || index > self.tasks.len() {
            return Err(AppError::invalid_index(index, self.tasks.len()));
        }
        Ok(index - 1)
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self::from_tasks(tasks)
    }
}
