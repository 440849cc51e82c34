use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One entry of the task list.
///
/// Field names on disk (`task`, `result`, `created`, `completed`) are kept
/// stable so existing `.todo.json` files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task")]
    pub text: String,
    #[serde(rename = "result", default)]
    pub done: bool,
    #[serde(rename = "created", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(
        rename = "completed",
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl Task {
    pub fn new(text: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            text: text.into(),
            done: false,
            created_at,
            completed_at: None,
        }
    }

    pub fn status(&self) -> TaskStatus {
        if self.done {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.done
    }

    /// Marks the task done, replacing any earlier completion time.
    pub(crate) fn mark_done(&mut self, at: OffsetDateTime) {
        self.done = true;
        self.completed_at = Some(at);
    }
}
