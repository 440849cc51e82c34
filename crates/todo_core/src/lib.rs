pub mod config;
pub mod error;
pub mod list;
pub mod model;
pub mod storage;
pub mod task_api;

pub use error::AppError;
pub use list::TaskList;
pub use model::{Task, TaskStatus};
