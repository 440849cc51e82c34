use std::io::BufRead;
use todo_core::error::AppError;

/// Task text from the command line, or one line from `reader` when no
/// words were given.
pub fn resolve_task_text<R: BufRead>(words: &[String], mut reader: R) -> Result<String, AppError> {
    let text = if words.is_empty() {
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|err| AppError::io(format!("stdin: {err}")))?;
        line
    } else {
        words.join(" ")
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::EmptyInput);
    }
    Ok(trimmed.to_string())
}
