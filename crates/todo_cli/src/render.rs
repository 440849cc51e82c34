use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Alignment, Panel, Style};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use todo_core::config::Palette;
use todo_core::error::AppError;
use todo_core::list::TaskList;
use todo_core::model::Task;

const HEADERS: [&str; 5] = ["#", "TASK", "RESULT", "CREATED_AT", "COMPLETED_AT"];

pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// `02 Jan 06 15:04 -0700`, shown in `offset`.
pub fn format_timestamp(at: OffsetDateTime, offset: UtcOffset) -> Result<String, AppError> {
    let format = format_description!(
        "[day] [month repr:short] [year repr:last_two] [hour]:[minute] [offset_hour sign:mandatory][offset_minute]"
    );
    at.to_offset(offset)
        .format(format)
        .map_err(|err| AppError::encode(err.to_string()))
}

pub fn pending_summary(pending: usize) -> String {
    format!("You have {pending} pending Tasks")
}

pub fn render_table(
    tasks: &TaskList,
    pending: usize,
    palette: &Palette,
    offset: UtcOffset,
) -> Result<String, AppError> {
    let mut builder = Builder::default();
    builder.push_record(HEADERS.map(String::from));

    for (index, task) in tasks.iter() {
        builder.push_record(task_row(index, task, palette, offset)?);
    }

    let mut table = builder.build();
    table
        .with(Panel::footer(palette.pending(&pending_summary(pending))))
        .with(Style::modern())
        .modify(Rows::first(), Alignment::center())
        .modify(Rows::last(), Alignment::center());

    Ok(table.to_string())
}

fn task_row(
    index: usize,
    task: &Task,
    palette: &Palette,
    offset: UtcOffset,
) -> Result<Vec<String>, AppError> {
    let (text, result, completed) = if task.done {
        let completed = match task.completed_at {
            Some(at) => format_timestamp(at, offset)?,
            None => String::new(),
        };
        (
            palette.done(&format!("\u{2705} {}", task.text)),
            palette.done("yes"),
            completed,
        )
    } else {
        (palette.task(&task.text), palette.pending("no"), String::new())
    };

    Ok(vec![
        index.to_string(),
        text,
        result,
        format_timestamp(task.created_at, offset)?,
        completed,
    ])
}

pub fn render_json(tasks: &TaskList, pending: usize) -> Result<serde_json::Value, AppError> {
    let items = tasks
        .iter()
        .map(|(index, task)| task_json(index, task))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::json!({
        "tasks": items,
        "pending": pending,
    }))
}

/// The stored fields of `task` with its 1-based `index` added.
pub fn task_json(index: usize, task: &Task) -> Result<serde_json::Value, AppError> {
    let fields = match serde_json::to_value(task) {
        Ok(serde_json::Value::Object(fields)) => fields,
        Ok(other) => {
            return Err(AppError::encode(format!(
                "task {index} encoded as {other} instead of an object"
            )));
        }
        Err(err) => return Err(AppError::encode(format!("task {index}: {err}"))),
    };

    let mut object = serde_json::Map::new();
    object.insert("index".to_string(), index.into());
    object.extend(fields);
    Ok(serde_json::Value::Object(object))
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, pending_summary, render_json, render_table, task_json};
    use time::macros::{datetime, offset};
    use time::{Date, Month, UtcOffset};
    use todo_core::config::palette_for_theme;
    use todo_core::list::TaskList;
    use todo_core::model::Task;

    fn sample() -> TaskList {
        let mut list = TaskList::new();
        list.add_at("buy milk", datetime!(2025-12-20 08:00 UTC));
        list.add_at("pay bills", datetime!(2025-12-20 09:15 UTC));
        list.complete_at(1, datetime!(2025-12-21 18:45 UTC)).unwrap();
        list
    }

    #[test]
    fn format_timestamp_uses_short_layout() {
        let formatted = format_timestamp(datetime!(2025-12-20 08:05 UTC), UtcOffset::UTC).unwrap();
        assert_eq!(formatted, "20 Dec 25 08:05 +0000");
    }

    #[test]
    fn format_timestamp_converts_offset() {
        let formatted =
            format_timestamp(datetime!(2025-12-20 23:30 UTC), offset!(+2)).unwrap();
        assert_eq!(formatted, "21 Dec 25 01:30 +0200");
    }

    #[test]
    fn plain_table_lists_rows_and_footer() {
        let palette = palette_for_theme(Some("plain"));
        let table = render_table(&sample(), 1, &palette, UtcOffset::UTC).unwrap();

        assert!(table.contains("COMPLETED_AT"));
        assert!(table.contains("\u{2705} buy milk"));
        assert!(table.contains("21 Dec 25 18:45 +0000"));
        assert!(table.contains("pay bills"));
        assert!(table.contains(&pending_summary(1)));
        assert!(!table.contains('\x1b'));
    }

    #[test]
    fn colored_table_marks_status() {
        let palette = palette_for_theme(None);
        let table = render_table(&sample(), 1, &palette, UtcOffset::UTC).unwrap();

        assert!(table.contains(palette.done));
        assert!(table.contains(palette.pending));
        assert!(table.contains("yes"));
    }

    #[test]
    fn empty_table_still_has_footer() {
        let palette = palette_for_theme(Some("plain"));
        let table = render_table(&TaskList::new(), 0, &palette, UtcOffset::UTC).unwrap();

        assert!(table.contains("TASK"));
        assert!(table.contains("You have 0 pending Tasks"));
    }

    #[test]
    fn json_carries_index_and_pending() {
        let value = render_json(&sample(), 1).unwrap();

        assert_eq!(value["pending"], 1);
        assert_eq!(value["tasks"][0]["index"], 1);
        assert_eq!(value["tasks"][0]["result"], true);
        assert_eq!(value["tasks"][1]["task"], "pay bills");
        assert!(value["tasks"][1].get("completed").is_none());
    }

    #[test]
    fn task_json_merges_stored_fields() {
        let list = sample();
        let value = task_json(2, list.get(2).unwrap()).unwrap();

        assert_eq!(value["index"], 2);
        assert_eq!(value["created"], "2025-12-20T09:15:00Z");
    }

    #[test]
    fn unencodable_timestamp_is_an_encode_error() {
        let before_year_zero = Date::from_calendar_date(-1, Month::January, 1)
            .unwrap()
            .midnight()
            .assume_utc();
        let task = Task::new("ancient", before_year_zero);

        let err = task_json(1, &task).unwrap_err();
        assert_eq!(err.code(), "encode_error");

        let mut list = TaskList::new();
        list.add_at("ancient", before_year_zero);
        assert_eq!(render_json(&list, 1).unwrap_err().code(), "encode_error");
    }
}
