//! Mapping between board columns and the project's `Status` field.

use cardstack_protocol::ARCHIVE_COLUMN;

/// Returns the board column for a `Status` option name.
///
/// Matching is case-insensitive; unknown or missing statuses land in
/// `BACKLOG`.
///
/// # Examples
///
/// ```
/// use cardstack_github::status::status_to_column;
///
/// assert_eq!(status_to_column(Some("In Progress")), "PROGRESS");
/// assert_eq!(status_to_column(Some("to do")), "TODO");
/// assert_eq!(status_to_column(Some("Blocked")), "BACKLOG");
/// assert_eq!(status_to_column(None), "BACKLOG");
/// ```
#[must_use]
pub fn status_to_column(status: Option<&str>) -> &'static str {
    let Some(status) = status else {
        return "BACKLOG";
    };
    match status.trim().to_lowercase().as_str() {
        "todo" | "to do" => "TODO",
        "in progress" => "PROGRESS",
        "in review" | "review" => "REVIEW",
        "done" => "DONE",
        "closed" | "archive" | "archived" => ARCHIVE_COLUMN,
        _ => "BACKLOG",
    }
}

/// Returns the `Status` option name for a board column.
///
/// # Examples
///
/// ```
/// use cardstack_github::status::column_to_status;
///
/// assert_eq!(column_to_status("REVIEW"), "In Review");
/// assert_eq!(column_to_status("SOMEDAY"), "Backlog");
/// ```
#[must_use]
pub fn column_to_status(column: &str) -> &'static str {
    match column {
        "TODO" => "Todo",
        "PROGRESS" => "In Progress",
        "REVIEW" => "In Review",
        "DONE" => "Done",
        ARCHIVE_COLUMN => "Archive",
        _ => "Backlog",
    }
}
