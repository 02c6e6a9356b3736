//! Bucket categorization and row formatting.
//!
//! The board is a pure view over the task list: partition into the three
//! buckets, sort each one, and format rows. Both the CLI table and the TUI
//! lists render from the same `Board`.

use chrono::NaiveDate;

use crate::fields::{format_priority, Bucket};
use crate::task::Task;

/// Placeholder line for an empty bucket.
pub const EMPTY_BUCKET: &str = "no tasks";

/// The task list partitioned into display buckets.
///
/// Completed tasks go to `completed` regardless of date. Open tasks dated
/// exactly `today` go to `today`; every other open task lands in `upcoming`,
/// including past-dated ones. Overdue tasks are deliberately not split out
/// into their own bucket or flagged.
#[derive(Debug, Default)]
pub struct Board {
    pub today: Vec<Task>,
    pub upcoming: Vec<Task>,
    pub completed: Vec<Task>,
}

impl Board {
    /// Partition and sort the full task list.
    ///
    /// `today` and `upcoming` sort ascending by date, `completed` descending.
    /// Ties keep list order (stable sort).
    pub fn build(tasks: &[Task], today: NaiveDate) -> Self {
        let mut board = Board::default();
        for t in tasks {
            if t.completed {
                board.completed.push(t.clone());
            } else if t.date == today {
                board.today.push(t.clone());
            } else {
                board.upcoming.push(t.clone());
            }
        }
        board.today.sort_by_key(|t| t.date);
        board.upcoming.sort_by_key(|t| t.date);
        board.completed.sort_by_key(|t| std::cmp::Reverse(t.date));
        board
    }

    pub fn bucket(&self, bucket: Bucket) -> &[Task] {
        match bucket {
            Bucket::Today => &self.today,
            Bucket::Upcoming => &self.upcoming,
            Bucket::Completed => &self.completed,
        }
    }

}

/// Format a date for display, day/month/year.
pub fn format_date(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

/// One-line row text for a task: id label, name, date, priority.
pub fn format_row(t: &Task) -> String {
    let mark = if t.completed { "x" } else { " " };
    format!(
        "[{}] #{} {}  {}  ({})",
        mark,
        t.id,
        t.name,
        format_date(t.date),
        format_priority(t.priority)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;

    fn task(id: u64, date: &str, completed: bool) -> Task {
        Task {
            id,
            name: format!("task {id}"),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            priority: Priority::Low,
            completed,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn task_dated_today_lands_in_today_bucket() {
        let today = date("2024-01-10");
        let board = Board::build(&[task(1, "2024-01-10", false)], today);
        assert_eq!(board.today.len(), 1);
        assert!(board.upcoming.is_empty());
    }

    #[test]
    fn completed_wins_over_date() {
        let today = date("2024-01-10");
        let board = Board::build(&[task(1, "2024-01-10", true)], today);
        assert!(board.today.is_empty());
        assert_eq!(board.completed.len(), 1);
    }

    #[test]
    fn overdue_tasks_merge_into_upcoming() {
        let today = date("2024-01-10");
        let board = Board::build(
            &[task(1, "2024-01-01", false), task(2, "2024-02-01", false)],
            today,
        );
        assert_eq!(board.upcoming.len(), 2);
    }

    #[test]
    fn upcoming_sorts_ascending_by_date() {
        let today = date("2024-01-01");
        let tasks = [
            task(1, "2024-01-10", false),
            task(2, "2024-01-05", false),
            task(3, "2024-01-20", false),
        ];
        let board = Board::build(&tasks, today);
        let dates: Vec<NaiveDate> = board.upcoming.iter().map(|t| t.date).collect();
        assert_eq!(
            dates,
            vec![date("2024-01-05"), date("2024-01-10"), date("2024-01-20")]
        );
    }

    #[test]
    fn completed_sorts_descending_by_date() {
        let today = date("2024-01-01");
        let tasks = [task(1, "2024-02-01", true), task(2, "2024-03-01", true)];
        let board = Board::build(&tasks, today);
        assert_eq!(board.completed[0].date, date("2024-03-01"));
        assert_eq!(board.completed[1].date, date("2024-02-01"));
    }

    #[test]
    fn date_renders_day_month_year() {
        assert_eq!(format_date(date("2024-01-05")), "05/01/2024");
    }

    #[test]
    fn row_shows_id_date_and_priority() {
        let row = format_row(&task(3, "2024-01-05", false));
        assert!(row.contains("#3"));
        assert!(row.contains("05/01/2024"));
        assert!(row.contains("(low)"));
        assert!(row.starts_with("[ ]"));
    }
}
