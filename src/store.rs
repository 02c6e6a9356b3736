//! Task storage.
//!
//! The store holds one flat, ordered list of tasks (insertion order =
//! creation order). Every mutation is load-mutate-save: the full list is read
//! fresh from the backing file, changed in memory, and written back whole. No
//! cache survives across operations, so whatever a caller renders after a
//! mutation always reflects the real on-disk order.
//!
//! The file is not coordinated across processes. Two concurrent writers race
//! and the later save wins; that is a documented limitation, not something
//! this layer papers over.

#[cfg(test)]
use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use chrono::{Duration, Local, NaiveDate};

use crate::task::Task;

/// Storage seam for the task list.
///
/// `JsonStore` is the real file-backed implementation; `MemStore` substitutes
/// in tests. Mutations address tasks by id; an id no task carries is a silent
/// no-op.
pub trait TaskStore {
    /// Read the full task list. Absent or unreadable state loads as empty.
    fn load(&self) -> Vec<Task>;

    /// Append one task at the end of the list.
    fn append(&self, task: Task) -> io::Result<()>;

    /// Remove the task with the given id, if present.
    fn remove(&self, id: u64) -> io::Result<()>;

    /// Flip the completion flag of the task with the given id, if present.
    fn toggle(&self, id: u64) -> io::Result<()>;
}

/// Generate the next task id for a freshly loaded list.
pub fn next_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

/// File-backed store: one JSON array of tasks at a fixed path.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }

    /// Persist the full list, overwriting prior content.
    /// Atomic-ish write via temp + rename.
    pub fn save(&self, tasks: &[Task]) -> io::Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(tasks).map_err(io::Error::other)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

impl TaskStore for JsonStore {
    fn load(&self) -> Vec<Task> {
        if !self.path.exists() {
            return Vec::new();
        }
        let mut buf = String::new();
        match File::open(&self.path).and_then(|mut f| f.read_to_string(&mut buf)) {
            // Corrupt content degrades to an empty list. First run and a
            // mangled file are indistinguishable on purpose.
            Ok(_) => serde_json::from_str(&buf).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    fn append(&self, task: Task) -> io::Result<()> {
        let mut tasks = self.load();
        tasks.push(task);
        self.save(&tasks)
    }

    fn remove(&self, id: u64) -> io::Result<()> {
        let mut tasks = self.load();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(());
        }
        self.save(&tasks)
    }

    fn toggle(&self, id: u64) -> io::Result<()> {
        let mut tasks = self.load();
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => t.completed = !t.completed,
            None => return Ok(()),
        }
        self.save(&tasks)
    }
}

/// In-memory store for tests. Same contract, no file.
#[cfg(test)]
#[derive(Default)]
pub struct MemStore {
    tasks: RefCell<Vec<Task>>,
}

#[cfg(test)]
impl MemStore {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        MemStore {
            tasks: RefCell::new(tasks),
        }
    }
}

#[cfg(test)]
impl TaskStore for MemStore {
    fn load(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    fn append(&self, task: Task) -> io::Result<()> {
        self.tasks.borrow_mut().push(task);
        Ok(())
    }

    fn remove(&self, id: u64) -> io::Result<()> {
        self.tasks.borrow_mut().retain(|t| t.id != id);
        Ok(())
    }

    fn toggle(&self, id: u64) -> io::Result<()> {
        if let Some(t) = self.tasks.borrow_mut().iter_mut().find(|t| t.id == id) {
            t.completed = !t.completed;
        }
        Ok(())
    }
}

/// Parse due-date input.
///
/// Accepts:
/// - "today", "tomorrow"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD" format
pub fn parse_date_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;

    fn task(id: u64, name: &str, date: &str, completed: bool) -> Task {
        Task {
            id,
            name: name.into(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            priority: Priority::Medium,
            completed,
        }
    }

    fn scratch_store(tag: &str) -> (JsonStore, PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "todo_board_test_{}_{}.json",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        (JsonStore::new(&path), path)
    }

    #[test]
    fn load_missing_file_is_empty() {
        let (store, _path) = scratch_store("missing");
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_corrupt_file_is_empty() {
        let (store, path) = scratch_store("corrupt");
        fs::write(&path, "{not json").unwrap();
        assert!(store.load().is_empty());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_load_round_trip() {
        let (store, path) = scratch_store("roundtrip");
        let tasks = vec![
            task(1, "write report", "2024-01-10", false),
            task(2, "file taxes", "2024-04-30", true),
        ];
        store.save(&tasks).unwrap();
        assert_eq!(store.load(), tasks);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn append_grows_by_one_and_preserves_others() {
        let (store, path) = scratch_store("append");
        store.append(task(1, "a", "2024-01-01", false)).unwrap();
        store.append(task(2, "b", "2024-01-02", false)).unwrap();
        let tasks = store.load();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name, "a");
        assert_eq!(tasks[1].name, "b");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn remove_shrinks_by_one_keeping_relative_order() {
        let store = MemStore::with_tasks(vec![
            task(1, "a", "2024-01-01", false),
            task(2, "b", "2024-01-02", false),
            task(3, "c", "2024-01-03", false),
        ]);
        store.remove(2).unwrap();
        let tasks = store.load();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 1);
        assert_eq!(tasks[1].id, 3);
    }

    #[test]
    fn toggle_flips_only_the_target_flag() {
        let store = MemStore::with_tasks(vec![
            task(1, "a", "2024-01-01", false),
            task(2, "b", "2024-01-02", false),
        ]);
        store.toggle(2).unwrap();
        let tasks = store.load();
        assert_eq!(tasks.len(), 2);
        assert!(!tasks[0].completed);
        assert!(tasks[1].completed);
        assert_eq!(tasks[1].name, "b");
        assert_eq!(tasks[1].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn toggle_twice_restores_original_flag() {
        let store = MemStore::with_tasks(vec![task(1, "a", "2024-01-01", false)]);
        store.toggle(1).unwrap();
        store.toggle(1).unwrap();
        assert!(!store.load()[0].completed);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let (store, path) = scratch_store("unknown_id");
        store.save(&[task(1, "a", "2024-01-01", false)]).unwrap();
        store.remove(99).unwrap();
        store.toggle(99).unwrap();
        assert_eq!(store.load(), vec![task(1, "a", "2024-01-01", false)]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn next_id_is_max_plus_one() {
        assert_eq!(next_id(&[]), 1);
        let tasks = vec![task(3, "a", "2024-01-01", false), task(7, "b", "2024-01-02", false)];
        assert_eq!(next_id(&tasks), 8);
    }

    #[test]
    fn parses_iso_and_relative_dates() {
        let today = Local::now().date_naive();
        assert_eq!(
            parse_date_input("2024-05-01"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(parse_date_input("today"), Some(today));
        assert_eq!(parse_date_input("tomorrow"), Some(today + Duration::days(1)));
        assert_eq!(parse_date_input("in 3d"), Some(today + Duration::days(3)));
        assert_eq!(parse_date_input("in 2w"), Some(today + Duration::weeks(2)));
        assert_eq!(parse_date_input("someday"), None);
    }
}
