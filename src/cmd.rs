//! Command implementations for the CLI interface.
//!
//! Each handler is a thin controller: validate input, mutate through the
//! store, print. The board rendered by `list` is rebuilt from a fresh load
//! every time, so ids shown always match the store.

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use chrono::Local;
use std::path::Path;

use crate::board::{format_date, Board, EMPTY_BUCKET};
use crate::cli::Cli;
use crate::fields::{format_bucket, format_priority, Bucket, Priority};
use crate::store::{next_id, parse_date_input, JsonStore, TaskStore};
use crate::task::Task;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive board UI.
    Ui,

    /// Add a new task.
    Add {
        /// Task name.
        name: String,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", or "in Nd".
        #[arg(long)]
        date: String,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// Show the board: today, upcoming, completed.
    List,

    /// Flip a task between open and completed.
    Toggle {
        /// Task id (the #N shown by list).
        id: u64,
    },

    /// Delete a task.
    Delete {
        /// Task id (the #N shown by list).
        id: u64,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(db_path: &Path) {
    let store = JsonStore::new(db_path);
    if let Err(e) = run_tui(&store) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the store.
pub fn cmd_add(store: &dyn TaskStore, name: String, date: String, priority: Priority) {
    let name = name.trim().to_string();
    if name.is_empty() {
        eprintln!("Task name cannot be empty.");
        std::process::exit(1);
    }
    let date = match parse_date_input(&date) {
        Some(d) => d,
        None => {
            eprintln!("Unrecognised date '{date}'. Use YYYY-MM-DD, today, tomorrow, or \"in Nd\".");
            std::process::exit(1);
        }
    };

    let tasks = store.load();
    let task = Task::new(next_id(&tasks), name, date, priority);
    let id = task.id;
    if let Err(e) = store.append(task) {
        eprintln!("Failed to save task: {e}");
        std::process::exit(1);
    }
    println!("Added #{id} due {}.", format_date(date));
}

/// Print the three buckets as tables.
pub fn cmd_list(store: &dyn TaskStore) {
    let tasks = store.load();
    let board = Board::build(&tasks, Local::now().date_naive());

    for bucket in [Bucket::Today, Bucket::Upcoming, Bucket::Completed] {
        println!("{}", format_bucket(bucket));
        let rows = board.bucket(bucket);
        if rows.is_empty() {
            println!("  {EMPTY_BUCKET}");
        } else {
            println!("  {:<6} {:<11} {:<8} {}", "ID", "Due", "Pri", "Name");
            for t in rows {
                println!(
                    "  {:<6} {:<11} {:<8} {}",
                    format!("#{}", t.id),
                    format_date(t.date),
                    format_priority(t.priority),
                    t.name
                );
            }
        }
        println!();
    }
}

/// Flip a task's completion flag.
pub fn cmd_toggle(store: &dyn TaskStore, id: u64) {
    if store.load().iter().all(|t| t.id != id) {
        eprintln!("No task #{id}.");
        return;
    }
    if let Err(e) = store.toggle(id) {
        eprintln!("Failed to save: {e}");
        std::process::exit(1);
    }
    // Report the state the task ended up in.
    match store.load().iter().find(|t| t.id == id) {
        Some(t) if t.completed => println!("Completed #{id}."),
        Some(_) => println!("Reopened #{id}."),
        None => {}
    }
}

/// Delete a task by id.
pub fn cmd_delete(store: &dyn TaskStore, id: u64) {
    if store.load().iter().all(|t| t.id != id) {
        eprintln!("No task #{id}.");
        return;
    }
    if let Err(e) = store.remove(id) {
        eprintln!("Failed to save: {e}");
        std::process::exit(1);
    }
    println!("Deleted #{id}.");
}

/// Generate shell completion scripts to stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
