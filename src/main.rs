//! # todo - daily to-do board CLI
//!
//! A small, file-backed to-do list. Tasks have a name, a due date, and a
//! priority; the board shows them in three buckets: **Today**, **Upcoming**
//! (future and overdue alike), and **Completed**.
//!
//! ## Quick start
//!
//! ```bash
//! # Add a task
//! todo add "Buy groceries" --date today --priority high
//!
//! # Show the board
//! todo list
//!
//! # Flip a task between open and completed
//! todo toggle 3
//!
//! # Remove a task
//! todo delete 3
//!
//! # Launch the interactive single-screen UI
//! todo ui
//! ```
//!
//! State lives in one JSON file, `~/.todo/tasks.json` by default (override
//! with `--db`). Every command reads the file fresh and writes it back whole;
//! there is no daemon, no cache, and no coordination between concurrent
//! invocations (last write wins).

use std::path::PathBuf;

use clap::Parser;

pub mod board;
pub mod cli;
pub mod cmd;
pub mod fields;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod form;
    pub mod input;
    pub mod run;
}

use cli::Cli;
use cmd::*;
use store::JsonStore;

fn main() {
    let cli = Cli::parse();

    // Determine the store file: --db wins, otherwise ~/.todo/tasks.json.
    let db_path = cli.db.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let todo_dir = PathBuf::from(home).join(".todo");
        if let Err(e) = std::fs::create_dir_all(&todo_dir) {
            eprintln!("Failed to create todo directory {}: {}", todo_dir.display(), e);
            std::process::exit(1);
        }
        todo_dir.join("tasks.json")
    });

    match cli.command {
        Commands::Ui => cmd_ui(&db_path),
        Commands::Add { name, date, priority } => {
            cmd_add(&JsonStore::new(&db_path), name, date, priority)
        }
        Commands::List => cmd_list(&JsonStore::new(&db_path)),
        Commands::Toggle { id } => cmd_toggle(&JsonStore::new(&db_path), id),
        Commands::Delete { id } => cmd_delete(&JsonStore::new(&db_path), id),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
