//! # task-cli
//!
//! A small to-do list manager for the terminal. Tasks live in a single JSON
//! file and every command loads it, applies one change, and writes it back.
//!
//! ## Usage
//!
//! ```bash
//! task-cli add "Buy groceries"          # Task added successfully (ID: 1)
//! task-cli update 1 "Buy groceries and cook dinner"
//! task-cli mark-in-progress 1
//! task-cli mark-done 1
//! task-cli mark-todo 1
//! task-cli delete 1
//!
//! task-cli list                         # every task
//! task-cli list done                    # todo | in-progress | done
//! task-cli list --table                 # same tasks, as a table
//!
//! task-cli ui                           # interactive view
//! task-cli completions bash > task-cli.bash
//! ```
//!
//! ## Data Storage
//!
//! Tasks are saved to `tasks.json` in the working directory. Set the
//! `TASKS_DB` environment variable, or pass `--file <PATH>`, to use another
//! file. The flag wins over the variable.
//!
//! ## Diagnostics
//!
//! Logs go to stderr. `-v`, `-vv` and `-vvv` raise the level to info, debug
//! and trace; `RUST_LOG` takes precedence when set.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::{ContextKind, ErrorKind};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use task_cli::commands::{add_task, delete_task, list_tasks, mark_task, update_task, MarkOutcome};
use task_cli::error::parse_id;
use task_cli::render::{task_blocks, task_table};
use task_cli::storage::db_path;
use task_cli::tui::run_tui;
use task_cli::{Status, Storage, TaskError};

const COMMANDS: &str =
    "add, update, delete, mark-in-progress, mark-done, mark-todo, list, ui, completions";

#[derive(Parser)]
#[command(name = "task-cli", version)]
#[command(about = "Track what you need to do, what you are doing, and what you have done", long_about = None)]
struct Cli {
    /// Task file to use instead of ./tasks.json or $TASKS_DB
    #[arg(short, long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task description (quoted if it has spaces)
        #[arg(allow_hyphen_values = true)]
        description: String,
    },
    /// Change a task's description
    Update {
        #[arg(value_parser = parse_id)]
        id: u64,
        /// New description
        #[arg(allow_hyphen_values = true)]
        description: String,
    },
    /// Remove a task
    Delete {
        #[arg(value_parser = parse_id)]
        id: u64,
    },
    /// Mark a task as in progress
    MarkInProgress {
        #[arg(value_parser = parse_id)]
        id: u64,
    },
    /// Mark a task as done
    MarkDone {
        #[arg(value_parser = parse_id)]
        id: u64,
    },
    /// Move a task back to todo
    MarkTodo {
        #[arg(value_parser = parse_id)]
        id: u64,
    },
    /// List tasks, optionally only those with the given status
    List {
        /// todo, in-progress or done
        #[arg(value_parser = str::parse::<Status>)]
        status: Option<Status>,
        /// Render as a table
        #[arg(short, long)]
        table: bool,
    },
    /// Open interactive view
    Ui,
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

fn print_usage() {
    println!("Usage: task-cli [command]");
    println!("Commands: {COMMANDS}");
}

/// Maps parser failures onto the CLI's exit codes: help and version succeed,
/// everything else exits 1.
fn parse_failure(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        ErrorKind::InvalidSubcommand => {
            match err.get(ContextKind::InvalidSubcommand) {
                Some(cmd) => println!("Error: Unknown command '{cmd}'."),
                None => println!("Error: Unknown command."),
            }
            println!("Available commands: {COMMANDS}");
            ExitCode::FAILURE
        }
        _ => {
            let _ = err.print();
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn mark(storage: &Storage, id: u64, status: Status) -> Result<(), TaskError> {
    match mark_task(storage, id, status)? {
        MarkOutcome::Changed => println!("Task {id} marked as {status}."),
        MarkOutcome::Unchanged => println!("Task {id} is already {status}."),
    }
    Ok(())
}

fn run(command: Commands, storage: &Storage) -> anyhow::Result<()> {
    match command {
        Commands::Add { description } => {
            let id = add_task(storage, description)?;
            println!("Task added successfully (ID: {id})");
        }
        Commands::Update { id, description } => {
            update_task(storage, id, description)?;
            println!("Task {id} updated successfully.");
        }
        Commands::Delete { id } => {
            delete_task(storage, id)?;
            println!("Task {id} deleted successfully.");
        }
        Commands::MarkInProgress { id } => mark(storage, id, Status::InProgress)?,
        Commands::MarkDone { id } => mark(storage, id, Status::Done)?,
        Commands::MarkTodo { id } => mark(storage, id, Status::Todo)?,
        Commands::List { status, table } => {
            let tasks = list_tasks(storage, status)?;
            if table {
                print!("{}", task_table(&tasks));
            } else {
                print!("{}", task_blocks(&tasks));
            }
        }
        Commands::Ui => run_tui(storage.clone())?,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "task-cli", &mut io::stdout());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return parse_failure(err),
    };
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let storage = Storage::new(db_path(cli.file));
    debug!(path = %storage.path().display(), "using task file");

    match run(command, &storage) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<TaskError>() {
                Some(task_err) => eprintln!("Error: {task_err}"),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
