use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::board::{BoardStats, TaskBoard};
use crate::config::{self, Config};
use crate::fs::{self, FileKvStore, KvStore};
use crate::input::form::parse_deadline;
use crate::models::{Quadrant, Task};

#[derive(Parser)]
#[command(name = "eisen")]
#[command(about = "Eisenhower matrix task board for the terminal")]
#[command(version)]
pub struct Cli {
    /// Directory holding tasks, view state and logs
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Add a task without opening the board
    Add(AddArgs),
    /// List active tasks by quadrant
    List(ListArgs),
    /// Print board statistics
    Stats,
    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// Task description
    #[arg(required = true)]
    pub text: Vec<String>,
    /// YYYY-MM-DD, today, tomorrow or +N
    #[arg(short, long)]
    pub deadline: String,
    /// q1 (urgent & important) .. q4 (neither)
    #[arg(short, long, default_value = "q1")]
    pub quadrant: Quadrant,
}

#[derive(Args)]
pub struct ListArgs {
    /// Include completed tasks
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
}

/// Run a subcommand if one was given.
/// Returns true when the TUI should start.
pub fn handle_cli(cli: &Cli, config: &Config) -> Result<bool> {
    let Some(command) = &cli.command else {
        return Ok(true);
    };

    if let Err(e) = run_command(command, config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(false)
}

fn run_command(command: &CliCommand, config: &Config) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    match command {
        CliCommand::Add(args) => {
            let mut store = FileKvStore::new(config.data_dir());
            let task = run_add(&mut store, args, today)?;
            println!(
                "✓ Added \"{}\" to {} (due {}, {})",
                task.text,
                task.quadrant.label(),
                task.deadline,
                task.countdown(today).label()
            );
        }
        CliCommand::List(args) => {
            let store = FileKvStore::new(config.data_dir());
            let board = fs::load_board(&store);
            print!("{}", format_list(&board, today, args.all));
        }
        CliCommand::Stats => {
            let store = FileKvStore::new(config.data_dir());
            let board = fs::load_board(&store);
            print!("{}", format_stats(&BoardStats::compute(&board, today)));
        }
        CliCommand::Config { action } => match action {
            None | Some(ConfigAction::Show) => config::show_config(config)?,
            Some(ConfigAction::Path) => println!("{}", config::get_config_path()?.display()),
        },
    }
    Ok(())
}

/// Create a task in the stored board and write it back
pub fn run_add(store: &mut dyn KvStore, args: &AddArgs, today: NaiveDate) -> Result<Task> {
    let deadline = parse_deadline(&args.deadline, today)?;
    let mut board = fs::load_board(&*store);
    let task = board.create(&args.text.join(" "), Some(deadline), args.quadrant)?;
    fs::save_board(store, &board)?;
    Ok(task)
}

pub fn format_list(board: &TaskBoard, today: NaiveDate, all: bool) -> String {
    let mut out = String::new();
    for quadrant in Quadrant::ALL {
        let tasks = board.tasks_in(quadrant);
        let _ = writeln!(out, "{} · {} ({})", quadrant.key(), quadrant.label(), tasks.len());
        if tasks.is_empty() {
            let _ = writeln!(out, "  {}", quadrant.empty_message());
        }
        for task in tasks {
            let _ = writeln!(
                out,
                "  {}  {}  {}",
                task.deadline,
                task.text,
                task.countdown(today).label()
            );
        }
        out.push('\n');
    }

    if all {
        let completed = board.completed();
        let _ = writeln!(out, "Completed ({})", completed.len());
        for task in completed {
            let origin = task.original_quadrant.unwrap_or(Quadrant::UrgentImportant);
            let _ = writeln!(out, "  {}  {}  [{}]", task.deadline, task.text, origin.key());
        }
    }
    out
}

pub fn format_stats(stats: &BoardStats) -> String {
    let mut out = String::new();
    for quadrant in Quadrant::ALL {
        let _ = writeln!(out, "{:<28} {}", quadrant.label(), stats.quadrant_count(quadrant));
    }
    let _ = writeln!(out, "{:<28} {}", "Completed", stats.completed);
    let _ = writeln!(out, "{:<28} {}", "Due today", stats.due_today);
    let _ = writeln!(out, "{:<28} {}", "Overdue", stats.overdue);
    out
}
