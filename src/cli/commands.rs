use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::model::task::Priority;

#[derive(Parser)]
#[command(name = "tb", about = concat!("taskbook v", env!("CARGO_PKG_VERSION"), " - personal tasks in plain text"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory (default: current directory)
    #[arg(short = 'C', long = "data-dir", env = "TASKBOOK_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Username to act as
    #[arg(short = 'u', long, env = "TASKBOOK_USER", global = true)]
    pub user: Option<String>,

    /// Password for --user
    #[arg(
        short = 'p',
        long,
        env = "TASKBOOK_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account with --user and --password
    Register,
    /// Check credentials
    Login,
    /// Add a task
    Add(AddArgs),
    /// List tasks (pending only unless --all)
    List(ViewArgs),
    /// Mark a listed task completed, or back to pending
    Toggle(PickArgs),
    /// Delete a listed task
    Delete(PickArgs),
    /// Show your recent activity
    History,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Longer description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Due date, YYYY-MM-DD (default from taskbook.toml: tomorrow)
    #[arg(long)]
    pub due: Option<NaiveDate>,
    /// LOW, MEDIUM or HIGH
    #[arg(long)]
    pub priority: Option<Priority>,
}

#[derive(Args, Clone, Default)]
pub struct ViewArgs {
    /// Only tasks whose title or description contains this text
    #[arg(short, long, default_value = "")]
    pub search: String,
    /// Include completed tasks
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args)]
pub struct PickArgs {
    /// Position of the task in `tb list` output (same --search/--all)
    pub index: usize,
    #[command(flatten)]
    pub view: ViewArgs,
}
