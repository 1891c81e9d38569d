mod account;
pub use account::{cmd_login, cmd_register};

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::read_config;
use crate::io::{DataDir, DataLock};
use crate::model::config::AppConfig;
use crate::model::task::TaskItem;
use crate::model::user::User;
use crate::ops::TaskService;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let root = data_root(cli.data_dir.as_deref())?;
    let dir = DataDir::open(&root)?;
    let config = read_config(&dir)?;
    let user = credentials(cli.user, cli.password)?;

    match cli.command {
        Commands::Register => {
            let _lock = lock(&dir, &config)?;
            cmd_register(&dir, &user, json)
        }
        Commands::Login => cmd_login(&dir, &user, json),
        Commands::Add(args) => cmd_add(&dir, &config, &user, args, json),
        Commands::List(args) => cmd_list(&dir, &config, &user, args, json),
        Commands::Toggle(args) => cmd_toggle(&dir, &config, &user, args, json),
        Commands::Delete(args) => cmd_delete(&dir, &config, &user, args, json),
        Commands::History => cmd_history(&dir, &config, &user, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn data_root(flag: Option<&Path>) -> Result<PathBuf, std::io::Error> {
    match flag {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir(),
    }
}

fn credentials(user: Option<String>, password: Option<String>) -> Result<User, String> {
    let username = user.ok_or("--user is required (or set TASKBOOK_USER)")?;
    let password = password.ok_or("--password is required (or set TASKBOOK_PASSWORD)")?;
    Ok(User::new(username, password))
}

fn lock(dir: &DataDir, config: &AppConfig) -> Result<DataLock, crate::io::lock::LockError> {
    DataLock::acquire(
        dir.root(),
        Duration::from_millis(config.store.lock_timeout_ms),
    )
}

/// The stored record for these credentials, with its registered casing.
fn authenticate(dir: &DataDir, user: &User) -> Result<User, Box<dyn std::error::Error>> {
    dir.user_store()
        .authenticate(user)?
        .ok_or_else(|| "invalid username or password".into())
}

fn open_session(
    dir: &DataDir,
    config: &AppConfig,
    user: &User,
) -> Result<TaskService, Box<dyn std::error::Error>> {
    let stored = authenticate(dir, user)?;
    Ok(TaskService::open(dir, &stored.username, config.audit.window())?)
}

/// Resolve a 1-based listing position under the given view.
fn pick(service: &mut TaskService, index: usize, view: &ViewArgs) -> Result<TaskItem, String> {
    let tasks = service
        .filter(&view.search, view.all)
        .map_err(|e| e.to_string())?;
    index
        .checked_sub(1)
        .and_then(|i| tasks.get(i))
        .cloned()
        .ok_or_else(|| format!("no task #{} in this view (see `tb list`)", index))
}

fn print_tasks(tasks: &[TaskItem], json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&tasks_to_json(tasks))?);
    } else {
        print!("{}", format_task_list(tasks));
    }
    Ok(())
}

fn print_task(verb: &str, task: &TaskItem, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(1, task))?);
    } else {
        println!("{}: {}", verb, task.title);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

fn cmd_add(dir: &DataDir, config: &AppConfig, user: &User, args: AddArgs, json: bool) -> CmdResult {
    let mut service = open_session(dir, config, user)?;
    let _lock = lock(dir, config)?;

    let due = args.due.unwrap_or_else(|| {
        Local::now().date_naive() + chrono::Duration::days(config.tasks.default_due_in_days)
    });
    let priority = args.priority.unwrap_or(config.tasks.default_priority);
    let description = args.description.unwrap_or_default();

    let task = service.add_task(&args.title, &description, due, priority)?;
    print_task("added", &task, json)
}

fn cmd_list(dir: &DataDir, config: &AppConfig, user: &User, args: ViewArgs, json: bool) -> CmdResult {
    let mut service = open_session(dir, config, user)?;
    let tasks = service.filter(&args.search, args.all)?;
    print_tasks(tasks, json)
}

fn cmd_toggle(dir: &DataDir, config: &AppConfig, user: &User, args: PickArgs, json: bool) -> CmdResult {
    let mut service = open_session(dir, config, user)?;
    let _lock = lock(dir, config)?;

    let task = pick(&mut service, args.index, &args.view)?;
    let updated = service
        .toggle_status(&task)?
        .ok_or_else(|| format!("task changed on disk: {}", task.title))?;
    let verb = if updated.is_completed {
        "completed"
    } else {
        "pending"
    };
    print_task(verb, &updated, json)
}

fn cmd_delete(dir: &DataDir, config: &AppConfig, user: &User, args: PickArgs, json: bool) -> CmdResult {
    let mut service = open_session(dir, config, user)?;
    let _lock = lock(dir, config)?;

    let task = pick(&mut service, args.index, &args.view)?;
    if !service.delete_task(&task)? {
        return Err(format!("task changed on disk: {}", task.title).into());
    }
    print_task("deleted", &task, json)
}

fn cmd_history(dir: &DataDir, config: &AppConfig, user: &User, json: bool) -> CmdResult {
    let service = open_session(dir, config, user)?;
    let entries = service.recent_activity()?;
    if json {
        let out: Vec<LogEntryJson> = entries.iter().map(log_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", format_history(&entries));
    }
    Ok(())
}
