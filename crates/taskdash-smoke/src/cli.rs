use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskdash-smoke",
    version,
    about = "Drives the task dashboard controller against a live backend"
)]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Backend origin, e.g. http://127.0.0.1:5000
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    pub server: String,

    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Config override, e.g. `--set page.size=20`. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_setting)]
    pub overrides: Vec<(String, String)>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a task, find it on page 1, delete it, confirm it is gone.
    Roundtrip,
    /// Print one page of the task list.
    Tasks(TaskView),
    /// Print dashboard counts.
    Stats,
    /// Print a task's comment thread, optionally adding to it first.
    Comments(CommentView),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    #[arg(long, default_value_t = 1)]
    pub page: i64,

    #[arg(long)]
    pub sort_by: Option<String>,

    #[arg(long)]
    pub sort_dir: Option<String>,

    #[arg(long)]
    pub per_page: Option<String>,

    /// `all`, `unassigned` or a user id (admins only).
    #[arg(long)]
    pub assignee: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    /// Task whose thread to open.
    #[arg(long)]
    pub task: i64,

    /// Post this text before printing the thread.
    #[arg(long)]
    pub add: Option<String>,
}

/// Splits one `--set` value. The key is passed through untouched, so
/// `rc.page.size` works the same as in a config file override.
fn parse_setting(raw: &str) -> Result<(String, String), String> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(format!("`{raw}` is not KEY=VALUE"));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("`{raw}` has an empty key"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Filter used when `RUST_LOG` is unset. With no flags the smoke
/// driver's own progress shows and everything else stays at warn.
fn default_filter(verbose: u8, quiet: u8) -> &'static str {
    match (quiet, verbose) {
        (2.., _) => "error",
        (1, _) => "warn",
        (0, 0) => "warn,taskdash_smoke=info",
        (0, 1) => "info",
        (0, 2) => "debug",
        _ => "trace",
    }
}

/// Logs go to stderr so the printed report on stdout stays clean.
pub fn install_logging(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::try_new(default_filter(verbose, quiet)),
    }
    .map_err(|e| anyhow!("bad log filter: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .compact()
        .try_init()
        .map_err(|e| anyhow!("logging already installed: {e}"))
}
