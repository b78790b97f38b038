use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Rusty Reclaim - find and reclaim disk space taken by caches, logs and
/// toolchain leftovers
#[derive(Parser, Debug)]
#[command(name = "rusty-reclaim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan system caches, temp files, logs and classifier locations
    System(SystemArgs),

    /// Scan the subfolders of a directory
    Folder(FolderArgs),

    /// Move a path to the trash
    Trash(TrashArgs),

    /// Move everything inside a folder to the trash, keeping the folder
    CleanFolder(TrashArgs),

    /// Open the folder containing a path in the file manager
    Reveal(RevealArgs),

    /// List, enable or disable classifiers
    Classifiers(ClassifiersArgs),

    /// Launch interactive TUI
    Tui(TuiArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Print the man page
    Man,
}

/// How scan results are filtered, sorted and printed.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Paths to skip, comma-separated (added to the configured exclusions)
    #[arg(short, long, value_name = "PATHS")]
    pub exclude: Option<String>,

    /// Size filter: all, small, medium, large
    #[arg(short, long, value_name = "BUCKET")]
    pub filter: Option<String>,

    /// Minimum size in MB (overrides --filter)
    #[arg(long, value_name = "MB")]
    pub min_mb: Option<String>,

    /// Only show items whose category, name or path contains TEXT
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Sort by: category, name, path, size
    #[arg(long, value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SystemArgs {
    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Args, Debug)]
pub struct FolderArgs {
    /// Directory to analyze (defaults to the home directory)
    pub path: Option<PathBuf>,

    /// Maximum depth (1 = immediate subfolders)
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Args, Debug)]
pub struct TrashArgs {
    /// Path to act on
    pub path: PathBuf,

    /// Skip confirmation prompts
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct RevealArgs {
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct ClassifiersArgs {
    #[command(subcommand)]
    pub action: Option<ClassifiersAction>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ClassifiersAction {
    /// Show every classifier and whether it is enabled
    List,
    /// Enable a classifier
    Enable { name: String },
    /// Disable a classifier
    Disable { name: String },
}

#[derive(Args, Debug)]
pub struct TuiArgs {
    /// Folder to scan on start (defaults to the last scan, or a system scan)
    pub path: Option<PathBuf>,

    /// Start with a system scan regardless of the last scan
    #[arg(long, conflicts_with = "path")]
    pub system: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
