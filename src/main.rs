use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use rusty_reclaim::cli::{Cli, Command};
use rusty_reclaim::commands::{self, Context};
use rusty_reclaim::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it logs to a file
    let log_file = match &cli.command {
        Command::Tui(_) => open_log_file(),
        _ => None,
    };
    init_logging(cli.verbose, cli.quiet, log_file);

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    tracing::debug!(?config, "Loaded configuration");

    // Dispatch to subcommand
    match cli.command {
        Command::Completions(args) => {
            clap_complete::generate(args.shell, &mut Cli::command(), "rusty-reclaim", &mut io::stdout());
            return Ok(());
        }
        Command::Man => {
            clap_mangen::Man::new(Cli::command()).render(&mut io::stdout())?;
            return Ok(());
        }
        command => {
            let mut ctx = Context::new(config, cli.config.clone(), cli.quiet)?;
            dispatch(&mut ctx, command)?;
        }
    }

    Ok(())
}

fn dispatch(ctx: &mut Context, command: Command) -> Result<()> {
    match command {
        Command::System(args) => {
            tracing::info!(?args, "Starting system scan");
            commands::scan::run_system(ctx, args)
        }
        Command::Folder(args) => {
            tracing::info!(?args, "Starting folder scan");
            commands::scan::run_folder(ctx, args)
        }
        Command::Trash(args) => commands::actions::run_trash(ctx, args),
        Command::CleanFolder(args) => commands::actions::run_clean_folder(ctx, args),
        Command::Reveal(args) => commands::actions::run_reveal(ctx, args),
        Command::Classifiers(args) => commands::classifiers::run(ctx, args),
        Command::Tui(args) => {
            tracing::info!(?args, "Starting TUI");
            rusty_reclaim::tui::run(ctx, args)
        }
        Command::Completions(_) | Command::Man => Ok(()),
    }
}

fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("rusty-reclaim").join("rusty-reclaim.log"))
}

fn open_log_file() -> Option<File> {
    let path = log_path()?;
    fs::create_dir_all(path.parent()?).ok()?;
    File::options().create(true).append(true).open(path).ok()
}

fn init_logging(verbosity: u8, quiet: bool, log_file: Option<File>) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "warn"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rusty_reclaim={}", level)));

    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .with(filter)
            .init(),
        None => tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .with(filter)
            .init(),
    }
}
