//! Interactive result browser.

pub mod app;
pub mod event;
pub mod ui;

pub use app::App;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::sync::Arc;

use crate::actions::ActionExecutor;
use crate::cli::{TuiArgs, ViewArgs};
use crate::commands::Context;
use crate::scanner::{ScanSession, POLL_INTERVAL};
use app::ScanTarget;

/// Run the TUI until the user quits, then persist the view settings.
pub fn run(ctx: &mut Context, args: TuiArgs) -> Result<()> {
    let target = initial_target(ctx, &args);
    let view = ViewArgs::default();

    let session = ScanSession::new(Arc::new(ctx.engine()));
    let executor = ActionExecutor::new(ctx.host.clone(), ctx.probe());
    tracing::info!(backend = executor.trash_backend(), "Trash backend selected");

    let mut app = App::new(
        session,
        executor,
        target,
        ctx.config.max_depth,
        ctx.exclusions(&view),
        ctx.filter_params(&view)?,
    );
    app.start_scan();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;

    app.save_to(&mut ctx.config);
    match ctx.settings_path() {
        Ok(path) => {
            if let Err(e) = ctx.config.save(&path) {
                tracing::warn!(error = %e, "Failed to save settings");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Failed to save settings"),
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;
        event::handle_events(app, POLL_INTERVAL)?;
        app.tick();
    }
    Ok(())
}

fn initial_target(ctx: &Context, args: &TuiArgs) -> ScanTarget {
    if args.system {
        return ScanTarget::System;
    }
    match (&args.path, &ctx.config.last_scan_path) {
        (Some(path), _) => ScanTarget::Folder(ctx.host.resolve(path)),
        (None, Some(last)) if last.is_dir() => ScanTarget::Folder(last.clone()),
        _ => ScanTarget::System,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::paths::HostPaths;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn context(last: Option<PathBuf>) -> Context {
        let mut config = Config::default();
        config.last_scan_path = last;
        Context {
            config,
            config_path: None,
            host: HostPaths::with_home("/home/u"),
            quiet: true,
        }
    }

    #[test]
    fn test_initial_target_prefers_flags() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(Some(tmp.path().to_path_buf()));

        let system = TuiArgs {
            path: None,
            system: true,
        };
        assert_eq!(initial_target(&ctx, &system), ScanTarget::System);

        let explicit = TuiArgs {
            path: Some(PathBuf::from("/srv/data/")),
            system: false,
        };
        assert_eq!(
            initial_target(&ctx, &explicit),
            ScanTarget::Folder(PathBuf::from("/srv/data"))
        );
    }

    #[test]
    fn test_initial_target_resumes_last_folder() {
        let tmp = TempDir::new().unwrap();
        let args = TuiArgs {
            path: None,
            system: false,
        };

        let ctx = context(Some(tmp.path().to_path_buf()));
        assert_eq!(
            initial_target(&ctx, &args),
            ScanTarget::Folder(tmp.path().to_path_buf())
        );

        let gone = context(Some(tmp.path().join("removed")));
        assert_eq!(initial_target(&gone, &args), ScanTarget::System);
        assert_eq!(initial_target(&context(None), &args), ScanTarget::System);
    }
}
