//! `system` and `folder` commands.

use anyhow::{bail, Result};
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use super::Context;
use crate::cli::{FolderArgs, SystemArgs, ViewArgs};
use crate::scanner::{Item, ScanRequest, ScanSession, ScanStatus};
use crate::view;

/// Run the system scan command.
pub fn run_system(ctx: &Context, args: SystemArgs) -> Result<()> {
    let request = ScanRequest::System {
        exclusions: ctx.exclusions(&args.view),
    };
    run_scan(ctx, request, &args.view)
}

/// Run the folder scan command.
pub fn run_folder(ctx: &Context, args: FolderArgs) -> Result<()> {
    let root = match &args.path {
        Some(path) => ctx.host.resolve(path),
        None => ctx.host.home().to_path_buf(),
    };
    let max_depth = args.max_depth.unwrap_or(ctx.config.max_depth);
    if max_depth == 0 {
        bail!("--max-depth must be at least 1");
    }
    if !root.is_dir() {
        bail!("Not a directory: {}", root.display());
    }

    let request = ScanRequest::Folder {
        root,
        max_depth,
        exclusions: ctx.exclusions(&args.view),
    };
    run_scan(ctx, request, &args.view)
}

fn run_scan(ctx: &Context, request: ScanRequest, view_args: &ViewArgs) -> Result<()> {
    let params = ctx.filter_params(view_args)?;
    let mut session = ScanSession::new(Arc::new(ctx.engine()));

    let pb = if ctx.quiet || view_args.json {
        ProgressBar::hidden()
    } else {
        progress_bar()
    };

    session.start(request);
    let result = session.wait(|progress| {
        pb.set_position(progress.percent.round() as u64);
        pb.set_message(progress.label.clone());
    });
    pb.finish_and_clear();

    let Some(result) = result else {
        bail!("Scan did not start");
    };
    if let ScanStatus::Failed(message) = &result.status {
        bail!("Scan failed: {}", message);
    }

    let shown = view::apply(&result.items, &params);

    if view_args.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No items found.");
        return Ok(());
    }

    print_items_table(&shown);
    let total: u64 = shown.iter().map(Item::bytes).sum();
    println!(
        "\nTotal: {} in {} item{}",
        format_size(total, BINARY),
        shown.len(),
        if shown.len() == 1 { "" } else { "s" }
    );
    if shown.len() < result.items.len() {
        println!("({} hidden by filters)", result.items.len() - shown.len());
    }

    Ok(())
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    if let Ok(style) =
        ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_items_table(items: &[Item]) {
    println!("\n  {:<22} {:<28} {:>8}  {}", "CATEGORY", "NAME", "SIZE", "PATH");
    println!("  {}", "─".repeat(72));

    for item in items {
        println!(
            "  {:<22} {:<28} {:>8}  {}",
            truncate(&item.category, 22),
            truncate(&item.short_name, 28),
            item.size.label,
            item.path.display(),
        );
    }
}

/// Cut `s` to `width` characters, marking the cut with "...".
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
