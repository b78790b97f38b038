//! `trash`, `clean-folder` and `reveal` commands.

use anyhow::{bail, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::Context;
use crate::actions::{ActionExecutor, CriticalPathSet};
use crate::cli::{RevealArgs, TrashArgs};
use crate::error::ReclaimError;
use crate::scanner::{Item, Size};

fn executor(ctx: &Context) -> ActionExecutor {
    ActionExecutor::new(ctx.host.clone(), ctx.probe())
}

/// Build an item for a path given on the command line.
///
/// Protected paths are refused here, before they are measured or the user
/// is asked to confirm.
fn target_item(ctx: &Context, path: &Path) -> Result<Item> {
    let path = ctx.host.resolve(path);
    if fs::symlink_metadata(&path).is_err() {
        bail!("Path not found: {}", path.display());
    }
    if CriticalPathSet::for_host(&ctx.host).contains(&path) {
        return Err(ReclaimError::CriticalPath(path).into());
    }
    let size = ctx.probe().measure(&path);
    Ok(Item::new("Manual", path, size))
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Run the trash command.
pub fn run_trash(ctx: &Context, args: TrashArgs) -> Result<()> {
    let mut exec = executor(ctx);
    let target = target_item(ctx, &args.path)?;

    if !args.force
        && !confirm(&format!(
            "Move {} ({}) to the trash?",
            target.path.display(),
            target.size
        ))?
    {
        println!("Aborted.");
        return Ok(());
    }

    let mut items = vec![target.clone()];
    let path = exec.trash(&mut items, &target)?;
    println!(
        "Moved {} ({}) to the trash via {}",
        path.display(),
        target.size,
        exec.trash_backend()
    );
    Ok(())
}

/// Run the clean-folder command.
pub fn run_clean_folder(ctx: &Context, args: TrashArgs) -> Result<()> {
    let mut exec = executor(ctx);
    let target = target_item(ctx, &args.path)?;

    if !args.force
        && !confirm(&format!(
            "Move everything inside {} ({}) to the trash?",
            target.path.display(),
            target.size
        ))?
    {
        println!("Aborted.");
        return Ok(());
    }

    let mut items = vec![target.clone()];
    let outcome = exec.clean_folder(&mut items, &target)?;

    println!("\nResults:");
    println!(
        "  Trashed: {} item{}",
        outcome.trashed.len(),
        if outcome.trashed.len() == 1 { "" } else { "s" }
    );
    println!("  Remaining size: {}", items[0].size);

    for (path, error) in &outcome.failures {
        eprintln!("  Error trashing {}: {}", path.display(), error);
    }

    if let Err(e) = outcome.into_result() {
        eprintln!("Error: {}", e);
        std::process::exit(5); // Partial failure
    }

    Ok(())
}

/// Run the reveal command.
pub fn run_reveal(ctx: &Context, args: RevealArgs) -> Result<()> {
    let path = ctx.host.resolve(&args.path);
    if fs::symlink_metadata(&path).is_err() {
        bail!("Path not found: {}", path.display());
    }
    executor(ctx).open(&Item::new("Manual", path, Size::zero()))?;
    Ok(())
}
