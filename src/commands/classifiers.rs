//! `classifiers` command.

use anyhow::Result;

use super::Context;
use crate::classifier::ClassifierRegistry;
use crate::cli::{ClassifiersAction, ClassifiersArgs};

/// Run the classifiers command.
pub fn run(ctx: &mut Context, args: ClassifiersArgs) -> Result<()> {
    let registry = ClassifierRegistry::builtin(&ctx.host);

    let (name, enable) = match args.action.unwrap_or(ClassifiersAction::List) {
        ClassifiersAction::List => {
            print_classifiers(ctx, &registry);
            return Ok(());
        }
        ClassifiersAction::Enable { name } => (name, true),
        ClassifiersAction::Disable { name } => (name, false),
    };

    if registry.get(&name).is_none() {
        eprintln!("Error: Unknown classifier '{}'", name);
        eprintln!("Valid classifiers: {}", registry.names().join(", "));
        std::process::exit(2);
    }

    ctx.config.classifiers.insert(name.clone(), enable);
    let path = ctx.settings_path()?;
    ctx.config.save(&path)?;

    println!(
        "{} classifier '{}'",
        if enable { "Enabled" } else { "Disabled" },
        name
    );
    Ok(())
}

fn print_classifiers(ctx: &Context, registry: &ClassifierRegistry) {
    println!("\n  {:<18} {:<18} {:<8} {}", "NAME", "DESCRIPTION", "ENABLED", "PATHS");
    println!("  {}", "─".repeat(60));

    for classifier in registry.classifiers() {
        let enabled = ClassifierRegistry::is_enabled(classifier.name(), &ctx.config.classifiers);
        println!(
            "  {:<18} {:<18} {:<8} {}",
            classifier.name(),
            classifier.display_name(),
            if enabled { "yes" } else { "no" },
            classifier.known_paths().len(),
        );
    }
}
