//! Cache command - inspect and manage the artifact cache

use crate::cache::{ArtifactCache, BuildStateCache, CacheEntry};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::Config;
use crate::error::{KilnError, KilnResult};
use crate::ui::{self, UiContext};
use console::style;
use std::io::{self, Write};

/// Execute the cache command
pub fn execute(args: CacheArgs, config: &Config) -> KilnResult<()> {
    let ctx = UiContext::detect();

    match args.action {
        CacheAction::List { format } => list_entries(config, format),
        CacheAction::Remove { name } => remove_entry(&ctx, config, &name),
        CacheAction::Clear { yes } => clear_caches(&ctx.with_auto_yes(yes), config),
        CacheAction::Path => {
            ui::key_value(&ctx, "artifacts", &config.artifact_cache_path().display().to_string());
            ui::key_value(&ctx, "builds", &config.build_cache_path().display().to_string());
            Ok(())
        }
    }
}

fn list_entries(config: &Config, format: OutputFormat) -> KilnResult<()> {
    let cache = ArtifactCache::load(config.artifact_cache_path())?;
    let entries: Vec<&CacheEntry> = cache.entries().collect();

    match format {
        OutputFormat::Table => print_entry_table(&entries),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            for entry in &entries {
                println!("{}", entry.name);
            }
        }
    }

    Ok(())
}

fn print_entry_table(entries: &[&CacheEntry]) {
    if entries.is_empty() {
        println!("No cached artifacts.");
        return;
    }

    println!(
        "{:<24} {:<14} {:<18} {}",
        "NAME", "VERSION", "CHECKSUM", "INSTALL PATH"
    );
    println!("{}", "-".repeat(80));

    for entry in entries {
        let checksum = if entry.checksum.is_empty() {
            style("-").dim().to_string()
        } else {
            short_checksum(&entry.checksum).to_string()
        };
        println!(
            "{:<24} {:<14} {:<18} {}",
            entry.name, entry.version, checksum, entry.install_path
        );
    }

    println!();
    println!("Total: {} artifact(s)", entries.len());
}

/// Leading digest characters, without any `sha256:` prefix
fn short_checksum(checksum: &str) -> &str {
    let digest = checksum
        .split_once(':')
        .map(|(_, rest)| rest)
        .unwrap_or(checksum);
    digest.get(..16).unwrap_or(digest)
}

fn remove_entry(ctx: &UiContext, config: &Config, name: &str) -> KilnResult<()> {
    let mut cache = ArtifactCache::load(config.artifact_cache_path())?;

    match cache.remove(name) {
        Some(entry) => {
            cache.save()?;
            ui::step_ok_detail(
                ctx,
                &format!("Forgot {}", name),
                &format!("files kept at {}", entry.install_path),
            );
            Ok(())
        }
        None => Err(KilnError::User(format!("No cached artifact named '{}'", name))),
    }
}

fn clear_caches(ctx: &UiContext, config: &Config) -> KilnResult<()> {
    let mut artifacts = ArtifactCache::load(config.artifact_cache_path())?;
    let mut builds = BuildStateCache::load(config.build_cache_path())?;
    let build_count = builds.states().count();

    if artifacts.is_empty() && build_count == 0 {
        println!("Caches are already empty.");
        return Ok(());
    }

    println!(
        "This will forget {} artifact(s) and {} build state(s).",
        artifacts.len(),
        build_count
    );

    if !ctx.auto_yes() && !confirm()? {
        println!("Aborted.");
        return Ok(());
    }

    artifacts.clear();
    artifacts.save()?;
    builds.clear();
    builds.save()?;

    ui::step_ok(ctx, "Caches cleared");
    Ok(())
}

fn confirm() -> KilnResult<bool> {
    print!("Are you sure? [y/N] ");
    let _ = io::stdout().flush();

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| KilnError::io("reading confirmation", e))?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
