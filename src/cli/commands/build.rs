//! Build command - rebuild decisions and build-state bookkeeping

use crate::cache::{BuildState, BuildStateCache};
use crate::cli::args::{BuildAction, BuildArgs, BuildTarget, OutputFormat};
use crate::config::Config;
use crate::error::{KilnError, KilnResult};
use crate::ui::{self, UiContext};
use std::process::ExitCode;

/// Execute the build command
pub fn execute(args: BuildArgs, config: &Config) -> KilnResult<ExitCode> {
    let mut cache =
        BuildStateCache::load(config.build_cache_path())?.with_policy(config.hash_policy());

    match args.action {
        BuildAction::Check { target, exit_code } => Ok(check(&cache, &target, exit_code)),
        BuildAction::Record { target, failed } => {
            record(&mut cache, &target, !failed)?;
            Ok(ExitCode::SUCCESS)
        }
        BuildAction::Forget { project, platform } => {
            if cache.invalidate(&project, &platform).is_none() {
                return Err(KilnError::User(format!(
                    "No recorded build for {}",
                    BuildStateCache::key(&project, &platform)
                )));
            }
            cache.save()?;
            ui::step_ok(
                &UiContext::detect(),
                &format!("Forgot {}", BuildStateCache::key(&project, &platform)),
            );
            Ok(ExitCode::SUCCESS)
        }
        BuildAction::List { format } => {
            list(&cache, format)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(cache: &BuildStateCache, target: &BuildTarget, exit_code: bool) -> ExitCode {
    match cache.needs_rebuild(&target.project, &target.platform, &target.source, &target.output) {
        None => {
            println!("up to date");
            ExitCode::SUCCESS
        }
        Some(reason) => {
            println!("rebuild: {}", reason);
            if exit_code {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn record(cache: &mut BuildStateCache, target: &BuildTarget, succeeded: bool) -> KilnResult<()> {
    cache.record_build(
        &target.project,
        &target.platform,
        &target.source,
        &target.output,
        succeeded,
    )?;

    let ctx = UiContext::detect();
    let key = BuildStateCache::key(&target.project, &target.platform);
    if succeeded {
        ui::step_ok(&ctx, &format!("Recorded successful build of {}", key));
    } else {
        ui::step_warn(&ctx, &format!("Recorded failed build of {}", key));
    }
    Ok(())
}

fn list(cache: &BuildStateCache, format: OutputFormat) -> KilnResult<()> {
    let states: Vec<&BuildState> = cache.states().collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&states)?),
        OutputFormat::Plain => {
            for state in &states {
                println!("{}", BuildStateCache::key(&state.project, &state.platform));
            }
        }
        OutputFormat::Table => {
            if states.is_empty() {
                println!("No recorded builds.");
                return Ok(());
            }
            println!(
                "{:<20} {:<12} {:<8} {:<18} {}",
                "PROJECT", "PLATFORM", "RESULT", "BUILT", "OUTPUT"
            );
            println!("{}", "-".repeat(80));
            for state in &states {
                println!(
                    "{:<20} {:<12} {:<8} {:<18} {}",
                    state.project,
                    state.platform,
                    if state.build_success { "ok" } else { "failed" },
                    state.last_build.format("%Y-%m-%d %H:%M"),
                    state.output_path.display()
                );
            }
        }
    }

    Ok(())
}
