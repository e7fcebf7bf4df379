//! Install command - make artifacts exist on disk and record them

use crate::cache::{ArtifactCache, ArtifactRequest};
use crate::cli::args::InstallArgs;
use crate::config::Config;
use crate::error::{KilnError, KilnResult};
use crate::install::{activation_hint, HttpFetcher, InstallOutcome, Installer};
use crate::manifest::Manifest;
use crate::paths::{PathResolver, SDK_PREFIX};
use crate::ui::{self, UiContext};

/// Execute the install command
pub fn execute(args: InstallArgs, config: &Config) -> KilnResult<()> {
    let ctx = UiContext::detect();
    let requests = requests_from_args(args)?;
    if requests.is_empty() {
        ui::step_info(&ctx, "Manifest lists no artifacts");
        return Ok(());
    }

    let mut cache = ArtifactCache::load(config.artifact_cache_path())?;
    let installer = Installer::new(
        PathResolver::new(config.sdk_root()),
        HttpFetcher::new(ctx.show_progress()),
    );

    let resolver = installer.resolver();
    installer.install_all(&requests, &mut cache, |req, result| {
        report(&ctx, resolver, req, result)
    })?;
    Ok(())
}

/// Print one request's result and its activation hint
fn report(
    ctx: &UiContext,
    resolver: &PathResolver,
    req: &ArtifactRequest,
    result: Result<&InstallOutcome, &KilnError>,
) {
    let label = format!("{} {}", req.name, req.version);
    let dest = match result {
        Err(_) => {
            ui::step_error(ctx, &label);
            return;
        }
        Ok(InstallOutcome::AlreadyCached) => {
            ui::step_ok_detail(ctx, &label, "cached");
            resolver.resolve(&req.install_path).ok()
        }
        Ok(InstallOutcome::Adopted(dest)) => {
            ui::step_ok_detail(ctx, &label, &format!("found at {}", dest.display()));
            Some(dest.clone())
        }
        Ok(InstallOutcome::Installed(dest)) => {
            ui::step_ok_detail(ctx, &label, &format!("installed to {}", dest.display()));
            Some(dest.clone())
        }
    };

    if let Some(hint) = dest.and_then(|dest| activation_hint(&req.name, &dest)) {
        ui::remark(ctx, &hint.export_line());
    }
}

fn requests_from_args(args: InstallArgs) -> KilnResult<Vec<ArtifactRequest>> {
    if let Some(path) = args.manifest {
        return Ok(Manifest::load(&path)?.artifacts);
    }

    let name = args
        .name
        .ok_or_else(|| KilnError::User("either --manifest or --name is required".to_string()))?;
    let install_path = args
        .path
        .unwrap_or_else(|| format!("{}{}", SDK_PREFIX, name));

    let req = ArtifactRequest::new(name, args.version.unwrap_or_default())
        .with_url(args.url.unwrap_or_default())
        .with_checksum(args.checksum.unwrap_or_default())
        .with_install_path(install_path);
    Ok(vec![req])
}
