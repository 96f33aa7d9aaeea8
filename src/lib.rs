pub mod cli;
pub mod config;
pub mod distro;
pub mod error;
pub mod executor;
pub mod finalize;
pub mod register;
pub mod repos;
pub mod trust;
pub mod zypper;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{FmtSubscriber, filter::LevelFilter};

use crate::config::BootstrapRequest;
use crate::distro::{DistroFamily, DistroSpec};
use crate::executor::CommandExecutor;

pub use crate::error::ZypstrapError;

pub fn init_logging(log_level: cli::LogLevel) -> Result<()> {
    let filter = match log_level {
        cli::LogLevel::Trace => LevelFilter::TRACE,
        cli::LogLevel::Debug => LevelFilter::DEBUG,
        cli::LogLevel::Info => LevelFilter::INFO,
        cli::LogLevel::Warn => LevelFilter::WARN,
        cli::LogLevel::Error => LevelFilter::ERROR,
    };

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(filter).finish(),
    )
    .context("failed to set global default tracing subscriber")
}

/// Bootstraps the enterprise (SLED/SLES) path.
///
/// Vendor trust keys are propagated into the root before registration,
/// because registration's repository refresh validates signatures against
/// them. Registration itself adds the vendor repositories, so only the
/// pattern install follows it.
fn run_enterprise_path(
    req: &BootstrapRequest,
    product: &str,
    version: &str,
    executor: &dyn CommandExecutor,
) -> Result<()> {
    let token = register::map_enterprise_version(product, version)?;

    let reg_code = req
        .reg_code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ZypstrapError::MissingRegistrationCode {
            product: product.to_string(),
        })?;

    info!("bootstrapping {} {} ({}) into {}", product, version, req.arch, req.root);

    trust::propagate_vendor_keys(&req.root, executor)
        .context("failed to propagate vendor trust keys")?;
    register::register_product(&req.root, product, token, req.arch, reg_code, executor)
        .with_context(|| format!("failed to register {}", product))?;
    zypper::install_pattern(&req.root, "Minimal", true, req.quiet, executor)
        .context("failed to install the Minimal pattern")?;

    Ok(())
}

/// Bootstraps the community (openSUSE) path.
///
/// No registration and no trust import: the resolved repositories are
/// signed by keys the package manager already handles on its own.
fn run_community_path(
    req: &BootstrapRequest,
    version: &str,
    executor: &dyn CommandExecutor,
) -> Result<()> {
    let repositories = repos::resolve(version)?;

    info!("bootstrapping openSUSE {} ({}) into {}", version, req.arch, req.root);

    for entry in &repositories {
        zypper::add_repository(&req.root, entry, req.quiet, executor)
            .with_context(|| format!("failed to add repository {:?}", entry.label))?;
    }
    zypper::install_pattern(&req.root, "base", false, req.quiet, executor)
        .context("failed to install the base pattern")?;

    Ok(())
}

/// Dispatches a parsed distribution tag to its bootstrap procedure.
///
/// A flat one-shot dispatch: it runs exactly once per invocation and
/// never resumes or retries. The `Unknown` arm is reachable only if
/// validation was bypassed.
fn dispatch(
    req: &BootstrapRequest,
    tag: &str,
    spec: &DistroSpec,
    executor: &dyn CommandExecutor,
) -> Result<()> {
    match spec.family {
        DistroFamily::Sled => run_enterprise_path(req, "SLED", &spec.version, executor),
        DistroFamily::Sles => run_enterprise_path(req, "SLES", &spec.version, executor),
        DistroFamily::OpenSuse => run_community_path(req, &spec.version, executor),
        DistroFamily::Unknown => Err(ZypstrapError::UnhandledDistribution {
            tag: tag.to_string(),
        }
        .into()),
    }
}

/// Runs one provisioning invocation end to end.
///
/// Validation, then bootstrap dispatch, then post-install finalization,
/// each step blocking and sequential. Any failure aborts immediately;
/// changes already applied to the target root are not rolled back.
pub fn run(req: &BootstrapRequest, executor: &dyn CommandExecutor) -> Result<()> {
    req.validate(config::host_is_64bit())?;

    if let Some(tag) = &req.distro {
        let spec = DistroSpec::parse(tag);
        dispatch(req, tag, &spec, executor)?;
    }

    if req.dry_run {
        info!("dry run: skipping post-install finalization of {}", req.root);
        return Ok(());
    }

    finalize::run(req, executor).context("post-install finalization failed")?;
    info!("provisioned {}", req.root);
    Ok(())
}
