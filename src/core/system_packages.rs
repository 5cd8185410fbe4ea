//! Host package checks (`dpkg -l`) and installs (`sudo apt install -y`).

use crate::config::BootstrapConfig;
use crate::core::apply_policy;
use crate::domain::model::{PackageReport, PackageStatus};
use crate::domain::ports::{CommandRunner, CommandSpec};
use crate::utils::error::{BootstrapError, Result};
use std::collections::HashSet;

/// Names of the packages `dpkg -l` lists as installed: `ii`, or `hi` for
/// packages on hold.
///
/// Multi-arch names such as `libc6:amd64` are reduced to `libc6`.
pub fn parse_dpkg_list(output: &str) -> HashSet<String> {
    output
        .lines()
        .filter(|line| line.starts_with("ii ") || line.starts_with("hi "))
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(|name| name.split(':').next().unwrap_or(name).to_string())
        .collect()
}

/// Builds `<prefix> <command...> <package>`, or `<command...> <package>` when
/// no privilege prefix is configured.
pub fn install_command(config: &BootstrapConfig, package: &str) -> Result<CommandSpec> {
    let mut parts = config
        .privilege_command
        .iter()
        .chain(config.install_command.iter())
        .cloned();

    let program = parts.next().ok_or_else(|| BootstrapError::ConfigError {
        message: "system.install_command is empty".to_string(),
    })?;

    Ok(CommandSpec::new(program).args(parts).arg(package))
}

fn query_command(config: &BootstrapConfig) -> Result<CommandSpec> {
    let (program, args) =
        config
            .query_command
            .split_first()
            .ok_or_else(|| BootstrapError::ConfigError {
                message: "system.query_command is empty".to_string(),
            })?;
    Ok(CommandSpec::new(program).args(args.iter().cloned()).captured())
}

/// Snapshot of the host package database. An unavailable database (no dpkg,
/// non-Debian host) reads as empty so every package counts as missing.
pub async fn query_installed<R>(runner: &R, config: &BootstrapConfig) -> Result<HashSet<String>>
where
    R: CommandRunner + ?Sized,
{
    let spec = query_command(config)?;

    match runner.run(&spec).await {
        Ok(output) if output.success() => {
            let installed = parse_dpkg_list(&output.stdout);
            tracing::debug!("{} packages registered as installed", installed.len());
            Ok(installed)
        }
        Ok(output) => {
            tracing::warn!(
                "Package query '{}' failed with {}",
                spec.display(),
                output.describe_status()
            );
            Ok(HashSet::new())
        }
        Err(e) => {
            tracing::warn!("Package query '{}' could not run: {}", spec.display(), e);
            Ok(HashSet::new())
        }
    }
}

async fn install_one<R>(runner: &R, config: &BootstrapConfig, package: &str) -> Result<Option<String>>
where
    R: CommandRunner + ?Sized,
{
    let spec = install_command(config, package)?;
    tracing::info!("Installing system package: {}", spec.display());

    let failure = match runner.run(&spec).await {
        Err(e) => Some(e.to_string()),
        Ok(output) if !output.success() => Some(output.describe_status()),
        Ok(_) if config.verify_installs => {
            let installed = query_installed(runner, config).await?;
            (!installed.contains(package))
                .then(|| "package not registered as installed after install".to_string())
        }
        Ok(_) => None,
    };

    Ok(failure)
}

/// Checks every configured package in order and installs the missing ones.
///
/// Outcomes are appended to `reports` as they happen, so a fail-fast abort
/// leaves the packages handled so far (including the failed one) recorded.
pub async fn ensure_system_packages<R>(
    runner: &R,
    config: &BootstrapConfig,
    reports: &mut Vec<PackageReport>,
) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let report = |name: &str, status: PackageStatus| PackageReport {
        name: name.to_string(),
        status,
    };

    if !config.system_enabled {
        println!("Omitiendo la comprobación de paquetes del sistema");
        reports.extend(
            config
                .system_packages
                .iter()
                .map(|name| report(name, PackageStatus::Skipped)),
        );
        return Ok(());
    }

    let installed = query_installed(runner, config).await?;

    for package in &config.system_packages {
        if installed.contains(package) {
            println!("{} ya está instalado", package);
            reports.push(report(package, PackageStatus::AlreadyInstalled));
            continue;
        }

        if config.dry_run {
            println!(
                "{} no está instalado (se ejecutaría: {})",
                package,
                install_command(config, package)?.display()
            );
            reports.push(report(package, PackageStatus::Missing));
            continue;
        }

        println!("Instalando {}...", package);
        match install_one(runner, config, package).await? {
            None => reports.push(report(package, PackageStatus::Installed)),
            Some(reason) => {
                reports.push(report(
                    package,
                    PackageStatus::InstallFailed {
                        reason: reason.clone(),
                    },
                ));
                apply_policy(
                    config.policy,
                    BootstrapError::PackageInstallFailure {
                        package: package.clone(),
                        reason,
                    },
                )?;
            }
        }
    }

    Ok(())
}
