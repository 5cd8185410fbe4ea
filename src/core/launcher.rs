use crate::config::BootstrapConfig;
use crate::core::venv;
use crate::domain::model::LaunchOutcome;
use crate::domain::ports::{CommandRunner, CommandSpec};
use crate::utils::error::{BootstrapError, Result};
use std::path::Path;

pub fn launch_command(config: &BootstrapConfig, interpreter: &Path) -> CommandSpec {
    let mut spec = CommandSpec::new(interpreter)
        .arg(config.entry_point.as_str())
        .current_dir(config.workdir());
    for (key, value) in venv::activation_env(&config.venv_path()) {
        spec = spec.env(key, value);
    }
    spec
}

/// Runs the entry point with the venv interpreter and waits for it to finish.
///
/// The entry point must be an existing file; it is never created here.
pub async fn launch<R>(runner: &R, config: &BootstrapConfig, interpreter: &Path) -> Result<LaunchOutcome>
where
    R: CommandRunner + ?Sized,
{
    let entry_point = config.entry_point_path();
    if !entry_point.is_file() {
        return Err(BootstrapError::MissingEntryPointError { path: entry_point });
    }

    let spec = launch_command(config, interpreter);

    if config.dry_run {
        println!("Se ejecutaría: {}", spec.display());
        return Ok(LaunchOutcome::Planned);
    }

    println!("Ejecutando {}...", config.entry_point);

    let output = runner
        .run(&spec)
        .await
        .map_err(|e| BootstrapError::LaunchFailure {
            reason: format!("{}: {}", interpreter.display(), e),
        })?;

    tracing::info!(
        "{} finished with {}",
        config.entry_point,
        output.describe_status()
    );

    Ok(LaunchOutcome::Exited {
        code: output.status,
    })
}
