//! pip upgrade and library installs, always through the venv interpreter.

use crate::config::BootstrapConfig;
use crate::core::{apply_policy, venv};
use crate::domain::model::LibrariesStatus;
use crate::domain::ports::{CommandRunner, CommandSpec};
use crate::utils::error::{BootstrapError, Result};
use std::path::Path;

fn pip_command(config: &BootstrapConfig, interpreter: &Path) -> CommandSpec {
    let mut spec = CommandSpec::new(interpreter)
        .args(["-m", "pip", "install"])
        .current_dir(config.workdir());
    for (key, value) in venv::activation_env(&config.venv_path()) {
        spec = spec.env(key, value);
    }
    spec
}

/// `pip install --upgrade pip` (when enabled) followed by one install of every library.
pub fn install_commands(config: &BootstrapConfig, interpreter: &Path) -> Vec<(String, CommandSpec)> {
    let mut commands = Vec::new();

    if config.upgrade_pip {
        commands.push((
            "Actualizando pip...".to_string(),
            pip_command(config, interpreter).args(["--upgrade", "pip"]),
        ));
    }

    if !config.libraries.is_empty() {
        commands.push((
            format!("Instalando {}...", config.libraries.join(", ")),
            pip_command(config, interpreter).args(config.libraries.iter().cloned()),
        ));
    }

    commands
}

pub async fn install_libraries<R>(
    runner: &R,
    config: &BootstrapConfig,
    interpreter: &Path,
) -> Result<LibrariesStatus>
where
    R: CommandRunner + ?Sized,
{
    let commands = install_commands(config, interpreter);

    if config.dry_run {
        for (_, spec) in &commands {
            println!("Se ejecutaría: {}", spec.display());
        }
        return Ok(LibrariesStatus::Planned);
    }

    let mut first_failure = None;

    for (message, spec) in commands {
        println!("{}", message);

        let failure = match runner.run(&spec).await {
            Ok(output) if output.success() => continue,
            Ok(output) => format!("'{}' failed with {}", spec.display(), output.describe_status()),
            Err(e) => format!("'{}' could not run: {}", spec.display(), e),
        };

        let reason = apply_policy(
            config.policy,
            BootstrapError::LibraryInstallFailure { reason: failure },
        )?;
        first_failure.get_or_insert(reason);
    }

    Ok(match first_failure {
        None => LibrariesStatus::Installed,
        Some(reason) => LibrariesStatus::Failed { reason },
    })
}
