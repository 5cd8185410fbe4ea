//! The isolated Python environment.
//!
//! Nothing here touches the bootstrapper's own process environment: callers
//! get the interpreter path and the per-child variables an `activate` script
//! would have exported.

use crate::config::BootstrapConfig;
use crate::core::apply_policy;
use crate::domain::model::VenvStatus;
use crate::domain::ports::{CommandRunner, CommandSpec};
use crate::utils::error::{BootstrapError, Result};
use std::path::{Path, PathBuf};

pub fn bin_dir(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts")
    } else {
        venv.join("bin")
    }
}

/// Interpreter inside the environment; prefers `python3` when the venv provides it.
pub fn interpreter_path(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        return bin_dir(venv).join("python.exe");
    }

    let bin = bin_dir(venv);
    let python3 = bin.join("python3");
    if python3.exists() {
        python3
    } else {
        bin.join("python")
    }
}

/// `VIRTUAL_ENV` and a `PATH` with the venv's bin directory first.
pub fn activation_env(venv: &Path) -> Vec<(String, String)> {
    let bin = bin_dir(venv);
    let mut paths = vec![bin.clone()];
    if let Some(current) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&current));
    }

    let path = std::env::join_paths(paths)
        .map(|joined| joined.to_string_lossy().into_owned())
        .unwrap_or_else(|_| bin.to_string_lossy().into_owned());

    vec![
        (
            "VIRTUAL_ENV".to_string(),
            venv.to_string_lossy().into_owned(),
        ),
        ("PATH".to_string(), path),
    ]
}

pub fn create_command(config: &BootstrapConfig) -> CommandSpec {
    CommandSpec::new(&config.python)
        .args(["-m", "venv"])
        .arg(config.venv_dir.as_str())
        .current_dir(config.workdir())
}

/// Creates the environment unless its directory is already present.
pub async fn ensure_venv<R>(runner: &R, config: &BootstrapConfig) -> Result<VenvStatus>
where
    R: CommandRunner + ?Sized,
{
    let venv = config.venv_path();

    if venv.is_dir() {
        println!("El entorno virtual {} ya existe", config.venv_dir);
        return Ok(VenvStatus::AlreadyExists);
    }

    let spec = create_command(config);

    if config.dry_run {
        println!(
            "Se crearía el entorno virtual {} con: {}",
            config.venv_dir,
            spec.display()
        );
        return Ok(VenvStatus::Planned);
    }

    println!("Creando entorno virtual {}...", config.venv_dir);

    let failure = match runner.run(&spec).await {
        Ok(output) if output.success() => None,
        Ok(output) => Some(format!("python -m venv exited with {}", output.describe_status())),
        Err(e) => Some(e.to_string()),
    };

    match failure {
        None => {
            tracing::info!("Created virtual environment at {}", venv.display());
            Ok(VenvStatus::Created)
        }
        Some(reason) => {
            let error = BootstrapError::VenvCreationFailure { path: venv, reason };
            Ok(VenvStatus::CreateFailed {
                reason: apply_policy(config.policy, error)?,
            })
        }
    }
}
