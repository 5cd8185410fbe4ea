#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::FailurePolicy;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const CONFIG_FILE_NAME: &str = "bootstrap.toml";

pub const DEFAULT_SYSTEM_PACKAGES: &[&str] = &["python3", "python3-venv", "python3-pip"];
pub const DEFAULT_LIBRARIES: &[&str] = &["PyQt5", "send2trash"];
pub const DEFAULT_VENV_DIR: &str = ".venv";
pub const DEFAULT_ENTRY_POINT: &str = "main.py";

/// Fully resolved settings for one bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub workdir: PathBuf,

    pub system_enabled: bool,
    pub system_packages: Vec<String>,
    pub query_command: Vec<String>,
    pub install_command: Vec<String>,
    /// Prefix for install commands (`sudo`, `doas -u root`); empty runs them unprivileged.
    pub privilege_command: Vec<String>,
    pub verify_installs: bool,

    pub venv_dir: String,
    pub python: String,

    pub libraries: Vec<String>,
    pub upgrade_pip: bool,

    pub entry_point: String,

    pub policy: FailurePolicy,
    pub dry_run: bool,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            system_enabled: true,
            system_packages: owned(DEFAULT_SYSTEM_PACKAGES),
            query_command: owned(&["dpkg", "-l"]),
            install_command: owned(&["apt", "install", "-y"]),
            privilege_command: owned(&["sudo"]),
            verify_installs: false,
            venv_dir: DEFAULT_VENV_DIR.to_string(),
            python: "python3".to_string(),
            libraries: owned(DEFAULT_LIBRARIES),
            upgrade_pip: true,
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            policy: FailurePolicy::BestEffort,
            dry_run: false,
        }
    }
}

/// Anchors a relative working directory to the current one. Commands spawn
/// with `current_dir(workdir)`, so program paths under it must be absolute.
pub fn absolute_workdir(workdir: &Path) -> PathBuf {
    std::path::absolute(workdir).unwrap_or_else(|_| workdir.to_path_buf())
}

impl BootstrapConfig {
    pub fn with_workdir(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: absolute_workdir(&workdir.into()),
            ..Self::default()
        }
    }

    /// Same settings with [`absolute_workdir`] applied.
    pub fn anchored(mut self) -> Self {
        self.workdir = absolute_workdir(&self.workdir);
        self
    }

    /// Overlays the values present in a parsed `bootstrap.toml`.
    pub fn apply_toml(&mut self, file: TomlConfig) {
        if let Some(system) = file.system {
            if let Some(enabled) = system.enabled {
                self.system_enabled = enabled;
            }
            if let Some(packages) = system.packages {
                self.system_packages = packages;
            }
            if let Some(query) = system.query_command {
                self.query_command = query;
            }
            if let Some(install) = system.install_command {
                self.install_command = install;
            }
            if let Some(privilege) = system.privilege_command {
                self.privilege_command = privilege
                    .into_iter()
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect();
            }
            if let Some(verify) = system.verify_installs {
                self.verify_installs = verify;
            }
        }

        if let Some(venv) = file.venv {
            if let Some(path) = venv.path {
                self.venv_dir = path;
            }
            if let Some(python) = venv.python {
                self.python = python;
            }
        }

        if let Some(libraries) = file.libraries {
            if let Some(packages) = libraries.packages {
                self.libraries = packages;
            }
            if let Some(upgrade) = libraries.upgrade_pip {
                self.upgrade_pip = upgrade;
            }
        }

        if let Some(entry_point) = file.launch.and_then(|l| l.entry_point) {
            self.entry_point = entry_point;
        }

        if let Some(policy) = file.policy.and_then(|p| p.on_failure) {
            self.policy = policy;
        }
    }

    /// Loads `bootstrap.toml` from the working directory when it exists.
    pub fn load_from_workdir(workdir: impl Into<PathBuf>) -> Result<Self> {
        let mut config = Self::with_workdir(workdir);
        let candidate = config.workdir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!("Loading configuration from {}", candidate.display());
            config.apply_toml(TomlConfig::from_file(&candidate)?);
        }
        Ok(config)
    }

    pub fn venv_path(&self) -> PathBuf {
        self.workdir.join(&self.venv_dir)
    }

    pub fn entry_point_path(&self) -> PathBuf {
        self.workdir.join(&self.entry_point)
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl Validate for BootstrapConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("workdir", &self.workdir.to_string_lossy())?;
        validation::validate_relative_path("venv.path", &self.venv_dir)?;
        validation::validate_relative_path("launch.entry_point", &self.entry_point)?;
        validation::validate_non_empty_string("venv.python", &self.python)?;

        if self.system_enabled {
            validation::validate_command("system.query_command", &self.query_command)?;
            validation::validate_command("system.install_command", &self.install_command)?;
            for package in &self.system_packages {
                validation::validate_package_name("system.packages", package)?;
            }
        }

        for library in &self.libraries {
            validation::validate_requirement("libraries.packages", library)?;
        }

        Ok(())
    }
}
