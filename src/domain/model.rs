use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Log provisioning failures and keep going.
    #[default]
    BestEffort,
    /// Abort on the first provisioning failure.
    FailFast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PackageStatus {
    AlreadyInstalled,
    Installed,
    InstallFailed { reason: String },
    /// Not installed, and nothing was done about it (dry run).
    Missing,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    pub name: String,
    #[serde(flatten)]
    pub status: PackageStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VenvStatus {
    AlreadyExists,
    Created,
    CreateFailed { reason: String },
    Planned,
    NotReached,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LibrariesStatus {
    Installed,
    Failed { reason: String },
    Planned,
    NotReached,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LaunchOutcome {
    /// `code` is `None` when the program was killed by a signal.
    Exited { code: Option<i32> },
    Planned,
    NotReached,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub workdir: PathBuf,
    pub interpreter: PathBuf,
    pub packages: Vec<PackageReport>,
    pub venv: VenvStatus,
    pub libraries: LibrariesStatus,
    pub launch: LaunchOutcome,
    /// The error that ended the run early, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BootstrapReport {
    /// A report where no step has run yet.
    pub fn new(workdir: impl Into<PathBuf>, interpreter: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            interpreter: interpreter.into(),
            packages: Vec::new(),
            venv: VenvStatus::NotReached,
            libraries: LibrariesStatus::NotReached,
            launch: LaunchOutcome::NotReached,
            error: None,
        }
    }

    /// Provisioning failures tolerated under the best-effort policy.
    pub fn failures(&self) -> usize {
        let packages = self
            .packages
            .iter()
            .filter(|p| matches!(p.status, PackageStatus::InstallFailed { .. }))
            .count();
        let venv = usize::from(matches!(self.venv, VenvStatus::CreateFailed { .. }));
        let libraries = usize::from(matches!(self.libraries, LibrariesStatus::Failed { .. }));
        packages + venv + libraries
    }

    /// Exit status to hand back to the caller: the launched program's own.
    pub fn exit_code(&self) -> i32 {
        match self.launch {
            LaunchOutcome::Exited { code: Some(code) } => code,
            LaunchOutcome::Exited { code: None } => 1,
            LaunchOutcome::Planned => 0,
            LaunchOutcome::NotReached => 1,
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
