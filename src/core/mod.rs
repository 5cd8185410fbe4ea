pub mod engine;
#[cfg(feature = "cli")]
pub mod host;
pub mod launcher;
pub mod libraries;
pub mod system_packages;
pub mod venv;

pub use crate::domain::model::{BootstrapReport, FailurePolicy};
pub use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec};
pub use crate::utils::error::{BootstrapError, Result};

/// Best-effort turns a provisioning error into a recorded reason; fail-fast returns it.
pub(crate) fn apply_policy(policy: FailurePolicy, error: BootstrapError) -> Result<String> {
    match policy {
        FailurePolicy::FailFast => Err(error),
        FailurePolicy::BestEffort => {
            tracing::warn!("{} (continuing)", error);
            Ok(match error {
                BootstrapError::PackageInstallFailure { reason, .. }
                | BootstrapError::VenvCreationFailure { reason, .. }
                | BootstrapError::LibraryInstallFailure { reason } => reason,
                other => other.to_string(),
            })
        }
    }
}
