use crate::config::BootstrapConfig;
use crate::core::{launcher, libraries, system_packages, venv};
use crate::domain::model::{BootstrapReport, LibrariesStatus, VenvStatus};
use crate::domain::ports::CommandRunner;
use crate::utils::error::{BootstrapError, Result};

pub struct BootstrapEngine<R: CommandRunner> {
    runner: R,
    config: BootstrapConfig,
}

impl<R: CommandRunner> BootstrapEngine<R> {
    /// The working directory is made absolute here; see [`crate::config::absolute_workdir`].
    pub fn new(runner: R, config: BootstrapConfig) -> Self {
        Self {
            runner,
            config: config.anchored(),
        }
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// System packages, venv, libraries, then the entry point, strictly in order.
    pub async fn run(&self) -> Result<BootstrapReport> {
        let (report, outcome) = self.run_with_report().await;
        outcome.map(|()| report)
    }

    /// Like [`run`](Self::run), but the report is returned on failure too, with
    /// the steps reached so far and the error message.
    pub async fn run_with_report(&self) -> (BootstrapReport, Result<()>) {
        let config = &self.config;
        let mut report = BootstrapReport::new(
            config.workdir(),
            venv::interpreter_path(&config.venv_path()),
        );

        let outcome = self.execute(&mut report).await;
        if let Err(e) = &outcome {
            report.error = Some(e.to_string());
        }

        (report, outcome)
    }

    async fn execute(&self, report: &mut BootstrapReport) -> Result<()> {
        let config = &self.config;
        tracing::info!(
            "Bootstrapping {} (policy: {:?}, dry run: {})",
            config.workdir().display(),
            config.policy,
            config.dry_run
        );

        system_packages::ensure_system_packages(&self.runner, config, &mut report.packages)
            .await?;
        tracing::debug!("System packages: {:?}", report.packages);

        report.venv = match venv::ensure_venv(&self.runner, config).await {
            Ok(status) => status,
            Err(e) => {
                if let BootstrapError::VenvCreationFailure { reason, .. } = &e {
                    report.venv = VenvStatus::CreateFailed {
                        reason: reason.clone(),
                    };
                }
                return Err(e);
            }
        };

        // Resolved after creation so a fresh venv's python3 is picked up.
        report.interpreter = venv::interpreter_path(&config.venv_path());
        tracing::debug!("Using interpreter {}", report.interpreter.display());

        report.libraries =
            match libraries::install_libraries(&self.runner, config, &report.interpreter).await {
                Ok(status) => status,
                Err(e) => {
                    if let BootstrapError::LibraryInstallFailure { reason } = &e {
                        report.libraries = LibrariesStatus::Failed {
                            reason: reason.clone(),
                        };
                    }
                    return Err(e);
                }
            };

        report.launch = launcher::launch(&self.runner, config, &report.interpreter).await?;

        if report.failures() > 0 {
            tracing::warn!(
                "Bootstrap finished with {} tolerated provisioning failure(s)",
                report.failures()
            );
        }

        Ok(())
    }
}
