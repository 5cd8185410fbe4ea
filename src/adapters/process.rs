use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec, StdioMode};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Runs commands on the host through `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        tracing::debug!("Running: {}", spec.display());

        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        command.envs(spec.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if let Some(dir) = &spec.current_dir {
            command.current_dir(dir);
        }

        match spec.stdio {
            StdioMode::Capture => {
                let output = command
                    .stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .output()
                    .await?;

                Ok(CommandOutput {
                    status: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                })
            }
            StdioMode::Inherit => {
                let status = command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .await?;

                tracing::debug!("{} finished with {:?}", spec.display(), status.code());

                Ok(CommandOutput {
                    status: status.code(),
                    ..Default::default()
                })
            }
        }
    }
}
