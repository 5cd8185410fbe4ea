use crate::config::toml_config::TomlConfig;
use crate::config::BootstrapConfig;
use crate::domain::model::FailurePolicy;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "pyexplorer-bootstrap")]
#[command(about = "Prepare the PyExplorer Python environment and launch it")]
pub struct CliConfig {
    /// Configuration file (defaults to bootstrap.toml in the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the entry point and the virtual environment
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,

    /// Show what would be done without installing or launching anything
    #[arg(long)]
    pub dry_run: bool,

    /// Abort on the first failed provisioning step
    #[arg(long)]
    pub fail_fast: bool,

    /// Do not query or install system packages
    #[arg(long)]
    pub skip_system_packages: bool,

    /// Re-check the package database after each install
    #[arg(long)]
    pub verify_installs: bool,

    /// Write a JSON summary of every step to this file
    #[arg(long)]
    pub json_report: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    /// Defaults, then the config file, then command-line overrides.
    pub fn resolve(&self) -> Result<BootstrapConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let mut config = BootstrapConfig::with_workdir(&self.workdir);
                config.apply_toml(TomlConfig::from_file(path)?);
                config
            }
            None => BootstrapConfig::load_from_workdir(&self.workdir)?,
        };

        if self.dry_run {
            config.dry_run = true;
        }
        if self.fail_fast {
            config.policy = FailurePolicy::FailFast;
        }
        if self.skip_system_packages {
            config.system_enabled = false;
        }
        if self.verify_installs {
            config.verify_installs = true;
        }

        Ok(config)
    }
}
