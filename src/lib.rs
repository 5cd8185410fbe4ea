pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::SystemRunner;
pub use crate::config::BootstrapConfig;
pub use crate::core::engine::BootstrapEngine;
pub use crate::domain::model::{BootstrapReport, FailurePolicy};
pub use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec, StdioMode};
pub use crate::utils::error::{BootstrapError, Result};
