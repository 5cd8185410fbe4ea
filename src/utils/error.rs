use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Failed to install system package '{package}': {reason}")]
    PackageInstallFailure { package: String, reason: String },

    #[error("Failed to create virtual environment at {}: {reason}", .path.display())]
    VenvCreationFailure { path: PathBuf, reason: String },

    #[error("Failed to install Python libraries: {reason}")]
    LibraryInstallFailure { reason: String },

    #[error("Entry point not found: {}", .path.display())]
    MissingEntryPointError { path: PathBuf },

    #[error("Failed to launch entry point: {reason}")]
    LaunchFailure { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Provisioning,
    Launch,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BootstrapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PackageInstallFailure { .. }
            | Self::VenvCreationFailure { .. }
            | Self::LibraryInstallFailure { .. } => ErrorCategory::Provisioning,
            Self::MissingEntryPointError { .. } | Self::LaunchFailure { .. } => {
                ErrorCategory::Launch
            }
            Self::TomlError(_) | Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Provisioning | ErrorCategory::Launch => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Exit status the CLI uses when this error ends the run.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::PackageInstallFailure { package, .. } => {
                format!("Error: no se pudo instalar el paquete {}", package)
            }
            Self::VenvCreationFailure { path, .. } => {
                format!("Error: no se pudo crear el entorno virtual {}", path.display())
            }
            Self::LibraryInstallFailure { .. } => {
                "Error: no se pudieron instalar las dependencias de Python".to_string()
            }
            Self::MissingEntryPointError { path } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("Error: {} no encontrado", name)
            }
            Self::LaunchFailure { reason } => format!("Error al ejecutar el programa: {}", reason),
            other => format!("Error: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::PackageInstallFailure { .. } => {
                "Check that apt is available and that you can run it with sudo"
            }
            Self::VenvCreationFailure { .. } => {
                "Make sure python3-venv is installed and the directory is writable"
            }
            Self::LibraryInstallFailure { .. } => {
                "Check your network connection and re-run the bootstrapper"
            }
            Self::MissingEntryPointError { .. } => {
                "Run the bootstrapper from the directory that contains the entry point"
            }
            Self::LaunchFailure { .. } => {
                "Delete the virtual environment directory and run the bootstrapper again"
            }
            Self::TomlError(_) | Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix bootstrap.toml or the command-line flags and try again"
            }
            Self::IoError(_) | Self::SerializationError(_) => {
                "Check file permissions and available disk space"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
