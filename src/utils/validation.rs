use crate::utils::error::{BootstrapError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> BootstrapError {
    BootstrapError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

/// Paths that must stay inside the working directory.
pub fn validate_relative_path(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    if Path::new(path).is_absolute() {
        return Err(invalid(
            field_name,
            path,
            "Path must be relative to the working directory",
        ));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_command(field_name: &str, command: &[String]) -> Result<()> {
    match command.first() {
        Some(program) => validate_non_empty_string(field_name, program),
        None => Err(invalid(field_name, "[]", "Command cannot be empty")),
    }
}

/// Debian policy: lowercase letters, digits and `+ - .`, at least two
/// characters, starting with an alphanumeric.
pub fn validate_package_name(field_name: &str, name: &str) -> Result<()> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z0-9][a-z0-9+.\-]+$").expect("package name pattern is valid")
    });

    if !re.is_match(name) {
        return Err(invalid(field_name, name, "Not a valid Debian package name"));
    }
    Ok(())
}

/// pip requirement names; version specifiers are allowed but not required.
pub fn validate_requirement(field_name: &str, requirement: &str) -> Result<()> {
    validate_non_empty_string(field_name, requirement)?;

    if requirement.starts_with('-') {
        return Err(invalid(
            field_name,
            requirement,
            "Options are not allowed in the library list",
        ));
    }
    Ok(())
}
