//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates configuration values that the schema alone cannot check.
///
/// # Examples
///
/// ```
/// use fsns::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
///
/// let bad = Config { sidecar_name: Some("../desktop.ini".into()), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref name) = config.sidecar_name {
            Self::validate_file_name("sidecar_name", name)?;
        }

        if let Some(ref ext) = config.shortcut_extension {
            Self::validate_extension("shortcut_extension", ext)?;
        }

        if let Some(ref path) = config.registry_path {
            if path.as_os_str().is_empty() {
                return Err(Self::invalid("registry_path", "Cannot be empty"));
            }
        }

        if let Some(ref classes) = config.filesystem_classes {
            if classes.iter().any(|c| c.as_uuid().is_nil()) {
                return Err(Self::invalid(
                    "filesystem_classes",
                    "The nil class id cannot be bound",
                ));
            }
        }

        Ok(())
    }

    /// A bare file name: non-empty, no separators, no NUL, not `.` or `..`.
    fn validate_file_name(field: &str, value: &str) -> Result<()> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Self::invalid(field, "Cannot be empty or only whitespace"));
        }
        if trimmed.contains(['/', '\\']) {
            return Err(Self::invalid(field, "Must be a file name, not a path"));
        }
        if trimmed.contains('\0') {
            return Err(Self::invalid(field, "Cannot contain null bytes"));
        }
        if trimmed == "." || trimmed == ".." {
            return Err(Self::invalid(field, "Cannot be a directory reference"));
        }
        if trimmed.len() > 255 {
            return Err(Self::invalid(field, "Cannot exceed 255 characters"));
        }
        Ok(())
    }

    /// An extension with an optional leading dot and no further dots.
    fn validate_extension(field: &str, value: &str) -> Result<()> {
        let ext = value.trim().trim_start_matches('.');
        if ext.is_empty() {
            return Err(Self::invalid(field, "Cannot be empty"));
        }
        if ext.contains(['.', '/', '\\', ' ', '\0']) {
            return Err(Self::invalid(
                field,
                "Must be a single extension without dots, spaces or separators",
            ));
        }
        Ok(())
    }

    fn invalid(field: &str, message: &str) -> Error {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
