//! Environment variable handling for configuration overrides.
//!
//! `FSNS_*` variables override values from configuration files.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use fsns::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean or column variable has an invalid value.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("FSNS_HIDE_EXTENSIONS") {
            config.hide_extensions = Some(Self::parse_bool("FSNS_HIDE_EXTENSIONS", &val)?);
        }

        if let Ok(val) = env::var("FSNS_SHOW_HIDDEN") {
            config.show_hidden = Some(Self::parse_bool("FSNS_SHOW_HIDDEN", &val)?);
        }

        if let Ok(val) = env::var("FSNS_SORT_COLUMN") {
            config.sort_column = Some(val.parse().map_err(|_| Error::Validation {
                field: "FSNS_SORT_COLUMN".into(),
                message: format!("Unknown column '{val}'"),
            })?);
        }

        if let Some(path) = env::var_os("FSNS_REGISTRY") {
            config.registry_path = Some(PathBuf::from(path));
        }

        if let Ok(name) = env::var("FSNS_SIDECAR_NAME") {
            config.sidecar_name = Some(name);
        }

        if let Ok(ext) = env::var("FSNS_SHORTCUT_EXTENSION") {
            config.shortcut_extension = Some(ext);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
