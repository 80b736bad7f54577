//! Configuration schema definitions.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::class_id::ClassId;
use crate::error::Error;
use crate::folder::Column;

/// Complete configuration structure.
///
/// Every field is optional so that layers can be merged; unset fields fall
/// back to built-in defaults where they are consumed.
///
/// # Examples
///
/// ```
/// use fsns::config::{Config, OutputFormat};
///
/// let config = Config {
///     hide_extensions: Some(true),
///     output_format: Some(OutputFormat::Json),
///     ..Default::default()
/// };
/// assert_eq!(config.hide_extensions, Some(true));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Always hide file extensions in friendly names.
    pub hide_extensions: Option<bool>,

    /// Include hidden items in listings by default.
    pub show_hidden: Option<bool>,

    /// Default sort column for listings.
    pub sort_column: Option<Column>,

    /// Path of the SQLite type registry.
    pub registry_path: Option<PathBuf>,

    /// File name of the per-directory sidecar descriptor.
    pub sidecar_name: Option<String>,

    /// Extension that marks shortcut files.
    pub shortcut_extension: Option<String>,

    /// Extra classes bound as plain filesystem folders.
    pub filesystem_classes: Option<Vec<ClassId>>,

    /// Output format for listings.
    pub output_format: Option<OutputFormat>,
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use fsns::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            _ => Err(Error::Validation {
                field: "output_format".into(),
                message: format!("unknown output format '{s}'"),
            }),
        }
    }
}
