//! Helpers shared by the CLI commands.
//!
//! Path resolution, layered configuration, the type registry and the
//! namespace context every command builds on.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fsns::config::OutputFormat;
use fsns::registry::{resolve_registry_path, RegistryConfig};
use fsns::{
    ClassId, Column, Config, ConfigBuilder, DefaultProviderFactory, FsFolder, IdList,
    NamespaceContext, Preferences, SqliteRegistry,
};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the type registry location.
    pub registry: Option<PathBuf>,

    /// Extra configuration file layered above the discovered ones.
    pub config: Option<PathBuf>,
}

/// Make `path` absolute against the current directory, using the current
/// directory itself when no path was given.
///
/// Symlinks are not followed, so the name the user typed is the name the
/// provider sees.
pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf, CliError> {
    let cwd = env::current_dir()?;
    Ok(match path {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd,
    })
}

/// Load hierarchical configuration.
///
/// Precedence: `--config` file, environment, project files, user file,
/// built-in defaults.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }
    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the registry path.
///
/// Priority: `--registry`, then `registry_path` from configuration, then the
/// library default.
pub fn resolve_registry(global: &GlobalOptions, config: &Config) -> Result<PathBuf, CliError> {
    if let Some(ref path) = global.registry {
        return Ok(path.clone());
    }
    if let Some(ref path) = config.registry_path {
        return Ok(path.clone());
    }
    resolve_registry_path().map_err(|e| CliError::Config(e.to_string()))
}

/// Open (creating if needed) the SQLite type registry.
pub fn open_registry(global: &GlobalOptions, config: &Config) -> Result<SqliteRegistry, CliError> {
    let path = resolve_registry(global, config)?;
    log::debug!("using type registry {}", path.display());
    Ok(SqliteRegistry::open(RegistryConfig::new(path))?)
}

/// The registry, factory and preferences for a command run.
pub fn build_context(global: &GlobalOptions, config: &Config) -> Result<NamespaceContext, CliError> {
    let registry = open_registry(global, config)?;
    Ok(NamespaceContext::new(
        Arc::new(registry),
        Arc::new(DefaultProviderFactory::from_config(config)),
    )
    .with_preferences(Preferences::from(config)))
}

/// The provider for the directory containing `path`, and the single-level
/// identifier of `path` inside it.
pub fn locate(path: &Path) -> Result<(FsFolder, IdList), CliError> {
    let parent = path.parent().ok_or_else(|| {
        CliError::InvalidArguments(format!("{} has no parent directory", path.display()))
    })?;
    let folder = FsFolder::open(parent)?;
    let segment = fsns::probe::segment_for_path(path)?;
    Ok((folder, IdList::single(segment)))
}

/// Clap value parser for output formats.
pub fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: fsns::Error| e.to_string())
}

/// Clap value parser for sort columns.
pub fn parse_column(s: &str) -> Result<Column, String> {
    s.parse().map_err(|e: fsns::Error| e.to_string())
}

/// Clap value parser for class ids.
pub fn parse_class_id(s: &str) -> Result<ClassId, String> {
    ClassId::parse(s).map_err(|e| e.to_string())
}
