//! Registry command implementations.
//!
//! Writes go straight to the SQLite store; a running provider sees them on
//! its next lookup.

use clap::{Args, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use fsns::registry::{RegistryFile, RegistryWriter};
use fsns::ClassId;

use crate::error::CliError;
use crate::utils::{load_configuration, open_registry, parse_class_id, GlobalOptions};

/// Edit the type registry.
#[derive(Subcommand)]
pub enum RegistryCommand {
    /// Import keys and blocked classes from a YAML snapshot
    Import(ImportArgs),

    /// Set the value of a key
    Set(SetArgs),

    /// Remove a key
    Unset(UnsetArgs),

    /// Block a handler class
    Block(ClassArgs),

    /// Remove a handler class from the block list
    Unblock(ClassArgs),

    /// Print every key and value
    List,
}

/// Arguments for `registry import`.
#[derive(Args)]
pub struct ImportArgs {
    /// YAML file with `keys` and `blocked` sections
    pub file: PathBuf,
}

/// Arguments for `registry set`.
#[derive(Args)]
pub struct SetArgs {
    /// Key path, such as `.txt` or `txtfile\DefaultIcon`
    pub key: String,

    /// Value to store
    pub value: String,
}

/// Arguments for `registry unset`.
#[derive(Args)]
pub struct UnsetArgs {
    /// Key path to remove
    pub key: String,
}

/// A handler class argument.
#[derive(Args)]
pub struct ClassArgs {
    /// Class id in braced GUID form
    #[arg(value_parser = parse_class_id)]
    pub class: ClassId,
}

impl RegistryCommand {
    /// Execute the registry command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let registry = open_registry(global, &config)?;

        match self {
            Self::Import(args) => {
                let file = RegistryFile::load(&args.file)?;
                file.apply_to(&registry)?;
                if !global.quiet {
                    eprintln!(
                        "Imported {} keys and {} blocked classes",
                        file.keys.len(),
                        file.blocked.len()
                    );
                }
            }
            Self::Set(args) => {
                registry.set_value(&args.key, &args.value)?;
            }
            Self::Unset(args) => {
                if !registry.remove_value(&args.key)? {
                    return Err(CliError::SemanticFailure(format!(
                        "Key '{}' is not set",
                        args.key
                    )));
                }
            }
            Self::Block(args) => {
                registry.block(&args.class)?;
            }
            Self::Unblock(args) => {
                if !registry.unblock(&args.class)? {
                    return Err(CliError::SemanticFailure(format!(
                        "Class {} is not blocked",
                        args.class
                    )));
                }
            }
            Self::List => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                for (key, value) in registry.entries()? {
                    writeln!(handle, "{key}\t{value}")?;
                }
            }
        }

        Ok(())
    }
}
