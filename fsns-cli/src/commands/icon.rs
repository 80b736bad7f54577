//! Icon command implementation.

use clap::Args;
use std::path::PathBuf;

use crate::error::CliError;
use crate::utils::{build_context, load_configuration, locate, resolve_path, GlobalOptions};

/// Show the icon location of an item.
#[derive(Args)]
pub struct IconCommand {
    /// Item to inspect
    pub path: PathBuf,
}

impl IconCommand {
    /// Execute the icon command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let ctx = build_context(global, &config)?;
        let path = resolve_path(Some(&self.path))?;
        let (folder, id) = locate(&path)?;

        println!("{}", folder.icon_location(&ctx, &id)?);
        Ok(())
    }
}
