//! Rename command implementation.
//!
//! The new name is taken the way a user types it in the folder view: when
//! the item's extension is hidden, it is kept and need not be retyped.

use clap::Args;
use std::path::PathBuf;

use fsns::DisplayFlags;

use crate::error::CliError;
use crate::utils::{build_context, load_configuration, locate, resolve_path, GlobalOptions};

/// Rename an item.
#[derive(Args)]
pub struct RenameCommand {
    /// Item to rename
    pub path: PathBuf,

    /// New name inside the same directory
    pub new_name: String,
}

impl RenameCommand {
    /// Execute the rename command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.new_name.contains(['/', '\\']) {
            return Err(CliError::InvalidArguments(format!(
                "new name '{}' must not contain a path separator",
                self.new_name
            )));
        }

        let config = load_configuration(global)?;
        let ctx = build_context(global, &config)?;
        let path = resolve_path(Some(&self.path))?;
        let (folder, id) = locate(&path)?;

        let renamed = folder.set_name_of(&ctx, &id, &self.new_name, DisplayFlags::IN_FOLDER)?;
        if !global.quiet {
            eprintln!("Renamed {} to {}", path.display(), renamed.name());
        }
        println!("{}", renamed.name());
        Ok(())
    }
}
