//! Name command implementation.

use clap::Args;
use std::path::PathBuf;

use fsns::DisplayFlags;

use crate::error::CliError;
use crate::utils::{build_context, load_configuration, locate, resolve_path, GlobalOptions};

/// Compose the display name of an item.
#[derive(Args)]
pub struct NameCommand {
    /// Item to name
    pub path: PathBuf,

    /// Produce the form the parser accepts back
    #[arg(long)]
    pub parsing: bool,

    /// Produce the name relative to the containing folder
    #[arg(long)]
    pub in_folder: bool,
}

impl NameCommand {
    /// The display flags selected by the options.
    fn flags(&self) -> DisplayFlags {
        let mut flags = DisplayFlags::NORMAL;
        flags.set(DisplayFlags::FOR_PARSING, self.parsing);
        flags.set(DisplayFlags::IN_FOLDER, self.in_folder);
        flags
    }

    /// Execute the name command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let ctx = build_context(global, &config)?;
        let path = resolve_path(Some(&self.path))?;
        let (folder, id) = locate(&path)?;

        let name = folder.display_name_of(&ctx, &id, self.flags())?;
        println!("{name}");
        Ok(())
    }
}
