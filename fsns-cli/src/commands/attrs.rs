//! Attrs command implementation.

use clap::Args;
use std::path::PathBuf;

use fsns::ShellAttributes;

use crate::error::CliError;
use crate::utils::{build_context, load_configuration, locate, resolve_path, GlobalOptions};

/// Show the attributes of an item.
#[derive(Args)]
pub struct AttrsCommand {
    /// Item to inspect
    pub path: PathBuf,

    /// Check whether folders actually contain a subfolder
    #[arg(long)]
    pub probe_subfolders: bool,
}

impl AttrsCommand {
    /// Execute the attrs command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let ctx = build_context(global, &config)?;
        let path = resolve_path(Some(&self.path))?;
        let (folder, id) = locate(&path)?;

        let mut requested = ShellAttributes::all();
        if !self.probe_subfolders {
            requested.remove(ShellAttributes::HAS_SUBFOLDER);
        }
        let attrs = folder.attributes_of(&ctx, &[id], requested)?;

        println!("0x{:08X}\t{}", attrs.bits(), flag_names(attrs));
        Ok(())
    }
}

/// `|`-joined names of the set flags, or `-` when none are set.
fn flag_names(attrs: ShellAttributes) -> String {
    if attrs.is_empty() {
        return "-".to_string();
    }
    attrs
        .iter_names()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join("|")
}
