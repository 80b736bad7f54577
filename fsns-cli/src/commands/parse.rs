//! Parse command implementation.
//!
//! Parses a display name relative to a root directory and prints each
//! segment of the resulting identifier followed by its binary encoding.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use fsns::pidl::{encode, to_hex};
use fsns::{FsFolder, ShellAttributes};

use crate::error::CliError;
use crate::utils::{build_context, load_configuration, resolve_path, GlobalOptions};

/// Parse a display name into an identifier.
#[derive(Args)]
pub struct ParseCommand {
    /// Display name to parse, relative to the root
    pub name: String,

    /// Directory the name is relative to (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

impl ParseCommand {
    /// Execute the parse command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let ctx = build_context(global, &config)?;
        let root = resolve_path(self.root.as_deref())?;
        let folder = FsFolder::open(&root)?;

        let parsed = folder.parse_display_name(&ctx, &self.name, None, ShellAttributes::empty())?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        for segment in &parsed.id {
            writeln!(
                handle,
                "{}\t{}\t{}\t{}",
                segment.kind(),
                segment.name(),
                segment.size(),
                segment.modified()
            )?;
        }
        writeln!(handle, "{}", to_hex(&encode(&parsed.id)))?;

        Ok(())
    }
}
