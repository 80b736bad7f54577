//! Columns command implementation.

use clap::Args;
use std::io::Write;

use fsns::folder::COLUMNS;

use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Show the column table.
#[derive(Args)]
pub struct ColumnsCommand {}

impl ColumnsCommand {
    /// Execute the columns command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        writeln!(handle, "INDEX\tKEY\tTITLE\tALIGN\tWIDTH\tTYPE\tDEFAULT")?;
        for descriptor in &COLUMNS {
            writeln!(
                handle,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                descriptor.column.index(),
                descriptor.column,
                descriptor.title,
                descriptor.format,
                descriptor.width,
                descriptor.state.value_type,
                if descriptor.state.on_by_default { "on" } else { "off" },
            )?;
        }

        Ok(())
    }
}
