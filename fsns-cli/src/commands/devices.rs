//! Devices command implementation.
//!
//! Lists the interfaces of one class from a directory laid out as
//! `<DIR>/<{CLASS}>/<entries>`. Each interface is opened for shared reading
//! and closed again before the next one when `--open` is given.

use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use fsns::devices::{enumerate_devices, DirectorySource};
use fsns::ClassId;

use crate::error::CliError;
use crate::utils::{parse_class_id, resolve_path, GlobalOptions};

/// List device interfaces from a directory source.
#[derive(Args)]
pub struct DevicesCommand {
    /// Directory holding one subdirectory per interface class
    pub dir: PathBuf,

    /// Interface class to list
    #[arg(long, value_name = "CLASS", value_parser = parse_class_id)]
    pub class: ClassId,

    /// Open each interface before reporting it
    #[arg(long)]
    pub open: bool,
}

impl DevicesCommand {
    /// Execute the devices command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let root = resolve_path(Some(&self.dir))?;
        let source = DirectorySource::new(root);

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        let mut count = 0usize;
        for interface in enumerate_devices(&source, self.class)? {
            let interface = interface?;
            if self.open {
                drop(interface.open()?);
            }
            writeln!(handle, "{}\t{}", interface.class, interface.path)?;
            count += 1;
        }

        if global.verbose {
            eprintln!("{count} interfaces of {}", self.class);
        }
        Ok(())
    }
}
