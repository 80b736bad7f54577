//! Main entry point for the fsns CLI.
//!
//! Every command opens a filesystem provider on the directory it is given
//! and reports what the provider sees:
//! - `parse`, `name`: display names in both directions
//! - `list`, `columns`: enumeration and the detail columns
//! - `attrs`, `bind`, `handler`, `icon`: per-item queries
//! - `rename`: change an item's name
//! - `registry`: edit the type registry
//! - `devices`: list device interfaces

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _logger = fsns::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        registry: cli.registry,
        config: cli.config,
    };

    let result = match cli.command {
        cli::Command::Parse(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Attrs(cmd) => cmd.execute(&global),
        cli::Command::Name(cmd) => cmd.execute(&global),
        cli::Command::Bind(cmd) => cmd.execute(&global),
        cli::Command::Handler(cmd) => cmd.execute(&global),
        cli::Command::Icon(cmd) => cmd.execute(&global),
        cli::Command::Rename(cmd) => cmd.execute(&global),
        cli::Command::Columns(cmd) => cmd.execute(&global),
        cli::Command::Registry(cmd) => cmd.execute(&global),
        cli::Command::Devices(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
