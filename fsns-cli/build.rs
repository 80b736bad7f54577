//! Build script for fsns-cli.
//!
//! Generates the `fsns.1` man page into `OUT_DIR` with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! tree is restated here.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// The command tree for man page generation.
///
/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("fsns")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse a directory tree through the namespace provider")
        .long_about(
            "Parse, list, name, bind and rename filesystem items through the hierarchical \
             namespace provider, and edit the type registry it consults",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("registry")
                .long("registry")
                .help("Override the type registry location")
                .value_name("PATH")
                .global(true)
                .env("FSNS_REGISTRY"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Layer an extra configuration file above the discovered ones")
                .value_name("PATH")
                .global(true),
        )
        .subcommands(vec![
            Command::new("parse")
                .about("Parse a display name into an identifier")
                .long_about("Parse a display name and print its segments and binary encoding"),
            Command::new("list")
                .about("List the children of a directory")
                .long_about("Enumerate, sort and print the detail columns of a directory"),
            Command::new("attrs")
                .about("Show the attributes of an item")
                .long_about("Print the attribute flags the provider reports for an item"),
            Command::new("name")
                .about("Compose the display name of an item")
                .long_about("Compose the normal, in-folder or parsing name of an item"),
            Command::new("bind")
                .about("Show the provider class an item binds to")
                .long_about("Bind an item and print the class and root of the new provider"),
            Command::new("handler")
                .about("Resolve a type handler for a file")
                .long_about("Resolve the icon, drop or interface handler registered for a file type"),
            Command::new("icon")
                .about("Show the icon location of an item")
                .long_about("Print the icon module and index for an item"),
            Command::new("rename")
                .about("Rename an item")
                .long_about("Rename an item in place, keeping a hidden extension"),
            Command::new("columns")
                .about("Show the column table")
                .long_about("Print the descriptor of every detail column"),
            Command::new("registry")
                .about("Edit the type registry")
                .long_about("Import, set, unset, block and list type registry entries"),
            Command::new("devices")
                .about("List device interfaces from a directory source")
                .long_about("List the interfaces of one class from a directory laid out per class"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").map_err(std::io::Error::other)?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("fsns.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
