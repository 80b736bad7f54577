//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AttrsCommand, BindCommand, ColumnsCommand, CompletionsCommand, DevicesCommand,
    HandlerCommand, IconCommand, ListCommand, NameCommand, ParseCommand, RegistryCommand,
    RenameCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse a directory tree through the filesystem namespace provider.
#[derive(Parser)]
#[command(name = "fsns")]
#[command(version, about = "Browse a directory tree through the namespace provider", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the type registry location
    #[arg(long, value_name = "PATH", global = true, env = "FSNS_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Layer an extra configuration file above the discovered ones
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Parse a display name into an identifier
    Parse(ParseCommand),

    /// List the children of a directory
    List(ListCommand),

    /// Show the attributes of an item
    Attrs(AttrsCommand),

    /// Compose the display name of an item
    Name(NameCommand),

    /// Show the provider class an item binds to
    Bind(BindCommand),

    /// Resolve a type handler for a file
    Handler(HandlerCommand),

    /// Show the icon location of an item
    Icon(IconCommand),

    /// Rename an item
    Rename(RenameCommand),

    /// Show the column table
    Columns(ColumnsCommand),

    /// Edit the type registry
    #[command(subcommand)]
    Registry(RegistryCommand),

    /// List device interfaces from a directory source
    Devices(DevicesCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
