//! Bind command implementation.
//!
//! Binds an item to its provider and prints the class it was created as,
//! together with the directory the provider is rooted at when it has one.

use clap::Args;
use std::path::PathBuf;

use fsns::NamespaceProvider;

use crate::error::CliError;
use crate::utils::{build_context, load_configuration, locate, resolve_path, GlobalOptions};

/// Show the provider class an item binds to.
#[derive(Args)]
pub struct BindCommand {
    /// Item to bind
    pub path: PathBuf,
}

impl BindCommand {
    /// Execute the bind command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let ctx = build_context(global, &config)?;
        let path = resolve_path(Some(&self.path))?;
        let (folder, id) = locate(&path)?;

        let provider = folder.bind_to_object(&ctx, &id)?;
        match provider.root_path() {
            Some(root) => println!("{}\t{}", provider.class_id(), root.display()),
            None => println!("{}", provider.class_id()),
        }
        Ok(())
    }
}
