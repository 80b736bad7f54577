//! Handler command implementation.

use clap::Args;
use std::path::PathBuf;

use fsns::folder::HandlerResolution;
use fsns::{ClassId, HandlerKind};

use crate::error::CliError;
use crate::utils::{build_context, load_configuration, locate, resolve_path, GlobalOptions};

/// Resolve a type handler for a file.
#[derive(Args)]
pub struct HandlerCommand {
    /// File whose type is looked up
    pub path: PathBuf,

    /// Handler kind: icon, drop, context-menu, or an interface class id
    #[arg(long, value_name = "KIND", value_parser = parse_kind)]
    pub kind: HandlerKind,
}

impl HandlerCommand {
    /// Execute the handler command.
    ///
    /// A type with no handler of the requested kind exits with status 1.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let ctx = build_context(global, &config)?;
        let path = resolve_path(Some(&self.path))?;
        let (folder, id) = locate(&path)?;

        match folder.resolve_handler(&ctx, &id, self.kind)? {
            HandlerResolution::Found(class) => {
                println!("{class}");
                Ok(())
            }
            HandlerResolution::NoHandler => Err(CliError::SemanticFailure(format!(
                "No {} handler for {}",
                self.kind,
                path.display()
            ))),
        }
    }
}

/// Parse a handler kind name or interface id.
fn parse_kind(s: &str) -> Result<HandlerKind, String> {
    match s.to_ascii_lowercase().as_str() {
        "icon" => Ok(HandlerKind::Icon),
        "drop" | "drop-target" => Ok(HandlerKind::DropTarget),
        "context-menu" | "menu" => Ok(HandlerKind::context_menu()),
        _ => ClassId::parse(s)
            .map(HandlerKind::Interface)
            .map_err(|_| format!("'{s}' is not a handler kind or interface id")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("ICON").unwrap(), HandlerKind::Icon);
        assert_eq!(parse_kind("drop").unwrap(), HandlerKind::DropTarget);
        assert_eq!(parse_kind("context-menu").unwrap(), HandlerKind::context_menu());

        let iid = "{00000000-0000-0000-0000-000000000042}";
        assert_eq!(
            parse_kind(iid).unwrap(),
            HandlerKind::Interface(ClassId::from_u128(0x42))
        );
        assert!(parse_kind("sideways").is_err());
    }
}
