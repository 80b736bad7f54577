//! Type-keyed handler resolution.
//!
//! A file's extension names a type key directly (`.txt\shellex\IconHandler`)
//! or through its type group (`.txt -> txtfile`, then
//! `txtfile\shellex\IconHandler`). The value found there is a handler class.

use std::fmt;

use super::FsFolder;
use crate::class_id::{ClassId, IID_CONTEXT_MENU, IID_DROP_TARGET, IID_EXTRACT_ICON};
use crate::error::{Error, Result};
use crate::pidl::{extension_of, IdList};
use crate::provider::NamespaceContext;
use crate::registry::TypeRegistry;

/// Which auxiliary handler is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// Icon extraction.
    Icon,
    /// Drag-and-drop target.
    DropTarget,
    /// A generic shell extension for an interface id.
    Interface(ClassId),
}

impl HandlerKind {
    /// Context-menu contributors.
    #[must_use]
    pub const fn context_menu() -> Self {
        Self::Interface(IID_CONTEXT_MENU)
    }

    /// The subkey under a type group that names this handler.
    #[must_use]
    pub fn subkey(&self) -> String {
        match self {
            Self::Icon => "shellex\\IconHandler".to_string(),
            Self::DropTarget => "shellex\\DropHandler".to_string(),
            Self::Interface(iid) => format!("ShellEx\\{iid}"),
        }
    }

    /// The interface a handler of this kind implements.
    #[must_use]
    pub const fn interface_id(&self) -> ClassId {
        match self {
            Self::Icon => IID_EXTRACT_ICON,
            Self::DropTarget => IID_DROP_TARGET,
            Self::Interface(iid) => *iid,
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Icon => f.write_str("icon"),
            Self::DropTarget => f.write_str("drop"),
            Self::Interface(iid) if *iid == IID_CONTEXT_MENU => f.write_str("context-menu"),
            Self::Interface(iid) => write!(f, "{iid}"),
        }
    }
}

/// Outcome of a handler lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerResolution {
    /// A handler class is registered and allowed.
    Found(ClassId),
    /// No extension, type group or subkey; or the item is not a file.
    NoHandler,
}

impl HandlerResolution {
    /// The class, if one was found.
    #[must_use]
    pub const fn class(self) -> Option<ClassId> {
        match self {
            Self::Found(class) => Some(class),
            Self::NoHandler => None,
        }
    }
}

/// Look up `subkey` for the type of `file_name`.
///
/// The extension key is tried first, then its type group. Names without an
/// extension have no type.
///
/// # Errors
///
/// Returns an error only if the registry fails.
pub fn file_type_value(
    registry: &dyn TypeRegistry,
    file_name: &str,
    subkey: &str,
) -> Result<Option<String>> {
    let ext = extension_of(file_name);
    if ext.is_empty() {
        return Ok(None);
    }

    if let Some(value) = registry.lookup(ext, Some(subkey))? {
        return Ok(Some(value));
    }

    match registry.lookup(ext, None)? {
        Some(group) if !group.trim().is_empty() => registry.lookup(group.trim(), Some(subkey)),
        _ => Ok(None),
    }
}

/// The type group (class name) registered for the extension of `file_name`.
///
/// # Errors
///
/// Returns an error only if the registry fails.
pub fn file_type_group(registry: &dyn TypeRegistry, file_name: &str) -> Result<Option<String>> {
    let ext = extension_of(file_name);
    if ext.is_empty() {
        return Ok(None);
    }
    Ok(registry
        .lookup(ext, None)?
        .map(|group| group.trim().to_string())
        .filter(|group| !group.is_empty()))
}

/// Resolve the class registered at `subkey` for the type of `file_name`.
///
/// An empty value counts as absent.
///
/// # Errors
///
/// Returns [`Error::AccessDenied`] for a blocked class and
/// [`Error::Validation`] for a value that is not a class id.
pub fn class_for_file_type(
    registry: &dyn TypeRegistry,
    file_name: &str,
    subkey: &str,
) -> Result<Option<ClassId>> {
    let Some(value) = file_type_value(registry, file_name, subkey)? else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let class = ClassId::parse(value).map_err(|e| Error::Validation {
        field: format!("{}\\{subkey}", extension_of(file_name)),
        message: e.to_string(),
    })?;
    if registry.is_blocked(&class)? {
        log::warn!("handler {class} for {file_name} is blocked");
        return Err(Error::AccessDenied { class });
    }
    Ok(Some(class))
}

impl FsFolder {
    /// Resolve the handler class of `kind` for a file in this folder.
    ///
    /// Folders and non-simple identifiers have no handler.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccessDenied`] if the registered class is blocked.
    pub fn resolve_handler(
        &self,
        ctx: &NamespaceContext,
        id: &IdList,
        kind: HandlerKind,
    ) -> Result<HandlerResolution> {
        let segment = match id.segments() {
            [segment] if segment.is_file() => segment,
            _ => return Ok(HandlerResolution::NoHandler),
        };

        let resolution = match class_for_file_type(ctx.registry(), segment.name(), &kind.subkey())? {
            Some(class) => HandlerResolution::Found(class),
            None => HandlerResolution::NoHandler,
        };
        log::debug!("{kind} handler for {}: {resolution:?}", segment.name());
        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder::test_util::{context_with, folder_at};
    use crate::pidl::{DosDateTime, OsAttributes, Segment};
    use crate::provider::Preferences;
    use crate::registry::MemoryRegistry;
    use std::path::Path;

    const ICON: &str = "{11111111-2222-3333-4444-555555555555}";
    const MENU: &str = "{66666666-7777-8888-9999-AAAAAAAAAAAA}";

    fn file(name: &str) -> IdList {
        IdList::single(Segment::file(name, 0, DosDateTime::default(), OsAttributes::empty()).unwrap())
    }

    fn registry() -> MemoryRegistry {
        MemoryRegistry::new()
            .with_value(".txt", "txtfile")
            .with_value("txtfile\\shellex\\IconHandler", ICON)
            .with_value(
                &format!("txtfile\\ShellEx\\{IID_CONTEXT_MENU}"),
                MENU,
            )
            .with_value(".direct\\shellex\\DropHandler", ICON)
    }

    #[test]
    fn test_resolves_through_type_group() {
        let ctx = context_with(registry(), Preferences::default());
        let folder = folder_at(Path::new("/data"));

        let found = folder.resolve_handler(&ctx, &file("a.TXT"), HandlerKind::Icon).unwrap();
        assert_eq!(found, HandlerResolution::Found(ClassId::parse(ICON).unwrap()));

        let menu = folder
            .resolve_handler(&ctx, &file("a.txt"), HandlerKind::context_menu())
            .unwrap();
        assert_eq!(menu.class(), Some(ClassId::parse(MENU).unwrap()));
    }

    #[test]
    fn test_resolves_extension_key_directly() {
        let ctx = context_with(registry(), Preferences::default());
        let folder = folder_at(Path::new("/data"));
        let found = folder
            .resolve_handler(&ctx, &file("x.direct"), HandlerKind::DropTarget)
            .unwrap();
        assert!(matches!(found, HandlerResolution::Found(_)));
    }

    #[test]
    fn test_unregistered_type_has_no_handler() {
        let ctx = context_with(registry(), Preferences::default());
        let folder = folder_at(Path::new("/data"));
        for name in ["archive.xyz", "README", "a.txt"] {
            let kind = if name == "a.txt" { HandlerKind::DropTarget } else { HandlerKind::Icon };
            assert_eq!(
                folder.resolve_handler(&ctx, &file(name), kind).unwrap(),
                HandlerResolution::NoHandler,
                "{name}"
            );
        }
    }

    #[test]
    fn test_blocked_handler_is_access_denied() {
        let registry = registry().with_blocked(ClassId::parse(ICON).unwrap());
        let ctx = context_with(registry, Preferences::default());
        let folder = folder_at(Path::new("/data"));

        let err = folder
            .resolve_handler(&ctx, &file("a.txt"), HandlerKind::Icon)
            .unwrap_err();
        assert!(err.is_access_denied());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_folders_have_no_handler() {
        let ctx = context_with(registry(), Preferences::default());
        let folder = folder_at(Path::new("/data"));
        let id = IdList::single(Segment::folder("a.txt", OsAttributes::DIRECTORY).unwrap());
        assert_eq!(
            folder.resolve_handler(&ctx, &id, HandlerKind::Icon).unwrap(),
            HandlerResolution::NoHandler
        );
    }

    #[test]
    fn test_subkeys() {
        assert_eq!(HandlerKind::Icon.subkey(), "shellex\\IconHandler");
        assert_eq!(
            HandlerKind::context_menu().subkey(),
            "ShellEx\\{000214E4-0000-0000-C000-000000000046}"
        );
        assert_eq!(HandlerKind::context_menu().to_string(), "context-menu");
    }
}
