//! Display-name parsing and composition.

use bitflags::bitflags;

use super::extension::file_type_value;
use super::FsFolder;
use crate::error::{Error, Result};
use crate::pidl::{extension_of, IdList, ItemKind, Segment};
use crate::probe::{self, FileInfo};
use crate::provider::{NamespaceContext, NamespaceProvider, ParsedName};

use super::attributes::ShellAttributes;

/// Registry value under a type group that keeps its extension visible.
pub const ALWAYS_SHOW_EXT: &str = "AlwaysShowExt";

bitflags! {
    /// Display-name form flags. The empty set is the normal form.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DisplayFlags: u32 {
        /// Relative to the containing folder.
        const IN_FOLDER = 0x0001;
        /// For editing in place.
        const FOR_EDITING = 0x1000;
        /// For an address bar.
        const FOR_ADDRESS_BAR = 0x4000;
        /// A form the parser accepts back.
        const FOR_PARSING = 0x8000;
    }
}

impl DisplayFlags {
    /// The normal (friendly, full) form.
    pub const NORMAL: Self = Self::empty();
}

/// Split off the next path element.
///
/// Returns the element and, when a separator followed it, the text after the
/// separator (possibly empty). Both `\` and `/` separate.
///
/// # Examples
///
/// ```
/// use fsns::folder::next_element;
///
/// assert_eq!(next_element("sub\\file.txt"), ("sub", Some("file.txt")));
/// assert_eq!(next_element("file.txt"), ("file.txt", None));
/// assert_eq!(next_element("dir/"), ("dir", Some("")));
/// ```
#[must_use]
pub fn next_element(text: &str) -> (&str, Option<&str>) {
    match text.find(['\\', '/']) {
        Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
        None => (text, None),
    }
}

/// Remove the extension from a file name, if it has one.
#[must_use]
pub fn strip_extension(name: &str) -> &str {
    let ext = extension_of(name);
    &name[..name.len() - ext.len()]
}

/// Whether the extension of `name` is hidden in friendly forms.
///
/// Hidden when the user always hides extensions, or else unless the
/// registered type declares it must always be shown.
///
/// # Errors
///
/// Returns an error only if the registry fails.
pub fn should_hide_extension(ctx: &NamespaceContext, name: &str) -> Result<bool> {
    if extension_of(name).is_empty() {
        return Ok(false);
    }
    if ctx.preferences().hide_extensions {
        return Ok(true);
    }
    let always_show = file_type_value(ctx.registry(), name, ALWAYS_SHOW_EXT)?.is_some();
    Ok(!always_show)
}

/// Apply the extension hiding policy to a file name for `flags`.
///
/// # Errors
///
/// Returns an error only if the registry fails.
pub fn display_file_name(ctx: &NamespaceContext, name: &str, flags: DisplayFlags) -> Result<String> {
    let friendly = !flags.contains(DisplayFlags::FOR_PARSING)
        && (flags.contains(DisplayFlags::IN_FOLDER) || flags == DisplayFlags::NORMAL);
    if friendly && !name.starts_with('.') && should_hide_extension(ctx, name)? {
        return Ok(strip_extension(name).to_string());
    }
    Ok(name.to_string())
}

impl FsFolder {
    /// Parse one element of `text` into a segment.
    ///
    /// The segment is built from `find_data` when supplied, else by probing
    /// the disk under the root. If a separator follows the element the
    /// segment is returned as a folder. The second value is the unconsumed
    /// text, `None` when nothing non-empty remains.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] without a root, an invalid argument
    /// for an empty element, and a not-found error when the probe fails.
    pub fn parse_element<'a>(
        &self,
        text: &'a str,
        find_data: Option<&FileInfo>,
    ) -> Result<(Segment, Option<&'a str>)> {
        let root = self.require_root_path()?;
        let (element, rest) = next_element(text);
        if element.is_empty() {
            return Err(Error::invalid_argument(format!(
                "empty path element in '{text}'"
            )));
        }

        let segment = match find_data {
            Some(info) => info.to_segment(element)?,
            None => probe::segment_for_path(&root.join(element))?,
        };
        let segment = if rest.is_some() && !segment.is_folder() {
            segment.with_kind(ItemKind::Folder)
        } else {
            segment
        };

        Ok((segment, rest.filter(|r| !r.is_empty())))
    }

    /// Parse a relative display name into an identifier list.
    ///
    /// Each element is parsed here or by the child provider the previous
    /// element binds to. Attributes are computed for the final item when any
    /// are requested. Empty text is the empty identifier.
    ///
    /// # Errors
    ///
    /// Returns the first parse or bind error.
    pub fn parse_display_name(
        &self,
        ctx: &NamespaceContext,
        text: &str,
        find_data: Option<&FileInfo>,
        requested: ShellAttributes,
    ) -> Result<ParsedName> {
        if text.is_empty() {
            return Ok(ParsedName {
                id: IdList::empty(),
                attributes: None,
            });
        }

        let (segment, rest) = self.parse_element(text, find_data)?;
        match rest {
            Some(rest) => {
                let head = IdList::single(segment);
                let child = self.bind_to_object(ctx, &head)?;
                let parsed = child.parse_display_name(ctx, rest, find_data, requested)?;
                Ok(ParsedName {
                    id: head.join(&parsed.id),
                    attributes: parsed.attributes,
                })
            }
            None => {
                let attributes = (!requested.is_empty())
                    .then(|| self.resolve_attributes(ctx, &segment, requested));
                Ok(ParsedName {
                    id: IdList::single(segment),
                    attributes,
                })
            }
        }
    }

    /// Compose the display string for `id`.
    ///
    /// Complex identifiers are forwarded to the child the first segment binds
    /// to. The empty identifier names the folder itself and only has a
    /// parsing form.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error for the empty identifier outside
    /// the full parsing form, or any bind or registry error.
    pub fn display_name_of(
        &self,
        ctx: &NamespaceContext,
        id: &IdList,
        flags: DisplayFlags,
    ) -> Result<String> {
        let full_parsing =
            flags.contains(DisplayFlags::FOR_PARSING) && !flags.contains(DisplayFlags::IN_FOLDER);

        let Some((segment, rest)) = id.split_first() else {
            return match (full_parsing, self.root_path()) {
                (true, Some(root)) => Ok(root.display().to_string()),
                _ => Err(Error::invalid_argument(
                    "the empty identifier only has a full parsing name",
                )),
            };
        };

        if !rest.is_empty() {
            let child = self.bind_to_object(ctx, &IdList::single(segment.clone()))?;
            return child.display_name_of(ctx, &rest, flags);
        }

        let name = if segment.is_folder() {
            segment.name().to_string()
        } else {
            display_file_name(ctx, segment.name(), flags)?
        };

        if full_parsing {
            let root = self.require_root_path()?;
            return Ok(root.join(name).display().to_string());
        }
        Ok(name)
    }
}
