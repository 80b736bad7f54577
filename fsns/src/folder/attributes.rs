//! Attribute resolution.

use bitflags::bitflags;

use super::enumerator::EnumFlags;
use super::FsFolder;
use crate::error::{Error, Result};
use crate::pidl::{IdList, OsAttributes, Segment};
use crate::provider::{NamespaceContext, NamespaceProvider};

bitflags! {
    /// Capability and attribute bits reported for an item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct ShellAttributes: u32 {
        /// Can be copied.
        const CAN_COPY = 0x0000_0001;
        /// Can be moved.
        const CAN_MOVE = 0x0000_0002;
        /// Can be linked to.
        const CAN_LINK = 0x0000_0004;
        /// Supports storage binding.
        const STORAGE = 0x0000_0008;
        /// Can be renamed.
        const CAN_RENAME = 0x0000_0010;
        /// Can be deleted.
        const CAN_DELETE = 0x0000_0020;
        /// Has a property sheet.
        const HAS_PROPERTY_SHEET = 0x0000_0040;
        /// Accepts drops.
        const DROP_TARGET = 0x0000_0100;
        /// Is a shortcut.
        const LINK = 0x0001_0000;
        /// Is read-only.
        const READ_ONLY = 0x0004_0000;
        /// Is hidden.
        const HIDDEN = 0x0008_0000;
        /// Is a stream.
        const STREAM = 0x0040_0000;
        /// May contain storage items.
        const STORAGE_ANCESTOR = 0x0080_0000;
        /// Must be revalidated before use; never reported.
        const VALIDATE = 0x0100_0000;
        /// May contain filesystem items.
        const FILESYSTEM_ANCESTOR = 0x1000_0000;
        /// Is a folder.
        const FOLDER = 0x2000_0000;
        /// Is backed by the filesystem.
        const FILESYSTEM = 0x4000_0000;
        /// Has at least one child folder.
        const HAS_SUBFOLDER = 0x8000_0000;
    }
}

impl ShellAttributes {
    /// Bits every filesystem item starts from.
    pub const BASELINE: Self = Self::CAN_COPY
        .union(Self::CAN_MOVE)
        .union(Self::CAN_LINK)
        .union(Self::CAN_RENAME)
        .union(Self::CAN_DELETE)
        .union(Self::HAS_PROPERTY_SHEET)
        .union(Self::DROP_TARGET)
        .union(Self::FILESYSTEM);

    /// Bits added for directories.
    pub const DIRECTORY: Self = Self::FOLDER
        .union(Self::HAS_SUBFOLDER)
        .union(Self::FILESYSTEM_ANCESTOR)
        .union(Self::STORAGE_ANCESTOR)
        .union(Self::STORAGE);
}

/// Attributes that follow from the segment alone, without probing.
///
/// Drives and other non-filesystem segments get nothing.
#[must_use]
pub fn base_attributes(segment: &Segment) -> ShellAttributes {
    if !(segment.is_folder() || segment.is_file()) {
        return ShellAttributes::empty();
    }

    let mut attrs = ShellAttributes::BASELINE;
    if segment.is_folder() {
        attrs |= ShellAttributes::DIRECTORY;
    } else {
        attrs |= ShellAttributes::STREAM;
    }
    if segment.attributes().contains(OsAttributes::HIDDEN) {
        attrs |= ShellAttributes::HIDDEN;
    }
    if segment.attributes().contains(OsAttributes::READ_ONLY) {
        attrs |= ShellAttributes::READ_ONLY;
    }
    attrs
}

impl FsFolder {
    /// Resolve the attributes of one item directly inside this folder.
    ///
    /// The result is not masked by `requested`; the request only decides
    /// which expensive probes run. Probe failures are logged and treated as a
    /// negative answer, so resolution never fails.
    #[must_use]
    pub fn resolve_attributes(
        &self,
        ctx: &NamespaceContext,
        segment: &Segment,
        requested: ShellAttributes,
    ) -> ShellAttributes {
        if !(segment.is_folder() || segment.is_file()) {
            return requested & ShellAttributes::CAN_LINK;
        }

        let mut attrs = base_attributes(segment);

        if requested.contains(ShellAttributes::LINK) {
            let ext = segment.extension();
            if !ext.is_empty() && ext[1..].eq_ignore_ascii_case(&ctx.preferences().shortcut_extension) {
                attrs |= ShellAttributes::LINK;
            }
        }

        if requested.contains(ShellAttributes::HAS_SUBFOLDER) && segment.is_folder() {
            attrs.set(
                ShellAttributes::HAS_SUBFOLDER,
                self.child_has_subfolder(ctx, segment),
            );
        }

        attrs - ShellAttributes::VALIDATE
    }

    fn child_has_subfolder(&self, ctx: &NamespaceContext, segment: &Segment) -> bool {
        let child = match self.bind_to_object(ctx, &IdList::single(segment.clone())) {
            Ok(child) => child,
            Err(e) => {
                log::debug!("has-subfolder probe for {} failed to bind: {e}", segment.name());
                return false;
            }
        };
        first_folder_exists(&child, segment.name())
    }

    /// Attributes common to every item in `ids`.
    ///
    /// With no identifiers, the attributes of the folder itself are reported.
    /// A zero request means "everything".
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if any identifier is not simple.
    pub fn attributes_of(
        &self,
        ctx: &NamespaceContext,
        ids: &[IdList],
        requested: ShellAttributes,
    ) -> Result<ShellAttributes> {
        let requested = if requested.is_empty() {
            ShellAttributes::all()
        } else {
            requested
        };

        if ids.is_empty() {
            return Ok(self.own_attributes(requested));
        }

        let mut result = ShellAttributes::all();
        for id in ids {
            let segment = match id.segments() {
                [segment] => segment,
                _ => {
                    return Err(Error::invalid_argument(format!(
                        "attributes need single-segment identifiers, got {} segments",
                        id.len()
                    )))
                }
            };
            result &= self.resolve_attributes(ctx, segment, requested);
        }

        Ok(result - ShellAttributes::VALIDATE)
    }

    fn own_attributes(&self, requested: ShellAttributes) -> ShellAttributes {
        let Some(segment) = self.root_id().last() else {
            return requested & ShellAttributes::CAN_LINK;
        };
        if !segment.is_folder() {
            return requested & ShellAttributes::CAN_LINK;
        }

        let mut attrs = base_attributes(segment);
        if requested.contains(ShellAttributes::HAS_SUBFOLDER) {
            attrs.set(
                ShellAttributes::HAS_SUBFOLDER,
                first_folder_exists(self, segment.name()),
            );
        }
        attrs - ShellAttributes::VALIDATE
    }
}

fn first_folder_exists(provider: &dyn NamespaceProvider, name: &str) -> bool {
    let mut children = match provider.enum_objects(EnumFlags::FOLDERS) {
        Ok(children) => children,
        Err(e) => {
            log::debug!("has-subfolder probe for {name} failed to list: {e}");
            return false;
        }
    };
    match children.next() {
        Some(Ok(_)) => true,
        Some(Err(e)) => {
            log::debug!("has-subfolder probe for {name} failed mid-listing: {e}");
            false
        }
        None => false,
    }
}
