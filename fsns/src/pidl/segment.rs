//! Identifier segments: one hop in the namespace tree.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::timestamp::DosDateTime;
use crate::error::{Error, Result};

bitflags! {
    /// Operating-system attribute flags recorded in a segment.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct OsAttributes: u16 {
        /// The item is read-only.
        const READ_ONLY = 0x0001;
        /// The item is hidden from normal listings.
        const HIDDEN = 0x0002;
        /// The item belongs to the operating system.
        const SYSTEM = 0x0004;
        /// The item is a directory.
        const DIRECTORY = 0x0010;
        /// The item is marked for archiving.
        const ARCHIVE = 0x0020;
    }
}

/// What a segment names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A volume root.
    Drive,
    /// A directory.
    Folder,
    /// A regular file.
    File,
}

impl ItemKind {
    /// Tag byte used by the binary encoding.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Drive => 0x23,
            Self::Folder => 0x31,
            Self::File => 0x32,
        }
    }

    /// Inverse of [`ItemKind::tag`].
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x23 => Some(Self::Drive),
            0x31 => Some(Self::Folder),
            0x32 => Some(Self::File),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Drive => "drive",
            Self::Folder => "folder",
            Self::File => "file",
        })
    }
}

/// One path segment.
///
/// Segments are immutable values. `size` and `modified` are only carried for
/// files; for drives and folders they are always zero.
///
/// # Examples
///
/// ```
/// use fsns::pidl::{DosDateTime, OsAttributes, Segment};
///
/// let seg = Segment::file("notes.md", 512, DosDateTime::default(), OsAttributes::ARCHIVE).unwrap();
/// assert!(seg.is_file());
/// assert_eq!(seg.extension(), ".md");
///
/// let upgraded = seg.with_kind(fsns::pidl::ItemKind::Folder);
/// assert!(upgraded.is_folder());
/// assert_eq!(upgraded.size(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    kind: ItemKind,
    name: String,
    size: u64,
    modified: DosDateTime,
    attributes: OsAttributes,
}

impl Segment {
    /// Create a drive segment such as `C:\` or `/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, contains a NUL, or is too long
    /// to encode.
    pub fn drive(name: impl Into<String>) -> Result<Self> {
        Self::build(ItemKind::Drive, name.into(), 0, DosDateTime::default(), OsAttributes::empty())
    }

    /// Create a folder segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, contains a NUL, or is too long
    /// to encode.
    pub fn folder(name: impl Into<String>, attributes: OsAttributes) -> Result<Self> {
        Self::build(ItemKind::Folder, name.into(), 0, DosDateTime::default(), attributes)
    }

    /// Create a file segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, contains a NUL, or is too long
    /// to encode.
    pub fn file(
        name: impl Into<String>,
        size: u64,
        modified: DosDateTime,
        attributes: OsAttributes,
    ) -> Result<Self> {
        Self::build(ItemKind::File, name.into(), size, modified, attributes)
    }

    fn build(
        kind: ItemKind,
        name: String,
        size: u64,
        modified: DosDateTime,
        attributes: OsAttributes,
    ) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::invalid_argument("segment name is empty"));
        }
        if name.contains('\0') {
            return Err(Error::invalid_argument(format!(
                "segment name {name:?} contains a NUL"
            )));
        }
        if super::codec::record_len(kind, &name) > usize::from(u16::MAX) {
            return Err(Error::invalid_argument(format!(
                "segment name is too long to encode ({} bytes)",
                name.len()
            )));
        }

        Ok(Self {
            kind,
            name,
            size,
            modified,
            attributes,
        })
    }

    /// Return a copy of this segment with a different kind.
    ///
    /// Fields that the new kind does not carry are reset.
    #[must_use]
    pub fn with_kind(&self, kind: ItemKind) -> Self {
        let (size, modified) = match kind {
            ItemKind::File => (self.size, self.modified),
            ItemKind::Drive | ItemKind::Folder => (0, DosDateTime::default()),
        };
        let attributes = match kind {
            ItemKind::Drive => OsAttributes::empty(),
            ItemKind::Folder | ItemKind::File => self.attributes,
        };
        Self {
            kind,
            name: self.name.clone(),
            size,
            modified,
            attributes,
        }
    }

    /// The segment kind.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File size in bytes; zero for non-files.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Modification stamp; zero for non-files.
    #[must_use]
    pub const fn modified(&self) -> DosDateTime {
        self.modified
    }

    /// OS attribute flags.
    #[must_use]
    pub const fn attributes(&self) -> OsAttributes {
        self.attributes
    }

    /// True for folder segments.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    /// True for file segments.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }

    /// True for segments that can contain children (drives and folders).
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self.kind, ItemKind::Drive | ItemKind::Folder)
    }

    /// The extension of the name, including the leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        extension_of(&self.name)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Extension of a file name, including the leading dot, or `""`.
///
/// The extension starts at the last dot of the name. A dot that begins the
/// name does not start an extension, and neither does a trailing dot or a
/// dot followed by a space.
///
/// # Examples
///
/// ```
/// use fsns::pidl::extension_of;
///
/// assert_eq!(extension_of("report.TXT"), ".TXT");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of(".bashrc"), "");
/// assert_eq!(extension_of("README"), "");
/// ```
#[must_use]
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => "",
        Some(idx) => {
            let ext = &name[idx..];
            if ext.len() == 1 || ext.contains(' ') {
                ""
            } else {
                ext
            }
        }
    }
}
