//! Filesystem probes.
//!
//! These are the only places the engine stats or lists the disk. Errors are
//! mapped so that a missing path is a not-found outcome and a permission
//! failure is an access denial; anything else is a hard I/O failure.

use std::ffi::OsStr;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::pidl::{DosDateTime, IdList, ItemKind, OsAttributes, Segment};

/// What a probe learned about one item.
///
/// This is also the "as-if" descriptor a caller may hand to the parser to
/// build a segment without touching the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    /// Folder or file.
    pub kind: ItemKind,
    /// Size in bytes; ignored for folders.
    pub size: u64,
    /// Modification stamp; ignored for folders.
    pub modified: DosDateTime,
    /// OS attribute flags.
    pub attributes: OsAttributes,
}

impl FileInfo {
    /// Descriptor for a folder with the given flags.
    #[must_use]
    pub fn folder(attributes: OsAttributes) -> Self {
        Self {
            kind: ItemKind::Folder,
            size: 0,
            modified: DosDateTime::default(),
            attributes: attributes | OsAttributes::DIRECTORY,
        }
    }

    /// Descriptor for a file.
    #[must_use]
    pub fn file(size: u64, modified: DosDateTime, attributes: OsAttributes) -> Self {
        Self {
            kind: ItemKind::File,
            size,
            modified,
            attributes,
        }
    }

    /// True when the descriptor is for a folder.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    /// Build a segment named `name` from this descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid segment name.
    pub fn to_segment(&self, name: &str) -> Result<Segment> {
        match self.kind {
            ItemKind::Folder => Segment::folder(name, self.attributes),
            ItemKind::File => Segment::file(name, self.size, self.modified, self.attributes),
            ItemKind::Drive => Segment::drive(name),
        }
    }
}

/// Map an I/O error on `path` into the library's taxonomy.
pub(crate) fn map_io_error(path: &Path, err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::NotFound => Error::PathNotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => Error::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Error::Io(err),
    }
}

/// Stat a path, following symlinks.
///
/// # Errors
///
/// Returns [`Error::PathNotFound`], [`Error::PermissionDenied`] or
/// [`Error::Io`].
pub fn stat(path: &Path) -> Result<FileInfo> {
    let metadata = fs::metadata(path).map_err(|e| map_io_error(path, e))?;
    let name = path.file_name().unwrap_or_else(|| path.as_os_str());
    Ok(info_from_metadata(name, &metadata))
}

/// Translate metadata into a [`FileInfo`].
///
/// `name` is consulted for the hidden flag on platforms where hiding is a
/// naming convention.
#[must_use]
pub fn info_from_metadata(name: &OsStr, metadata: &Metadata) -> FileInfo {
    let attributes = os_attributes(name, metadata);
    let modified = metadata
        .modified()
        .map(DosDateTime::from_system_time)
        .unwrap_or_default();

    if metadata.is_dir() {
        FileInfo::folder(attributes)
    } else {
        FileInfo::file(metadata.len(), modified, attributes)
    }
}

#[cfg(windows)]
#[allow(clippy::cast_possible_truncation)]
fn os_attributes(_name: &OsStr, metadata: &Metadata) -> OsAttributes {
    use std::os::windows::fs::MetadataExt;

    OsAttributes::from_bits_truncate(metadata.file_attributes() as u16)
}

#[cfg(not(windows))]
fn os_attributes(name: &OsStr, metadata: &Metadata) -> OsAttributes {
    let mut attributes = OsAttributes::empty();
    if metadata.is_dir() {
        attributes |= OsAttributes::DIRECTORY;
    }
    if metadata.permissions().readonly() {
        attributes |= OsAttributes::READ_ONLY;
    }
    let name = name.to_string_lossy();
    if name.starts_with('.') && name != "." && name != ".." {
        attributes |= OsAttributes::HIDDEN;
    }
    attributes
}

/// Build the segment for an existing path.
///
/// # Errors
///
/// Returns a not-found error if the path does not exist, or an invalid
/// argument error if the path has no usable final component.
pub fn segment_for_path(path: &Path) -> Result<Segment> {
    let info = stat(path)?;
    let name = path
        .file_name()
        .ok_or_else(|| Error::invalid_argument(format!("{} has no file name", path.display())))?;
    info.to_segment(&name.to_string_lossy())
}

/// List the immediate children of a directory.
///
/// # Errors
///
/// Returns [`Error::PathNotFound`], [`Error::PermissionDenied`] or
/// [`Error::Io`] if the directory cannot be opened.
pub fn list_dir(path: &Path) -> Result<fs::ReadDir> {
    fs::read_dir(path).map_err(|e| map_io_error(path, e))
}

/// Build the absolute identifier list for a path: a drive segment for the
/// root followed by one segment per component.
///
/// # Errors
///
/// Returns an error if the path is relative or any component is missing.
///
/// # Examples
///
/// ```no_run
/// use fsns::probe::id_list_for_path;
/// use std::path::Path;
///
/// let id = id_list_for_path(Path::new("/usr/share")).unwrap();
/// assert_eq!(id.len(), 3);
/// assert_eq!(id.first().unwrap().name(), "/");
/// ```
pub fn id_list_for_path(path: &Path) -> Result<IdList> {
    if !path.is_absolute() {
        return Err(Error::invalid_argument(format!(
            "{} is not an absolute path",
            path.display()
        )));
    }

    let mut segments = Vec::new();
    let mut current = PathBuf::new();
    let mut drive = String::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                drive.push_str(&prefix.as_os_str().to_string_lossy());
                current.push(prefix.as_os_str());
            }
            Component::RootDir => {
                drive.push(std::path::MAIN_SEPARATOR);
                current.push(component.as_os_str());
                segments.push(Segment::drive(std::mem::take(&mut drive))?);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(Error::invalid_argument(format!(
                    "{} contains a parent reference",
                    path.display()
                )));
            }
            Component::Normal(name) => {
                current.push(name);
                let info = stat(&current)?;
                segments.push(info.to_segment(&name.to_string_lossy())?);
            }
        }
    }

    Ok(IdList::from_segments(segments))
}
