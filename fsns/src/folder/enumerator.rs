//! Lazy enumeration of a directory's children.

use std::fs::{self, ReadDir};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use bitflags::bitflags;

use crate::error::{Error, Result};
use crate::pidl::{OsAttributes, Segment};
use crate::probe;

bitflags! {
    /// Which children an enumeration yields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EnumFlags: u32 {
        /// Include folders.
        const FOLDERS = 0x0020;
        /// Include everything that is not a folder.
        const NON_FOLDERS = 0x0040;
        /// Include hidden items.
        const INCLUDE_HIDDEN = 0x0080;
    }
}

/// The children of one directory, read on demand.
///
/// Each instance lists the directory once; create a new one to restart. A
/// failure while listing is yielded as an error and ends the sequence.
///
/// # Examples
///
/// ```no_run
/// use fsns::folder::{EnumFlags, FileSysEnum};
///
/// let children = FileSysEnum::new("/srv", EnumFlags::FOLDERS | EnumFlags::NON_FOLDERS).unwrap();
/// for child in children {
///     println!("{}", child.unwrap().name());
/// }
/// ```
#[derive(Debug)]
pub struct FileSysEnum {
    path: PathBuf,
    flags: EnumFlags,
    entries: Option<ReadDir>,
}

impl FileSysEnum {
    /// Start listing `path`.
    ///
    /// # Errors
    ///
    /// Returns a not-found, permission or I/O error if the directory cannot
    /// be opened.
    pub fn new(path: impl AsRef<Path>, flags: EnumFlags) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = probe::list_dir(&path)?;
        Ok(Self {
            path,
            flags,
            entries: Some(entries),
        })
    }

    /// The directory being listed.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn fail(&mut self, source: std::io::Error) -> Option<Result<Segment>> {
        self.entries = None;
        Some(Err(Error::Enumeration {
            path: self.path.clone(),
            source,
        }))
    }
}

impl Iterator for FileSysEnum {
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.as_mut()?.next() {
                None => {
                    self.entries = None;
                    return None;
                }
                Some(Err(e)) => return self.fail(e),
                Some(Ok(entry)) => entry,
            };

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if name_str == "." || name_str == ".." {
                continue;
            }

            // follow symlinks, fall back to the link itself when dangling
            let metadata = match fs::metadata(entry.path()).or_else(|_| entry.metadata()) {
                Ok(metadata) => metadata,
                Err(e) => return self.fail(e),
            };
            let info = probe::info_from_metadata(&name, &metadata);

            if info.attributes.contains(OsAttributes::HIDDEN)
                && !self.flags.contains(EnumFlags::INCLUDE_HIDDEN)
            {
                continue;
            }
            let wanted = if info.is_folder() {
                EnumFlags::FOLDERS
            } else {
                EnumFlags::NON_FOLDERS
            };
            if !self.flags.contains(wanted) {
                continue;
            }

            return Some(info.to_segment(&name_str));
        }
    }
}

impl FusedIterator for FileSysEnum {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::write(dir.path().join(".hidden"), b"h").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();
        dir
    }

    fn names(iter: FileSysEnum) -> Vec<String> {
        let mut names: Vec<String> = iter.map(|s| s.unwrap().name().to_string()).collect();
        names.sort();
        names
    }

    #[cfg(unix)]
    #[test]
    fn test_non_folders_only() {
        let dir = fixture();
        let iter = FileSysEnum::new(dir.path(), EnumFlags::NON_FOLDERS).unwrap();
        assert_eq!(names(iter), ["a.txt"]);
    }

    #[test]
    fn test_folders_only() {
        let dir = fixture();
        let iter = FileSysEnum::new(dir.path(), EnumFlags::FOLDERS).unwrap();
        let segments: Vec<_> = iter.map(Result::unwrap).collect();
        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_folder());
        assert_eq!(segments[0].name(), "subdir");
    }

    #[cfg(unix)]
    #[test]
    fn test_include_hidden() {
        let dir = fixture();
        let iter = FileSysEnum::new(dir.path(), EnumFlags::all()).unwrap();
        assert_eq!(names(iter), [".hidden", "a.txt", "subdir"]);
    }

    #[test]
    fn test_empty_flags_yield_nothing() {
        let dir = fixture();
        let mut iter = FileSysEnum::new(dir.path(), EnumFlags::empty()).unwrap();
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = FileSysEnum::new(dir.path().join("gone"), EnumFlags::all()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_file_segments_carry_size() {
        let dir = fixture();
        let seg = FileSysEnum::new(dir.path(), EnumFlags::NON_FOLDERS)
            .unwrap()
            .map(Result::unwrap)
            .find(|s| s.name() == "a.txt")
            .unwrap();
        assert_eq!(seg.size(), 1);
    }
}
