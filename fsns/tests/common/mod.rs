//! Common test utilities for integration tests.
//!
//! Fixture builders for on-disk trees and type registries.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fsns::pidl::{DosDateTime, OsAttributes};
use fsns::{
    DefaultProviderFactory, FsFolder, IdList, MemoryRegistry, NamespaceContext, Preferences,
    Segment,
};
use tempfile::TempDir;

/// Class id used for archive-like test providers.
#[allow(dead_code)]
pub const ARCHIVE_CLASS: &str = "{E88DCCE0-B7B3-11D1-A9F0-00AA0060FA31}";

/// A temporary directory tree built up file by file.
pub struct TreeFixture {
    dir: TempDir,
}

#[allow(dead_code)]
impl TreeFixture {
    /// An empty tree.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Add a directory (and its parents).
    #[must_use]
    pub fn with_dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.path().join(relative)).unwrap();
        self
    }

    /// Add a file with `contents`, creating parents as needed.
    #[must_use]
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    /// Mark `relative` with a sidecar naming `class` as its provider.
    #[must_use]
    pub fn with_sidecar_class(self, relative: &str, class: &str) -> Self {
        self.with_file(
            &format!("{relative}/desktop.ini"),
            &format!("[.ShellClassInfo]\r\nCLSID={class}\r\n"),
        )
    }

    /// The tree root.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative`.
    #[must_use]
    pub fn join(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    /// A provider rooted at the tree.
    #[must_use]
    pub fn folder(&self) -> FsFolder {
        FsFolder::open(self.path()).unwrap()
    }
}

/// A context over `registry` with default preferences.
#[allow(dead_code)]
#[must_use]
pub fn context(registry: MemoryRegistry) -> NamespaceContext {
    context_with(registry, Preferences::default())
}

/// A context over `registry` with `preferences`.
#[allow(dead_code)]
#[must_use]
pub fn context_with(registry: MemoryRegistry, preferences: Preferences) -> NamespaceContext {
    NamespaceContext::new(Arc::new(registry), Arc::new(DefaultProviderFactory::new()))
        .with_preferences(preferences)
}

/// The registry entries of a plain text type that keeps its extension.
#[allow(dead_code)]
#[must_use]
pub fn text_registry() -> MemoryRegistry {
    MemoryRegistry::new()
        .with_value(".txt", "txtfile")
        .with_value("txtfile", "Text Document")
        .with_value("txtfile\\AlwaysShowExt", "")
        .with_value("txtfile\\DefaultIcon", "notepad.exe,1")
}

/// A single file segment.
#[allow(dead_code)]
#[must_use]
pub fn file_id(name: &str, size: u64) -> IdList {
    IdList::single(Segment::file(name, size, DosDateTime::default(), OsAttributes::empty()).unwrap())
}

/// A single folder segment.
#[allow(dead_code)]
#[must_use]
pub fn folder_id(name: &str) -> IdList {
    IdList::single(Segment::folder(name, OsAttributes::DIRECTORY).unwrap())
}
