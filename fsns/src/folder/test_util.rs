//! Shared helpers for folder unit tests.

use std::path::{Component, Path};
use std::sync::Arc;

use crate::folder::FsFolder;
use crate::pidl::{IdList, OsAttributes, Segment};
use crate::provider::{DefaultProviderFactory, NamespaceContext, Preferences};
use crate::registry::MemoryRegistry;

/// A context with an empty registry and default preferences.
#[must_use]
pub fn context() -> NamespaceContext {
    context_with(MemoryRegistry::new(), Preferences::default())
}

/// A context over `registry` with `preferences`.
#[must_use]
pub fn context_with(registry: MemoryRegistry, preferences: Preferences) -> NamespaceContext {
    NamespaceContext::new(Arc::new(registry), Arc::new(DefaultProviderFactory::new()))
        .with_preferences(preferences)
}

/// A folder rooted at `path` without touching the disk.
///
/// # Panics
///
/// Panics if a component of `path` cannot form a segment.
#[must_use]
pub fn folder_at(path: &Path) -> FsFolder {
    let mut segments = Vec::new();
    let mut drive = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => drive.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => {
                drive.push(std::path::MAIN_SEPARATOR);
                segments.push(Segment::drive(std::mem::take(&mut drive)).unwrap());
            }
            Component::Normal(name) => segments.push(
                Segment::folder(name.to_string_lossy(), OsAttributes::DIRECTORY).unwrap(),
            ),
            Component::CurDir | Component::ParentDir => {}
        }
    }

    let mut folder = FsFolder::new();
    folder.initialize(IdList::from_segments(segments), Some(path.to_path_buf()));
    folder
}
