//! The filesystem folder provider.
//!
//! An [`FsFolder`] is rooted at one directory. It parses display names into
//! identifier lists, lists its children, answers attribute, name, column and
//! handler queries about them, and binds them to child providers.
//!
//! # Examples
//!
//! ```no_run
//! use fsns::folder::{DisplayFlags, EnumFlags, FsFolder};
//! use fsns::{IdList, NamespaceContext};
//! use std::path::Path;
//!
//! let ctx = NamespaceContext::default();
//! let folder = FsFolder::open(Path::new("/usr/share")).unwrap();
//!
//! for child in folder.enum_objects(EnumFlags::FOLDERS | EnumFlags::NON_FOLDERS).unwrap() {
//!     let id = IdList::single(child.unwrap());
//!     println!("{}", folder.display_name_of(&ctx, &id, DisplayFlags::IN_FOLDER).unwrap());
//! }
//! ```

mod attributes;
mod binder;
mod columns;
mod compare;
mod display;
mod enumerator;
mod extension;
mod icon;
mod rename;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
#[cfg(test)]
pub(crate) mod test_util;

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

pub use attributes::{base_attributes, ShellAttributes};
pub use binder::CLASS_SUBKEY;
pub use columns::{
    attribute_letters, column_descriptor, format_kb_size, type_name, ColumnDescriptor,
    ColumnFormat, ColumnState, ColumnType, COLUMNS, FOLDER_TYPE_NAME,
};
pub use compare::{cmp_ignore_case, compare_ids, compare_segments, Column};
pub use display::{
    display_file_name, next_element, should_hide_extension, strip_extension, DisplayFlags,
    ALWAYS_SHOW_EXT,
};
pub use enumerator::{EnumFlags, FileSysEnum};
pub use extension::{
    class_for_file_type, file_type_group, file_type_value, HandlerKind, HandlerResolution,
};
pub use icon::{expand_environment, parse_icon_value, IconLocation, DEFAULT_ICON_MODULE};

use crate::class_id::{ClassId, CLSID_SHELL_FS_FOLDER};
use crate::error::{Error, Result};
use crate::pidl::IdList;
use crate::probe::{self, FileInfo};
use crate::provider::{
    ChildIter, FolderTargetInfo, NamespaceContext, NamespaceProvider, ParsedName, Provider,
};

/// A provider for one directory of the filesystem.
///
/// A new folder has no root and refuses path-dependent operations until
/// [`initialize`](Self::initialize) or
/// [`initialize_ex`](Self::initialize_ex) gives it one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsFolder {
    class_id: ClassId,
    root_id: IdList,
    root_path: Option<PathBuf>,
}

impl FsFolder {
    /// An uninitialized folder of the generic filesystem class.
    #[must_use]
    pub fn new() -> Self {
        Self::with_class(CLSID_SHELL_FS_FOLDER)
    }

    /// An uninitialized folder reporting `class` as its class id.
    #[must_use]
    pub fn with_class(class_id: ClassId) -> Self {
        Self {
            class_id,
            root_id: IdList::empty(),
            root_path: None,
        }
    }

    /// Open the directory at the absolute `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is relative or does not exist.
    pub fn open(path: &Path) -> Result<Self> {
        let root_id = probe::id_list_for_path(path)?;
        let mut folder = Self::new();
        folder.initialize(root_id, Some(path.to_path_buf()));
        Ok(folder)
    }

    /// Set the absolute identifier and, if known, the directory path.
    pub fn initialize(&mut self, root_id: IdList, root_path: Option<PathBuf>) {
        log::debug!(
            "initializing {} at {}",
            self.class_id,
            root_path
                .as_deref()
                .map_or_else(|| "<no path>".into(), |p| p.display().to_string())
        );
        self.root_id = root_id;
        self.root_path = root_path;
    }

    /// Initialize from a bind target.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error when the target names a special
    /// folder id or has an empty path.
    pub fn initialize_ex(&mut self, root_id: IdList, target: &FolderTargetInfo) -> Result<()> {
        if let Some(csidl) = target.csidl {
            return Err(Error::invalid_argument(format!(
                "special folder id {csidl} cannot be resolved to a path"
            )));
        }
        if target.target_path.as_os_str().is_empty() {
            return Err(Error::invalid_argument("bind target has an empty path"));
        }
        self.initialize(root_id, Some(target.target_path.clone()));
        Ok(())
    }

    /// The class id this folder reports.
    #[must_use]
    pub const fn class_id(&self) -> ClassId {
        self.class_id
    }

    /// The directory this folder is rooted at.
    #[must_use]
    pub fn root_path(&self) -> Option<&Path> {
        self.root_path.as_deref()
    }

    /// The absolute identifier of this folder.
    #[must_use]
    pub const fn root_id(&self) -> &IdList {
        &self.root_id
    }

    /// A copy of the absolute identifier of this folder.
    #[must_use]
    pub fn cur_folder(&self) -> IdList {
        self.root_id.clone()
    }

    pub(crate) fn require_root_path(&self) -> Result<&Path> {
        self.root_path.as_deref().ok_or(Error::NotInitialized)
    }

    /// List the children of this folder selected by `flags`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] without a root, or the error from
    /// opening the directory.
    pub fn enum_objects(&self, flags: EnumFlags) -> Result<FileSysEnum> {
        FileSysEnum::new(self.require_root_path()?, flags)
    }
}

impl Default for FsFolder {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceProvider for FsFolder {
    fn class_id(&self) -> ClassId {
        self.class_id
    }

    fn root_path(&self) -> Option<&Path> {
        self.root_path.as_deref()
    }

    fn root_id(&self) -> &IdList {
        &self.root_id
    }

    fn parse_display_name(
        &self,
        ctx: &NamespaceContext,
        text: &str,
        find_data: Option<&FileInfo>,
        requested: ShellAttributes,
    ) -> Result<ParsedName> {
        FsFolder::parse_display_name(self, ctx, text, find_data, requested)
    }

    fn enum_objects(&self, flags: EnumFlags) -> Result<ChildIter> {
        Ok(Box::new(FsFolder::enum_objects(self, flags)?))
    }

    fn bind_to_object(&self, ctx: &NamespaceContext, id: &IdList) -> Result<Provider> {
        FsFolder::bind_to_object(self, ctx, id)
    }

    fn attributes_of(
        &self,
        ctx: &NamespaceContext,
        ids: &[IdList],
        requested: ShellAttributes,
    ) -> Result<ShellAttributes> {
        FsFolder::attributes_of(self, ctx, ids, requested)
    }

    fn display_name_of(
        &self,
        ctx: &NamespaceContext,
        id: &IdList,
        flags: DisplayFlags,
    ) -> Result<String> {
        FsFolder::display_name_of(self, ctx, id, flags)
    }

    fn compare_ids(
        &self,
        _ctx: &NamespaceContext,
        column: usize,
        a: &IdList,
        b: &IdList,
    ) -> Result<Ordering> {
        compare::compare_ids(column, a, b)
    }
}
