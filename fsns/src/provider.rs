//! Provider dispatch, binding context and the bind-by-class factory.
//!
//! Every namespace operation takes a [`NamespaceContext`]: the shared type
//! registry, the factory used to instantiate child providers, and the user's
//! display preferences. Nothing here is global state.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::class_id::{ClassId, CLSID_SHELL_FS_FOLDER};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::folder::{DisplayFlags, EnumFlags, FsFolder, ShellAttributes};
use crate::pidl::{IdList, Segment};
use crate::probe::FileInfo;
use crate::registry::{MemoryRegistry, TypeRegistry};
use crate::sidecar::DEFAULT_SIDECAR_NAME;

/// Default extension that marks shortcut files.
pub const DEFAULT_SHORTCUT_EXTENSION: &str = "lnk";

/// User preferences that shape display names and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Always hide known extensions, regardless of per-type settings.
    pub hide_extensions: bool,
    /// File name of the per-directory sidecar descriptor.
    pub sidecar_name: String,
    /// Extension (without dot) that marks shortcut files.
    pub shortcut_extension: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            hide_extensions: false,
            sidecar_name: DEFAULT_SIDECAR_NAME.to_string(),
            shortcut_extension: DEFAULT_SHORTCUT_EXTENSION.to_string(),
        }
    }
}

impl From<&Config> for Preferences {
    fn from(config: &Config) -> Self {
        let defaults = Self::default();
        Self {
            hide_extensions: config.hide_extensions.unwrap_or(defaults.hide_extensions),
            sidecar_name: config
                .sidecar_name
                .clone()
                .unwrap_or(defaults.sidecar_name),
            shortcut_extension: config
                .shortcut_extension
                .as_deref()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .unwrap_or(defaults.shortcut_extension),
        }
    }
}

/// Everything a provider needs from its host.
#[derive(Clone)]
pub struct NamespaceContext {
    registry: Arc<dyn TypeRegistry>,
    factory: Arc<dyn ProviderFactory>,
    preferences: Preferences,
}

impl NamespaceContext {
    /// A context with default preferences.
    #[must_use]
    pub fn new(registry: Arc<dyn TypeRegistry>, factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            registry,
            factory,
            preferences: Preferences::default(),
        }
    }

    /// Replace the factory.
    #[must_use]
    pub fn with_factory<F: ProviderFactory + 'static>(mut self, factory: F) -> Self {
        self.factory = Arc::new(factory);
        self
    }

    /// Replace the registry.
    #[must_use]
    pub fn with_registry<R: TypeRegistry + 'static>(mut self, registry: R) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Replace the preferences.
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// The shared type registry.
    #[must_use]
    pub fn registry(&self) -> &dyn TypeRegistry {
        self.registry.as_ref()
    }

    /// The bind-by-class factory.
    #[must_use]
    pub fn factory(&self) -> &dyn ProviderFactory {
        self.factory.as_ref()
    }

    /// Display and attribute preferences.
    #[must_use]
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }
}

impl Default for NamespaceContext {
    /// An empty in-memory registry and the default factory.
    fn default() -> Self {
        Self::new(
            Arc::new(MemoryRegistry::new()),
            Arc::new(DefaultProviderFactory::new()),
        )
    }
}

impl fmt::Debug for NamespaceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceContext")
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}

/// The descriptor handed to a provider being bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderTargetInfo {
    /// The directory that owns the target, if any.
    pub parent: Option<PathBuf>,
    /// Absolute path of the target itself.
    pub target_path: PathBuf,
    /// Special-folder id. Always `None` for children composed by the binder.
    pub csidl: Option<i32>,
}

impl FolderTargetInfo {
    /// Descriptor for an arbitrary target path.
    #[must_use]
    pub fn new(target_path: impl Into<PathBuf>) -> Self {
        Self {
            parent: None,
            target_path: target_path.into(),
            csidl: None,
        }
    }

    /// Descriptor for `name` inside `parent`.
    #[must_use]
    pub fn for_child(parent: &Path, name: &str) -> Self {
        Self {
            parent: Some(parent.to_path_buf()),
            target_path: parent.join(name),
            csidl: None,
        }
    }
}

/// The result of parsing a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Identifier relative to the provider that parsed it.
    pub id: IdList,
    /// Attributes of the final item, when any were requested.
    pub attributes: Option<ShellAttributes>,
}

/// The lazy sequence produced by enumeration.
pub type ChildIter = Box<dyn Iterator<Item = Result<Segment>>>;

/// Capabilities every namespace provider offers.
///
/// The filesystem provider implements all of them. Delegated providers built
/// by host constructors implement them however they see fit.
pub trait NamespaceProvider: Send {
    /// The class this instance was created as.
    fn class_id(&self) -> ClassId;

    /// The absolute directory this provider exposes, once initialized.
    fn root_path(&self) -> Option<&Path>;

    /// The absolute identifier of the provider's root.
    fn root_id(&self) -> &IdList;

    /// Parse a display name relative to this provider.
    ///
    /// # Errors
    ///
    /// See [`FsFolder::parse_display_name`].
    fn parse_display_name(
        &self,
        ctx: &NamespaceContext,
        text: &str,
        find_data: Option<&FileInfo>,
        requested: ShellAttributes,
    ) -> Result<ParsedName>;

    /// Enumerate immediate children.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be started.
    fn enum_objects(&self, flags: EnumFlags) -> Result<ChildIter>;

    /// Bind an identifier to the provider responsible for it.
    ///
    /// # Errors
    ///
    /// See [`FsFolder::bind_to_object`].
    fn bind_to_object(&self, ctx: &NamespaceContext, id: &IdList) -> Result<Provider>;

    /// Attributes common to every listed item.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed identifiers.
    fn attributes_of(
        &self,
        ctx: &NamespaceContext,
        ids: &[IdList],
        requested: ShellAttributes,
    ) -> Result<ShellAttributes>;

    /// Compose the display string for an identifier.
    ///
    /// # Errors
    ///
    /// See [`FsFolder::display_name_of`].
    fn display_name_of(
        &self,
        ctx: &NamespaceContext,
        id: &IdList,
        flags: DisplayFlags,
    ) -> Result<String>;

    /// Order two identifiers by a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColumn`] for an unknown column.
    fn compare_ids(
        &self,
        ctx: &NamespaceContext,
        column: usize,
        a: &IdList,
        b: &IdList,
    ) -> Result<Ordering>;
}

/// A bound provider.
///
/// The filesystem provider is the common case; everything else a host
/// registers is carried as a boxed trait object.
pub enum Provider {
    /// The built-in filesystem provider.
    FileSystem(FsFolder),
    /// A provider built by a host-registered constructor.
    Delegated(Box<dyn NamespaceProvider>),
}

impl Provider {
    fn inner(&self) -> &dyn NamespaceProvider {
        match self {
            Self::FileSystem(folder) => folder,
            Self::Delegated(provider) => provider.as_ref(),
        }
    }

    /// The filesystem provider, if this is one.
    #[must_use]
    pub fn as_fs_folder(&self) -> Option<&FsFolder> {
        match self {
            Self::FileSystem(folder) => Some(folder),
            Self::Delegated(_) => None,
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem(folder) => f.debug_tuple("FileSystem").field(folder).finish(),
            Self::Delegated(provider) => f
                .debug_struct("Delegated")
                .field("class_id", &provider.class_id())
                .field("root_path", &provider.root_path())
                .finish(),
        }
    }
}

impl NamespaceProvider for Provider {
    fn class_id(&self) -> ClassId {
        self.inner().class_id()
    }

    fn root_path(&self) -> Option<&Path> {
        self.inner().root_path()
    }

    fn root_id(&self) -> &IdList {
        self.inner().root_id()
    }

    fn parse_display_name(
        &self,
        ctx: &NamespaceContext,
        text: &str,
        find_data: Option<&FileInfo>,
        requested: ShellAttributes,
    ) -> Result<ParsedName> {
        self.inner()
            .parse_display_name(ctx, text, find_data, requested)
    }

    fn enum_objects(&self, flags: EnumFlags) -> Result<ChildIter> {
        self.inner().enum_objects(flags)
    }

    fn bind_to_object(&self, ctx: &NamespaceContext, id: &IdList) -> Result<Provider> {
        self.inner().bind_to_object(ctx, id)
    }

    fn attributes_of(
        &self,
        ctx: &NamespaceContext,
        ids: &[IdList],
        requested: ShellAttributes,
    ) -> Result<ShellAttributes> {
        self.inner().attributes_of(ctx, ids, requested)
    }

    fn display_name_of(
        &self,
        ctx: &NamespaceContext,
        id: &IdList,
        flags: DisplayFlags,
    ) -> Result<String> {
        self.inner().display_name_of(ctx, id, flags)
    }

    fn compare_ids(
        &self,
        ctx: &NamespaceContext,
        column: usize,
        a: &IdList,
        b: &IdList,
    ) -> Result<Ordering> {
        self.inner().compare_ids(ctx, column, a, b)
    }
}

/// Instantiates and initializes a provider for a class.
pub trait ProviderFactory: Send + Sync {
    /// Build the provider for `class`, rooted at `root_id` and `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClassNotRegistered`] for unknown classes and
    /// [`Error::BindFailed`] when a constructor rejects the target.
    fn instantiate(
        &self,
        class: ClassId,
        root_id: &IdList,
        target: &FolderTargetInfo,
    ) -> Result<Provider>;
}

/// A host-supplied provider constructor.
pub type Constructor =
    Box<dyn Fn(&IdList, &FolderTargetInfo) -> Result<Box<dyn NamespaceProvider>> + Send + Sync>;

/// The default factory.
///
/// Binds the generic filesystem folder class (plus any extra classes marked
/// as filesystem-backed) to [`FsFolder`], and any class with a registered
/// constructor to a delegated provider.
///
/// # Examples
///
/// ```
/// use fsns::{ClassId, DefaultProviderFactory, FolderTargetInfo, IdList, ProviderFactory};
///
/// let factory = DefaultProviderFactory::new();
/// let unknown = ClassId::parse("{00000000-0000-0000-0000-00000000BEEF}").unwrap();
/// let err = factory
///     .instantiate(unknown, &IdList::empty(), &FolderTargetInfo::new("/tmp"))
///     .unwrap_err();
/// assert!(matches!(err, fsns::Error::ClassNotRegistered { .. }));
/// ```
pub struct DefaultProviderFactory {
    filesystem_classes: HashSet<ClassId>,
    constructors: HashMap<ClassId, Constructor>,
}

impl DefaultProviderFactory {
    /// A factory that knows only the filesystem folder class.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filesystem_classes: HashSet::from([CLSID_SHELL_FS_FOLDER]),
            constructors: HashMap::new(),
        }
    }

    /// Also bind `class` as a filesystem folder.
    #[must_use]
    pub fn with_filesystem_class(mut self, class: ClassId) -> Self {
        self.filesystem_classes.insert(class);
        self
    }

    /// Register a constructor for `class`.
    #[must_use]
    pub fn with_constructor<F>(mut self, class: ClassId, constructor: F) -> Self
    where
        F: Fn(&IdList, &FolderTargetInfo) -> Result<Box<dyn NamespaceProvider>> + Send + Sync + 'static,
    {
        self.constructors.insert(class, Box::new(constructor));
        self
    }

    /// Build a factory from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        config
            .filesystem_classes
            .iter()
            .flatten()
            .fold(Self::new(), |factory, class| factory.with_filesystem_class(*class))
    }
}

impl Default for DefaultProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DefaultProviderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultProviderFactory")
            .field("filesystem_classes", &self.filesystem_classes)
            .field("constructors", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ProviderFactory for DefaultProviderFactory {
    fn instantiate(
        &self,
        class: ClassId,
        root_id: &IdList,
        target: &FolderTargetInfo,
    ) -> Result<Provider> {
        if self.filesystem_classes.contains(&class) {
            let mut folder = FsFolder::with_class(class);
            folder
                .initialize_ex(root_id.clone(), target)
                .map_err(|e| Error::BindFailed {
                    class,
                    path: target.target_path.clone(),
                    reason: e.to_string(),
                })?;
            return Ok(Provider::FileSystem(folder));
        }

        let constructor = self
            .constructors
            .get(&class)
            .ok_or(Error::ClassNotRegistered { class })?;
        let provider = constructor(root_id, target).map_err(|e| match e {
            Error::BindFailed { .. } => e,
            other => Error::BindFailed {
                class,
                path: target.target_path.clone(),
                reason: other.to_string(),
            },
        })?;
        Ok(Provider::Delegated(provider))
    }
}
