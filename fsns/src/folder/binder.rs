//! Binding identifiers to the providers responsible for them.

use std::path::Path;

use super::extension::class_for_file_type;
use super::FsFolder;
use crate::class_id::{ClassId, CLSID_SHELL_FS_FOLDER};
use crate::error::{Error, Result};
use crate::pidl::{IdList, OsAttributes, Segment};
use crate::provider::{FolderTargetInfo, NamespaceContext, NamespaceProvider, Provider};
use crate::sidecar;

/// Subkey under a file type naming the provider class for files of that type.
pub const CLASS_SUBKEY: &str = "CLSID";

impl FsFolder {
    /// The class that should provide `segment`, whose path is `target`.
    ///
    /// Folders use the generic filesystem folder class unless a system or
    /// read-only directory names another class in its sidecar. Files use the
    /// class registered for their type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TargetMissing`] when a file type has no provider
    /// class, or [`Error::AccessDenied`] when the chosen class (registered
    /// or named by a sidecar) is blocked.
    pub fn class_for_segment(
        &self,
        ctx: &NamespaceContext,
        segment: &Segment,
        target: &Path,
    ) -> Result<ClassId> {
        if segment.is_container() {
            let marked = segment
                .attributes()
                .intersects(OsAttributes::SYSTEM | OsAttributes::READ_ONLY);
            if marked {
                if let Some(class) = sidecar::class_for_directory(target, &ctx.preferences().sidecar_name) {
                    if ctx.registry().is_blocked(&class)? {
                        log::warn!("{} names blocked class {class}", target.display());
                        return Err(Error::AccessDenied { class });
                    }
                    log::debug!("{} overrides its provider with {class}", target.display());
                    return Ok(class);
                }
            }
            return Ok(CLSID_SHELL_FS_FOLDER);
        }

        class_for_file_type(ctx.registry(), segment.name(), CLASS_SUBKEY)?.ok_or_else(|| {
            Error::TargetMissing {
                path: target.to_path_buf(),
            }
        })
    }

    /// Bind `id` to the provider responsible for it.
    ///
    /// The first segment is bound through the context's factory; any
    /// remaining segments are forwarded to the new child.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before initialization (no root path
    /// or an empty root identifier), an invalid
    /// argument for the empty identifier, [`Error::TargetMissing`] when a
    /// file has no provider class, and whatever the factory reports.
    pub fn bind_to_object(&self, ctx: &NamespaceContext, id: &IdList) -> Result<Provider> {
        let root = self.require_root_path()?;
        if self.root_id().is_empty() {
            return Err(Error::NotInitialized);
        }
        let (first, rest) = id
            .split_first()
            .ok_or_else(|| Error::invalid_argument("cannot bind the empty identifier"))?;

        let target = FolderTargetInfo::for_child(root, first.name());
        let class = self.class_for_segment(ctx, first, &target.target_path)?;
        let child_root = self.root_id().child(first.clone());

        log::debug!("binding {} as {class}", target.target_path.display());
        let child = ctx.factory().instantiate(class, &child_root, &target)?;

        if rest.is_empty() {
            Ok(child)
        } else {
            child.bind_to_object(ctx, &rest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder::test_util::{context, context_with, folder_at};
    use crate::folder::{DisplayFlags, EnumFlags, ShellAttributes};
    use crate::pidl::DosDateTime;
    use crate::probe::FileInfo;
    use crate::provider::{ChildIter, DefaultProviderFactory, ParsedName, Preferences};
    use crate::registry::MemoryRegistry;
    use std::cmp::Ordering;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const ZIP_CLASS: &str = "{E88DCCE0-B7B3-11D1-A9F0-00AA0060FA31}";

    #[derive(Debug)]
    struct Archive {
        class: ClassId,
        path: PathBuf,
        root_id: IdList,
    }

    impl NamespaceProvider for Archive {
        fn class_id(&self) -> ClassId {
            self.class
        }
        fn root_path(&self) -> Option<&Path> {
            Some(&self.path)
        }
        fn root_id(&self) -> &IdList {
            &self.root_id
        }
        fn parse_display_name(
            &self,
            _: &NamespaceContext,
            _: &str,
            _: Option<&FileInfo>,
            _: ShellAttributes,
        ) -> Result<ParsedName> {
            Err(Error::invalid_argument("archives are opaque"))
        }
        fn enum_objects(&self, _: EnumFlags) -> Result<ChildIter> {
            Ok(Box::new(std::iter::empty()))
        }
        fn bind_to_object(&self, _: &NamespaceContext, _: &IdList) -> Result<Provider> {
            Err(Error::invalid_argument("archives are opaque"))
        }
        fn attributes_of(
            &self,
            _: &NamespaceContext,
            _: &[IdList],
            _: ShellAttributes,
        ) -> Result<ShellAttributes> {
            Ok(ShellAttributes::empty())
        }
        fn display_name_of(&self, _: &NamespaceContext, _: &IdList, _: DisplayFlags) -> Result<String> {
            Ok(String::new())
        }
        fn compare_ids(&self, _: &NamespaceContext, _: usize, _: &IdList, _: &IdList) -> Result<Ordering> {
            Ok(Ordering::Equal)
        }
    }

    fn archive_factory() -> DefaultProviderFactory {
        let class = ClassId::parse(ZIP_CLASS).unwrap();
        DefaultProviderFactory::new().with_constructor(class, move |root_id, target| {
            Ok(Box::new(Archive {
                class,
                path: target.target_path.clone(),
                root_id: root_id.clone(),
            }))
        })
    }

    fn folder(name: &str, attrs: OsAttributes) -> IdList {
        IdList::single(Segment::folder(name, attrs | OsAttributes::DIRECTORY).unwrap())
    }

    fn file(name: &str) -> IdList {
        IdList::single(Segment::file(name, 0, DosDateTime::default(), OsAttributes::empty()).unwrap())
    }

    #[test]
    fn test_plain_folder_binds_filesystem_class() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        let parent = folder_at(dir.path());

        let child = parent
            .bind_to_object(&context(), &folder("docs", OsAttributes::empty()))
            .unwrap();
        assert_eq!(child.class_id(), CLSID_SHELL_FS_FOLDER);
        assert_eq!(child.root_path(), Some(dir.path().join("docs").as_path()));
        assert_eq!(child.root_id().len(), parent.root_id().len() + 1);
    }

    #[test]
    fn test_sidecar_overrides_marked_folder() {
        let dir = TempDir::new().unwrap();
        let photos = dir.path().join("photos");
        fs::create_dir(&photos).unwrap();
        fs::write(
            photos.join("desktop.ini"),
            format!("[.ShellClassInfo]\nCLSID={ZIP_CLASS}\n"),
        )
        .unwrap();

        let parent = folder_at(dir.path());
        let ctx = context().with_factory(archive_factory());
        let child = parent
            .bind_to_object(&ctx, &folder("photos", OsAttributes::SYSTEM))
            .unwrap();
        assert_eq!(child.class_id().to_string(), ZIP_CLASS);
        assert!(child.as_fs_folder().is_none());
    }

    #[test]
    fn test_sidecar_ignored_without_marking() {
        let dir = TempDir::new().unwrap();
        let photos = dir.path().join("photos");
        fs::create_dir(&photos).unwrap();
        fs::write(
            photos.join("desktop.ini"),
            format!("[.ShellClassInfo]\nCLSID={ZIP_CLASS}\n"),
        )
        .unwrap();

        let parent = folder_at(dir.path());
        let child = parent
            .bind_to_object(&context(), &folder("photos", OsAttributes::empty()))
            .unwrap();
        assert_eq!(child.class_id(), CLSID_SHELL_FS_FOLDER);
    }

    #[test]
    fn test_malformed_sidecar_falls_back() {
        let dir = TempDir::new().unwrap();
        let photos = dir.path().join("photos");
        fs::create_dir(&photos).unwrap();
        fs::write(photos.join("desktop.ini"), "[.ShellClassInfo]\nCLSID=garbage\n").unwrap();

        let parent = folder_at(dir.path());
        let child = parent
            .bind_to_object(&context(), &folder("photos", OsAttributes::READ_ONLY))
            .unwrap();
        assert_eq!(child.class_id(), CLSID_SHELL_FS_FOLDER);
    }

    #[test]
    fn test_sidecar_overrides_read_only_folder() {
        let dir = TempDir::new().unwrap();
        let photos = dir.path().join("photos");
        fs::create_dir(&photos).unwrap();
        fs::write(
            photos.join("desktop.ini"),
            format!("[.ShellClassInfo]\r\nCLSID={ZIP_CLASS}\r\n"),
        )
        .unwrap();

        let parent = folder_at(dir.path());
        let ctx = context().with_factory(archive_factory());
        let child = parent
            .bind_to_object(&ctx, &folder("photos", OsAttributes::READ_ONLY))
            .unwrap();
        assert_eq!(child.class_id().to_string(), ZIP_CLASS);
    }

    #[test]
    fn test_read_only_folder_without_sidecar_is_generic() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("photos")).unwrap();

        let parent = folder_at(dir.path());
        let child = parent
            .bind_to_object(&context(), &folder("photos", OsAttributes::READ_ONLY))
            .unwrap();
        assert_eq!(child.class_id(), CLSID_SHELL_FS_FOLDER);
        assert!(child.as_fs_folder().is_some());
    }

    #[test]
    fn test_blocked_sidecar_class_is_access_denied() {
        let dir = TempDir::new().unwrap();
        let photos = dir.path().join("photos");
        fs::create_dir(&photos).unwrap();
        fs::write(
            photos.join("desktop.ini"),
            format!("[.ShellClassInfo]\nCLSID={ZIP_CLASS}\n"),
        )
        .unwrap();
        let blocked = ClassId::parse(ZIP_CLASS).unwrap();
        let registry = MemoryRegistry::new().with_blocked(blocked);
        let ctx = context_with(registry, Preferences::default()).with_factory(archive_factory());

        let parent = folder_at(dir.path());
        let segment = Segment::folder("photos", OsAttributes::DIRECTORY | OsAttributes::SYSTEM).unwrap();
        let err = parent.class_for_segment(&ctx, &segment, &photos).unwrap_err();
        assert!(matches!(err, Error::AccessDenied { class } if class == blocked));

        let err = parent
            .bind_to_object(&ctx, &folder("photos", OsAttributes::SYSTEM))
            .unwrap_err();
        assert!(err.is_access_denied());
    }

    #[test]
    fn test_file_binds_registered_class() {
        let registry = MemoryRegistry::new()
            .with_value(".zip", "CompressedFolder")
            .with_value("CompressedFolder\\CLSID", ZIP_CLASS);
        let ctx = context_with(registry, Preferences::default()).with_factory(archive_factory());
        let parent = folder_at(Path::new("/data"));

        let child = parent.bind_to_object(&ctx, &file("bundle.zip")).unwrap();
        assert_eq!(child.class_id().to_string(), ZIP_CLASS);
        assert_eq!(child.root_path(), Some(Path::new("/data").join("bundle.zip").as_path()));
    }

    #[test]
    fn test_unregistered_file_is_target_missing() {
        let parent = folder_at(Path::new("/data"));
        let err = parent.bind_to_object(&context(), &file("notes.txt")).unwrap_err();
        assert!(matches!(err, Error::TargetMissing { .. }));
    }

    #[test]
    fn test_registered_class_without_constructor() {
        let registry = MemoryRegistry::new().with_value(".zip\\CLSID", ZIP_CLASS);
        let ctx = context_with(registry, Preferences::default());
        let parent = folder_at(Path::new("/data"));

        let err = parent.bind_to_object(&ctx, &file("bundle.zip")).unwrap_err();
        assert!(matches!(err, Error::ClassNotRegistered { .. }));
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let parent = folder_at(Path::new("/data"));
        let err = parent.bind_to_object(&context(), &IdList::empty()).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_uninitialized_provider_rejected() {
        let err = FsFolder::new()
            .bind_to_object(&context(), &folder("x", OsAttributes::empty()))
            .unwrap_err();
        assert!(matches!(err, Error::NotInitialized));
    }

    #[test]
    fn test_empty_root_identifier_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        let mut parent = FsFolder::new();
        parent.initialize(IdList::empty(), Some(dir.path().to_path_buf()));

        let err = parent
            .bind_to_object(&context(), &folder("docs", OsAttributes::empty()))
            .unwrap_err();
        assert!(matches!(err, Error::NotInitialized));
    }

    #[test]
    fn test_complex_identifier_forwards_to_child() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a").join("b")).unwrap();
        let parent = folder_at(dir.path());
        let id = folder("a", OsAttributes::empty()).join(&folder("b", OsAttributes::empty()));

        let child = parent.bind_to_object(&context(), &id).unwrap();
        assert_eq!(child.root_path(), Some(dir.path().join("a").join("b").as_path()));
    }
}
