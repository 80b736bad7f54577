//! Device interface enumeration.
//!
//! A [`DeviceInterfaceSource`] lists the interface paths registered for a
//! device class. [`enumerate_devices`] turns that listing into a lazy
//! sequence of [`DeviceInterface`] values with normalized paths; callers open
//! each one in turn and drop it before moving on.
//!
//! # Examples
//!
//! ```no_run
//! use fsns::devices::{enumerate_devices, DirectorySource};
//! use fsns::ClassId;
//!
//! let class = ClassId::parse("{53F56307-B6BF-11D0-94F2-00A0C91EFB8B}").unwrap();
//! let source = DirectorySource::new("/var/lib/fsns/devices");
//! for device in enumerate_devices(&source, class).unwrap() {
//!     let device = device.unwrap();
//!     let handle = device.open().unwrap();
//!     println!("{} {:?}", device.path, handle.metadata().unwrap().len());
//! }
//! ```

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::class_id::ClassId;
use crate::error::{Error, Result};
use crate::probe::map_io_error;

const WIN32_DEVICE_PREFIX: &str = r"\\?\";
const NT_DEVICE_PREFIX: &str = r"\??\";

/// The raw interface paths of one class, in source order.
pub type InterfacePaths = Box<dyn Iterator<Item = Result<String>>>;

/// Something that knows which device interfaces exist.
pub trait DeviceInterfaceSource {
    /// List the interface paths of `class`.
    ///
    /// An unknown class is an empty listing, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the source itself cannot be read.
    fn interfaces(&self, class: ClassId) -> Result<InterfacePaths>;
}

/// One device interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInterface {
    /// The interface class it was listed under.
    pub class: ClassId,
    /// The normalized interface path.
    pub path: String,
}

impl DeviceInterface {
    /// Open the interface for shared reading.
    ///
    /// # Errors
    ///
    /// Returns the mapped I/O error if the path cannot be opened.
    pub fn open(&self) -> Result<File> {
        let path = Path::new(&self.path);
        File::open(path).map_err(|e| map_io_error(path, e))
    }
}

/// Rewrite a Win32 device path prefix (`\\?\`) to the native form (`\??\`).
///
/// # Examples
///
/// ```
/// use fsns::devices::normalize_interface_path;
///
/// assert_eq!(normalize_interface_path(r"\\?\usb#vid_1234"), r"\??\usb#vid_1234");
/// assert_eq!(normalize_interface_path("/dev/input0"), "/dev/input0");
/// ```
#[must_use]
pub fn normalize_interface_path(path: &str) -> String {
    match path.strip_prefix(WIN32_DEVICE_PREFIX) {
        Some(rest) => format!("{NT_DEVICE_PREFIX}{rest}"),
        None => path.to_string(),
    }
}

/// Lazy sequence of the interfaces of one class.
pub struct DeviceInterfaces {
    class: ClassId,
    paths: InterfacePaths,
    done: bool,
}

impl Iterator for DeviceInterfaces {
    type Item = Result<DeviceInterface>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.paths.next() {
            Some(Ok(path)) => Some(Ok(DeviceInterface {
                class: self.class,
                path: normalize_interface_path(&path),
            })),
            Some(Err(e)) => {
                self.done = true;
                Some(Err(e))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for DeviceInterfaces {}

impl std::fmt::Debug for DeviceInterfaces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceInterfaces")
            .field("class", &self.class)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

/// Start enumerating the interfaces of `class` from `source`.
///
/// # Errors
///
/// Returns the source's error if it cannot be read.
pub fn enumerate_devices(
    source: &dyn DeviceInterfaceSource,
    class: ClassId,
) -> Result<DeviceInterfaces> {
    log::debug!("enumerating device interfaces of {class}");
    Ok(DeviceInterfaces {
        class,
        paths: source.interfaces(class)?,
        done: false,
    })
}

/// A directory tree standing in for the device registry.
///
/// Interfaces of a class are the entries of `<root>/<{CLASS}>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// A source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory holding one subdirectory per class.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DeviceInterfaceSource for DirectorySource {
    fn interfaces(&self, class: ClassId) -> Result<InterfacePaths> {
        if !self.root.is_dir() {
            return Err(Error::PathNotFound {
                path: self.root.clone(),
            });
        }

        let class_dir = self.root.join(class.to_string());
        let entries = match fs::read_dir(&class_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Box::new(std::iter::empty()))
            }
            Err(e) => return Err(map_io_error(&class_dir, e)),
        };

        Ok(Box::new(entries.map(move |entry| {
            entry
                .map(|e| e.path().display().to_string())
                .map_err(|source| Error::Enumeration {
                    path: class_dir.clone(),
                    source,
                })
        })))
    }
}
