#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # fsns
//!
//! A hierarchical filesystem namespace provider.
//!
//! Items are addressed by identifier lists: sequences of self-describing
//! binary segments, one per path level. A provider rooted at a directory
//! parses display names into identifiers, lists its children, reports their
//! attributes, composes their display names, orders them by column, and
//! binds them to child providers. Which provider handles a child, and which
//! auxiliary handlers apply to a file, comes from a type-keyed registry.
//!
//! ## Core Types
//!
//! - [`IdList`] and [`Segment`]: identifiers and their binary codec
//! - [`FsFolder`]: the filesystem provider
//! - [`NamespaceContext`]: the registry, factory and preferences every
//!   operation consults
//! - [`TypeRegistry`]: the type-handler registry, in memory or SQLite
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use fsns::pidl::{decode, encode, OsAttributes};
//! use fsns::{IdList, Segment};
//!
//! let id = IdList::from_segments(vec![
//!     Segment::folder("docs", OsAttributes::DIRECTORY).unwrap(),
//!     Segment::folder("2024", OsAttributes::DIRECTORY).unwrap(),
//! ]);
//! let bytes = encode(&id);
//! assert_eq!(decode(&bytes).unwrap(), id);
//! assert_eq!(id.to_string(), "docs\\2024");
//! ```

pub mod class_id;
pub mod config;
pub mod devices;
pub mod error;
pub mod folder;
pub mod logging;
pub mod pidl;
pub mod probe;
pub mod provider;
pub mod registry;
pub mod sidecar;

pub use class_id::{ClassId, CLSID_SHELL_FS_FOLDER};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use folder::{Column, DisplayFlags, EnumFlags, FsFolder, HandlerKind, ShellAttributes};
pub use logging::{init_logger, LogLevel, Logger};
pub use pidl::{IdList, Segment};
pub use provider::{
    DefaultProviderFactory, FolderTargetInfo, NamespaceContext, NamespaceProvider, Preferences,
    Provider, ProviderFactory,
};
pub use registry::{MemoryRegistry, SqliteRegistry, TypeRegistry};
