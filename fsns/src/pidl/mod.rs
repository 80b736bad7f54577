//! Identifier segments, identifier lists and their binary codec.
//!
//! An identifier list names an item relative to some provider's root. Each
//! hop is a [`Segment`] carrying its kind, its name and, for files, the size
//! and modification stamp observed when the segment was built. Lists encode
//! to a compact byte string that callers may persist and decode later; the
//! encoding is self-describing and decoding never touches the filesystem.
//!
//! # Examples
//!
//! ```
//! use fsns::pidl::{self, IdList, OsAttributes, Segment};
//!
//! let list = IdList::from_segments(vec![
//!     Segment::drive("/").unwrap(),
//!     Segment::folder("srv", OsAttributes::DIRECTORY).unwrap(),
//! ]);
//! let bytes = pidl::encode(&list);
//! assert_eq!(pidl::decode(&bytes).unwrap(), list);
//! ```

pub mod codec;
mod list;
mod segment;
mod timestamp;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use codec::{decode, decode_segment, encode, encode_segment, from_hex, to_hex};
pub use list::IdList;
pub use segment::{extension_of, ItemKind, OsAttributes, Segment};
pub use timestamp::DosDateTime;
