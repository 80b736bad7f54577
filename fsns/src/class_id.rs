//! Class identifiers for providers and handlers.
//!
//! Provider classes, handler classes and interface identifiers are all
//! GUID-shaped. They are written in the conventional braced, upper-case form
//! (`{F3364BA0-65B9-11CE-A9BA-00AA004AE837}`) wherever they appear in the
//! type registry or in a sidecar descriptor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A GUID naming a provider class, handler class or interface.
///
/// # Examples
///
/// ```
/// use fsns::ClassId;
///
/// let class = ClassId::parse("{f3364ba0-65b9-11ce-a9ba-00aa004ae837}").unwrap();
/// assert_eq!(class.to_string(), "{F3364BA0-65B9-11CE-A9BA-00AA004AE837}");
/// assert_eq!(class, fsns::CLSID_SHELL_FS_FOLDER);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassId(Uuid);

/// The generic filesystem folder provider class.
pub const CLSID_SHELL_FS_FOLDER: ClassId =
    ClassId::from_u128(0xF336_4BA0_65B9_11CE_A9BA_00AA_004A_E837);

/// Interface identifier requested for drop-target handlers.
pub const IID_DROP_TARGET: ClassId = ClassId::from_u128(0x0000_0122_0000_0000_C000_0000_0000_0046);

/// Interface identifier requested for icon extraction handlers.
pub const IID_EXTRACT_ICON: ClassId =
    ClassId::from_u128(0x0002_14FA_0000_0000_C000_0000_0000_0046);

/// Interface identifier requested for context-menu contributors.
pub const IID_CONTEXT_MENU: ClassId =
    ClassId::from_u128(0x0002_14E4_0000_0000_C000_0000_0000_0046);

impl ClassId {
    /// Build a class identifier from its 128-bit value.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Parse a class identifier, braced or bare.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the text is not GUID-shaped.
    pub fn parse(text: &str) -> Result<Self> {
        Uuid::try_parse(text.trim())
            .map(Self)
            .map_err(|e| Error::invalid_argument(format!("'{text}' is not a class id: {e}")))
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Uuid::encode_buffer();
        write!(f, "{{{}}}", self.0.hyphenated().encode_upper(&mut buf))
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({self})")
    }
}

impl FromStr for ClassId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClassId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ClassId> for String {
    fn from(value: ClassId) -> Self {
        value.to_string()
    }
}
