//! Icon locations for folders and files.

use std::fmt;

use super::extension::file_type_value;
use super::FsFolder;
use crate::error::{Error, Result};
use crate::pidl::{IdList, OsAttributes, Segment};
use crate::provider::NamespaceContext;
use crate::sidecar::{self, SHELL_CLASS_INFO};

/// Module holding the stock icons.
pub const DEFAULT_ICON_MODULE: &str = "shell32.dll";

const FOLDER_ICON_INDEX: i32 = -4;
const DOCUMENT_ICON_INDEX: i32 = 0;

/// Where to load an item's icon from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLocation {
    /// Icon file or module.
    pub path: String,
    /// Index into the file, or a negated resource id.
    pub index: i32,
}

impl IconLocation {
    fn stock(index: i32) -> Self {
        Self {
            path: DEFAULT_ICON_MODULE.to_string(),
            index,
        }
    }
}

impl fmt::Display for IconLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.path, self.index)
    }
}

/// Parse a `path,index` value. A missing or unparsable index is 0.
///
/// # Examples
///
/// ```
/// use fsns::folder::parse_icon_value;
///
/// let icon = parse_icon_value("\"C:\\Program Files\\app.exe\",-101");
/// assert_eq!(icon.path, "C:\\Program Files\\app.exe");
/// assert_eq!(icon.index, -101);
/// ```
#[must_use]
pub fn parse_icon_value(value: &str) -> IconLocation {
    let value = value.trim();
    let (path, index) = match value.rsplit_once(',') {
        Some((path, index)) => match index.trim().parse::<i32>() {
            Ok(index) => (path, index),
            Err(_) => (value, 0),
        },
        None => (value, 0),
    };
    let path = path.trim();
    let path = path
        .strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .unwrap_or(path);
    IconLocation {
        path: path.to_string(),
        index,
    }
}

/// Replace `%NAME%` references with environment values. Unknown names are
/// left as written.
#[must_use]
pub fn expand_environment(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('%') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                match std::env::var(name) {
                    Ok(value) => out.push_str(&value),
                    Err(_) => {
                        out.push('%');
                        out.push_str(name);
                        out.push('%');
                    }
                }
                rest = &after[end + 1..];
            }
            _ => {
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

impl FsFolder {
    /// The icon location of an item in this folder.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error for non-simple identifiers, or a
    /// registry error.
    pub fn icon_location(&self, ctx: &NamespaceContext, id: &IdList) -> Result<IconLocation> {
        let root = self.require_root_path()?;
        let segment = match id.segments() {
            [segment] => segment,
            _ => return Err(Error::invalid_argument("icons need a single-segment identifier")),
        };
        let path = root.join(segment.name());

        if segment.is_container() {
            return self.folder_icon(ctx, segment, &path);
        }

        match file_type_value(ctx.registry(), segment.name(), "DefaultIcon")? {
            Some(value) if !value.trim().is_empty() => {
                let mut icon = parse_icon_value(&value);
                if icon.path == "%1" {
                    icon.path = path.display().to_string();
                } else {
                    icon.path = expand_environment(&icon.path);
                }
                Ok(icon)
            }
            _ => Ok(IconLocation::stock(DOCUMENT_ICON_INDEX)),
        }
    }

    fn folder_icon(
        &self,
        ctx: &NamespaceContext,
        segment: &Segment,
        path: &std::path::Path,
    ) -> Result<IconLocation> {
        let registry = ctx.registry();

        if segment
            .attributes()
            .intersects(OsAttributes::SYSTEM | OsAttributes::READ_ONLY)
        {
            let sidecar_path = path.join(&ctx.preferences().sidecar_name);
            if let Some(file) = sidecar::read_group(&sidecar_path, SHELL_CLASS_INFO, "IconFile") {
                let index = sidecar::read_group(&sidecar_path, SHELL_CLASS_INFO, "IconIndex")
                    .and_then(|i| i.trim().parse().ok())
                    .unwrap_or(0);
                return Ok(IconLocation {
                    path: expand_environment(&file),
                    index,
                });
            }
            if let Some(class) = sidecar::class_for_directory(path, &ctx.preferences().sidecar_name) {
                if let Some(value) = registry.lookup(&format!("CLSID\\{class}"), Some("DefaultIcon"))? {
                    return Ok(parse_icon_value(&expand_environment(&value)));
                }
            }
        }

        match registry.lookup("Folder", Some("DefaultIcon"))? {
            Some(value) if !value.trim().is_empty() => Ok(parse_icon_value(&expand_environment(&value))),
            _ => Ok(IconLocation::stock(FOLDER_ICON_INDEX)),
        }
    }
}
