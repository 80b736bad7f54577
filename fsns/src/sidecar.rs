//! Per-directory sidecar descriptors.
//!
//! A directory marked system or read-only may carry a small INI-style file
//! (by default `desktop.ini`) naming a provider class or a custom icon:
//!
//! ```ini
//! [.ShellClassInfo]
//! CLSID={E88DCCE0-B7B3-11D1-A9F0-00AA0060FA31}
//! IconFile=%SystemRoot%\icons\folder.ico
//! IconIndex=3
//! ```
//!
//! Reading is best effort. A missing file, unreadable file or missing key is
//! simply "no value".

use std::path::Path;

use crate::class_id::ClassId;

/// Default sidecar file name.
pub const DEFAULT_SIDECAR_NAME: &str = "desktop.ini";

/// The group holding folder customization keys.
pub const SHELL_CLASS_INFO: &str = ".ShellClassInfo";

/// A parsed sidecar descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sidecar {
    groups: Vec<(String, Vec<(String, String)>)>,
}

impl Sidecar {
    /// Parse descriptor text.
    ///
    /// Blank lines and lines starting with `;` or `#` are ignored, as are
    /// keys that appear before the first group header.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut groups: Vec<(String, Vec<(String, String)>)> = Vec::new();

        for line in text.trim_start_matches('\u{feff}').lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                groups.push((header.trim().to_string(), Vec::new()));
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if let Some((_, entries)) = groups.last_mut() {
                entries.push((key.trim().to_string(), unquote(value.trim()).to_string()));
            }
        }

        Self { groups }
    }

    /// The first value of `key` in `group`; both compare case-insensitively.
    #[must_use]
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.groups
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(group))
            .flat_map(|(_, entries)| entries.iter())
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Descriptor bytes as text: UTF-16LE when they start with its byte order
/// mark, UTF-8 otherwise.
#[must_use]
pub fn decode_text(bytes: &[u8]) -> String {
    match bytes.strip_prefix(&[0xFF, 0xFE]) {
        Some(wide) => {
            let units: Vec<u16> = wide
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        None => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Read one value from a descriptor file.
///
/// Returns `None` when the file cannot be read or the key is absent.
#[must_use]
pub fn read_group(path: &Path, group: &str, key: &str) -> Option<String> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::debug!("cannot read sidecar {}: {e}", path.display());
            }
            return None;
        }
    };
    Sidecar::parse(&decode_text(&bytes))
        .get(group, key)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// The provider class a directory's sidecar asks for, if any.
///
/// A value that is not a well-formed class id is ignored.
#[must_use]
pub fn class_for_directory(dir: &Path, sidecar_name: &str) -> Option<ClassId> {
    let path = dir.join(sidecar_name);
    let value = read_group(&path, SHELL_CLASS_INFO, "CLSID")?;
    match ClassId::parse(&value) {
        Ok(class) => Some(class),
        Err(e) => {
            log::debug!("ignoring sidecar class in {}: {e}", path.display());
            None
        }
    }
}
