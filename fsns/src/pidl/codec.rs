//! Binary encoding of segments and identifier lists.
//!
//! Each segment is one self-describing record:
//!
//! ```text
//! u16  cb        record length in bytes, including this field (little endian)
//! u8   tag       0x23 drive, 0x31 folder, 0x32 file
//! ...  metadata  folder: u16 attributes
//!                file:   u64 size, u16 date, u16 time, u16 attributes
//! ...  name      UTF-8 bytes followed by a single NUL
//! ```
//!
//! A list is its records back to back followed by a two-byte zero
//! terminator. The empty list is the terminator alone.

use super::list::IdList;
use super::segment::{ItemKind, OsAttributes, Segment};
use super::timestamp::DosDateTime;
use crate::error::{Error, Result};

const LEN_FIELD: usize = 2;
const HEADER_LEN: usize = LEN_FIELD + 1;
const TERMINATOR_LEN: usize = 2;

const fn metadata_len(kind: ItemKind) -> usize {
    match kind {
        ItemKind::Drive => 0,
        ItemKind::Folder => 2,
        ItemKind::File => 8 + 2 + 2 + 2,
    }
}

/// Encoded size of a record for a segment of this kind and name.
pub(crate) fn record_len(kind: ItemKind, name: &str) -> usize {
    HEADER_LEN + metadata_len(kind) + name.len() + 1
}

/// Append the record for one segment.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_segment(segment: &Segment, out: &mut Vec<u8>) {
    // Segment constructors reject names whose record would overflow u16.
    let cb = record_len(segment.kind(), segment.name()) as u16;
    out.extend_from_slice(&cb.to_le_bytes());
    out.push(segment.kind().tag());

    match segment.kind() {
        ItemKind::Drive => {}
        ItemKind::Folder => {
            out.extend_from_slice(&segment.attributes().bits().to_le_bytes());
        }
        ItemKind::File => {
            out.extend_from_slice(&segment.size().to_le_bytes());
            out.extend_from_slice(&segment.modified().date().to_le_bytes());
            out.extend_from_slice(&segment.modified().time().to_le_bytes());
            out.extend_from_slice(&segment.attributes().bits().to_le_bytes());
        }
    }

    out.extend_from_slice(segment.name().as_bytes());
    out.push(0);
}

/// Encode an identifier list, including its terminator.
///
/// # Examples
///
/// ```
/// use fsns::pidl::{encode, IdList};
///
/// assert_eq!(encode(&IdList::empty()), vec![0, 0]);
/// ```
#[must_use]
pub fn encode(list: &IdList) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        list.iter()
            .map(|s| record_len(s.kind(), s.name()))
            .sum::<usize>()
            + TERMINATOR_LEN,
    );
    for segment in list.iter() {
        encode_segment(segment, &mut out);
    }
    out.extend_from_slice(&[0, 0]);
    out
}

/// Decode one record at the start of `bytes`.
///
/// Returns the segment and the number of bytes consumed. `offset` is only used
/// for error reporting.
///
/// # Errors
///
/// Returns [`Error::InvalidIdentifier`] if the record is truncated, has a
/// zero or undersized length, an unknown tag, a missing NUL, or a name that is
/// not UTF-8.
pub fn decode_segment(bytes: &[u8], offset: usize) -> Result<(Segment, usize)> {
    let invalid = |reason: String| Error::InvalidIdentifier { offset, reason };

    let cb = read_u16(bytes, 0).ok_or_else(|| invalid("record length is truncated".into()))?;
    let cb = usize::from(cb);
    if cb == 0 {
        return Err(invalid("zero-length record".into()));
    }
    if cb < HEADER_LEN {
        return Err(invalid(format!("record length {cb} is smaller than its header")));
    }
    if cb > bytes.len() {
        return Err(invalid(format!(
            "record claims {cb} bytes but only {} remain",
            bytes.len()
        )));
    }
    let record = &bytes[..cb];

    let kind = ItemKind::from_tag(record[LEN_FIELD])
        .ok_or_else(|| invalid(format!("unknown kind tag {:#04x}", record[LEN_FIELD])))?;

    let name_start = HEADER_LEN + metadata_len(kind);
    // name needs at least one byte plus the NUL
    if cb < name_start + 2 {
        return Err(invalid(format!("record of {cb} bytes is too short for a {kind}")));
    }

    let (size, modified, attributes) = match kind {
        ItemKind::Drive => (0, DosDateTime::default(), 0),
        ItemKind::Folder => (0, DosDateTime::default(), read_u16(record, HEADER_LEN).unwrap_or(0)),
        ItemKind::File => {
            let size = read_u64(record, HEADER_LEN).unwrap_or(0);
            let date = read_u16(record, HEADER_LEN + 8).unwrap_or(0);
            let time = read_u16(record, HEADER_LEN + 10).unwrap_or(0);
            let attrs = read_u16(record, HEADER_LEN + 12).unwrap_or(0);
            (size, DosDateTime::from_raw(date, time), attrs)
        }
    };

    let name_bytes = &record[name_start..];
    let nul = name_bytes
        .iter()
        .position(|b| *b == 0)
        .ok_or_else(|| invalid("name is not NUL-terminated".into()))?;
    if nul + 1 != name_bytes.len() {
        return Err(invalid("record has bytes after the name terminator".into()));
    }
    let name = std::str::from_utf8(&name_bytes[..nul])
        .map_err(|e| invalid(format!("name is not UTF-8: {e}")))?;

    let attributes = OsAttributes::from_bits_retain(attributes);
    let segment = match kind {
        ItemKind::Drive => Segment::drive(name),
        ItemKind::Folder => Segment::folder(name, attributes),
        ItemKind::File => Segment::file(name, size, modified, attributes),
    }
    .map_err(|e| invalid(e.to_string()))?;

    Ok((segment, cb))
}

/// Decode a full identifier list.
///
/// Decoding is total: every input either yields a list or an error, and
/// nothing outside `bytes` is consulted.
///
/// # Errors
///
/// Returns [`Error::InvalidIdentifier`] for any malformed record, a missing
/// terminator, or bytes after the terminator.
pub fn decode(bytes: &[u8]) -> Result<IdList> {
    let mut segments = Vec::new();
    let mut offset = 0;

    loop {
        let rest = &bytes[offset..];
        match read_u16(rest, 0) {
            None => {
                return Err(Error::InvalidIdentifier {
                    offset,
                    reason: "missing list terminator".into(),
                })
            }
            Some(0) => {
                if rest.len() != TERMINATOR_LEN {
                    return Err(Error::InvalidIdentifier {
                        offset: offset + TERMINATOR_LEN,
                        reason: format!("{} bytes after the list terminator", rest.len() - TERMINATOR_LEN),
                    });
                }
                return Ok(IdList::from_segments(segments));
            }
            Some(_) => {
                let (segment, used) = decode_segment(rest, offset)?;
                segments.push(segment);
                offset += used;
            }
        }
    }
}

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let raw = bytes.get(at..at + 2)?;
    Some(u16::from_le_bytes([raw[0], raw[1]]))
}

fn read_u64(bytes: &[u8], at: usize) -> Option<u64> {
    let raw: [u8; 8] = bytes.get(at..at + 8)?.try_into().ok()?;
    Some(u64::from_le_bytes(raw))
}

/// Render bytes as lower-case hex.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut acc, b| {
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

/// Parse lower- or upper-case hex produced by [`to_hex`].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] on odd length or a non-hex digit.
pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    if text.len() % 2 != 0 {
        return Err(Error::invalid_argument("hex input has odd length"));
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            text.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| Error::invalid_argument(format!("invalid hex at position {i}")))
        })
        .collect()
}
