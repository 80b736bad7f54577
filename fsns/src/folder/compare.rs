//! Ordering of identifiers by column.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::attributes::base_attributes;
use crate::error::{Error, Result};
use crate::pidl::{IdList, Segment};

/// The well-known columns, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// Item name.
    Name,
    /// Free-text comments; always empty for filesystem items.
    Comments,
    /// Type, keyed by extension.
    Type,
    /// Size in bytes.
    Size,
    /// Last modification time.
    Modified,
    /// Attribute flags.
    Attributes,
}

impl Column {
    /// All columns in table order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Comments,
        Self::Type,
        Self::Size,
        Self::Modified,
        Self::Attributes,
    ];

    /// Position in the column table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case name used in configuration and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Comments => "comments",
            Self::Type => "type",
            Self::Size => "size",
            Self::Modified => "modified",
            Self::Attributes => "attributes",
        }
    }
}

impl TryFrom<usize> for Column {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        Self::ALL.get(index).copied().ok_or(Error::InvalidColumn {
            index,
            count: Self::ALL.len(),
        })
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_argument(format!("unknown column '{s}'")))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare two strings ignoring case.
#[must_use]
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Order two segments by `column`.
///
/// Folders sort before everything else whatever the column. Ties on the
/// column fall through to the name, then to the remaining fields, so two
/// segments compare equal only when they are identical.
#[must_use]
pub fn compare_segments(column: Column, a: &Segment, b: &Segment) -> Ordering {
    b.is_folder()
        .cmp(&a.is_folder())
        .then_with(|| compare_column(column, a, b))
        .then_with(|| tie_break(a, b))
}

fn compare_column(column: Column, a: &Segment, b: &Segment) -> Ordering {
    match column {
        Column::Name => cmp_ignore_case(a.name(), b.name()),
        Column::Comments => Ordering::Equal,
        Column::Type => cmp_ignore_case(a.extension(), b.extension()),
        Column::Size => a.size().cmp(&b.size()),
        Column::Modified => a.modified().cmp(&b.modified()),
        Column::Attributes => base_attributes(a)
            .bits()
            .cmp(&base_attributes(b).bits())
            .then_with(|| a.attributes().bits().cmp(&b.attributes().bits())),
    }
}

fn tie_break(a: &Segment, b: &Segment) -> Ordering {
    cmp_ignore_case(a.name(), b.name())
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| a.kind().cmp(&b.kind()))
        .then_with(|| a.size().cmp(&b.size()))
        .then_with(|| a.modified().cmp(&b.modified()))
        .then_with(|| a.attributes().bits().cmp(&b.attributes().bits()))
}

/// Order two identifier lists by `column`, one segment at a time.
///
/// The empty list sorts first.
///
/// # Errors
///
/// Returns [`Error::InvalidColumn`] if `column` is out of range.
pub fn compare_ids(column: usize, a: &IdList, b: &IdList) -> Result<Ordering> {
    let column = Column::try_from(column)?;
    for (left, right) in a.iter().zip(b.iter()) {
        let ord = compare_segments(column, left, right);
        if ord != Ordering::Equal {
            return Ok(ord);
        }
    }
    Ok(a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pidl::{DosDateTime, OsAttributes};

    fn file(name: &str, size: u64) -> Segment {
        Segment::file(name, size, DosDateTime::default(), OsAttributes::empty()).unwrap()
    }

    fn folder(name: &str) -> Segment {
        Segment::folder(name, OsAttributes::DIRECTORY).unwrap()
    }

    #[test]
    fn test_folder_first_for_every_column() {
        let f = folder("zzz");
        let a = file("aaa", 0);
        for column in Column::ALL {
            assert_eq!(compare_segments(column, &f, &a), Ordering::Less, "{column}");
            assert_eq!(compare_segments(column, &a, &f), Ordering::Greater, "{column}");
        }
    }

    #[test]
    fn test_name_is_case_insensitive() {
        assert_eq!(
            compare_segments(Column::Name, &file("apple", 0), &file("Banana", 0)),
            Ordering::Less
        );
    }

    #[test]
    fn test_case_variants_are_not_equal() {
        let upper = file("README", 0);
        let lower = file("readme", 0);
        assert_ne!(compare_segments(Column::Name, &upper, &lower), Ordering::Equal);
        assert_eq!(
            compare_segments(Column::Name, &upper, &lower),
            compare_segments(Column::Name, &lower, &upper).reverse()
        );
    }

    #[test]
    fn test_type_compares_extension() {
        assert_eq!(
            compare_segments(Column::Type, &file("z.doc", 0), &file("a.TXT", 0)),
            Ordering::Less
        );
    }

    #[test]
    fn test_size_then_name() {
        assert_eq!(
            compare_segments(Column::Size, &file("b", 10), &file("a", 20)),
            Ordering::Less
        );
        assert_eq!(
            compare_segments(Column::Size, &file("a", 10), &file("b", 10)),
            Ordering::Less
        );
    }

    #[test]
    fn test_comments_fall_through_to_name() {
        assert_eq!(
            compare_segments(Column::Comments, &file("b", 0), &file("a", 0)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_modified_is_date_then_time() {
        let early = Segment::file("x", 0, DosDateTime::from_raw(100, 9000), OsAttributes::empty()).unwrap();
        let late = Segment::file("x", 0, DosDateTime::from_raw(101, 0), OsAttributes::empty()).unwrap();
        assert_eq!(compare_segments(Column::Modified, &early, &late), Ordering::Less);
    }

    #[test]
    fn test_identical_segments_are_equal() {
        assert_eq!(
            compare_segments(Column::Name, &file("same", 3), &file("same", 3)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_invalid_column() {
        let a = IdList::single(file("a", 0));
        let err = compare_ids(6, &a, &a).unwrap_err();
        assert!(matches!(err, Error::InvalidColumn { index: 6, count: 6 }));
    }

    #[test]
    fn test_complex_ids_compare_remainder() {
        let a = IdList::from_segments(vec![folder("docs"), file("a.txt", 0)]);
        let b = IdList::from_segments(vec![folder("docs"), file("b.txt", 0)]);
        assert_eq!(compare_ids(0, &a, &b).unwrap(), Ordering::Less);
        assert_eq!(
            compare_ids(0, &IdList::single(folder("docs")), &a).unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_column_parsing() {
        assert_eq!("Size".parse::<Column>().unwrap(), Column::Size);
        assert_eq!(Column::try_from(4).unwrap(), Column::Modified);
        assert!("color".parse::<Column>().is_err());
    }
}
