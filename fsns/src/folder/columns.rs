//! The column descriptor table and per-item detail text.

use std::fmt;

use super::compare::Column;
use super::display::{display_file_name, DisplayFlags};
use super::extension::file_type_group;
use super::FsFolder;
use crate::error::{Error, Result};
use crate::pidl::{IdList, OsAttributes, Segment};
use crate::provider::NamespaceContext;

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    /// Left aligned.
    Left,
    /// Right aligned.
    Right,
}

/// How a column's values sort and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Text.
    Text,
    /// A date.
    Date,
}

/// Sort and visibility state of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnState {
    /// Value type.
    pub value_type: ColumnType,
    /// Shown unless the user hides it.
    pub on_by_default: bool,
}

/// One entry of the column table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Which column.
    pub column: Column,
    /// Header text.
    pub title: &'static str,
    /// Alignment.
    pub format: ColumnFormat,
    /// Default width in characters.
    pub width: u16,
    /// Sort and visibility state.
    pub state: ColumnState,
}

const fn descriptor(
    column: Column,
    title: &'static str,
    format: ColumnFormat,
    width: u16,
    value_type: ColumnType,
    on_by_default: bool,
) -> ColumnDescriptor {
    ColumnDescriptor {
        column,
        title,
        format,
        width,
        state: ColumnState {
            value_type,
            on_by_default,
        },
    }
}

/// The six well-known columns, in order.
pub const COLUMNS: [ColumnDescriptor; 6] = [
    descriptor(Column::Name, "Name", ColumnFormat::Left, 15, ColumnType::Text, true),
    descriptor(Column::Comments, "Comments", ColumnFormat::Left, 0, ColumnType::Text, false),
    descriptor(Column::Type, "Type", ColumnFormat::Left, 10, ColumnType::Text, true),
    descriptor(Column::Size, "Size", ColumnFormat::Right, 10, ColumnType::Text, true),
    descriptor(Column::Modified, "Modified", ColumnFormat::Left, 12, ColumnType::Date, true),
    descriptor(Column::Attributes, "Attributes", ColumnFormat::Left, 10, ColumnType::Text, true),
];

/// Type text used for folders.
pub const FOLDER_TYPE_NAME: &str = "File Folder";

impl fmt::Display for ColumnFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Date => "date",
        })
    }
}

/// Look up a column descriptor by index.
///
/// # Errors
///
/// Returns [`Error::InvalidColumn`] if `index` is out of range.
pub fn column_descriptor(index: usize) -> Result<&'static ColumnDescriptor> {
    COLUMNS.get(index).ok_or(Error::InvalidColumn {
        index,
        count: COLUMNS.len(),
    })
}

/// Kilobyte size text: rounded up, with thousands separators.
///
/// # Examples
///
/// ```
/// use fsns::folder::format_kb_size;
///
/// assert_eq!(format_kb_size(0), "0 KB");
/// assert_eq!(format_kb_size(1), "1 KB");
/// assert_eq!(format_kb_size(5_000_000), "4,883 KB");
/// ```
#[must_use]
pub fn format_kb_size(bytes: u64) -> String {
    let kb = bytes.div_ceil(1024).to_string();
    let mut grouped = String::with_capacity(kb.len() + kb.len() / 3 + 3);
    for (i, digit) in kb.chars().enumerate() {
        if i > 0 && (kb.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push_str(" KB");
    grouped
}

/// Attribute letters in `RHSA` order.
#[must_use]
pub fn attribute_letters(attributes: OsAttributes) -> String {
    [
        (OsAttributes::READ_ONLY, 'R'),
        (OsAttributes::HIDDEN, 'H'),
        (OsAttributes::SYSTEM, 'S'),
        (OsAttributes::ARCHIVE, 'A'),
    ]
    .into_iter()
    .filter(|(flag, _)| attributes.contains(*flag))
    .map(|(_, letter)| letter)
    .collect()
}

/// Type text for a segment.
///
/// # Errors
///
/// Returns an error only if the registry fails.
pub fn type_name(ctx: &NamespaceContext, segment: &Segment) -> Result<String> {
    if segment.is_container() {
        return Ok(FOLDER_TYPE_NAME.to_string());
    }

    if let Some(group) = file_type_group(ctx.registry(), segment.name())? {
        if let Some(description) = ctx.registry().lookup(&group, None)? {
            if !description.trim().is_empty() {
                return Ok(description.trim().to_string());
            }
        }
    }

    let ext = segment.extension();
    if ext.is_empty() {
        Ok("File".to_string())
    } else {
        Ok(format!("{} File", ext[1..].to_uppercase()))
    }
}

impl FsFolder {
    /// The column descriptor table.
    #[must_use]
    pub fn columns(&self) -> &'static [ColumnDescriptor] {
        &COLUMNS
    }

    /// Default sort and display columns.
    #[must_use]
    pub fn default_column(&self) -> (usize, usize) {
        (0, 0)
    }

    /// Sort and visibility state of a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColumn`] if `column` is out of range.
    pub fn default_column_state(&self, column: usize) -> Result<ColumnState> {
        Ok(column_descriptor(column)?.state)
    }

    /// Display text of `column` for an item, or the header text for the
    /// empty identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColumn`] for an unknown column and an invalid
    /// argument for a complex identifier.
    pub fn details_of(&self, ctx: &NamespaceContext, id: &IdList, column: usize) -> Result<String> {
        let descriptor = column_descriptor(column)?;
        let segment = match id.segments() {
            [] => return Ok(descriptor.title.to_string()),
            [segment] => segment,
            _ => return Err(Error::invalid_argument("details need a single-segment identifier")),
        };

        match descriptor.column {
            Column::Name => {
                if segment.is_folder() {
                    Ok(segment.name().to_string())
                } else {
                    display_file_name(ctx, segment.name(), DisplayFlags::IN_FOLDER)
                }
            }
            Column::Comments => Ok(String::new()),
            Column::Type => type_name(ctx, segment),
            Column::Size => Ok(if segment.is_file() {
                format_kb_size(segment.size())
            } else {
                String::new()
            }),
            Column::Modified => Ok(segment.modified().to_string()),
            Column::Attributes => Ok(attribute_letters(segment.attributes())),
        }
    }
}
