//! List command implementation.
//!
//! This module implements the `list` command, which enumerates a directory
//! through the provider, sorts the children by a column and prints the six
//! detail columns in various formats (table, JSON, CSV, TSV).

use std::cmp::Ordering;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use fsns::config::OutputFormat;
use fsns::folder::{compare_ids, COLUMNS};
use fsns::{Column, EnumFlags, FsFolder, IdList, NamespaceContext};

use crate::error::CliError;
use crate::utils::{
    build_context, load_configuration, parse_column, parse_output_format, resolve_path,
    GlobalOptions,
};

/// List the children of a directory.
#[derive(Args)]
pub struct ListCommand {
    /// Directory to list (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Only list folders
    #[arg(long)]
    pub folders: bool,

    /// Only list non-folders
    #[arg(long)]
    pub files: bool,

    /// Include hidden items
    #[arg(long)]
    pub hidden: bool,

    /// Column to sort by
    #[arg(long, value_name = "COLUMN", value_parser = parse_column)]
    pub sort: Option<Column>,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = parse_output_format, env = "FSNS_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,
}

impl ListCommand {
    /// The enumeration flags selected by the options and configuration.
    fn flags(&self, show_hidden: bool) -> EnumFlags {
        let mut flags = match (self.folders, self.files) {
            (true, false) => EnumFlags::FOLDERS,
            (false, true) => EnumFlags::NON_FOLDERS,
            _ => EnumFlags::FOLDERS | EnumFlags::NON_FOLDERS,
        };
        flags.set(EnumFlags::INCLUDE_HIDDEN, self.hidden || show_hidden);
        flags
    }

    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration and build the context
        let config = load_configuration(global)?;
        let ctx = build_context(global, &config)?;

        // 2. Open the directory and enumerate
        let dir = resolve_path(self.dir.as_deref())?;
        let folder = FsFolder::open(&dir)?;
        let mut ids = folder
            .enum_objects(self.flags(config.show_hidden.unwrap_or(false)))?
            .map(|segment| segment.map(IdList::single))
            .collect::<fsns::Result<Vec<_>>>()?;

        // 3. Sort
        let column = self.sort.or(config.sort_column).unwrap_or(Column::Name);
        ids.sort_by(|a, b| compare_ids(column.index(), a, b).unwrap_or(Ordering::Equal));

        // 4. Collect the detail rows
        let rows = detail_rows(&folder, &ctx, &ids)?;

        // 5. Format and output to stdout
        match self.format.or(config.output_format).unwrap_or_default() {
            OutputFormat::Table => format_as_table(&rows)?,
            OutputFormat::Json => format_as_json(&rows)?,
            OutputFormat::Csv => format_as_delimited(&rows, b',')?,
            OutputFormat::Tsv => format_as_delimited(&rows, b'\t')?,
        }

        Ok(())
    }
}

/// The six detail strings of every listed item.
fn detail_rows(
    folder: &FsFolder,
    ctx: &NamespaceContext,
    ids: &[IdList],
) -> Result<Vec<Vec<String>>, CliError> {
    ids.iter()
        .map(|id| {
            COLUMNS
                .iter()
                .map(|descriptor| {
                    folder
                        .details_of(ctx, id, descriptor.column.index())
                        .map_err(CliError::from)
                })
                .collect::<Result<Vec<String>, CliError>>()
        })
        .collect()
}

/// Print rows as a human-readable table.
fn format_as_table(rows: &[Vec<String>]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMNS
        .iter()
        .map(|d| d.title.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for row in rows {
        let cells: Vec<&str> = row
            .iter()
            .map(|cell| if cell.is_empty() { "-" } else { cell.as_str() })
            .collect();
        writeln!(handle, "{}", cells.join("\t"))?;
    }

    Ok(())
}

/// Print rows as a JSON array of objects keyed by column.
fn format_as_json(rows: &[Vec<String>]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Map<String, serde_json::Value>> = rows
        .iter()
        .map(|row| {
            COLUMNS
                .iter()
                .zip(row)
                .map(|(d, cell)| (d.column.to_string(), serde_json::Value::from(cell.as_str())))
                .collect()
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)?;
    writeln!(handle)?;

    Ok(())
}

/// Print rows as delimited output (CSV or TSV).
fn format_as_delimited(rows: &[Vec<String>], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMNS.iter().map(|d| d.column.as_str()))?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(())
}
