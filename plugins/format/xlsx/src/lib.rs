//! Spreadsheet workbooks (.xlsx, .xlsm, .xls).
//!
//! Each record type lives on its own worksheet, one record per row. Cells
//! are rendered to text and inferred the same way as delimited row files.

use std::path::Path;
use std::sync::Arc;

use calamine::{open_workbook_auto, Data, Reader};
use recast_api::value::float_text;
use recast_api::{Record, RecordType};
use recast_engine::{decode_row, EngineError};

/// Callback receiving each decoded record.
pub type Sink<'a> = Box<dyn FnMut(Record) -> Result<(), EngineError> + 'a>;

/// Worksheet a definition reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRef {
    Name(String),
    /// Zero-based position in the workbook.
    Index(usize),
}

impl std::fmt::Display for SheetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(n) => write!(f, "#{n}"),
        }
    }
}

pub struct SheetDef<'a> {
    pub sheet: SheetRef,
    pub record_type: Arc<RecordType>,
    pub sink: Sink<'a>,
}

impl<'a> SheetDef<'a> {
    pub fn new(
        sheet: SheetRef,
        record_type: Arc<RecordType>,
        sink: impl FnMut(Record) -> Result<(), EngineError> + 'a,
    ) -> Self {
        Self {
            sheet,
            record_type,
            sink: Box::new(sink),
        }
    }
}

/// Sheet layout shared by every worksheet of a workbook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    /// Rows skipped at the top of each worksheet.
    pub header_rows: usize,
}

/// Rows accepted per definition, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetCounts {
    pub total: usize,
    pub per_sheet: Vec<usize>,
}

/// Read one worksheet per definition from the workbook at `path`.
///
/// Rows whose cells are all empty are skipped. The first row that fails to
/// decode, or that its sink rejects, stops the import.
pub fn read_workbook(
    path: impl AsRef<Path>,
    defs: &mut [SheetDef<'_>],
    layout: &Layout,
) -> Result<SheetCounts, EngineError> {
    let path = path.as_ref();
    std::fs::metadata(path).map_err(|e| EngineError::io(path.display(), e))?;
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| EngineError::format_err(format!("{}: {e}", path.display())))?;

    let mut counts = SheetCounts::default();
    for def in defs.iter_mut() {
        let range = match &def.sheet {
            SheetRef::Name(name) => {
                if !workbook.sheet_names().iter().any(|s| s == name) {
                    return Err(EngineError::format_err(format!(
                        "worksheet '{name}' not found in {}",
                        path.display()
                    )));
                }
                workbook.worksheet_range(name)
            }
            SheetRef::Index(n) => workbook.worksheet_range_at(*n).ok_or_else(|| {
                EngineError::format_err(format!("{} has no worksheet {n}", path.display()))
            })?,
        }
        .map_err(|e| EngineError::format_err(format!("{}[{}]: {e}", path.display(), def.sheet)))?;

        let (nrows, ncols) = range.get_size();
        tracing::debug!(sheet = %def.sheet, rows = nrows, cols = ncols, "worksheet opened");

        let first_row = range.start().map_or(0, |(row, _)| row as usize);
        let mut accepted = 0;
        for (offset, row) in range.rows().enumerate().skip(layout.header_rows) {
            if row.iter().all(|c| matches!(c, Data::Empty)) {
                continue;
            }
            let cells: Vec<String> = row.iter().map(cell_text).collect();
            let record = decode_row(&cells, Arc::clone(&def.record_type)).map_err(|e| {
                e.with_context(format!(
                    "{}[{}]:{}",
                    path.display(),
                    def.sheet,
                    first_row + offset + 1
                ))
            })?;
            (def.sink)(record)?;
            accepted += 1;
        }

        counts.per_sheet.push(accepted);
        counts.total += accepted;
    }

    tracing::info!(path = %path.display(), rows = counts.total, sheets = counts.per_sheet.len(), "workbook read");
    Ok(counts)
}

/// Text of a cell as a delimited row file would hold it.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_text(*f),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}
