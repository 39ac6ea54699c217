//! Pipe-delimited row files.
//!
//! One record per line, cells separated by the dialect's delimiter, no
//! quoting. A line may open with a prefix cell naming its record type, which
//! lets several record types share one file.

mod parser;

use std::path::Path;
use std::sync::Arc;

use recast_api::{Record, RecordType};
use recast_engine::{decode_row, write_row_as, EngineError, RecordIndex};

use parser::{join_cells, parse_cells};

/// Row layout of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: char,
}

impl Default for Dialect {
    fn default() -> Self {
        Self { delimiter: '|' }
    }
}

impl Dialect {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }
}

/// Callback receiving each decoded record.
pub type Sink<'a> = Box<dyn FnMut(Record) -> Result<(), EngineError> + 'a>;

/// How rows of one record type are recognized and where they go.
pub struct ReadDef<'a> {
    /// When set, only rows whose first cell equals it are taken; that cell
    /// is dropped before decoding.
    pub prefix: Option<String>,
    pub record_type: Arc<RecordType>,
    pub sink: Sink<'a>,
}

impl<'a> ReadDef<'a> {
    pub fn new(
        prefix: Option<String>,
        record_type: Arc<RecordType>,
        sink: impl FnMut(Record) -> Result<(), EngineError> + 'a,
    ) -> Self {
        Self {
            prefix,
            record_type,
            sink: Box::new(sink),
        }
    }
}

/// Records to write and the layout to project them through.
pub struct WriteDef<'a> {
    pub prefix: Option<String>,
    pub index: &'a RecordIndex,
    /// Fields to write, taken by name; may be a subset of the stored records.
    pub layout: Arc<RecordType>,
}

/// Read `path`, offering every row to every definition.
///
/// Returns the number of rows accepted, counting a row once per definition
/// that took it. Blank lines are skipped.
pub fn read_file(
    path: impl AsRef<Path>,
    defs: &mut [ReadDef<'_>],
    dialect: &Dialect,
) -> Result<usize, EngineError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| EngineError::io(path.display(), e))?;

    let mut accepted = 0;
    for (lineno, line) in content.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let cells = parse_cells(line, dialect.delimiter);
        for def in defs.iter_mut() {
            let body = match &def.prefix {
                Some(prefix) if cells[0] != prefix.as_str() => continue,
                Some(_) => &cells[1..],
                None => &cells[..],
            };
            let record = decode_row(body, Arc::clone(&def.record_type))
                .map_err(|e| e.with_context(format!("{}:{}", path.display(), lineno + 1)))?;
            (def.sink)(record)?;
            accepted += 1;
        }
    }

    tracing::info!(path = %path.display(), rows = accepted, "file read");
    Ok(accepted)
}

/// Write every definition's records to `path` in key order.
///
/// Returns the number of rows written.
pub fn write_file(
    path: impl AsRef<Path>,
    defs: &[WriteDef<'_>],
    dialect: &Dialect,
) -> Result<usize, EngineError> {
    let path = path.as_ref();
    let mut out = String::new();
    let mut written = 0;

    for def in defs {
        for (key, record) in def.index {
            let mut cells = write_row_as(record, &def.layout)?;
            if let Some(prefix) = &def.prefix {
                cells.insert(0, prefix.clone());
            }
            let line = join_cells(&cells, dialect.delimiter)
                .map_err(|e| e.with_context(format!("record {key}")))?;
            out.push_str(&line);
            out.push('\n');
            written += 1;
        }
        tracing::debug!(layout = %def.layout.name(), rows = def.index.len(), "records written");
    }

    std::fs::write(path, out).map_err(|e| EngineError::io(path.display(), e))?;
    tracing::info!(path = %path.display(), rows = written, "file written");
    Ok(written)
}
