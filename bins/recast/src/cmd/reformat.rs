use std::cell::RefCell;
use std::path::Path;
use std::sync::Arc;

use format_pipe::{read_file, write_file, Dialect, ReadDef, WriteDef};
use format_xlsx::{read_workbook, Layout, SheetDef, SheetRef};
use recast_api::{Record, RecordType};
use recast_engine::{add_items, Container, EngineError, RecastConfig, RecordIndex};

use crate::config::ReformatArgs;
use crate::error::CliError;

const WORKBOOK_EXTENSIONS: [&str; 3] = ["xls", "xlsx", "xlsm"];

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)))
}

/// Sink merging each decoded record into `index` under `key`.
fn merge_into<'a>(
    ty: Arc<RecordType>,
    key: &'a str,
    index: &'a RefCell<RecordIndex>,
) -> impl FnMut(Record) -> Result<(), EngineError> + 'a {
    move |r: Record| add_items(Container::Record(r), &ty, &ty, key, &mut index.borrow_mut()).map(|_| ())
}

pub fn run(args: ReformatArgs) -> Result<(), CliError> {
    let config = RecastConfig::load(&args.config)?;
    if config.records.is_empty() {
        return Err(CliError::NoRecords(args.config.display().to_string()));
    }
    tracing::info!(config = %args.config.display(), records = config.records.len(), "loaded config");

    let dialect = Dialect::new(config.delimiter);
    let types: Vec<_> = config.records.iter().map(|r| r.record_type()).collect();
    let keys = config
        .records
        .iter()
        .map(|r| {
            r.key_field()
                .ok_or_else(|| EngineError::Config(format!("record '{}' has no key field", r.name)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let indexes: Vec<RefCell<RecordIndex>> =
        config.records.iter().map(|_| RefCell::new(RecordIndex::new())).collect();

    let read = if is_workbook(&args.input) {
        let mut defs: Vec<SheetDef<'_>> = config
            .records
            .iter()
            .zip(&types)
            .zip(keys.iter().zip(&indexes))
            .map(|((record, ty), (key, index))| {
                SheetDef::new(
                    SheetRef::Name(record.sheet_name().to_string()),
                    Arc::clone(ty),
                    merge_into(Arc::clone(ty), key, index),
                )
            })
            .collect();
        let layout = Layout {
            header_rows: args.header_rows,
        };
        read_workbook(&args.input, &mut defs, &layout)?.total
    } else {
        let mut defs: Vec<ReadDef<'_>> = config
            .records
            .iter()
            .zip(&types)
            .zip(keys.iter().zip(&indexes))
            .map(|((record, ty), (key, index))| {
                ReadDef::new(
                    record.prefix.clone(),
                    Arc::clone(ty),
                    merge_into(Arc::clone(ty), key, index),
                )
            })
            .collect();
        read_file(&args.input, &mut defs, &dialect)?
    };

    let indexes: Vec<RecordIndex> = indexes.into_iter().map(RefCell::into_inner).collect();
    let write_defs: Vec<WriteDef<'_>> = config
        .records
        .iter()
        .zip(&types)
        .zip(&indexes)
        .map(|((record, ty), index)| WriteDef {
            prefix: record.prefix.clone(),
            index,
            layout: Arc::clone(ty),
        })
        .collect();
    let written = write_file(&args.output, &write_defs, &dialect)?;

    tracing::info!(read, written, output = %args.output.display(), "reformat finished");
    Ok(())
}
