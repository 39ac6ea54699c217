//! Record ↔ row helpers.
//!
//! Rows are the flat text form of a record: one cell per field, in schema
//! order. Reading infers a typed value per cell, writing projects each value
//! back to text.

use std::sync::Arc;

use recast_api::{Attributes, Record, RecordType, Value};

use crate::coerce::coerce;
use crate::error::EngineError;
use crate::text::{infer_str, project};

/// Coerce every field of `record` to its declared type.
///
/// The first field that fails aborts the whole record; the error names it.
pub fn format_record(record: &Record) -> Result<Record, EngineError> {
    let ty = record.record_type();
    let values = ty
        .schema()
        .fields
        .iter()
        .zip(record.values())
        .map(|(field, value)| {
            coerce(value, &field.ty).map_err(|source| EngineError::Field {
                record: ty.name().to_string(),
                field: field.name.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Record::new(Arc::clone(ty), values)?)
}

/// Build a record of `ty` from a loosely-typed attribute source.
///
/// Missing attributes become empty text; values are taken as-is and not
/// coerced.
pub fn define_record(source: &impl Attributes, ty: Arc<RecordType>) -> Result<Record, EngineError> {
    let values = ty
        .schema()
        .names()
        .map(|name| source.attr(name).unwrap_or_else(|| Value::text("")))
        .collect();
    Ok(Record::new(ty, values)?)
}

/// Infer a typed value for every cell.
pub fn read_row<S: AsRef<str>>(cells: &[S]) -> Vec<Value> {
    cells.iter().map(|c| infer_str(c.as_ref())).collect()
}

/// Infer every cell and build a record of `ty`.
pub fn decode_row<S: AsRef<str>>(cells: &[S], ty: Arc<RecordType>) -> Result<Record, EngineError> {
    let arity = ty.arity();
    let name = ty.name().to_string();
    Record::new(ty, read_row(cells)).map_err(|_| {
        EngineError::schema_mismatch(format!(
            "row has {} columns, record '{name}' expects {arity}",
            cells.len()
        ))
    })
}

/// Project every field of `record` to text, in schema order.
pub fn write_row(record: &Record) -> Result<Vec<String>, EngineError> {
    record
        .iter()
        .map(|(name, value)| project(value).map_err(|source| field_error(record, name, source)))
        .collect()
}

/// Project the fields named by `layout`, taken by name from `record`.
///
/// `layout` may name a subset of the record's fields in any order.
pub fn write_row_as(record: &Record, layout: &RecordType) -> Result<Vec<String>, EngineError> {
    layout
        .schema()
        .names()
        .map(|name| {
            let value = record.get(name).ok_or_else(|| {
                EngineError::schema_mismatch(format!(
                    "record '{}' has no field '{name}'",
                    record.record_type().name()
                ))
            })?;
            project(value).map_err(|source| field_error(record, name, source))
        })
        .collect()
}

fn field_error(record: &Record, field: &str, source: recast_api::CoerceError) -> EngineError {
    EngineError::Field {
        record: record.record_type().name().to_string(),
        field: field.to_string(),
        source,
    }
}
