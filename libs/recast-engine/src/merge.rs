//! Merging loosely-shaped record containers into a keyed index.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use recast_api::{Kind, Record, RecordType, TypeDesc, Value};

use crate::error::EngineError;
use crate::record::format_record;

/// Destination records keyed by the value of their key field.
pub type RecordIndex = BTreeMap<Value, Record>;

/// The shapes a caller may hand to [`add_items`].
#[derive(Debug, Clone)]
pub enum Container {
    /// A single record.
    Record(Record),
    Records(Vec<Record>),
    /// Positional field values of one record.
    Values(Vec<Value>),
    /// Positional field values of several records.
    Rows(Vec<Vec<Value>>),
}

impl From<Record> for Container {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Vec<Record>> for Container {
    fn from(records: Vec<Record>) -> Self {
        Self::Records(records)
    }
}

/// Turn a container into records of `ty`.
///
/// Records must already be of `ty`. Rows and value lists must carry one value
/// per field, and a value list must open with a value of the first field's
/// kind. Anything else is a schema mismatch.
pub fn normalize(container: Container, ty: &Arc<RecordType>) -> Result<Vec<Record>, EngineError> {
    match container {
        Container::Record(record) => {
            check_type(&record, ty)?;
            Ok(vec![record])
        }
        Container::Records(records) => {
            for record in &records {
                check_type(record, ty)?;
            }
            Ok(records)
        }
        Container::Rows(rows) => rows
            .into_iter()
            .map(|row| Record::new(Arc::clone(ty), row).map_err(EngineError::from))
            .collect(),
        Container::Values(values) => {
            let leads = match (values.first(), ty.schema().fields.first()) {
                (Some(v), Some(f)) => v.kind().plain_kind() == Some(f.ty.base_kind()),
                _ => false,
            };
            if !leads {
                return Err(EngineError::schema_mismatch(format!(
                    "value list does not start with a '{}' field value",
                    ty.name()
                )));
            }
            Ok(vec![Record::new(Arc::clone(ty), values)?])
        }
    }
}

fn check_type(record: &Record, ty: &RecordType) -> Result<(), EngineError> {
    if **record.record_type() == *ty {
        Ok(())
    } else {
        Err(EngineError::schema_mismatch(format!(
            "expected a '{}' record, got '{}'",
            ty.name(),
            record.record_type().name()
        )))
    }
}

/// Starting value of a field only the destination has: blank text, an
/// empty container, or absence for the other scalars.
fn fill_value(ty: &TypeDesc) -> Value {
    match ty.base_kind() {
        Kind::Text => Value::text(""),
        Kind::List => Value::List(Vec::new()),
        Kind::Set => Value::Set(BTreeSet::new()),
        Kind::Tuple => Value::Tuple(Vec::new()),
        Kind::Map => Value::Map(Vec::new()),
        Kind::Bool | Kind::Int | Kind::Float | Kind::None | Kind::Path => Value::None,
    }
}

/// Add every record of `container` to `index` as a `dest` record.
///
/// Each record is normalized as `src`, formatted to its field types and
/// rebuilt positionally as `dest`; trailing `dest` fields start out empty.
/// Keys already present are left untouched. Returns the newly added keys in
/// order.
pub fn add_items(
    container: Container,
    src: &Arc<RecordType>,
    dest: &Arc<RecordType>,
    key: &str,
    index: &mut RecordIndex,
) -> Result<Vec<Value>, EngineError> {
    if !src.schema().is_prefix_of(dest.schema()) {
        return Err(EngineError::schema_mismatch(format!(
            "'{}' fields do not lead '{}'",
            src.name(),
            dest.name()
        )));
    }
    let key_pos = dest.schema().index_of(key).ok_or_else(|| {
        EngineError::schema_mismatch(format!("'{}' has no key field '{key}'", dest.name()))
    })?;

    let records = normalize(container, src).map_err(|e| e.with_context("add_items"))?;

    let mut added = Vec::new();
    for raw in records {
        let mut values = format_record(&raw)?.into_values();
        values.extend(
            dest.schema().fields[src.arity()..]
                .iter()
                .map(|f| fill_value(&f.ty)),
        );
        let record = Record::new(Arc::clone(dest), values)?;
        let key_value = record.values()[key_pos].clone();

        if index.contains_key(&key_value) {
            tracing::info!(record = %dest.name(), key = %key_value, "already defined, skipping");
            continue;
        }
        tracing::debug!(record = %dest.name(), key = %key_value, "added");
        index.insert(key_value.clone(), record);
        added.push(key_value);
    }
    Ok(added)
}
