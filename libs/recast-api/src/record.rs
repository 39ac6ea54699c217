use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::CoerceError;
use crate::schema::Schema;
use crate::value::Value;

/// Named record definition: an ordered schema of typed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    name: String,
    schema: Schema,
}

impl RecordType {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn arity(&self) -> usize {
        self.schema.len()
    }
}

/// Record instance: one value per schema field, in field order.
///
/// Values are not checked against field types here; `format_record` in the
/// engine produces the coerced form.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    ty: Arc<RecordType>,
    values: Vec<Value>,
}

impl Record {
    /// Positional constructor. The value count must equal the field count.
    pub fn new(ty: Arc<RecordType>, values: Vec<Value>) -> Result<Self, CoerceError> {
        if values.len() != ty.arity() {
            return Err(CoerceError::schema_mismatch(format!(
                "record '{}' has {} fields, got {} values",
                ty.name(),
                ty.arity(),
                values.len()
            )));
        }
        Ok(Self { ty, values })
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.ty
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.ty.schema().index_of(name).map(|i| &self.values[i])
    }

    /// Field name / value pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty.schema().names().zip(&self.values)
    }
}

/// Loosely-typed source of named attributes.
pub trait Attributes {
    fn attr(&self, name: &str) -> Option<Value>;
}

impl Attributes for Record {
    fn attr(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Attributes for BTreeMap<String, Value> {
    fn attr(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Attributes for HashMap<String, Value> {
    fn attr(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}
