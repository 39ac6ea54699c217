//! Value → target-type coercion.
//!
//! `coerce` looks up the routine registered for the value's runtime kind and
//! hands it the target descriptor. Every routine is a pure function: inputs
//! are never mutated, containers are rebuilt.

mod container;
mod scalar;

use recast_api::{CoerceError, TypeDesc, Value, ValueKind};

pub use container::{coerce_list, coerce_map, coerce_set, coerce_tuple};
pub use scalar::{coerce_bool, coerce_float, coerce_int, coerce_none, coerce_text};

/// Coercion routine for one source kind.
pub type CoerceFn = fn(&Value, &TypeDesc) -> Result<Value, CoerceError>;

/// Dispatch table: runtime kind → routine.
///
/// Arms are listed in the documented dispatch order: absence first, then
/// boolean strictly before the numeric kinds, then map, float, int, list,
/// set, text, tuple. Kinds are disjoint tags, so a boolean can never reach
/// the integer routine. Path and Bytes have no routine.
pub fn routine(kind: ValueKind) -> Option<CoerceFn> {
    match kind {
        ValueKind::None => Some(coerce_none),
        ValueKind::Bool => Some(coerce_bool),
        ValueKind::Map => Some(coerce_map),
        ValueKind::Float => Some(coerce_float),
        ValueKind::Int => Some(coerce_int),
        ValueKind::List => Some(coerce_list),
        ValueKind::Set => Some(coerce_set),
        ValueKind::Text => Some(coerce_text),
        ValueKind::Tuple => Some(coerce_tuple),
        ValueKind::Path | ValueKind::Bytes => None,
    }
}

/// Coerce `value` into the shape described by `target`.
///
/// A value whose kind already equals a plain target is returned unchanged.
pub fn coerce(value: &Value, target: &TypeDesc) -> Result<Value, CoerceError> {
    let kind = value.kind();
    if let (TypeDesc::Plain(want), Some(have)) = (target, kind.plain_kind()) {
        if *want == have {
            return Ok(value.clone());
        }
    }

    let routine = routine(kind).ok_or(CoerceError::UnsupportedValueKind(kind))?;
    routine(value, target)
}

/// Text or list into a list; any other kind is rejected.
///
/// Text is wrapped as a single element, not split.
pub fn to_list(value: &Value) -> Result<Value, CoerceError> {
    match value {
        Value::Text(_) | Value::List(_) => coerce(value, &TypeDesc::LIST),
        other => Err(CoerceError::unsupported(other, &TypeDesc::LIST)),
    }
}
