use std::path::PathBuf;

use recast_api::value::float_text;
use recast_api::{resolve, CoerceError, Kind, TypeDesc, Value};

use super::coerce;
use super::container::rebag;
use crate::text::infer_str;

// Every scalar → parameterized container promotion goes through `promote`:
// coerce to the first element type, then re-bag as a one-element container.
// A scalar is never split across several elements.

pub(super) fn promote(value: &Value, target: &TypeDesc) -> Result<Value, CoerceError> {
    let (base, args) = resolve(target)?;
    let elem_ty = args
        .first()
        .ok_or_else(|| CoerceError::unsupported(value, target))?;
    let elem = coerce(value, elem_ty)?;
    rebag(vec![elem], base, value, target)
}

/// One-element container of a plain list/set/tuple kind.
fn single(value: &Value, kind: Kind) -> Option<Value> {
    match kind {
        Kind::List => Some(Value::List(vec![value.clone()])),
        Kind::Set => Some(Value::set([value.clone()])),
        Kind::Tuple => Some(Value::Tuple(vec![value.clone()])),
        _ => None,
    }
}

fn empty(kind: Kind) -> Option<Value> {
    match kind {
        Kind::List => Some(Value::List(Vec::new())),
        Kind::Set => Some(Value::set(Vec::<Value>::new())),
        Kind::Tuple => Some(Value::Tuple(Vec::new())),
        Kind::Map => Some(Value::Map(Vec::new())),
        _ => None,
    }
}

pub fn coerce_bool(value: &Value, target: &TypeDesc) -> Result<Value, CoerceError> {
    let Value::Bool(b) = value else {
        return Err(CoerceError::unsupported(value, target));
    };
    match target {
        TypeDesc::Plain(Kind::Bool) => Ok(value.clone()),
        TypeDesc::Plain(Kind::Int) => Ok(Value::Int(i64::from(*b))),
        TypeDesc::Plain(Kind::Text) => Ok(Value::text(if *b { "True" } else { "False" })),
        TypeDesc::Plain(kind @ (Kind::List | Kind::Set | Kind::Tuple)) => {
            single(value, *kind).ok_or_else(|| CoerceError::unsupported(value, target))
        }
        TypeDesc::Param(_) => promote(value, target),
        _ => Err(CoerceError::unsupported(value, target)),
    }
}

pub fn coerce_int(value: &Value, target: &TypeDesc) -> Result<Value, CoerceError> {
    let Value::Int(i) = value else {
        return Err(CoerceError::unsupported(value, target));
    };
    match target {
        TypeDesc::Plain(Kind::Int) => Ok(value.clone()),
        // Non-zero is true, not only 1.
        TypeDesc::Plain(Kind::Bool) => Ok(Value::Bool(*i != 0)),
        TypeDesc::Plain(Kind::Text) => Ok(Value::Text(i.to_string())),
        #[allow(clippy::cast_precision_loss)]
        TypeDesc::Plain(Kind::Float) => Ok(Value::Float(*i as f64)),
        TypeDesc::Plain(kind @ (Kind::List | Kind::Set | Kind::Tuple)) => {
            single(value, *kind).ok_or_else(|| CoerceError::unsupported(value, target))
        }
        TypeDesc::Param(_) => promote(value, target),
        _ => Err(CoerceError::unsupported(value, target)),
    }
}

pub fn coerce_float(value: &Value, target: &TypeDesc) -> Result<Value, CoerceError> {
    let Value::Float(f) = value else {
        return Err(CoerceError::unsupported(value, target));
    };
    match target {
        TypeDesc::Plain(Kind::Float) => Ok(value.clone()),
        TypeDesc::Plain(Kind::Text) => Ok(Value::Text(float_text(*f))),
        TypeDesc::Plain(kind @ (Kind::List | Kind::Set | Kind::Tuple)) => {
            single(value, *kind).ok_or_else(|| CoerceError::unsupported(value, target))
        }
        TypeDesc::Param(_) => promote(value, target),
        // No implicit truncation to int.
        _ => Err(CoerceError::unsupported(value, target)),
    }
}

pub fn coerce_text(value: &Value, target: &TypeDesc) -> Result<Value, CoerceError> {
    let Value::Text(s) = value else {
        return Err(CoerceError::unsupported(value, target));
    };
    if matches!(target, TypeDesc::Plain(Kind::Text)) {
        return Ok(value.clone());
    }
    // Blank text behaves like absence of a value.
    if s.is_empty() {
        return coerce_none(&Value::None, target)
            .map_err(|_| CoerceError::unsupported(value, target));
    }

    match target {
        TypeDesc::Plain(Kind::Bool) => Ok(Value::Bool(s.eq_ignore_ascii_case("true"))),
        TypeDesc::Plain(Kind::Int) => match infer_str(s) {
            n @ Value::Int(_) => Ok(n),
            _ => Err(CoerceError::unsupported(value, target)),
        },
        TypeDesc::Plain(Kind::Float) => match infer_str(s) {
            n @ Value::Float(_) => Ok(n),
            #[allow(clippy::cast_precision_loss)]
            Value::Int(i) => Ok(Value::Float(i as f64)),
            _ => Err(CoerceError::unsupported(value, target)),
        },
        TypeDesc::Plain(Kind::Path) => Ok(Value::Path(PathBuf::from(s))),
        TypeDesc::Plain(kind @ (Kind::List | Kind::Set | Kind::Tuple)) => {
            single(value, *kind).ok_or_else(|| CoerceError::unsupported(value, target))
        }
        TypeDesc::Param(_) => promote(value, target),
        _ => Err(CoerceError::unsupported(value, target)),
    }
}

pub fn coerce_none(value: &Value, target: &TypeDesc) -> Result<Value, CoerceError> {
    if !value.is_none() {
        return Err(CoerceError::unsupported(value, target));
    }
    match target {
        TypeDesc::Plain(Kind::None) => Ok(Value::None),
        TypeDesc::Plain(Kind::Text) => Ok(Value::text("")),
        TypeDesc::Plain(kind) => empty(*kind).ok_or_else(|| CoerceError::unsupported(value, target)),
        // No element to coerce: an empty container of the base kind.
        TypeDesc::Param(p) => {
            empty(p.base().kind()).ok_or_else(|| CoerceError::unsupported(value, target))
        }
    }
}
