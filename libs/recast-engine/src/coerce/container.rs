use std::collections::BTreeSet;

use recast_api::{resolve, CoerceError, ContainerKind, Kind, TypeDesc, Value};

use super::coerce;
use crate::text::{join, join_sorted};

/// Re-bag already coerced items into a container of `base`.
///
/// A map is built from adjacent key/value pairs; an odd item count fails and
/// repeated keys keep their first value.
pub(super) fn rebag(
    items: Vec<Value>,
    base: ContainerKind,
    source: &Value,
    target: &TypeDesc,
) -> Result<Value, CoerceError> {
    match base {
        ContainerKind::List => Ok(Value::List(items)),
        ContainerKind::Set => Ok(Value::Set(items.into_iter().collect())),
        ContainerKind::Tuple => Ok(Value::Tuple(items)),
        ContainerKind::Map => {
            pairs_to_map(items).ok_or_else(|| CoerceError::unsupported(source, target))
        }
    }
}

fn pairs_to_map(items: Vec<Value>) -> Option<Value> {
    if items.len() % 2 != 0 {
        return None;
    }
    let mut it = items.into_iter();
    let mut pairs = Vec::new();
    while let (Some(k), Some(v)) = (it.next(), it.next()) {
        pairs.push((k, v));
    }
    Some(Value::map_from_pairs(pairs))
}

/// Coerce each item to the declared element types, reusing them cyclically.
fn coerce_items<'a, I>(items: I, args: &[TypeDesc]) -> Result<Vec<Value>, CoerceError>
where
    I: IntoIterator<Item = &'a Value>,
{
    items
        .into_iter()
        .zip(args.iter().cycle())
        .map(|(item, ty)| coerce(item, ty))
        .collect()
}

/// Shared shape of the ordered containers (list, tuple).
fn coerce_sequence(
    items: &[Value],
    value: &Value,
    target: &TypeDesc,
) -> Result<Value, CoerceError> {
    match target {
        TypeDesc::Plain(Kind::Text) => join(items).map(Value::Text),
        TypeDesc::Plain(kind) => match kind.container() {
            Some(base) => rebag(items.to_vec(), base, value, target),
            None => Err(CoerceError::unsupported(value, target)),
        },
        TypeDesc::Param(_) => {
            let (base, args) = resolve(target)?;
            if items.is_empty() {
                return coerce(value, &TypeDesc::Plain(base.kind()));
            }
            rebag(coerce_items(items, args)?, base, value, target)
        }
    }
}

pub fn coerce_list(value: &Value, target: &TypeDesc) -> Result<Value, CoerceError> {
    let Value::List(items) = value else {
        return Err(CoerceError::unsupported(value, target));
    };
    coerce_sequence(items, value, target)
}

pub fn coerce_tuple(value: &Value, target: &TypeDesc) -> Result<Value, CoerceError> {
    let Value::Tuple(items) = value else {
        return Err(CoerceError::unsupported(value, target));
    };
    // Positional pairs are only read from lists.
    if target.base_kind() == Kind::Map {
        return Err(CoerceError::unsupported(value, target));
    }
    coerce_sequence(items, value, target)
}

pub fn coerce_set(value: &Value, target: &TypeDesc) -> Result<Value, CoerceError> {
    let Value::Set(items) = value else {
        return Err(CoerceError::unsupported(value, target));
    };
    match target {
        TypeDesc::Plain(Kind::Text) => join_sorted(items).map(Value::Text),
        TypeDesc::Plain(Kind::List) => Ok(Value::List(items.iter().cloned().collect())),
        TypeDesc::Plain(Kind::Tuple) => Ok(Value::Tuple(items.iter().cloned().collect())),
        TypeDesc::Plain(_) => Err(CoerceError::unsupported(value, target)),
        TypeDesc::Param(_) => {
            let (base, args) = resolve(target)?;
            if base == ContainerKind::Map {
                return Err(CoerceError::unsupported(value, target));
            }
            if items.is_empty() {
                return coerce(value, &TypeDesc::Plain(base.kind()));
            }
            let coerced = coerce_items(items, args)?;
            // Distinct source elements may collapse once coerced. Several
            // positional tuple arguments keep every element in place.
            let coerced = if args.len() == 1 {
                coerced.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
            } else {
                coerced
            };
            rebag(coerced, base, value, target)
        }
    }
}

pub fn coerce_map(value: &Value, target: &TypeDesc) -> Result<Value, CoerceError> {
    let Value::Map(entries) = value else {
        return Err(CoerceError::unsupported(value, target));
    };
    let flat = || -> Vec<Value> {
        entries
            .iter()
            .flat_map(|(k, v)| [k.clone(), v.clone()])
            .collect()
    };

    match target {
        TypeDesc::Plain(Kind::Text) => join(&flat()).map(Value::Text),
        TypeDesc::Plain(kind) => match kind.container() {
            Some(base) => rebag(flat(), base, value, target),
            None => Err(CoerceError::unsupported(value, target)),
        },
        TypeDesc::Param(_) => {
            let (base, args) = resolve(target)?;
            if entries.is_empty() {
                return coerce(value, &TypeDesc::Plain(base.kind()));
            }
            if let ([key_ty, value_ty], ContainerKind::Map) = (args, base) {
                let pairs = entries
                    .iter()
                    .map(|(k, v)| Ok((coerce(k, key_ty)?, coerce(v, value_ty)?)))
                    .collect::<Result<Vec<_>, CoerceError>>()?;
                return Ok(Value::map_from_pairs(pairs));
            }
            rebag(coerce_items(&flat(), args)?, base, value, target)
        }
    }
}
