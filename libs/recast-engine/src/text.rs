//! Text inference and projection.
//!
//! `infer_str` guesses the typed value a cell of text encodes; `project`
//! renders any supported value as one flat, comma-joined line.

use recast_api::{CoerceError, TypeDesc, Value, ValueKind};

use crate::coerce::coerce;

const RADIX_PREFIXES: [(&str, u32); 3] = [("0b", 2), ("0o", 8), ("0x", 16)];

/// Infer a typed value from text. Non-text values are returned unchanged.
pub fn infer(value: &Value) -> Value {
    match value {
        Value::Text(s) => infer_str(s),
        other => other.clone(),
    }
}

/// Guess the value a string encodes.
///
/// Rules apply in order; text that matches none comes back as `Value::Text`.
pub fn infer_str(s: &str) -> Value {
    if s == "None" {
        return Value::None;
    }
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if s.contains(',') {
        return Value::List(s.split(',').map(|part| infer_str(part.trim())).collect());
    }

    if s.len() > 2 {
        if let Some((digits, radix)) = RADIX_PREFIXES
            .iter()
            .find_map(|(prefix, radix)| s.strip_prefix(*prefix).map(|d| (d, *radix)))
        {
            return parse_radix(digits, radix).map_or_else(|| Value::text(s), Value::Int);
        }
    }

    // Exact integer parse first so large values keep every digit.
    if let Ok(i) = s.trim().parse::<i64>() {
        return Value::Int(i);
    }
    match s.trim().parse::<f64>() {
        Ok(f) => narrow(f),
        Err(_) => Value::text(s),
    }
}

fn parse_radix(digits: &str, radix: u32) -> Option<i64> {
    // from_str_radix accepts a sign; a literal like `0x-1` is not a number.
    if digits.starts_with(['+', '-']) {
        return None;
    }
    i64::from_str_radix(digits, radix).ok()
}

/// A float with no fractional part becomes an integer when it fits.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn narrow(f: f64) -> Value {
    const BOUND: f64 = i64::MAX as f64;
    if f.is_finite() && f.fract() == 0.0 && f >= -BOUND && f < BOUND {
        Value::Int(f as i64)
    } else {
        Value::Float(f)
    }
}

/// Render a value as delimited text.
///
/// Containers flatten recursively into a single comma-joined line; set
/// elements are sorted after conversion so the output is deterministic.
pub fn project(value: &Value) -> Result<String, CoerceError> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::None => Ok(String::new()),
        Value::Path(p) => Ok(p.to_string_lossy().into_owned()),
        Value::Set(items) => join_sorted(items),
        Value::Bytes(_) => Err(CoerceError::UnrepresentableValue(ValueKind::Bytes)),
        other => match coerce(other, &TypeDesc::TEXT)? {
            Value::Text(s) => Ok(s),
            _ => Err(CoerceError::UnrepresentableValue(other.kind())),
        },
    }
}

pub(crate) fn join(items: &[Value]) -> Result<String, CoerceError> {
    let parts = items.iter().map(project).collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join(","))
}

pub(crate) fn join_sorted<'a, I>(items: I) -> Result<String, CoerceError>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut parts = items
        .into_iter()
        .map(project)
        .collect::<Result<Vec<_>, _>>()?;
    parts.sort();
    Ok(parts.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        assert_eq!(infer_str("None"), Value::None);
        assert_eq!(infer_str("True"), Value::Bool(true));
        assert_eq!(infer_str("true"), Value::Bool(true));
        assert_eq!(infer_str("TRUE"), Value::Bool(true));
        assert_eq!(infer_str("False"), Value::Bool(false));
        assert_eq!(infer_str("none"), Value::text("none"));
    }

    #[test]
    fn numbers() {
        assert_eq!(infer_str("1"), Value::Int(1));
        assert_eq!(infer_str("1.0"), Value::Int(1));
        assert_eq!(infer_str("1.5"), Value::Float(1.5));
        assert_eq!(infer_str("1.50"), Value::Float(1.5));
        assert_eq!(infer_str("-3"), Value::Int(-3));
        assert_eq!(infer_str("1e3"), Value::Int(1000));
        assert_eq!(infer_str("1e20"), Value::Float(1e20));
        assert_eq!(infer_str("9223372036854775807"), Value::Int(i64::MAX));
        assert_eq!(infer_str("123a"), Value::text("123a"));
        assert_eq!(infer_str(""), Value::text(""));
    }

    #[test]
    fn radix_literals() {
        assert_eq!(infer_str("0x110"), Value::Int(272));
        assert_eq!(infer_str("0b101"), Value::Int(5));
        assert_eq!(infer_str("0o17"), Value::Int(15));
        assert_eq!(infer_str("0x110x"), Value::text("0x110x"));
        assert_eq!(infer_str("0x-1"), Value::text("0x-1"));
        // Too short for a prefix: falls through to the numeric rules.
        assert_eq!(infer_str("0x"), Value::text("0x"));
    }

    #[test]
    fn comma_lists() {
        assert_eq!(infer_str("1,2"), Value::list([1, 2]));
        assert_eq!(infer_str("a, 1"), Value::List(vec![Value::text("a"), Value::Int(1)]));
        assert_eq!(
            infer_str("1,s,True"),
            Value::List(vec![Value::Int(1), Value::text("s"), Value::Bool(true)])
        );
        assert_eq!(infer_str("1,"), Value::List(vec![Value::Int(1), Value::text("")]));
    }

    #[test]
    fn infer_leaves_typed_values() {
        assert_eq!(infer(&Value::Int(3)), Value::Int(3));
        assert_eq!(infer(&Value::text("3")), Value::Int(3));
    }

    #[test]
    fn projection() {
        assert_eq!(project(&Value::Int(1)), Ok("1".into()));
        assert_eq!(project(&Value::Float(1.5)), Ok("1.5".into()));
        assert_eq!(project(&Value::Bool(true)), Ok("True".into()));
        assert_eq!(project(&Value::None), Ok(String::new()));
        assert_eq!(project(&Value::path("a/b.txt")), Ok("a/b.txt".into()));
        assert_eq!(project(&Value::set([1])), Ok("1".into()));
        assert_eq!(project(&Value::set([2, 1])), Ok("1,2".into()));
        assert_eq!(project(&Value::set([Value::Int(1), Value::text("2")])), Ok("1,2".into()));
        assert_eq!(project(&Value::list([1])), Ok("1".into()));
        assert_eq!(project(&Value::list([1, 2])), Ok("1,2".into()));
        assert_eq!(project(&Value::tuple([1])), Ok("1".into()));
        assert_eq!(project(&Value::tuple([1, 2])), Ok("1,2".into()));
        assert_eq!(
            project(&Value::Map(vec![(Value::text("1"), Value::text("s"))])),
            Ok("1,s".into())
        );
    }

    #[test]
    fn nested_containers_flatten() {
        let nested = Value::List(vec![Value::list([1, 2]), Value::Int(3)]);
        assert_eq!(project(&nested), Ok("1,2,3".into()));
        let mixed = Value::List(vec![Value::Int(1), Value::text("s"), Value::Bool(true)]);
        assert_eq!(project(&mixed), Ok("1,s,True".into()));
    }

    #[test]
    fn bytes_have_no_text_form() {
        assert_eq!(
            project(&Value::Bytes(vec![0])),
            Err(CoerceError::UnrepresentableValue(ValueKind::Bytes))
        );
        let inner = Value::List(vec![Value::Bytes(vec![0])]);
        assert!(project(&inner).is_err());
    }
}
