use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use crate::kind::Kind;

/// Canonical runtime value.
///
/// Strategy by kind:
/// - Scalars (Bool, Int, Float, Text, Path): owned, compared by value
/// - Bytes: opaque, no coercion routine and no text form
/// - List, Tuple: ordered, recursive
/// - Set: canonical order (see `Ord`), duplicates collapse on insert
/// - Map: insertion order kept, keys unique, first inserted key wins
///
/// `Bool(true)` and `Int(1)` are distinct values; dispatch never treats a
/// boolean as an integer. `Int` and `Float` compare numerically, so
/// `Int(37) == Float(37.0)` while their kinds stay distinct.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Path(PathBuf),
    /// Opaque binary data.
    Bytes(Vec<u8>),

    List(Vec<Value>),
    Set(BTreeSet<Value>),
    Tuple(Vec<Value>),
    Map(Vec<(Value, Value)>),

    None,
}

/// Runtime kind tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    None,
    Bool,
    Int,
    Float,
    Text,
    Path,
    Bytes,
    List,
    Tuple,
    Set,
    Map,
}

impl ValueKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "str",
            Self::Path => "path",
            Self::Bytes => "bytes",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Set => "set",
            Self::Map => "dict",
        }
    }

    /// The plain type kind with the same shape, if one exists.
    pub const fn plain_kind(self) -> Option<Kind> {
        match self {
            Self::None => Some(Kind::None),
            Self::Bool => Some(Kind::Bool),
            Self::Int => Some(Kind::Int),
            Self::Float => Some(Kind::Float),
            Self::Text => Some(Kind::Text),
            Self::Path => Some(Kind::Path),
            Self::List => Some(Kind::List),
            Self::Tuple => Some(Kind::Tuple),
            Self::Set => Some(Kind::Set),
            Self::Map => Some(Kind::Map),
            Self::Bytes => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Value {
    // ---- construction ----

    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn path(p: impl Into<PathBuf>) -> Self {
        Self::Path(p.into())
    }

    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// Build a `Value::Map` from pairs in order.
    ///
    /// When a key repeats, the first pair wins and later ones are dropped.
    pub fn map_from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Self, Self)>,
    {
        let mut entries: Vec<(Self, Self)> = Vec::new();
        let mut seen = BTreeSet::new();
        for (key, value) in pairs {
            if seen.insert(key.clone()) {
                entries.push((key, value));
            }
        }
        Self::Map(entries)
    }

    // ---- inspection ----

    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::Path(_) => ValueKind::Path,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::List(_) => ValueKind::List,
            Self::Set(_) => ValueKind::Set,
            Self::Tuple(_) => ValueKind::Tuple,
            Self::Map(_) => ValueKind::Map,
            Self::None => ValueKind::None,
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Number of elements for containers, `None` for scalars.
    pub fn container_len(&self) -> Option<usize> {
        match self {
            Self::List(xs) | Self::Tuple(xs) => Some(xs.len()),
            Self::Set(xs) => Some(xs.len()),
            Self::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Look up a map entry by key.
    pub fn map_get(&self, key: &Self) -> Option<&Self> {
        match self {
            Self::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Convert to JSON for display and interchange.
    ///
    /// Sets, lists and tuples become arrays; maps become objects keyed by
    /// the key's text (non-text keys use their display form).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::None => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::json!(i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(float_text(*f))),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Path(p) => serde_json::Value::String(p.display().to_string()),
            Self::Bytes(b) => serde_json::Value::Array(b.iter().map(|x| serde_json::json!(x)).collect()),
            Self::List(xs) | Self::Tuple(xs) => {
                serde_json::Value::Array(xs.iter().map(Self::to_json).collect())
            }
            Self::Set(xs) => serde_json::Value::Array(xs.iter().map(Self::to_json).collect()),
            Self::Map(entries) => {
                let map: serde_json::Map<String, serde_json::Value> = entries
                    .iter()
                    .map(|(k, v)| {
                        let key = match k {
                            Self::Text(s) => s.clone(),
                            other => other.to_string(),
                        };
                        (key, v.to_json())
                    })
                    .collect();
                serde_json::Value::Object(map)
            }
        }
    }

    fn sorted_entries(entries: &[(Self, Self)]) -> Vec<(&Self, &Self)> {
        let mut sorted: Vec<(&Self, &Self)> = entries.iter().map(|(k, v)| (k, v)).collect();
        sorted.sort();
        sorted
    }
}

/// Shortest text that parses back to the same float.
///
/// Integral values keep a trailing `.0` so they read back as floats in
/// contexts that preserve kind; NaN is spelled `nan`.
pub fn float_text(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    format!("{f:?}")
}

/// Collapse `-0.0` onto `0.0` and every NaN onto one NaN.
fn canonical_f64(f: f64) -> f64 {
    if f.is_nan() {
        f64::NAN
    } else if f == 0.0 {
        0.0
    } else {
        f
    }
}

/// 2^63, the first float above `i64::MAX`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// The integer an integral float equals, if it fits in `i64`.
#[allow(clippy::cast_possible_truncation)]
fn exact_int(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f)).then(|| f as i64)
}

/// Exact numeric order of an integer against a float. NaN sorts above every
/// number, as it does among floats.
#[allow(clippy::cast_possible_truncation)]
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() || f >= I64_BOUND {
        return Ordering::Less;
    }
    if f < -I64_BOUND {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => {
            let frac = f - whole;
            if frac > 0.0 {
                Ordering::Less
            } else if frac < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        ord => ord,
    }
}

// ---------------------------------------------------------------------------
// Canonical order: kind rank first, then in-kind comparison. Int and Float
// share one numeric order.
// Eq and Hash are derived from the same rules so values can key sets and maps.
// ---------------------------------------------------------------------------

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => canonical_f64(*a).total_cmp(&canonical_f64(*b)),
            (Self::Int(a), Self::Float(b)) => cmp_int_float(*a, *b),
            (Self::Float(a), Self::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Path(a), Self::Path(b)) => a.cmp(b),
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a.cmp(b),
            (Self::Set(a), Self::Set(b)) => a.cmp(b),
            (Self::Map(a), Self::Map(b)) => Self::sorted_entries(a).cmp(&Self::sorted_entries(b)),
            (Self::None, Self::None) => Ordering::Equal,
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // An integral float hashes as the integer it equals.
        if let Self::Float(f) = self {
            let f = canonical_f64(*f);
            match exact_int(f) {
                Some(i) => (ValueKind::Int, i).hash(state),
                None => (ValueKind::Float, f.to_bits()).hash(state),
            }
            return;
        }

        self.kind().hash(state);
        match self {
            Self::Bool(b) => b.hash(state),
            Self::Int(i) => i.hash(state),
            Self::Float(_) => {}
            Self::Text(s) => s.hash(state),
            Self::Path(p) => p.hash(state),
            Self::Bytes(b) => b.hash(state),
            Self::List(xs) | Self::Tuple(xs) => xs.hash(state),
            Self::Set(xs) => xs.hash(state),
            Self::Map(entries) => Self::sorted_entries(entries).hash(state),
            Self::None => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Display: a readable literal form used in errors and logs.
// ---------------------------------------------------------------------------

fn write_seq(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = impl fmt::Display>) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => f.write_str(&float_text(*x)),
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Path(p) => write!(f, "Path('{}')", p.display()),
            Self::Bytes(b) => write!(f, "b'{}'", b.escape_ascii()),
            Self::List(xs) => {
                f.write_str("[")?;
                write_seq(f, xs.iter())?;
                f.write_str("]")
            }
            Self::Tuple(xs) => {
                f.write_str("(")?;
                write_seq(f, xs.iter())?;
                if xs.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::Set(xs) if xs.is_empty() => f.write_str("set()"),
            Self::Set(xs) => {
                f.write_str("{")?;
                write_seq(f, xs.iter())?;
                f.write_str("}")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Self::None => f.write_str("None"),
        }
    }
}

// ---------------------------------------------------------------------------
// From impls
// ---------------------------------------------------------------------------

macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool    => Bool,
    i8      => Int,
    i16     => Int,
    i32     => Int,
    i64     => Int,
    u8      => Int,
    u16     => Int,
    u32     => Int,
    f32     => Float,
    f64     => Float,
    &str    => Text,
    String  => Text,
    PathBuf => Path,
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}

impl From<BTreeSet<Self>> for Value {
    fn from(set: BTreeSet<Self>) -> Self {
        Self::Set(set)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_and_int_are_distinct() {
        assert_ne!(Value::Bool(true), Value::Int(1));
        assert_eq!(Value::set([Value::Bool(true), Value::Int(1)]).container_len(), Some(2));
    }

    #[test]
    fn map_from_pairs_keeps_first_key() {
        let map = Value::map_from_pairs([
            (Value::Int(1), Value::text("a")),
            (Value::Int(2), Value::text("b")),
            (Value::Int(1), Value::text("c")),
        ]);
        assert_eq!(map.container_len(), Some(2));
        assert_eq!(map.map_get(&Value::Int(1)), Some(&Value::text("a")));
    }

    #[test]
    fn map_equality_ignores_order() {
        let a = Value::map_from_pairs([(Value::Int(1), Value::Int(2)), (Value::Int(3), Value::Int(4))]);
        let b = Value::map_from_pairs([(Value::Int(3), Value::Int(4)), (Value::Int(1), Value::Int(2))]);
        assert_eq!(a, b);
    }

    #[test]
    fn float_zero_and_nan_are_canonical() {
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(Value::Float(f64::NAN), Value::Float(-f64::NAN));
    }

    #[test]
    fn int_and_float_compare_numerically() {
        assert_eq!(Value::Int(37), Value::Float(37.0));
        assert_eq!(Value::Int(0), Value::Float(-0.0));
        assert_ne!(Value::Int(37), Value::Float(37.5));
        assert!(Value::Int(2) < Value::Float(2.5));
        assert!(Value::Float(-2.5) < Value::Int(-2));
        assert!(Value::Int(i64::MAX) < Value::Float(9_223_372_036_854_775_808.0));
        assert!(Value::Int(i64::MIN) == Value::Float(-9_223_372_036_854_775_808.0));
        assert!(Value::Int(i64::MAX) < Value::Float(f64::INFINITY));
        assert!(Value::Int(i64::MIN) > Value::Float(f64::NEG_INFINITY));
        assert!(Value::Int(i64::MAX) < Value::Float(f64::NAN));
        assert_ne!(Value::Bool(true), Value::Float(1.0));

        // Equal numbers collapse in sets and hash alike.
        assert_eq!(Value::set([Value::Int(1), Value::Float(1.0)]).container_len(), Some(1));
        let hash = |v: &Value| {
            use std::collections::hash_map::DefaultHasher;
            let mut h = DefaultHasher::new();
            v.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&Value::Int(37)), hash(&Value::Float(37.0)));
        assert_eq!(hash(&Value::Int(0)), hash(&Value::Float(-0.0)));
    }

    #[test]
    fn display_uses_literal_forms() {
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::tuple([1]).to_string(), "(1,)");
        assert_eq!(Value::set(Vec::<Value>::new()).to_string(), "set()");
        assert_eq!(Value::list([Value::Int(1), Value::text("s")]).to_string(), "[1, 's']");
        assert_eq!(Value::Float(37.0).to_string(), "37.0");
    }

    #[test]
    fn float_text_round_trips() {
        for f in [1.5, 0.1, 37.0, 1e20, -2.25e-7] {
            assert_eq!(float_text(f).parse::<f64>().ok(), Some(f));
        }
        assert_eq!(float_text(f64::NAN), "nan");
    }

    #[test]
    fn json_conversion() {
        let v = Value::map_from_pairs([(Value::text("a"), Value::list([1, 2]))]);
        assert_eq!(v.to_json(), serde_json::json!({ "a": [1, 2] }));
        assert_eq!(Value::None.to_json(), serde_json::Value::Null);
    }
}
