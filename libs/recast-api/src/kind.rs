use std::fmt;
use std::str::FromStr;

use crate::error::CoerceError;

/// Plain target kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Float,
    Text,
    List,
    Set,
    Tuple,
    Map,
    None,
    Path,
}

/// Base kind of a parameterized container descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    List,
    Set,
    Tuple,
    Map,
}

impl Kind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "str",
            Self::List => "list",
            Self::Set => "set",
            Self::Tuple => "tuple",
            Self::Map => "dict",
            Self::None => "none",
            Self::Path => "path",
        }
    }

    pub const fn container(self) -> Option<ContainerKind> {
        match self {
            Self::List => Some(ContainerKind::List),
            Self::Set => Some(ContainerKind::Set),
            Self::Tuple => Some(ContainerKind::Tuple),
            Self::Map => Some(ContainerKind::Map),
            _ => None,
        }
    }

    /// Kinds trusted as type arguments of a parameterized container.
    const fn is_argument_kind(self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Int | Self::Float | Self::Text | Self::List | Self::Set | Self::Tuple
        )
    }

    fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let bare = lower.strip_prefix("typing.").unwrap_or(&lower);
        let kind = match bare {
            "bool" | "boolean" => Self::Bool,
            "int" | "integer" => Self::Int,
            "float" => Self::Float,
            "str" | "string" | "text" => Self::Text,
            "list" | "sequence" => Self::List,
            "set" => Self::Set,
            "tuple" => Self::Tuple,
            "dict" | "map" | "mapping" => Self::Map,
            "none" | "nonetype" => Self::None,
            "path" | "pathlib.path" | "pathlib.posixpath" | "posixpath" => Self::Path,
            _ => return None,
        };
        Some(kind)
    }
}

impl ContainerKind {
    pub const fn kind(self) -> Kind {
        match self {
            Self::List => Kind::List,
            Self::Set => Kind::Set,
            Self::Tuple => Kind::Tuple,
            Self::Map => Kind::Map,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// TypeDesc
///
/// Target shape for coercion. Built once when a schema is derived and read
/// by the engine on every call.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeDesc {
    Plain(Kind),
    Param(Parameterized),
}

/// A container kind plus its type arguments.
///
/// Only constructible through [`TypeDesc::param`], so the arguments always
/// satisfy the support boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameterized {
    base: ContainerKind,
    args: Vec<TypeDesc>,
}

impl Parameterized {
    pub const fn base(&self) -> ContainerKind {
        self.base
    }

    pub fn args(&self) -> &[TypeDesc] {
        &self.args
    }
}

impl TypeDesc {
    pub const BOOL: Self = Self::Plain(Kind::Bool);
    pub const INT: Self = Self::Plain(Kind::Int);
    pub const FLOAT: Self = Self::Plain(Kind::Float);
    pub const TEXT: Self = Self::Plain(Kind::Text);
    pub const LIST: Self = Self::Plain(Kind::List);
    pub const SET: Self = Self::Plain(Kind::Set);
    pub const TUPLE: Self = Self::Plain(Kind::Tuple);
    pub const MAP: Self = Self::Plain(Kind::Map);
    pub const NONE: Self = Self::Plain(Kind::None);
    pub const PATH: Self = Self::Plain(Kind::Path);

    /// Build a parameterized descriptor, degrading silently to the plain base
    /// kind when the parameterization is outside the supported boundary:
    /// - every argument must be a plain bool/int/float/str/list/set/tuple
    /// - `List` and `Set` take exactly one argument, `Map` exactly two
    /// - `Tuple` takes one or more, reused cyclically over the elements
    pub fn param(base: ContainerKind, args: Vec<Self>) -> Self {
        let arity_ok = match base {
            ContainerKind::List | ContainerKind::Set => args.len() == 1,
            ContainerKind::Map => args.len() == 2,
            ContainerKind::Tuple => !args.is_empty(),
        };
        let args_ok = args
            .iter()
            .all(|a| matches!(a, Self::Plain(k) if k.is_argument_kind()));

        if arity_ok && args_ok {
            Self::Param(Parameterized { base, args })
        } else {
            Self::Plain(base.kind())
        }
    }

    pub fn list_of(elem: Kind) -> Self {
        Self::param(ContainerKind::List, vec![Self::Plain(elem)])
    }

    pub fn set_of(elem: Kind) -> Self {
        Self::param(ContainerKind::Set, vec![Self::Plain(elem)])
    }

    pub fn tuple_of(elem: Kind) -> Self {
        Self::param(ContainerKind::Tuple, vec![Self::Plain(elem)])
    }

    pub fn map_of(key: Kind, value: Kind) -> Self {
        Self::param(ContainerKind::Map, vec![Self::Plain(key), Self::Plain(value)])
    }

    /// Plain kind, or the base kind of a parameterized descriptor.
    pub const fn base_kind(&self) -> Kind {
        match self {
            Self::Plain(k) => *k,
            Self::Param(p) => p.base.kind(),
        }
    }

    pub fn is_plain(&self, kind: Kind) -> bool {
        matches!(self, Self::Plain(k) if *k == kind)
    }
}

/// Decompose a parameterized descriptor into its base kind and arguments.
///
/// Plain descriptors fail with `NotParameterized`; callers branch on that
/// before assuming decomposition is possible.
pub fn resolve(desc: &TypeDesc) -> Result<(ContainerKind, &[TypeDesc]), CoerceError> {
    match desc {
        TypeDesc::Param(p) => Ok((p.base, &p.args)),
        TypeDesc::Plain(_) => Err(CoerceError::NotParameterized(desc.clone())),
    }
}

// ---------------------------------------------------------------------------
// Text form
//
// Accepts both spellings of a parameterized type, `List[int]` /
// `typing.List[int]` and `list[int]`, and resolves them identically.
// ---------------------------------------------------------------------------

impl FromStr for TypeDesc {
    type Err = CoerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unknown = || CoerceError::UnknownType(s.to_string());

        let Some(open) = s.find('[') else {
            return Kind::from_name(s).map(Self::Plain).ok_or_else(unknown);
        };
        let inner = s[open + 1..].strip_suffix(']').ok_or_else(unknown)?;
        let base = Kind::from_name(&s[..open])
            .and_then(Kind::container)
            .ok_or_else(unknown)?;

        let args = split_args(inner)
            .ok_or_else(unknown)?
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<Self>, _>>()?;

        Ok(Self::param(base, args))
    }
}

/// Split a bracket body on top-level commas.
fn split_args(inner: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&inner[start..]);
    if parts.iter().any(|p| p.trim().is_empty()) {
        return None;
    }
    Some(parts)
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(k) => f.write_str(k.name()),
            Self::Param(p) => {
                write!(f, "{}[", p.base.kind())?;
                for (i, arg) in p.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl TryFrom<String> for TypeDesc {
    type Error = CoerceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TypeDesc> for String {
    fn from(desc: TypeDesc) -> Self {
        desc.to_string()
    }
}

impl From<Kind> for TypeDesc {
    fn from(kind: Kind) -> Self {
        Self::Plain(kind)
    }
}
