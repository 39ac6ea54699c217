use crate::kind::TypeDesc;
use crate::value::{Value, ValueKind};

/// Error returned by every coercion, inference and projection routine.
///
/// All variants are surfaced to the immediate caller; nothing in the core
/// recovers from them or substitutes a default.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoerceError {
    /// Decomposition was requested on a plain descriptor.
    /// Callers use this as a try-decompose-then-fallback signal.
    #[error("type {0} is not parameterized")]
    NotParameterized(TypeDesc),

    #[error("cannot coerce {value} into {target}")]
    UnsupportedConversion { value: Value, target: TypeDesc },

    /// No coercion routine is registered for this runtime kind.
    #[error("no coercion routine for value kind {0}")]
    UnsupportedValueKind(ValueKind),

    #[error("value kind {0} has no text form")]
    UnrepresentableValue(ValueKind),

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("unknown type name: {0:?}")]
    UnknownType(String),
}

impl CoerceError {
    pub fn unsupported(value: &Value, target: &TypeDesc) -> Self {
        Self::UnsupportedConversion {
            value: value.clone(),
            target: target.clone(),
        }
    }

    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }
}
