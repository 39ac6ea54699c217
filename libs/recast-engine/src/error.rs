use recast_api::error::CoerceError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{0}")]
    Coerce(#[from] CoerceError),

    /// One field of a record failed; the whole record is rejected.
    #[error("record '{record}', field '{field}': {source}")]
    Field {
        record: String,
        field: String,
        source: CoerceError,
    },

    #[error("config error: {0}")]
    Config(String),

    /// A row that cannot be read or written in the file's dialect.
    #[error("format error: {0}")]
    Format(String),

    #[error("io error ({path}): {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl EngineError {
    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Self::Coerce(CoerceError::schema_mismatch(msg))
    }

    pub fn format_err(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }

    /// True for shape errors: wrong column count, unknown key field,
    /// container that cannot be normalized to the record type.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::Coerce(CoerceError::SchemaMismatch(_)))
    }

    /// Add context to the error.
    ///
    /// For `Coerce` schema mismatches, `Config` and `Format`, context is
    /// prepended to the message. Other variants are returned unchanged.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            Self::Coerce(CoerceError::SchemaMismatch(msg)) => {
                Self::schema_mismatch(format!("{ctx}: {msg}"))
            }
            Self::Config(msg) => Self::Config(format!("{ctx}: {msg}")),
            Self::Format(msg) => Self::Format(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_prefixes_messages() {
        let err = EngineError::schema_mismatch("3 columns").with_context("rows.txt:4");
        assert!(err.is_schema_mismatch());
        assert_eq!(err.to_string(), "schema mismatch: rows.txt:4: 3 columns");

        let err = EngineError::Config("bad".into()).with_context("recast.toml");
        assert_eq!(err.to_string(), "config error: recast.toml: bad");
    }

    #[test]
    fn field_errors_keep_their_source() {
        let err = EngineError::Field {
            record: "user".into(),
            field: "uid".into(),
            source: CoerceError::schema_mismatch("x"),
        }
        .with_context("ignored");
        assert!(!err.is_schema_mismatch());
        assert!(std::error::Error::source(&err).is_some());
    }
}
