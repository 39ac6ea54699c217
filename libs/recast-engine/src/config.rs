use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use recast_api::{Field, RecordType, Schema};
use serde::Deserialize;

use crate::error::EngineError;

/// Root configuration, parsed from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct RecastConfig {
    /// Cell delimiter of row files.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Record type definitions, in file order.
    #[serde(default)]
    pub records: Vec<RecordConfig>,
}

fn default_delimiter() -> char {
    '|'
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordConfig {
    pub name: String,
    /// First cell marking rows of this record type.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Field used to index records when merging.
    #[serde(default)]
    pub key: Option<String>,
    /// Worksheet holding this record type in a workbook.
    #[serde(default)]
    pub sheet: Option<String>,
    pub fields: Vec<Field>,
}

impl RecordConfig {
    pub fn record_type(&self) -> Arc<RecordType> {
        Arc::new(RecordType::new(
            self.name.clone(),
            Schema::new(self.fields.clone()),
        ))
    }

    /// Worksheet name, defaulting to the record name.
    pub fn sheet_name(&self) -> &str {
        self.sheet.as_deref().unwrap_or(&self.name)
    }

    /// Key field, defaulting to the first field.
    pub fn key_field(&self) -> Option<&str> {
        self.key
            .as_deref()
            .or_else(|| self.fields.first().map(|f| f.name.as_str()))
    }
}

impl RecastConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        Self::parse(&content).map_err(|e| e.with_context(path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn record(&self, name: &str) -> Option<&RecordConfig> {
        self.records.iter().find(|r| r.name == name)
    }

    fn validate(&self) -> Result<(), EngineError> {
        let mut names = BTreeSet::new();
        for record in &self.records {
            if !names.insert(record.name.as_str()) {
                return Err(EngineError::Config(format!(
                    "duplicate record '{}'",
                    record.name
                )));
            }
            if record.fields.is_empty() {
                return Err(EngineError::Config(format!(
                    "record '{}' has no fields",
                    record.name
                )));
            }
            let mut fields = BTreeSet::new();
            for field in &record.fields {
                if !fields.insert(field.name.as_str()) {
                    return Err(EngineError::Config(format!(
                        "record '{}': duplicate field '{}'",
                        record.name, field.name
                    )));
                }
            }
            if let Some(key) = &record.key {
                if !fields.contains(key.as_str()) {
                    return Err(EngineError::Config(format!(
                        "record '{}': key '{key}' is not a field",
                        record.name
                    )));
                }
            }
        }
        tracing::debug!(records = self.records.len(), "config validated");
        Ok(())
    }
}
