use recast_api::CoerceError;
use recast_engine::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Coerce(#[from] CoerceError),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("no records configured in {0}")]
    NoRecords(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
