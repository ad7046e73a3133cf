use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown switch id: {0}")]
    UnknownSwitch(String),
    #[error("invalid {field} value: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("unknown flag: {0}")]
    UnknownFlag(String),
    #[error("plan item {0} not found")]
    UnknownPlanItem(Uuid),
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage unavailable")]
    Unavailable,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog has no template for {switch}/{band}")]
    Missing {
        switch: &'static str,
        band: &'static str,
    },
    #[error("catalog file unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog file malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("catalog misconfigured: {0}")]
    Catalog(#[from] CatalogError),
    /// The mutation is applied in memory; only the durable write failed.
    #[error("state updated but not saved: {0}")]
    Persistence(#[from] PersistError),
}

impl EngineError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::Persistence(_))
    }
}
