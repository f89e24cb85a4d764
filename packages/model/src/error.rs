use crate::block::BlockKind;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Invalid {field} for {kind} block: {message}")]
    InvalidPayload {
        kind: BlockKind,
        field: &'static str,
        message: String,
    },

    #[error("Block {0} has an unsupported type and cannot be edited")]
    UnsupportedBlock(String),

    #[error("Duplicate block id: {0}")]
    DuplicateBlockId(String),

    #[error("Invalid global settings: {0}")]
    InvalidSettings(String),

    #[error("Unsupported schema version {found} (latest is {latest})")]
    UnsupportedSchema { found: u64, latest: u32 },

    #[error("Malformed document: {0}")]
    Malformed(String),
}

impl ModelError {
    pub fn invalid_payload(kind: BlockKind, field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            kind,
            field,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::Malformed(e.to_string())
    }
}
