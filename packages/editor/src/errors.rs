//! Error types for the editor

use crate::mutations::MutationError;
use crate::sections::StructuralError;
use blockmail_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Structural error: {0}")]
    Structural(#[from] StructuralError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("History has not been initialized")]
    NotInitialized,

    #[error("History is already initialized")]
    AlreadyInitialized,

    #[error("A generation request is already in flight")]
    RequestInFlight,

    #[error("Request ticket {0} is not the active request")]
    UnknownTicket(u64),
}

pub type EditorResult<T> = Result<T, EditorError>;
