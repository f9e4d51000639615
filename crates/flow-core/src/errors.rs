//! Errores específicos del core.
//!
//! Describen mal uso del motor: definiciones inválidas, pasos invocados tras
//! un estado terminal, artifacts que no (de)serializan. Los fallos propios de
//! un step no son `CoreEngineError`; viajan tipados dentro de
//! `Outcome::Failed`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreEngineError {
    #[error("flow definition has no steps")] EmptyDefinition,
    #[error("duplicate step id: {0}")] DuplicateStepId(String),
    #[error("step id '{0}' is reserved for the flow input")] ReservedStepId(String),
    #[error("flow already completed")] FlowCompleted,
    #[error("flow has failed previously (stop-on-failure invariant)")] FlowHasFailed,
    #[error("flow was cancelled")] FlowCancelled,
    #[error("flow has not reached a terminal state")] FlowNotFinished,
    #[error("missing context entry: {0}")] MissingContextEntry(String),
    #[error("artifact encode error: {0}")] ArtifactEncode(String),
    #[error("artifact decode error for '{key}': {message}")] ArtifactDecode { key: String, message: String },
    #[error("internal: {0}")] Internal(String),
}
