//! Front-ends sobre el mismo executor.
//!
//! Los cuatro estilos ejecutan la misma `FlowDefinition` con el mismo orden y
//! la misma semántica de corte; sólo cambia cómo el llamador recibe el
//! resultado.
//!
//! - `continuation`: un handler de finalización invocado exactamente una vez.
//! - `deferred`: un `BoxFuture` compuesto con combinadores.
//! - `sequential`: await directo; el fallo se observa una vez en el borde.
//! - `effect`: recuperación exhaustiva por `ErrorKind`.

pub mod continuation;
pub mod deferred;
pub mod effect;
pub mod sequential;

use flow_core::{CoreEngineError, Outcome, StepFailure};
use order_domain::OrderError;
use thiserror::Error;

use crate::pipeline::OrderOutcome;

/// Canal de error único de los estilos que exponen `Result`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Step(StepFailure<OrderError>),
    #[error("cancelled before step '{step_id}'")]
    Cancelled { step_index: usize, step_id: String },
    #[error(transparent)]
    Engine(#[from] CoreEngineError),
}

impl PipelineError {
    /// Step en el que se detuvo el flujo, si lo hubo.
    pub fn step_id(&self) -> Option<&str> {
        match self {
            PipelineError::Step(f) => Some(&f.step_id),
            PipelineError::Cancelled { step_id, .. } => Some(step_id),
            PipelineError::Engine(_) => None,
        }
    }
}

/// Convierte un `Outcome` en `Result` con `PipelineError` como canal de fallo.
pub fn settle(outcome: OrderOutcome) -> Result<String, PipelineError> {
    match outcome {
        Outcome::Succeeded(msg) => Ok(msg),
        Outcome::Failed(failure) => Err(PipelineError::Step(failure)),
        Outcome::Cancelled { step_index, step_id } => Err(PipelineError::Cancelled { step_index, step_id }),
    }
}
