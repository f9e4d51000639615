use crate::errors::CoreEngineError;
use crate::model::Artifact;

/// Resultado abstracto de ejecutar un step.
///
/// - `Failure` es un fallo del propio step (regla de negocio o error técnico
///   de un colaborador); termina el flujo con `Outcome::Failed`.
/// - `Fault` indica que el step no pudo producir un artifact válido; también
///   detiene el flujo pero se propaga al caller como `CoreEngineError`.
#[derive(Debug)]
pub enum StepRunResult<E> {
    Success { output: Artifact },
    Failure { error: E },
    Fault { error: CoreEngineError },
}
