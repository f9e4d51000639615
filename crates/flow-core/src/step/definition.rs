use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::run_result::StepRunResult;
use crate::model::ExecutionContext;

/// Tipo general del step. Descriptivo: el engine no cambia su comportamiento
/// según el kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    Source,
    Lookup,
    Check,
    Effect,
    Sink,
}

/// Trait que define un Step.
///
/// `run` recibe el contexto en modo lectura: las salidas de los pasos
/// anteriores y el input inicial. El engine garantiza que el paso `k+1` nunca
/// empieza antes de que `k` termine.
#[async_trait]
pub trait StepDefinition: Send + Sync {
    /// Fallo tipado que el step puede reportar (técnico o de negocio).
    type Error: Send;

    /// Identificador estable y único dentro del Flow.
    fn id(&self) -> &str;

    /// Nombre opcional amigable.
    fn name(&self) -> &str {
        self.id()
    }

    fn kind(&self) -> StepKind;

    async fn run(&self, ctx: &ExecutionContext) -> StepRunResult<Self::Error>;
}

pub type BoxedStep<E> = Box<dyn StepDefinition<Error = E>>;
