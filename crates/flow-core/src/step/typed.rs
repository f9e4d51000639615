use async_trait::async_trait;
use serde::Serialize;

use super::{StepDefinition, StepKind, StepRunResult};
use crate::model::{Artifact, ExecutionContext};

/// Interfaz de alto nivel para definir Steps con salida fuertemente tipada.
///
/// Implementadores escriben `run_typed` con tipos concretos; el adaptador de
/// abajo serializa la salida a `Artifact` para el engine.
#[async_trait]
pub trait TypedStep: Send + Sync {
    /// Tipo concreto producido como output.
    type Output: Serialize + Send;
    type Error: Send;

    /// Identificador estable del step dentro del flow.
    fn id(&self) -> &'static str;

    /// Nombre amigable (por defecto usa el id).
    fn name(&self) -> &str {
        self.id()
    }

    fn kind(&self) -> StepKind;

    async fn run_typed(&self, ctx: &ExecutionContext) -> Result<Self::Output, Self::Error>;
}

// -------------------------------------------------------------
// Adaptador: cualquier `TypedStep` implementa `StepDefinition` neutro.
// -------------------------------------------------------------
#[async_trait]
impl<T> StepDefinition for T where T: TypedStep + 'static
{
    type Error = <T as TypedStep>::Error;

    fn id(&self) -> &str {
        <Self as TypedStep>::id(self)
    }

    fn name(&self) -> &str {
        <Self as TypedStep>::name(self)
    }

    fn kind(&self) -> StepKind {
        <Self as TypedStep>::kind(self)
    }

    async fn run(&self, ctx: &ExecutionContext) -> StepRunResult<Self::Error> {
        match self.run_typed(ctx).await {
            Ok(out) => match Artifact::encode(&out) {
                Ok(output) => StepRunResult::Success { output },
                Err(error) => StepRunResult::Fault { error },
            },
            Err(error) => StepRunResult::Failure { error },
        }
    }
}
