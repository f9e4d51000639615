use futures::future::{self, BoxFuture, FutureExt, TryFutureExt};

use crate::artifacts::OrderRequest;
use crate::pipeline::OrderPipeline;

use super::{settle, PipelineError};

/// Valor diferido: nada corre hasta que se hace poll del future devuelto.
///
/// La ejecución y la proyección del `Outcome` se encadenan con `and_then`;
/// un fallo de step o del engine sale por el canal de error del future.
pub fn process_order(pipeline: OrderPipeline, request: OrderRequest) -> BoxFuture<'static, Result<String, PipelineError>> {
    let run = async move { pipeline.run(&request).await };
    run.map_err(PipelineError::from)
       .and_then(|outcome| future::ready(settle(outcome)))
       .boxed()
}
