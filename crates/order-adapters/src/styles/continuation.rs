use flow_core::CoreEngineError;
use log::debug;
use tokio::task::JoinHandle;

use crate::artifacts::OrderRequest;
use crate::pipeline::{OrderOutcome, OrderPipeline};

/// Lanza la ejecución en una tarea propia y entrega el resultado a
/// `on_complete`.
///
/// `on_complete` es `FnOnce` y se mueve a la tarea: se invoca exactamente una
/// vez, con el `Outcome` o con el error del engine. El `JoinHandle` sólo
/// sirve para esperar a que el handler haya corrido.
pub fn process_order<F>(pipeline: OrderPipeline, request: OrderRequest, on_complete: F) -> JoinHandle<()>
    where F: FnOnce(Result<OrderOutcome, CoreEngineError>) + Send + 'static
{
    tokio::spawn(async move {
        let result = pipeline.run(&request).await;
        debug!("continuation:complete user_id={} ok={}", request.user_id, result.is_ok());
        on_complete(result);
    })
}
