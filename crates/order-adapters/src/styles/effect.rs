use flow_core::{Outcome, StepFailure};
use order_domain::{ErrorKind, OrderError};

use crate::artifacts::OrderRequest;
use crate::pipeline::OrderPipeline;

/// Mensaje de recuperación por tipo de error. El `match` es exhaustivo sobre
/// `ErrorKind`: una variante nueva obliga a decidir su mensaje aquí.
pub fn recover(failure: &StepFailure<OrderError>) -> String {
    let detail = failure.reason.message();
    match failure.reason.kind() {
        ErrorKind::DataAccess => format!("Order could not be loaded ({detail}); please try again later"),
        ErrorKind::BusinessRule => format!("Order was not placed: {detail}"),
        ErrorKind::Payment => format!("Payment was declined ({detail}); no charge was made"),
        ErrorKind::Shipping => format!("Order is paid but shipping failed ({detail}); support will contact you"),
        ErrorKind::Notification => format!("Order shipped but the confirmation email failed ({detail})"),
    }
}

/// Ejecuta el pipeline y devuelve siempre un resumen: el mensaje de
/// confirmación o el mensaje de recuperación del fallo.
pub async fn process_order_recovered(pipeline: &OrderPipeline, request: &OrderRequest) -> String {
    match pipeline.run(request).await {
        Ok(Outcome::Succeeded(msg)) => msg,
        Ok(Outcome::Failed(failure)) => recover(&failure),
        Ok(Outcome::Cancelled { step_id, .. }) => format!("Order processing was cancelled before {step_id}"),
        Err(e) => format!("Order processing aborted: {e}"),
    }
}
