//! Ensamblado del pipeline de pedidos sobre `flow_core`.

use std::sync::Arc;

use flow_core::{CoreEngineError, EngineBuilder, ExecutionContext, FlowDefinition, FlowEngine, Outcome};
use log::info;
use order_domain::{Order, OrderError, ShippingInfo};
use tokio_util::sync::CancellationToken;

use crate::artifacts::OrderRequest;
use crate::services::OrderServices;
use crate::steps::{self, CheckStockStep, ChargePaymentStep, FetchOrdersStep, FetchProductStep, FetchUserStep,
                   MarkProcessingStep, MarkShippedStep, NotifyCustomerStep, ShipOrderStep};

pub type OrderOutcome = Outcome<String, OrderError>;

/// Definición de los nueve steps en orden declarado, todos sobre el mismo
/// conjunto de colaboradores.
pub fn order_flow_definition(services: Arc<dyn OrderServices>) -> Result<FlowDefinition<OrderError>, CoreEngineError> {
    EngineBuilder::first_step(FetchUserStep::new(services.clone())).add_step(FetchOrdersStep::new(services.clone()))
                                                                   .add_step(FetchProductStep::new(services.clone()))
                                                                   .add_step(CheckStockStep::new(services.clone()))
                                                                   .add_step(ChargePaymentStep::new(services.clone()))
                                                                   .add_step(MarkProcessingStep::new(services.clone()))
                                                                   .add_step(ShipOrderStep::new(services.clone()))
                                                                   .add_step(MarkShippedStep::new(services.clone()))
                                                                   .add_step(NotifyCustomerStep::new(services))
                                                                   .build_definition()
}

/// Proyección de éxito: mensaje de confirmación con pedido, dirección y
/// número de seguimiento.
pub fn confirmation(ctx: &ExecutionContext) -> Result<String, CoreEngineError> {
    let order: Order = ctx.output(steps::FETCH_ORDERS)?;
    let shipping: ShippingInfo = ctx.output(steps::SHIP_ORDER)?;
    let tracking = shipping.tracking_number.as_deref().unwrap_or("unassigned");
    Ok(format!("Order {} processed successfully and shipped to {} with tracking number {}",
               order.id, shipping.address, tracking))
}

/// Pipeline reutilizable: la definición se construye una vez y cada
/// ejecución usa un engine (y un journal) propio.
#[derive(Clone, Debug)]
pub struct OrderPipeline {
    definition: FlowDefinition<OrderError>,
}

impl OrderPipeline {
    pub fn new(services: Arc<dyn OrderServices>) -> Result<Self, CoreEngineError> {
        Ok(Self { definition: order_flow_definition(services)? })
    }

    pub fn definition(&self) -> &FlowDefinition<OrderError> {
        &self.definition
    }

    /// Engine nuevo sobre la definición compartida, para inspeccionar el
    /// journal después de ejecutar.
    pub fn engine(&self) -> FlowEngine<OrderError> {
        FlowEngine::new(self.definition.clone())
    }

    /// Estilo secuencial: cada step se espera en orden dentro de una sola
    /// rutina y el fallo se observa una vez, en el `Outcome`.
    pub async fn run(&self, request: &OrderRequest) -> Result<OrderOutcome, CoreEngineError> {
        let mut engine = self.engine();
        Self::run_on(&mut engine, request).await
    }

    /// Igual que `run`, pero se detiene entre steps si `token` se cancela.
    pub async fn run_cancellable(&self,
                                 request: &OrderRequest,
                                 token: CancellationToken)
                                 -> Result<OrderOutcome, CoreEngineError> {
        let mut engine = self.engine().with_cancellation(token);
        Self::run_on(&mut engine, request).await
    }

    /// Ejecuta sobre un engine dado; el journal queda en `engine`.
    pub async fn run_on(engine: &mut FlowEngine<OrderError>, request: &OrderRequest) -> Result<OrderOutcome, CoreEngineError> {
        info!("order:start user_id={} product_id={} quantity={}",
              request.user_id, request.product_id, request.quantity);
        let outcome = engine.run(request, confirmation).await?;
        match &outcome {
            Outcome::Succeeded(msg) => info!("order:done {msg}"),
            Outcome::Failed(f) => info!("order:failed step_id={} reason={}", f.step_id, f.reason),
            Outcome::Cancelled { step_id, .. } => info!("order:cancelled step_id={step_id}"),
        }
        Ok(outcome)
    }
}

/// Punto de entrada: arma el pipeline y ejecuta una vez.
pub async fn run_order_pipeline(services: Arc<dyn OrderServices>,
                                request: &OrderRequest)
                                -> Result<OrderOutcome, CoreEngineError> {
    OrderPipeline::new(services)?.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SimulatedServices;

    #[test]
    fn definition_declares_nine_steps_in_order() {
        let def = order_flow_definition(Arc::new(SimulatedServices::demo())).unwrap();
        assert_eq!(def.step_ids(), steps::ORDER_STEP_IDS.to_vec());
    }

    #[tokio::test]
    async fn pipeline_is_reusable_across_runs() {
        let pipeline = OrderPipeline::new(Arc::new(SimulatedServices::demo())).unwrap();
        let req = OrderRequest::new("user123", "prod1", 2, "123 Main St");
        let a = pipeline.run(&req).await.unwrap();
        let b = pipeline.run(&req).await.unwrap();
        assert!(a.is_success());
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn cancelled_token_stops_before_first_step() {
        let pipeline = OrderPipeline::new(Arc::new(SimulatedServices::demo())).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let req = OrderRequest::new("user123", "prod1", 2, "123 Main St");
        let outcome = pipeline.run_cancellable(&req, token).await.unwrap();
        assert_eq!(outcome,
                   Outcome::Cancelled { step_index: 0,
                                        step_id: steps::FETCH_USER.to_string() });
    }
}
