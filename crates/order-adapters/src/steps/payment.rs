use std::sync::Arc;

use async_trait::async_trait;
use flow_core::{ExecutionContext, StepKind, TypedStep};
use log::debug;
use order_domain::{format_cents, Order, OrderError, OrderStatus, Payment, PaymentStatus, Product};

use super::{ensure_transition, read, CHARGE_PAYMENT, CHECK_STOCK, FETCH_ORDERS, FETCH_PRODUCT, MARK_PROCESSING};
use crate::artifacts::StockCheck;
use crate::services::OrderServices;

/// Cobra `precio * cantidad` sobre el pedido. Un pago que vuelve en estado
/// distinto de `Completed` detiene el flujo.
pub struct ChargePaymentStep {
    services: Arc<dyn OrderServices>,
}

impl ChargePaymentStep {
    pub fn new(services: Arc<dyn OrderServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl TypedStep for ChargePaymentStep {
    type Output = Payment;
    type Error = OrderError;

    fn id(&self) -> &'static str {
        CHARGE_PAYMENT
    }

    fn kind(&self) -> StepKind {
        StepKind::Effect
    }

    async fn run_typed(&self, ctx: &ExecutionContext) -> Result<Payment, OrderError> {
        let order: Order = read(ctx, FETCH_ORDERS)?;
        let product: Product = read(ctx, FETCH_PRODUCT)?;
        let stock: StockCheck = read(ctx, CHECK_STOCK)?;
        let amount = product.price_for(stock.quantity)
                            .ok_or_else(|| OrderError::Payment(format!("amount overflow for {} x {}", stock.quantity, product.id)))?;
        debug!("payment:charge order_id={} amount={}", order.id, format_cents(amount));
        let payment = self.services.charge(&order, amount).await?;
        match payment.status {
            PaymentStatus::Completed => Ok(payment),
            other => Err(OrderError::Payment(format!("payment {} ended as {:?}", payment.id, other))),
        }
    }
}

pub struct MarkProcessingStep {
    services: Arc<dyn OrderServices>,
}

impl MarkProcessingStep {
    pub fn new(services: Arc<dyn OrderServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl TypedStep for MarkProcessingStep {
    type Output = Order;
    type Error = OrderError;

    fn id(&self) -> &'static str {
        MARK_PROCESSING
    }

    fn kind(&self) -> StepKind {
        StepKind::Effect
    }

    async fn run_typed(&self, ctx: &ExecutionContext) -> Result<Order, OrderError> {
        let order: Order = read(ctx, FETCH_ORDERS)?;
        ensure_transition(&order, OrderStatus::Processing)?;
        self.services.set_order_status(&order.id, OrderStatus::Processing).await
    }
}
