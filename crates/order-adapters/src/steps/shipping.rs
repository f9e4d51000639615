use std::sync::Arc;

use async_trait::async_trait;
use flow_core::{ExecutionContext, StepKind, TypedStep};
use order_domain::{Order, OrderError, OrderStatus, ShippingInfo, User};

use super::{ensure_transition, read, request, FETCH_USER, MARK_PROCESSING, MARK_SHIPPED, NOTIFY_CUSTOMER, SHIP_ORDER};
use crate::artifacts::NotificationReceipt;
use crate::services::OrderServices;

pub struct ShipOrderStep {
    services: Arc<dyn OrderServices>,
}

impl ShipOrderStep {
    pub fn new(services: Arc<dyn OrderServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl TypedStep for ShipOrderStep {
    type Output = ShippingInfo;
    type Error = OrderError;

    fn id(&self) -> &'static str {
        SHIP_ORDER
    }

    fn kind(&self) -> StepKind {
        StepKind::Effect
    }

    async fn run_typed(&self, ctx: &ExecutionContext) -> Result<ShippingInfo, OrderError> {
        let req = request(ctx)?;
        let order: Order = read(ctx, MARK_PROCESSING)?;
        self.services.ship(&order, &req.address).await
    }
}

pub struct MarkShippedStep {
    services: Arc<dyn OrderServices>,
}

impl MarkShippedStep {
    pub fn new(services: Arc<dyn OrderServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl TypedStep for MarkShippedStep {
    type Output = Order;
    type Error = OrderError;

    fn id(&self) -> &'static str {
        MARK_SHIPPED
    }

    fn kind(&self) -> StepKind {
        StepKind::Effect
    }

    async fn run_typed(&self, ctx: &ExecutionContext) -> Result<Order, OrderError> {
        let order: Order = read(ctx, MARK_PROCESSING)?;
        ensure_transition(&order, OrderStatus::Shipped)?;
        self.services.set_order_status(&order.id, OrderStatus::Shipped).await
    }
}

/// Último step. Un `false` del colaborador cuenta como fallo de notificación.
pub struct NotifyCustomerStep {
    services: Arc<dyn OrderServices>,
}

impl NotifyCustomerStep {
    pub fn new(services: Arc<dyn OrderServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl TypedStep for NotifyCustomerStep {
    type Output = NotificationReceipt;
    type Error = OrderError;

    fn id(&self) -> &'static str {
        NOTIFY_CUSTOMER
    }

    fn kind(&self) -> StepKind {
        StepKind::Sink
    }

    async fn run_typed(&self, ctx: &ExecutionContext) -> Result<NotificationReceipt, OrderError> {
        let user: User = read(ctx, FETCH_USER)?;
        let order: Order = read(ctx, MARK_SHIPPED)?;
        let shipping: ShippingInfo = read(ctx, SHIP_ORDER)?;
        if !self.services.notify(&user.email, &order, &shipping).await? {
            return Err(OrderError::Notification(format!("customer {} was not notified", user.email)));
        }
        Ok(NotificationReceipt { email: user.email,
                                 order_id: order.id })
    }
}
