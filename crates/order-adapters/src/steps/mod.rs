//! Steps del pipeline de pedidos, en orden declarado.
//!
//! Cada step es un `TypedStep` con `Error = OrderError` que lee del contexto
//! las salidas que necesita (por id de step) y llama a un único colaborador
//! de `OrderServices`.

mod lookup;
mod payment;
mod shipping;

use flow_core::ExecutionContext;
use order_domain::{Order, OrderError, OrderStatus};
use serde::de::DeserializeOwned;

use crate::artifacts::OrderRequest;

pub use lookup::{CheckStockStep, FetchOrdersStep, FetchProductStep, FetchUserStep};
pub use payment::{ChargePaymentStep, MarkProcessingStep};
pub use shipping::{MarkShippedStep, NotifyCustomerStep, ShipOrderStep};

pub const FETCH_USER: &str = "fetch_user";
pub const FETCH_ORDERS: &str = "fetch_orders";
pub const FETCH_PRODUCT: &str = "fetch_product";
pub const CHECK_STOCK: &str = "check_stock";
pub const CHARGE_PAYMENT: &str = "charge_payment";
pub const MARK_PROCESSING: &str = "mark_processing";
pub const SHIP_ORDER: &str = "ship_order";
pub const MARK_SHIPPED: &str = "mark_shipped";
pub const NOTIFY_CUSTOMER: &str = "notify_customer";

pub const ORDER_STEP_IDS: [&str; 9] = [FETCH_USER,
                                       FETCH_ORDERS,
                                       FETCH_PRODUCT,
                                       CHECK_STOCK,
                                       CHARGE_PAYMENT,
                                       MARK_PROCESSING,
                                       SHIP_ORDER,
                                       MARK_SHIPPED,
                                       NOTIFY_CUSTOMER];

/// Lee una salida previa del contexto; un fallo de decode es un error de
/// acceso a datos del step que la pidió.
pub(crate) fn read<T: DeserializeOwned>(ctx: &ExecutionContext, key: &str) -> Result<T, OrderError> {
    ctx.output(key).map_err(|e| OrderError::DataAccess(e.to_string()))
}

pub(crate) fn request(ctx: &ExecutionContext) -> Result<OrderRequest, OrderError> {
    ctx.input().map_err(|e| OrderError::DataAccess(e.to_string()))
}

/// Rechaza cambios de estado fuera del ciclo del pedido.
pub(crate) fn ensure_transition(order: &Order, next: OrderStatus) -> Result<(), OrderError> {
    if order.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(OrderError::BusinessRule(format!("order {} cannot move from {} to {}", order.id, order.status, next)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_domain::OrderItem;

    fn order(status: OrderStatus) -> Order {
        Order { id: "o1".into(),
                user_id: "u1".into(),
                items: vec![OrderItem { product_id: "p1".into(),
                                        quantity: 1 }],
                status }
    }

    #[test]
    fn transitions_follow_the_order_cycle() {
        assert!(ensure_transition(&order(OrderStatus::Pending), OrderStatus::Processing).is_ok());
        assert!(ensure_transition(&order(OrderStatus::Processing), OrderStatus::Shipped).is_ok());
        let err = ensure_transition(&order(OrderStatus::Pending), OrderStatus::Shipped).unwrap_err();
        assert_eq!(err, OrderError::BusinessRule("order o1 cannot move from pending to shipped".into()));
    }
}
