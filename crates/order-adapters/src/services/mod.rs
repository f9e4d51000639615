//! Colaboradores externos del pipeline de pedidos.
//!
//! El pipeline sólo conoce el trait `OrderServices`; la implementación
//! incluida (`SimulatedServices`) responde desde un catálogo fijo con latencia
//! cooperativa y fallos inyectables.

mod catalog;
mod faults;
mod simulated;

use std::fmt;

use async_trait::async_trait;
use order_domain::{Order, OrderError, OrderStatus, Payment, Product, ShippingInfo, User};

pub use catalog::Catalog;
pub use faults::{FaultPlan, SimulationConfig};
pub use simulated::SimulatedServices;

#[async_trait]
pub trait OrderServices: Send + Sync {
    async fn fetch_user(&self, user_id: &str) -> Result<User, OrderError>;

    async fn fetch_orders(&self, user_id: &str) -> Result<Vec<Order>, OrderError>;

    async fn fetch_product(&self, product_id: &str) -> Result<Product, OrderError>;

    async fn check_stock(&self, product: &Product, quantity: u32) -> Result<bool, OrderError>;

    async fn charge(&self, order: &Order, amount_cents: u64) -> Result<Payment, OrderError>;

    async fn set_order_status(&self, order_id: &str, status: OrderStatus) -> Result<Order, OrderError>;

    async fn ship(&self, order: &Order, address: &str) -> Result<ShippingInfo, OrderError>;

    async fn notify(&self, email: &str, order: &Order, shipping: &ShippingInfo) -> Result<bool, OrderError>;
}

/// Operaciones de `OrderServices`, usadas para inyectar fallos y en logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCall {
    FetchUser,
    FetchOrders,
    FetchProduct,
    CheckStock,
    Charge,
    SetOrderStatus,
    Ship,
    Notify,
}

impl ServiceCall {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCall::FetchUser => "fetch_user",
            ServiceCall::FetchOrders => "fetch_orders",
            ServiceCall::FetchProduct => "fetch_product",
            ServiceCall::CheckStock => "check_stock",
            ServiceCall::Charge => "charge",
            ServiceCall::SetOrderStatus => "set_order_status",
            ServiceCall::Ship => "ship",
            ServiceCall::Notify => "notify",
        }
    }

    /// Error técnico que produce la simulación cuando el sorteo falla.
    pub fn simulated_failure(&self) -> OrderError {
        let msg = format!("simulated {} failure", self.as_str());
        match self {
            ServiceCall::FetchUser
            | ServiceCall::FetchOrders
            | ServiceCall::FetchProduct
            | ServiceCall::CheckStock
            | ServiceCall::SetOrderStatus => OrderError::DataAccess(msg),
            ServiceCall::Charge => OrderError::Payment(msg),
            ServiceCall::Ship => OrderError::Shipping(msg),
            ServiceCall::Notify => OrderError::Notification(msg),
        }
    }
}

impl fmt::Display for ServiceCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
