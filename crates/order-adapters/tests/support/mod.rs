//! Doble de prueba: delega en `SimulatedServices` y registra cada llamada.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use order_adapters::{FaultPlan, OrderRequest, OrderServices, ServiceCall, SimulatedServices};
use order_domain::{Order, OrderError, OrderStatus, Payment, Product, ShippingInfo, User};

pub struct RecordingServices {
    inner: SimulatedServices,
    calls: Mutex<Vec<ServiceCall>>,
}

impl RecordingServices {
    pub fn new(faults: FaultPlan) -> Arc<Self> {
        Arc::new(Self { inner: SimulatedServices::demo().with_faults(faults),
                        calls: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: ServiceCall) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    fn record(&self, call: ServiceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl OrderServices for RecordingServices {
    async fn fetch_user(&self, user_id: &str) -> Result<User, OrderError> {
        self.record(ServiceCall::FetchUser);
        self.inner.fetch_user(user_id).await
    }

    async fn fetch_orders(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        self.record(ServiceCall::FetchOrders);
        self.inner.fetch_orders(user_id).await
    }

    async fn fetch_product(&self, product_id: &str) -> Result<Product, OrderError> {
        self.record(ServiceCall::FetchProduct);
        self.inner.fetch_product(product_id).await
    }

    async fn check_stock(&self, product: &Product, quantity: u32) -> Result<bool, OrderError> {
        self.record(ServiceCall::CheckStock);
        self.inner.check_stock(product, quantity).await
    }

    async fn charge(&self, order: &Order, amount_cents: u64) -> Result<Payment, OrderError> {
        self.record(ServiceCall::Charge);
        self.inner.charge(order, amount_cents).await
    }

    async fn set_order_status(&self, order_id: &str, status: OrderStatus) -> Result<Order, OrderError> {
        self.record(ServiceCall::SetOrderStatus);
        self.inner.set_order_status(order_id, status).await
    }

    async fn ship(&self, order: &Order, address: &str) -> Result<ShippingInfo, OrderError> {
        self.record(ServiceCall::Ship);
        self.inner.ship(order, address).await
    }

    async fn notify(&self, email: &str, order: &Order, shipping: &ShippingInfo) -> Result<bool, OrderError> {
        self.record(ServiceCall::Notify);
        self.inner.notify(email, order, shipping).await
    }
}

pub fn demo_request() -> OrderRequest {
    OrderRequest::new("user123", "prod1", 2, "123 Main St")
}
