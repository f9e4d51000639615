use std::sync::Arc;

use async_trait::async_trait;
use flow_core::{ExecutionContext, StepKind, TypedStep};
use order_domain::{Order, OrderError, Product, User};

use super::{read, request, CHECK_STOCK, FETCH_ORDERS, FETCH_PRODUCT, FETCH_USER};
use crate::artifacts::StockCheck;
use crate::services::OrderServices;

pub struct FetchUserStep {
    services: Arc<dyn OrderServices>,
}

impl FetchUserStep {
    pub fn new(services: Arc<dyn OrderServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl TypedStep for FetchUserStep {
    type Output = User;
    type Error = OrderError;

    fn id(&self) -> &'static str {
        FETCH_USER
    }

    fn kind(&self) -> StepKind {
        StepKind::Source
    }

    async fn run_typed(&self, ctx: &ExecutionContext) -> Result<User, OrderError> {
        let req = request(ctx)?;
        self.services.fetch_user(&req.user_id).await
    }
}

/// Toma el primer pedido del usuario; sin pedidos es una violación de regla
/// de negocio, no un error técnico.
pub struct FetchOrdersStep {
    services: Arc<dyn OrderServices>,
}

impl FetchOrdersStep {
    pub fn new(services: Arc<dyn OrderServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl TypedStep for FetchOrdersStep {
    type Output = Order;
    type Error = OrderError;

    fn id(&self) -> &'static str {
        FETCH_ORDERS
    }

    fn kind(&self) -> StepKind {
        StepKind::Lookup
    }

    async fn run_typed(&self, ctx: &ExecutionContext) -> Result<Order, OrderError> {
        let user: User = read(ctx, FETCH_USER)?;
        self.services
            .fetch_orders(&user.id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(OrderError::no_orders_found)
    }
}

pub struct FetchProductStep {
    services: Arc<dyn OrderServices>,
}

impl FetchProductStep {
    pub fn new(services: Arc<dyn OrderServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl TypedStep for FetchProductStep {
    type Output = Product;
    type Error = OrderError;

    fn id(&self) -> &'static str {
        FETCH_PRODUCT
    }

    fn kind(&self) -> StepKind {
        StepKind::Lookup
    }

    async fn run_typed(&self, ctx: &ExecutionContext) -> Result<Product, OrderError> {
        let req = request(ctx)?;
        self.services.fetch_product(&req.product_id).await
    }
}

pub struct CheckStockStep {
    services: Arc<dyn OrderServices>,
}

impl CheckStockStep {
    pub fn new(services: Arc<dyn OrderServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl TypedStep for CheckStockStep {
    type Output = StockCheck;
    type Error = OrderError;

    fn id(&self) -> &'static str {
        CHECK_STOCK
    }

    fn kind(&self) -> StepKind {
        StepKind::Check
    }

    async fn run_typed(&self, ctx: &ExecutionContext) -> Result<StockCheck, OrderError> {
        let req = request(ctx)?;
        let product: Product = read(ctx, FETCH_PRODUCT)?;
        if !self.services.check_stock(&product, req.quantity).await? {
            return Err(OrderError::out_of_stock());
        }
        Ok(StockCheck { product_id: product.id,
                        quantity: req.quantity })
    }
}
