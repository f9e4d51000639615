use async_trait::async_trait;
use flow_core::hashing::hash_str;
use log::debug;
use order_domain::{Order, OrderError, OrderStatus, Payment, PaymentStatus, Product, ShippingInfo, User};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Catalog, FaultPlan, OrderServices, ServiceCall, SimulationConfig};

/// Implementación simulada de `OrderServices`.
///
/// Sin estado mutable: cada llamada deriva su propio generador de
/// `(seed, operación, clave)`, de modo que ejecuciones concurrentes no
/// comparten nada y una misma entrada produce siempre el mismo resultado.
#[derive(Debug, Clone)]
pub struct SimulatedServices {
    catalog: Catalog,
    config: SimulationConfig,
    faults: FaultPlan,
}

impl SimulatedServices {
    pub fn new(catalog: Catalog, config: SimulationConfig) -> Self {
        Self { catalog,
               config,
               faults: FaultPlan::none() }
    }

    /// Catálogo de demo, sin latencia ni fallos aleatorios.
    pub fn demo() -> Self {
        Self::new(Catalog::demo(), SimulationConfig::default())
    }

    pub fn with_faults(mut self, faults: FaultPlan) -> Self {
        self.faults = faults;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn rng_for(&self, call: ServiceCall, key: &str) -> StdRng {
        let digest = hash_str(&format!("{}:{}:{}", self.config.seed, call.as_str(), key));
        let seed = u64::from_str_radix(&digest[..16], 16).unwrap_or(self.config.seed);
        StdRng::seed_from_u64(seed)
    }

    /// Latencia + fallo forzado + sorteo. Devuelve el generador de la
    /// llamada para que la respuesta pueda seguir usándolo.
    async fn enter(&self, call: ServiceCall, key: &str) -> Result<StdRng, OrderError> {
        debug!("service:call op={} key={}", call, key);
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
        if let Some(err) = self.faults.forced_failure(call) {
            debug!("service:forced_failure op={} key={} err={}", call, key, err);
            return Err(err.clone());
        }
        let mut rng = self.rng_for(call, key);
        let p = self.config.failure_probability.clamp(0.0, 1.0);
        if p > 0.0 && rng.gen_bool(p) {
            debug!("service:random_failure op={} key={}", call, key);
            return Err(call.simulated_failure());
        }
        Ok(rng)
    }
}

#[async_trait]
impl OrderServices for SimulatedServices {
    async fn fetch_user(&self, user_id: &str) -> Result<User, OrderError> {
        self.enter(ServiceCall::FetchUser, user_id).await?;
        self.catalog
            .user(user_id)
            .cloned()
            .ok_or_else(|| OrderError::DataAccess(format!("user {user_id} not found")))
    }

    async fn fetch_orders(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        self.enter(ServiceCall::FetchOrders, user_id).await?;
        if self.faults.forces_empty_orders() {
            return Ok(Vec::new());
        }
        Ok(self.catalog.orders_for(user_id))
    }

    async fn fetch_product(&self, product_id: &str) -> Result<Product, OrderError> {
        self.enter(ServiceCall::FetchProduct, product_id).await?;
        self.catalog
            .product(product_id)
            .cloned()
            .ok_or_else(|| OrderError::DataAccess(format!("product {product_id} not found")))
    }

    async fn check_stock(&self, product: &Product, quantity: u32) -> Result<bool, OrderError> {
        self.enter(ServiceCall::CheckStock, &product.id).await?;
        Ok(self.faults
               .stock_override()
               .unwrap_or_else(|| product.has_stock_for(quantity)))
    }

    async fn charge(&self, order: &Order, amount_cents: u64) -> Result<Payment, OrderError> {
        let mut rng = self.enter(ServiceCall::Charge, &order.id).await?;
        Ok(Payment { id: format!("PAY{:08}", rng.gen_range(0..100_000_000u32)),
                     order_id: order.id.clone(),
                     amount_cents,
                     status: PaymentStatus::Completed })
    }

    async fn set_order_status(&self, order_id: &str, status: OrderStatus) -> Result<Order, OrderError> {
        // Cada transición sortea por separado.
        self.enter(ServiceCall::SetOrderStatus, &format!("{order_id}:{status}")).await?;
        let order = self.catalog
                        .order(order_id)
                        .ok_or_else(|| OrderError::DataAccess(format!("order {order_id} not found")))?;
        Ok(order.with_status(status))
    }

    async fn ship(&self, order: &Order, address: &str) -> Result<ShippingInfo, OrderError> {
        let mut rng = self.enter(ServiceCall::Ship, &order.id).await?;
        let digits: String = (0..10).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect();
        Ok(ShippingInfo { order_id: order.id.clone(),
                          address: address.to_string(),
                          tracking_number: Some(format!("TRK{digits}")) })
    }

    async fn notify(&self, email: &str, order: &Order, shipping: &ShippingInfo) -> Result<bool, OrderError> {
        self.enter(ServiceCall::Notify, &order.id).await?;
        debug!("service:notify email={} order_id={} tracking={:?}",
               email, order.id, shipping.tracking_number);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn order() -> Order {
        Catalog::demo().order("order123").cloned().unwrap()
    }

    #[tokio::test]
    async fn demo_catalog_resolves_user_orders_and_product() {
        let svc = SimulatedServices::demo();
        let user = svc.fetch_user("user123").await.unwrap();
        assert_eq!(user.email, "john@example.com");
        let orders = svc.fetch_orders("user123").await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, "order123");
        let product = svc.fetch_product("prod1").await.unwrap();
        assert_eq!(product.price_cents, 2999);
        assert!(svc.check_stock(&product, 2).await.unwrap());
        assert!(!svc.check_stock(&product, 11).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_ids_are_data_access_errors() {
        let svc = SimulatedServices::demo();
        assert!(matches!(svc.fetch_user("nobody").await, Err(OrderError::DataAccess(_))));
        assert!(matches!(svc.fetch_product("nothing").await, Err(OrderError::DataAccess(_))));
        assert!(matches!(svc.set_order_status("missing", OrderStatus::Shipped).await,
                         Err(OrderError::DataAccess(_))));
    }

    #[tokio::test]
    async fn tracking_number_is_trk_plus_ten_digits_and_deterministic() {
        let svc = SimulatedServices::demo();
        let a = svc.ship(&order(), "123 Main St").await.unwrap();
        let b = svc.ship(&order(), "123 Main St").await.unwrap();
        let trk = a.tracking_number.clone().unwrap();
        assert!(trk.starts_with("TRK"));
        assert_eq!(trk.len(), 13);
        assert!(trk[3..].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn fault_plan_overrides_answers() {
        let svc = SimulatedServices::demo().with_faults(FaultPlan::none().out_of_stock()
                                                                        .no_orders()
                                                                        .fail(ServiceCall::Ship,
                                                                              OrderError::Shipping("carrier down".into())));
        let product = svc.fetch_product("prod1").await.unwrap();
        assert!(!svc.check_stock(&product, 1).await.unwrap());
        assert!(svc.fetch_orders("user123").await.unwrap().is_empty());
        assert_eq!(svc.ship(&order(), "x").await,
                   Err(OrderError::Shipping("carrier down".into())));
    }

    #[tokio::test]
    async fn certain_failure_probability_fails_every_call_with_its_kind() {
        let cfg = SimulationConfig { latency: Duration::from_millis(1),
                                     failure_probability: 1.0,
                                     seed: 7 };
        let svc = SimulatedServices::new(Catalog::demo(), cfg);
        assert!(matches!(svc.fetch_user("user123").await, Err(OrderError::DataAccess(_))));
        assert!(matches!(svc.charge(&order(), 100).await, Err(OrderError::Payment(_))));
        assert!(matches!(svc.ship(&order(), "x").await, Err(OrderError::Shipping(_))));
    }

    #[tokio::test]
    async fn status_updates_draw_independently_per_target_status() {
        let mut shipped_failed_after_processing = 0;
        for seed in 0..200 {
            let cfg = SimulationConfig { latency: Duration::ZERO,
                                         failure_probability: 0.5,
                                         seed };
            let svc = SimulatedServices::new(Catalog::demo(), cfg);
            let processing = svc.set_order_status("order123", OrderStatus::Processing).await;
            let shipped = svc.set_order_status("order123", OrderStatus::Shipped).await;
            if processing.is_ok() && shipped.is_err() {
                shipped_failed_after_processing += 1;
            }
        }
        assert!(shipped_failed_after_processing > 0);
    }

    #[tokio::test]
    async fn set_order_status_returns_updated_copy() {
        let svc = SimulatedServices::demo();
        let updated = svc.set_order_status("order123", OrderStatus::Processing).await.unwrap();
        assert_eq!(updated.status, OrderStatus::Processing);
        assert_eq!(svc.catalog().order("order123").unwrap().status, OrderStatus::Pending);
    }
}
