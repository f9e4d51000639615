use order_domain::{Order, OrderItem, OrderStatus, Product, User};

/// Datos de sólo lectura desde los que responde la simulación.
///
/// No se modifica nunca: `set_order_status` devuelve una copia con el nuevo
/// estado, sin persistirla.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub users: Vec<User>,
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
}

impl Catalog {
    /// Catálogo de la demo: `user123` con el pedido `order123` (2 x `prod1`).
    pub fn demo() -> Self {
        Self { users: vec![User { id: "user123".into(),
                                  name: "John Doe".into(),
                                  email: "john@example.com".into() },
                           User { id: "user456".into(),
                                  name: "Jane Roe".into(),
                                  email: "jane@example.com".into() }],
               orders: vec![Order { id: "order123".into(),
                                    user_id: "user123".into(),
                                    items: vec![OrderItem { product_id: "prod1".into(),
                                                            quantity: 2 }],
                                    status: OrderStatus::Pending },
                            Order { id: "order456".into(),
                                    user_id: "user456".into(),
                                    items: vec![OrderItem { product_id: "prod2".into(),
                                                            quantity: 5 }],
                                    status: OrderStatus::Pending }],
               products: vec![Product { id: "prod1".into(),
                                        name: "Sample Product".into(),
                                        price_cents: 2999,
                                        stock: 10 },
                              Product { id: "prod2".into(),
                                        name: "Limited Edition".into(),
                                        price_cents: 14950,
                                        stock: 3 }] }
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn orders_for(&self, user_id: &str) -> Vec<Order> {
        self.orders.iter().filter(|o| o.user_id == user_id).cloned().collect()
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}
