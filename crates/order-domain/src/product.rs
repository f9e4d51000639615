use serde::{Deserialize, Serialize};

/// Producto del catálogo. El precio se guarda en centavos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price_cents: u64,
    pub stock: u32,
}

impl Product {
    /// Importe de `quantity` unidades; `None` si desborda.
    pub fn price_for(&self, quantity: u32) -> Option<u64> {
        self.price_cents.checked_mul(u64::from(quantity))
    }

    pub fn has_stock_for(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }
}
