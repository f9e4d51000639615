//! Payloads propios del pipeline que no son entidades del dominio.
//!
//! Se serializan a `flow_core::Artifact` con el adaptador de `TypedStep`.

use serde::{Deserialize, Serialize};

/// Input del pipeline, vinculado bajo la clave reservada del contexto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub address: String,
}

impl OrderRequest {
    pub fn new(user_id: impl Into<String>, product_id: impl Into<String>, quantity: u32, address: impl Into<String>) -> Self {
        Self { user_id: user_id.into(),
               product_id: product_id.into(),
               quantity,
               address: address.into() }
    }
}

/// Resultado positivo de la verificación de stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCheck {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationReceipt {
    pub email: String,
    pub order_id: String,
}
