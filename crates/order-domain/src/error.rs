use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errores del dominio de pedidos: un conjunto cerrado, una variante por
/// colaborador que puede fallar. Todas detienen el pipeline igual; difieren
/// sólo en la razón.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum OrderError {
    #[error("data access error: {0}")]
    DataAccess(String),
    #[error("{0}")]
    BusinessRule(String),
    #[error("payment error: {0}")]
    Payment(String),
    #[error("shipping error: {0}")]
    Shipping(String),
    #[error("notification error: {0}")]
    Notification(String),
}

/// Etiqueta de la variante, para recuperación exhaustiva por tipo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    DataAccess,
    BusinessRule,
    Payment,
    Shipping,
    Notification,
}

impl OrderError {
    pub fn no_orders_found() -> Self {
        OrderError::BusinessRule("no orders found".to_string())
    }

    pub fn out_of_stock() -> Self {
        OrderError::BusinessRule("out of stock".to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::DataAccess(_) => ErrorKind::DataAccess,
            OrderError::BusinessRule(_) => ErrorKind::BusinessRule,
            OrderError::Payment(_) => ErrorKind::Payment,
            OrderError::Shipping(_) => ErrorKind::Shipping,
            OrderError::Notification(_) => ErrorKind::Notification,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            OrderError::DataAccess(m)
            | OrderError::BusinessRule(m)
            | OrderError::Payment(m)
            | OrderError::Shipping(m)
            | OrderError::Notification(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_rules_render_their_bare_message() {
        assert_eq!(OrderError::out_of_stock().to_string(), "out of stock");
        assert_eq!(OrderError::no_orders_found().to_string(), "no orders found");
    }

    #[test]
    fn technical_errors_are_prefixed_by_kind() {
        let e = OrderError::Shipping("carrier timeout".into());
        assert_eq!(e.to_string(), "shipping error: carrier timeout");
        assert_eq!(e.kind(), ErrorKind::Shipping);
        assert_eq!(e.message(), "carrier timeout");
    }
}
