use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub order_id: String,
    pub address: String,
    pub tracking_number: Option<String>,
}
