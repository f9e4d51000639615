// order-domain library entry point
pub mod error;
pub mod order;
pub mod payment;
pub mod product;
pub mod shipping;
pub mod user;

pub use error::{ErrorKind, OrderError};
pub use order::{Order, OrderItem, OrderStatus};
pub use payment::{format_cents, Payment, PaymentStatus};
pub use product::Product;
pub use shipping::ShippingInfo;
pub use user::User;
