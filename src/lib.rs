//! OrderFlow Rust Library
//!
//! Este crate actúa como la librería de la aplicación de demo:
//! - Expone `config` para leer la configuración de la simulación.
//! - Expone `errors` con el error de nivel aplicación.
//!
//! El executor vive en `flow-core`; el pipeline de pedidos en
//! `order-adapters`.

pub mod config;
pub mod errors;

pub use config::AppConfig;
pub use errors::CoreError;
