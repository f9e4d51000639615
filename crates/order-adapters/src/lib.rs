//! order-adapters: capa de adaptación Dominio ↔ Core
//!
//! Este crate provee:
//! - `services`: los colaboradores externos del pipeline de pedidos
//!   (`OrderServices`) y su simulación con latencia y fallos inyectables.
//! - `steps`: los nueve steps tipados del pipeline, en orden declarado.
//! - `pipeline`: ensamblado de la definición y `run_order_pipeline`.
//! - `styles`: front-ends (continuación, diferido, efecto tipado) sobre el
//!   mismo executor.
//!
//! Nota: el core sólo conoce `Artifact` y `ExecutionContext`; aquí los
//! artifacts se encodean/decodean desde tipos del dominio.

pub mod artifacts;
pub mod pipeline;
pub mod services;
pub mod steps;
pub mod styles;

pub use artifacts::{NotificationReceipt, OrderRequest, StockCheck};
pub use pipeline::{confirmation, order_flow_definition, run_order_pipeline, OrderOutcome, OrderPipeline};
pub use services::{Catalog, FaultPlan, OrderServices, ServiceCall, SimulatedServices, SimulationConfig};
pub use steps::ORDER_STEP_IDS;
pub use styles::{settle, PipelineError};
