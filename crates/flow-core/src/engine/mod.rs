//! Engine module: executor secuencial con corte en el primer fallo.
//!
//! Provee el engine, el builder y la ejecución por flujo (`FlowRun`) con su
//! máquina de estados (`RunState`).

pub mod builder;
pub mod core;
pub mod flow_run;
pub mod state;

pub use builder::EngineBuilder;
pub use core::FlowEngine;
pub use flow_run::FlowRun;
pub use state::RunState;
