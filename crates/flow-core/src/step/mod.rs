//! Definiciones relacionadas a Steps.
//!
//! Un Step es una unidad de trabajo con nombre que lee el contexto acumulado
//! y produce una salida o un fallo. Este módulo define:
//! - `StepDefinition`: interfaz neutra (async) usada por el engine.
//! - `TypedStep`: interfaz de alto nivel con salida fuertemente tipada.
//! - `StepRunResult` y `StepStatus`.

pub mod definition;
mod run_result;
mod status;
pub mod typed;

pub use definition::{BoxedStep, StepDefinition, StepKind};
pub use run_result::StepRunResult;
pub use status::StepStatus;
pub use typed::TypedStep;
