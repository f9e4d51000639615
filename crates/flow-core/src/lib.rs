//! flow-core: executor secuencial de steps con corte en el primer fallo.
//!
//! Un flujo es una lista ordenada de steps con nombre. Cada step lee el
//! contexto acumulado (input + salidas previas) y produce una salida o un
//! fallo tipado. El engine ejecuta en orden declarado, detiene el flujo en el
//! primer fallo y registra cada transición en un journal de eventos.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod outcome;
pub mod repo;
pub mod step;

pub use constants::INPUT_KEY;
pub use engine::{EngineBuilder, FlowEngine, FlowRun, RunState};
pub use errors::CoreEngineError;
pub use event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use model::{Artifact, ExecutionContext};
pub use outcome::{Outcome, StepFailure};
pub use repo::{FlowDefinition, FlowInstance, FlowRepository, InMemoryFlowRepository};
pub use step::{BoxedStep, StepDefinition, StepKind, StepRunResult, StepStatus, TypedStep};
