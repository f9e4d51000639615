//! Builder para `FlowEngine`.
//!
//! Acumula steps en orden declarado; el tipo de error de todos los steps queda
//! fijado por el primero (`first_step`). La validación de la definición
//! (ids únicos, id reservado, lista no vacía) ocurre en `build`.
//!
//! ```ignore
//! let engine = EngineBuilder::first_step(FetchUserStep::new(services.clone()))
//!     .add_step(FetchOrdersStep::new(services.clone()))
//!     .build()?;
//! ```

use std::fmt;

use tokio_util::sync::CancellationToken;

use crate::engine::FlowEngine;
use crate::errors::CoreEngineError;
use crate::event::{EventStore, InMemoryEventStore};
use crate::repo::FlowDefinition;
use crate::step::{BoxedStep, StepDefinition};

pub struct EngineBuilder<E, S: EventStore = InMemoryEventStore> {
    steps: Vec<BoxedStep<E>>,
    event_store: S,
    cancellation: Option<CancellationToken>,
}

impl<E: Send + 'static> EngineBuilder<E, InMemoryEventStore> {
    /// Define el primer paso del flujo.
    pub fn first_step<T>(step: T) -> Self
        where T: StepDefinition<Error = E> + 'static
    {
        Self { steps: vec![Box::new(step)],
               event_store: InMemoryEventStore::default(),
               cancellation: None }
    }
}

impl<E: fmt::Display + Send + 'static, S: EventStore> EngineBuilder<E, S> {
    /// Añade el siguiente paso en orden declarado.
    pub fn add_step<T>(mut self, next: T) -> Self
        where T: StepDefinition<Error = E> + 'static
    {
        self.steps.push(Box::new(next));
        self
    }

    /// Reemplaza el store de eventos (por defecto en memoria).
    pub fn with_event_store<S2: EventStore>(self, event_store: S2) -> EngineBuilder<E, S2> {
        EngineBuilder { steps: self.steps,
                        event_store,
                        cancellation: self.cancellation }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Sólo la definición, para compartirla entre varios engines.
    pub fn build_definition(self) -> Result<FlowDefinition<E>, CoreEngineError> {
        FlowDefinition::new(self.steps)
    }

    pub fn build(self) -> Result<FlowEngine<E, S>, CoreEngineError> {
        let definition = FlowDefinition::new(self.steps)?;
        let engine = FlowEngine::new(definition).with_event_store(self.event_store);
        Ok(match self.cancellation {
               Some(token) => engine.with_cancellation(token),
               None => engine,
           })
    }
}
