//! Core FlowEngine implementation

use std::fmt;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::engine::FlowRun;
use crate::errors::CoreEngineError;
use crate::event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
use crate::model::{Artifact, ExecutionContext};
use crate::outcome::Outcome;
use crate::repo::{FlowDefinition, FlowInstance, FlowRepository, InMemoryFlowRepository};

/// Motor de ejecución de flujos secuenciales.
///
/// Orquesta la ejecución de una `FlowDefinition` sobre un input, registra cada
/// transición en el `EventStore` y expone inspección por `flow_id`. Cada
/// llamada a `start`/`run` crea un contexto nuevo; no hay estado mutable
/// compartido entre ejecuciones más allá del journal de eventos.
pub struct FlowEngine<E, S: EventStore = InMemoryEventStore> {
    definition: FlowDefinition<E>,
    event_store: S,
    repository: InMemoryFlowRepository,
    cancellation: Option<CancellationToken>,
}

impl<E: fmt::Display + Send + 'static> FlowEngine<E, InMemoryEventStore> {
    /// Crea un engine con store de eventos en memoria.
    pub fn new(definition: FlowDefinition<E>) -> Self {
        Self { definition,
               event_store: InMemoryEventStore::default(),
               repository: InMemoryFlowRepository::new(),
               cancellation: None }
    }
}

impl<E, S> FlowEngine<E, S>
    where E: fmt::Display + Send + 'static,
          S: EventStore
{
    pub fn with_event_store<S2: EventStore>(self, event_store: S2) -> FlowEngine<E, S2> {
        FlowEngine { definition: self.definition,
                     event_store,
                     repository: self.repository,
                     cancellation: self.cancellation }
    }

    /// Token revisado antes de cada step; al cancelarse la ejecución termina
    /// con `Outcome::Cancelled`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn definition(&self) -> &FlowDefinition<E> {
        &self.definition
    }

    pub fn event_store(&self) -> &S {
        &self.event_store
    }

    /// Inicia un flujo nuevo (estado `NotStarted`) con el input ya vinculado.
    pub fn start(&mut self, input: Artifact) -> FlowRun<'_, E, S> {
        FlowRun::new(Uuid::new_v4(),
                     self.definition.clone(),
                     &mut self.event_store,
                     self.cancellation.clone(),
                     input)
    }

    /// Igual que `start` pero serializando un input tipado.
    pub fn start_with<I: Serialize + ?Sized>(&mut self, input: &I) -> Result<FlowRun<'_, E, S>, CoreEngineError> {
        let artifact = Artifact::encode(input)?;
        Ok(self.start(artifact))
    }

    /// Ejecuta el flujo completo y proyecta el contexto final en caso de éxito.
    ///
    /// `Err` sólo se produce por mal uso del motor (artifact inválido,
    /// proyección que no decodifica); los fallos de steps llegan como
    /// `Outcome::Failed`.
    pub async fn run<I, T, P>(&mut self, input: &I, projection: P) -> Result<Outcome<T, E>, CoreEngineError>
        where I: Serialize + Sync + ?Sized,
              P: FnOnce(&ExecutionContext) -> Result<T, CoreEngineError> + Send
    {
        let mut run = self.start_with(input)?;
        run.run_to_completion().await?;
        run.finish(projection)
    }

    /// Lista eventos de un flujo.
    pub fn events_for(&self, flow_id: Uuid) -> Vec<FlowEvent> {
        self.event_store.list(flow_id)
    }

    /// Variante compacta de eventos de un flujo (p.ej. `["I","S","F","C"]`).
    pub fn event_variants(&self, flow_id: Uuid) -> Vec<&'static str> {
        self.events_for(flow_id).iter().map(|e| e.kind.variant_code()).collect()
    }

    /// Reconstruye el estado por step a partir del journal.
    pub fn instance(&self, flow_id: Uuid) -> FlowInstance {
        let events = self.events_for(flow_id);
        self.repository.load(flow_id, &events, &self.definition.step_ids())
    }

    /// Fingerprint del flujo si completó con éxito.
    pub fn flow_fingerprint(&self, flow_id: Uuid) -> Option<String> {
        self.events_for(flow_id).iter().rev().find_map(|e| match &e.kind {
                                                    FlowEventKind::FlowCompleted { flow_fingerprint } => Some(flow_fingerprint.clone()),
                                                    _ => None,
                                                })
    }
}
