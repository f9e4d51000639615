//! Ejecución de un flujo concreto.
//!
//! `FlowRun` es dueño del contexto de la ejecución y de su máquina de estados;
//! avanza de a un step y nunca vuelve a `Running` tras un estado terminal.

use std::fmt;

use log::{debug, info, warn};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::constants::ENGINE_VERSION;
use crate::engine::RunState;
use crate::errors::CoreEngineError;
use crate::event::{EventStore, FlowEventKind};
use crate::hashing::hash_value;
use crate::model::{Artifact, ExecutionContext};
use crate::outcome::{Outcome, StepFailure};
use crate::repo::FlowDefinition;
use crate::step::StepRunResult;

pub struct FlowRun<'a, E, S: EventStore> {
    flow_id: Uuid,
    definition: FlowDefinition<E>,
    event_store: &'a mut S,
    cancellation: Option<CancellationToken>,
    context: ExecutionContext,
    state: RunState,
    failure: Option<StepFailure<E>>,
    /// Fallo del engine (p.ej. salida que no serializa) que detuvo el flujo.
    fault: Option<CoreEngineError>,
}

impl<'a, E, S> FlowRun<'a, E, S>
    where E: fmt::Display + Send + 'static,
          S: EventStore
{
    pub(crate) fn new(flow_id: Uuid,
                      definition: FlowDefinition<E>,
                      event_store: &'a mut S,
                      cancellation: Option<CancellationToken>,
                      input: Artifact)
                      -> Self {
        event_store.append_kind(flow_id,
                                FlowEventKind::FlowInitialized { definition_hash: definition.definition_hash().to_string(),
                                                                 step_count: definition.len(),
                                                                 input_hash: input.hash.clone() });
        debug!("flow:init flow_id={flow_id} steps={}", definition.len());
        Self { flow_id,
               definition,
               event_store,
               cancellation,
               context: ExecutionContext::with_input(input),
               state: RunState::NotStarted,
               failure: None,
               fault: None }
    }

    pub fn flow_id(&self) -> Uuid {
        self.flow_id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Contexto acumulado hasta ahora (input + salidas de steps terminados).
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation.as_ref().is_some_and(|t| t.is_cancelled())
    }

    /// Ejecuta exactamente un step y devuelve el nuevo estado.
    ///
    /// Invocar `step` en un estado terminal devuelve el error correspondiente
    /// (`FlowCompleted`, `FlowHasFailed`, `FlowCancelled`) sin ejecutar nada.
    pub async fn step(&mut self) -> Result<RunState, CoreEngineError> {
        let cursor = match self.state {
            RunState::NotStarted => 0,
            RunState::Running { step_index } => step_index,
            RunState::Succeeded => return Err(CoreEngineError::FlowCompleted),
            RunState::Failed { .. } => return Err(CoreEngineError::FlowHasFailed),
            RunState::Cancelled { .. } => return Err(CoreEngineError::FlowCancelled),
        };
        let definition = self.definition.clone();
        let step = definition.step(cursor)
                             .ok_or_else(|| CoreEngineError::Internal(format!("cursor {cursor} out of range")))?;
        let flow_id = self.flow_id;

        if self.is_cancelled() {
            warn!("flow:cancelled flow_id={flow_id} step_index={cursor} step_id={}", step.id());
            self.event_store.append_kind(flow_id,
                                         FlowEventKind::FlowCancelled { step_index: cursor,
                                                                        step_id: step.id().to_string() });
            self.state = RunState::Cancelled { step_index: cursor };
            return Ok(self.state);
        }

        self.state = RunState::Running { step_index: cursor };
        self.event_store.append_kind(flow_id,
                                     FlowEventKind::StepStarted { step_index: cursor,
                                                                  step_id: step.id().to_string() });
        debug!("step:start flow_id={flow_id} step_index={cursor} step_id={}", step.id());

        match step.run(&self.context).await {
            StepRunResult::Success { output } => {
                debug!("step:done flow_id={flow_id} step_id={} output_hash={}", step.id(), output.hash);
                self.event_store.append_kind(flow_id,
                                             FlowEventKind::StepFinished { step_index: cursor,
                                                                           step_id: step.id().to_string(),
                                                                           output_hash: output.hash.clone() });
                self.context.bind(step.id(), output);
                if cursor + 1 == definition.len() {
                    self.complete();
                } else {
                    self.state = RunState::Running { step_index: cursor + 1 };
                }
                Ok(self.state)
            }
            StepRunResult::Failure { error } => {
                let reason = error.to_string();
                warn!("step:failed flow_id={flow_id} step_id={} reason={reason}", step.id());
                self.event_store.append_kind(flow_id,
                                             FlowEventKind::StepFailed { step_index: cursor,
                                                                         step_id: step.id().to_string(),
                                                                         reason });
                self.state = RunState::Failed { step_index: cursor };
                self.failure = Some(StepFailure { step_index: cursor,
                                                  step_id: step.id().to_string(),
                                                  reason: error });
                Ok(self.state)
            }
            StepRunResult::Fault { error } => {
                warn!("step:fault flow_id={flow_id} step_id={} error={error}", step.id());
                self.event_store.append_kind(flow_id,
                                             FlowEventKind::StepFailed { step_index: cursor,
                                                                         step_id: step.id().to_string(),
                                                                         reason: error.to_string() });
                self.state = RunState::Failed { step_index: cursor };
                self.fault = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Ejecuta hasta `n` pasos o hasta alcanzar un estado terminal.
    pub async fn run_n(&mut self, n: usize) -> Result<RunState, CoreEngineError> {
        for _ in 0..n {
            if self.state.is_terminal() {
                break;
            }
            self.step().await?;
        }
        Ok(self.state)
    }

    /// Ejecuta pasos hasta que el flujo alcance un estado terminal.
    pub async fn run_to_completion(&mut self) -> Result<RunState, CoreEngineError> {
        while !self.state.is_terminal() {
            self.step().await?;
        }
        Ok(self.state)
    }

    /// Consume la ejecución terminada y produce el `Outcome`.
    pub fn finish<T, P>(self, projection: P) -> Result<Outcome<T, E>, CoreEngineError>
        where P: FnOnce(&ExecutionContext) -> Result<T, CoreEngineError>
    {
        match self.state {
            RunState::Succeeded => Ok(Outcome::Succeeded(projection(&self.context)?)),
            RunState::Failed { .. } => match (self.failure, self.fault) {
                (_, Some(fault)) => Err(fault),
                (Some(failure), None) => Ok(Outcome::Failed(failure)),
                (None, None) => Err(CoreEngineError::FlowHasFailed),
            },
            RunState::Cancelled { step_index } => {
                let step_id = self.definition.step(step_index).map(|s| s.id().to_string()).unwrap_or_default();
                Ok(Outcome::Cancelled { step_index, step_id })
            }
            RunState::NotStarted | RunState::Running { .. } => Err(CoreEngineError::FlowNotFinished),
        }
    }

    fn complete(&mut self) {
        let flow_fingerprint = hash_value(&json!({
                                              "engine_version": ENGINE_VERSION,
                                              "definition_hash": self.definition.definition_hash(),
                                              "context_hashes": self.context.hashes(),
                                          }));
        info!("flow:completed flow_id={} fingerprint={flow_fingerprint}", self.flow_id);
        self.event_store.append_kind(self.flow_id, FlowEventKind::FlowCompleted { flow_fingerprint });
        self.state = RunState::Succeeded;
    }
}
