//! Tipos de repositorio: definición inmutable (`FlowDefinition`) y estado
//! reconstruido (`FlowInstance`).
//!
//! El repositorio aplica un replay lineal: consume los eventos de un flujo en
//! orden y actualiza un slot por step. No guarda artifacts completos (sólo
//! hashes).
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::constants::INPUT_KEY;
use crate::errors::CoreEngineError;
use crate::event::{FlowEvent, FlowEventKind};
use crate::hashing::hash_value;
use crate::step::{BoxedStep, StepDefinition, StepStatus};

/// Definición inmutable del Flow: lista ordenada de steps.
///
/// Clonar es barato (los steps se comparten vía `Arc`), de modo que varias
/// ejecuciones independientes pueden usar la misma definición a la vez.
pub struct FlowDefinition<E> {
    steps: Arc<[BoxedStep<E>]>,
    definition_hash: String,
}

impl<E> Clone for FlowDefinition<E> {
    fn clone(&self) -> Self {
        Self { steps: Arc::clone(&self.steps),
               definition_hash: self.definition_hash.clone() }
    }
}

impl<E: Send> fmt::Debug for FlowDefinition<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowDefinition")
         .field("steps", &self.step_ids())
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}

impl<E: Send> FlowDefinition<E> {
    /// Valida y construye la definición. Reglas:
    /// - al menos un step;
    /// - ids únicos;
    /// - ningún id igual a la clave reservada del input.
    pub fn new(steps: Vec<BoxedStep<E>>) -> Result<Self, CoreEngineError> {
        if steps.is_empty() {
            return Err(CoreEngineError::EmptyDefinition);
        }
        let mut seen = HashSet::new();
        for s in &steps {
            if s.id() == INPUT_KEY {
                return Err(CoreEngineError::ReservedStepId(s.id().to_string()));
            }
            if !seen.insert(s.id().to_string()) {
                return Err(CoreEngineError::DuplicateStepId(s.id().to_string()));
            }
        }
        let ids: Vec<&str> = steps.iter().map(|s| s.id()).collect();
        let definition_hash = hash_value(&json!(ids));
        Ok(Self { steps: steps.into(),
                  definition_hash })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&dyn StepDefinition<Error = E>> {
        self.steps.get(index).map(|s| s.as_ref())
    }

    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.id()).collect()
    }

    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }
}

pub struct FlowInstance {
    pub id: Uuid,
    pub steps: Vec<StepSlot>,
    /// Índice del primer step aún `Pending` (== len si no queda ninguno).
    pub cursor: usize,
    pub completed: bool,
    pub cancelled: bool,
}

impl FlowInstance {
    pub fn failed_step(&self) -> Option<&StepSlot> {
        self.steps.iter().find(|s| s.status == StepStatus::Failed)
    }
}

/// Estado de un step en la instancia.
pub struct StepSlot {
    pub step_id: String,
    pub status: StepStatus,
    pub output_hash: Option<String>,
    pub failure: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub attempts: u32, // sin retries: 0 o 1
}

/// Trait para reconstruir (`replay`) el estado de un flow a partir de eventos.
pub trait FlowRepository {
    fn load(&self, flow_id: Uuid, events: &[FlowEvent], step_ids: &[&str]) -> FlowInstance;
}

#[derive(Debug, Default)]
pub struct InMemoryFlowRepository;

impl InMemoryFlowRepository {
    pub fn new() -> Self {
        Self
    }
}

impl FlowRepository for InMemoryFlowRepository {
    fn load(&self, flow_id: Uuid, events: &[FlowEvent], step_ids: &[&str]) -> FlowInstance {
        let mut steps: Vec<StepSlot> = step_ids.iter()
                                               .map(|id| StepSlot { step_id: id.to_string(),
                                                                    status: StepStatus::Pending,
                                                                    output_hash: None,
                                                                    failure: None,
                                                                    started_at: None,
                                                                    finished_at: None,
                                                                    attempts: 0 })
                                               .collect();
        let mut completed = false;
        let mut cancelled = false;
        for ev in events.iter().filter(|e| e.flow_id == flow_id) {
            match &ev.kind {
                FlowEventKind::FlowInitialized { .. } => {}
                FlowEventKind::StepStarted { step_index, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Running;
                        slot.started_at = Some(ev.ts);
                        slot.attempts += 1;
                    }
                }
                FlowEventKind::StepFinished { step_index, output_hash, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::FinishedOk;
                        slot.output_hash = Some(output_hash.clone());
                        slot.finished_at = Some(ev.ts);
                    }
                }
                FlowEventKind::StepFailed { step_index, reason, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Failed;
                        slot.failure = Some(reason.clone());
                        slot.finished_at = Some(ev.ts);
                    }
                }
                FlowEventKind::FlowCompleted { .. } => completed = true,
                FlowEventKind::FlowCancelled { .. } => cancelled = true,
            }
        }
        let cursor = steps.iter()
                          .position(|s| matches!(s.status, StepStatus::Pending))
                          .unwrap_or(steps.len());
        FlowInstance { id: flow_id,
                       steps,
                       cursor,
                       completed,
                       cancelled }
    }
}
