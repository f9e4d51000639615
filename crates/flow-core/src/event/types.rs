//! Tipos de evento del flujo y estructura `FlowEvent`.
//!
//! Rol en el flujo:
//! - Cada ejecución emite eventos a un `EventStore` append-only.
//! - Los eventos permiten reconstruir el estado por step (`FlowRepository`)
//!   sin depender de estructuras mutables del engine.
//! - El enum `FlowEventKind` define el contrato observable del motor.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowEventKind {
    /// Primer evento de todo `flow_id`: fija la definición y el input.
    FlowInitialized {
        definition_hash: String,
        step_count: usize,
        input_hash: String,
    },
    /// Un step comenzó su ejecución. No implica éxito.
    StepStarted { step_index: usize, step_id: String },
    /// Un step terminó correctamente; su salida quedó vinculada al contexto.
    StepFinished {
        step_index: usize,
        step_id: String,
        output_hash: String,
    },
    /// Un step terminó con error terminal. El flujo no continúa
    /// (stop-on-failure).
    StepFailed {
        step_index: usize,
        step_id: String,
        reason: String,
    },
    /// Cierre exitoso con fingerprint agregado del flujo.
    FlowCompleted { flow_fingerprint: String },
    /// Cancelación observada antes de iniciar `step_index`.
    FlowCancelled { step_index: usize, step_id: String },
}

impl FlowEventKind {
    /// Variante compacta (una letra) usada en aserciones de secuencia.
    pub fn variant_code(&self) -> &'static str {
        match self {
            FlowEventKind::FlowInitialized { .. } => "I",
            FlowEventKind::StepStarted { .. } => "S",
            FlowEventKind::StepFinished { .. } => "F",
            FlowEventKind::StepFailed { .. } => "X",
            FlowEventKind::FlowCompleted { .. } => "C",
            FlowEventKind::FlowCancelled { .. } => "K",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEvent {
    pub seq: u64, // asignado por el store (orden append)
    pub flow_id: Uuid,
    pub kind: FlowEventKind,
    pub ts: DateTime<Utc>, // metadato, no entra en fingerprint
}
