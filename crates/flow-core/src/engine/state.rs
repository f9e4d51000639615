use serde::{Deserialize, Serialize};

/// Estado de una ejecución.
///
/// `NotStarted -> Running { step_index } -> {Succeeded | Failed | Cancelled}`.
/// En `Running`, `step_index` es el cursor: el step en curso o el siguiente a
/// ejecutar. Ninguna transición sale de un estado terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    NotStarted,
    Running { step_index: usize },
    Succeeded,
    Failed { step_index: usize },
    Cancelled { step_index: usize },
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed { .. } | RunState::Cancelled { .. })
    }
}
