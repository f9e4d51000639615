//! Resultado terminal de una ejecución.
//!
//! `Outcome` es inmutable una vez producido: `Succeeded` lleva la proyección
//! que el caller definió sobre el contexto final; `Failed` identifica el step
//! que detuvo el flujo y la razón tipada que reportó.

use std::fmt;

/// Fallo de un step: índice, id y razón.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure<E> {
    pub step_index: usize,
    pub step_id: String,
    pub reason: E,
}

impl<E: fmt::Display> fmt::Display for StepFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step '{}' (#{}) failed: {}", self.step_id, self.step_index, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    Succeeded(T),
    Failed(StepFailure<E>),
    /// Cancelación observada antes de iniciar `step_index`.
    Cancelled { step_index: usize, step_id: String },
}

impl<T, E> Outcome<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Succeeded(v) => Some(v),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&StepFailure<E>> {
        match self {
            Outcome::Failed(f) => Some(f),
            _ => None,
        }
    }

    /// Id del step que detuvo el flujo, si falló.
    pub fn failed_step(&self) -> Option<&str> {
        self.failure().map(|f| f.step_id.as_str())
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U, E> {
        match self {
            Outcome::Succeeded(v) => Outcome::Succeeded(f(v)),
            Outcome::Failed(failure) => Outcome::Failed(failure),
            Outcome::Cancelled { step_index, step_id } => Outcome::Cancelled { step_index, step_id },
        }
    }
}
