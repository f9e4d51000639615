use std::collections::HashMap;
use std::time::Duration;

use order_domain::OrderError;

use super::ServiceCall;

/// Parámetros de la simulación.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Espera cooperativa antes de cada respuesta.
    pub latency: Duration,
    /// Probabilidad (0..=1) de que una llamada falle con el error técnico de
    /// su operación. Con 0 nunca hay fallos aleatorios.
    pub failure_probability: f64,
    /// Semilla del sorteo; misma semilla y mismas entradas, mismos fallos.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { latency: Duration::ZERO,
               failure_probability: 0.0,
               seed: 0 }
    }
}

/// Resultados forzados, aplicados antes que el sorteo aleatorio.
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    failures: HashMap<ServiceCall, OrderError>,
    stock_available: Option<bool>,
    empty_orders: bool,
}

impl FaultPlan {
    pub fn none() -> Self {
        Self::default()
    }

    /// Fuerza que `call` falle siempre con `error`.
    pub fn fail(mut self, call: ServiceCall, error: OrderError) -> Self {
        self.failures.insert(call, error);
        self
    }

    /// Fuerza que `check_stock` responda `false`.
    pub fn out_of_stock(mut self) -> Self {
        self.stock_available = Some(false);
        self
    }

    /// Fuerza que `fetch_orders` devuelva una lista vacía.
    pub fn no_orders(mut self) -> Self {
        self.empty_orders = true;
        self
    }

    pub fn forced_failure(&self, call: ServiceCall) -> Option<&OrderError> {
        self.failures.get(&call)
    }

    pub fn stock_override(&self) -> Option<bool> {
        self.stock_available
    }

    pub fn forces_empty_orders(&self) -> bool {
        self.empty_orders
    }
}
