use flow_core::CoreEngineError;
use thiserror::Error;

/// Error de nivel aplicación: configuración inválida o mal uso del engine.
/// Los fallos de steps no llegan aquí; viajan en el `Outcome`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error del engine: {0}")]
    Engine(#[from] CoreEngineError),
}
