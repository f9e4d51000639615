//! Constantes del motor core.
//!
//! `ENGINE_VERSION` participa en el fingerprint de cada flujo completado;
//! cambiarla invalida deterministicamente los fingerprints anteriores.

/// Versión lógica del executor. Mantener estable mientras no haya cambios
/// incompatibles en el orden de eventos o en el cálculo de hashes.
pub const ENGINE_VERSION: &str = "P1.0";

/// Clave reservada bajo la cual se vincula el input inicial del flujo en el
/// `ExecutionContext`. Ningún step puede usarla como id.
pub const INPUT_KEY: &str = "input";
