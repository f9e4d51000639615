//! Artifact neutral del flujo.
//!
//! Un `Artifact` es la salida de un step (o el input inicial) tal como queda
//! vinculada en el contexto:
//! - `payload` es JSON genérico; el motor no interpreta su semántica.
//! - `hash` se calcula al construir el artifact sobre el JSON canónico y sirve
//!   para trazabilidad en eventos y para el fingerprint del flujo.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreEngineError;
use crate::hashing::hash_value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub hash: String,   // hash canónico del payload
    pub payload: Value, // contenido neutro JSON
}

impl Artifact {
    pub fn new(payload: Value) -> Self {
        Self { hash: hash_value(&payload),
               payload }
    }

    /// Serializa un valor tipado a artifact.
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Self, CoreEngineError> {
        let payload = serde_json::to_value(value).map_err(|e| CoreEngineError::ArtifactEncode(e.to_string()))?;
        Ok(Self::new(payload))
    }

    /// Decodifica el payload al tipo pedido.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }
}
