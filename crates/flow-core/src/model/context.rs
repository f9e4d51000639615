//! Contexto acumulado de una ejecución.
//!
//! Mapa ordenado `step id -> Artifact` construido incrementalmente: el input
//! inicial bajo `INPUT_KEY` y luego una entrada por cada step terminado, en el
//! orden declarado. Sólo el engine lo extiende; los steps lo reciben por
//! referencia compartida y leen las salidas de pasos anteriores.
use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::constants::INPUT_KEY;
use crate::errors::CoreEngineError;
use crate::model::Artifact;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionContext {
    entries: IndexMap<String, Artifact>,
}

impl ExecutionContext {
    /// Contexto nuevo con el input vinculado bajo la clave reservada.
    pub fn with_input(input: Artifact) -> Self {
        let mut entries = IndexMap::new();
        entries.insert(INPUT_KEY.to_string(), input);
        Self { entries }
    }

    pub(crate) fn bind(&mut self, key: &str, artifact: Artifact) {
        self.entries.insert(key.to_string(), artifact);
    }

    pub fn get(&self, key: &str) -> Option<&Artifact> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Decodifica la salida vinculada bajo `key`.
    pub fn output<T: DeserializeOwned>(&self, key: &str) -> Result<T, CoreEngineError> {
        let artifact = self.get(key)
                           .ok_or_else(|| CoreEngineError::MissingContextEntry(key.to_string()))?;
        artifact.decode()
                .map_err(|e| CoreEngineError::ArtifactDecode { key: key.to_string(),
                                                               message: e.to_string() })
    }

    /// Decodifica el input inicial del flujo.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, CoreEngineError> {
        self.output(INPUT_KEY)
    }

    /// Claves en orden de vinculación (input primero).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Hashes de todas las entradas en orden de vinculación.
    pub fn hashes(&self) -> Vec<String> {
        self.entries.values().map(|a| a.hash.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
