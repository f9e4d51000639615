//! Configuración central de la aplicación.
//! Carga variables de entorno (.env, una sola vez) y expone `AppConfig`
//! con los parámetros de la simulación de servicios.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use once_cell::sync::Lazy;
use order_adapters::SimulationConfig;

use crate::errors::CoreError;

pub const LATENCY_MS_VAR: &str = "ORDERFLOW_LATENCY_MS";
pub const FAILURE_PROBABILITY_VAR: &str = "ORDERFLOW_FAILURE_PROBABILITY";
pub const SEED_VAR: &str = "ORDERFLOW_SEED";

const DEFAULT_LATENCY_MS: u64 = 100;
const DEFAULT_SEED: u64 = 42;

/// Ruta del `.env` cargado, si existía. Se evalúa una sola vez.
pub static DOTENV: Lazy<Option<PathBuf>> = Lazy::new(|| dotenvy::dotenv().ok());

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Latencia simulada por llamada a un colaborador.
    pub latency: Duration,
    /// Probabilidad de fallo aleatorio por llamada, en [0, 1].
    pub failure_probability: f64,
    pub seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { latency: Duration::from_millis(DEFAULT_LATENCY_MS),
               failure_probability: 0.0,
               seed: DEFAULT_SEED }
    }
}

impl AppConfig {
    /// Lee `.env` (si existe) y las variables `ORDERFLOW_*`.
    pub fn from_env() -> Result<Self, CoreError> {
        Lazy::force(&DOTENV);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        let latency = match lookup(LATENCY_MS_VAR) {
            Some(v) => Duration::from_millis(parse(LATENCY_MS_VAR, &v)?),
            None => defaults.latency,
        };
        let failure_probability = match lookup(FAILURE_PROBABILITY_VAR) {
            Some(v) => parse::<f64>(FAILURE_PROBABILITY_VAR, &v)?,
            None => defaults.failure_probability,
        };
        if !(0.0..=1.0).contains(&failure_probability) {
            return Err(CoreError::Config(format!("{FAILURE_PROBABILITY_VAR} must be within [0, 1], got {failure_probability}")));
        }
        let seed = match lookup(SEED_VAR) {
            Some(v) => parse(SEED_VAR, &v)?,
            None => defaults.seed,
        };
        Ok(Self { latency,
                  failure_probability,
                  seed })
    }

    pub fn simulation(&self) -> SimulationConfig {
        SimulationConfig { latency: self.latency,
                           failure_probability: self.failure_probability,
                           seed: self.seed }
    }
}

fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, CoreError>
    where T::Err: std::fmt::Display
{
    raw.trim()
       .parse()
       .map_err(|e| CoreError::Config(format!("{key}='{raw}': {e}")))
}
