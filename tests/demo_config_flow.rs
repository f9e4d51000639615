use std::sync::Arc;
use std::time::Duration;

use order_adapters::{run_order_pipeline, Catalog, OrderRequest, SimulatedServices};
use orderflow_rust::{AppConfig, CoreError};

fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, CoreError> {
    AppConfig::from_lookup(|key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string()))
}

#[tokio::test]
async fn configured_simulation_drives_the_pipeline() {
    let cfg = config(&[("ORDERFLOW_LATENCY_MS", "1"), ("ORDERFLOW_FAILURE_PROBABILITY", "0")]).unwrap();
    assert_eq!(cfg.latency, Duration::from_millis(1));

    let services = Arc::new(SimulatedServices::new(Catalog::demo(), cfg.simulation()));
    let outcome = run_order_pipeline(services, &OrderRequest::new("user123", "prod1", 2, "123 Main St")).await
                                                                                                       .unwrap();
    assert!(outcome.is_success());
}

#[tokio::test]
async fn certain_failure_stops_at_the_first_step() {
    let cfg = config(&[("ORDERFLOW_LATENCY_MS", "0"), ("ORDERFLOW_FAILURE_PROBABILITY", "1")]).unwrap();
    let services = Arc::new(SimulatedServices::new(Catalog::demo(), cfg.simulation()));
    let outcome = run_order_pipeline(services, &OrderRequest::new("user123", "prod1", 2, "123 Main St")).await
                                                                                                       .unwrap();
    assert_eq!(outcome.failed_step(), Some("fetch_user"));
}

#[test]
fn engine_errors_lift_into_core_error() {
    let err: CoreError = flow_core::CoreEngineError::FlowCompleted.into();
    assert!(matches!(err, CoreError::Engine(_)));
}
