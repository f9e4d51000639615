//! Demo: tres pedidos independientes ejecutados en paralelo sobre el mismo
//! catálogo simulado.
use std::sync::Arc;

use flow_core::{CoreEngineError, Outcome};
use log::info;
use order_adapters::styles::effect;
use order_adapters::{run_order_pipeline, Catalog, FaultPlan, OrderOutcome, OrderPipeline, OrderRequest, ServiceCall,
                     SimulatedServices};
use order_domain::OrderError;
use orderflow_rust::{AppConfig, CoreError};

fn report(label: &str, result: Result<OrderOutcome, CoreEngineError>) -> Result<(), CoreError> {
    match result? {
        Outcome::Succeeded(msg) => println!("[{label}] Success: {msg}"),
        Outcome::Failed(f) => println!("[{label}] Error in step '{}': {}", f.step_id, f.reason),
        Outcome::Cancelled { step_id, .. } => println!("[{label}] Cancelled before '{step_id}'"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    env_logger::init();
    let config = AppConfig::from_env()?;
    info!("demo:start latency_ms={} failure_probability={} seed={}",
          config.latency.as_millis(),
          config.failure_probability,
          config.seed);

    let base = SimulatedServices::new(Catalog::demo(), config.simulation());
    let healthy = Arc::new(base.clone());
    let no_stock = Arc::new(base.clone().with_faults(FaultPlan::none().out_of_stock()));
    let no_carrier = Arc::new(base.with_faults(FaultPlan::none().fail(ServiceCall::Ship,
                                                                      OrderError::Shipping("carrier unavailable".into()))));
    let request = OrderRequest::new("user123", "prod1", 2, "123 Main St");

    let (a, b, c) = tokio::join!(run_order_pipeline(healthy, &request),
                                 run_order_pipeline(no_stock, &request),
                                 run_order_pipeline(no_carrier.clone(), &request));
    report("order-1", a)?;
    report("order-2", b)?;
    report("order-3", c)?;

    let pipeline = OrderPipeline::new(no_carrier)?;
    println!("[recovered] {}", effect::process_order_recovered(&pipeline, &request).await);
    Ok(())
}
