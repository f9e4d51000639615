mod support;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use order_adapters::steps::{CHECK_STOCK, SHIP_ORDER};
use order_adapters::styles::{continuation, deferred, effect, sequential};
use order_adapters::{FaultPlan, OrderPipeline, PipelineError, ServiceCall};
use order_domain::OrderError;
use support::{demo_request, RecordingServices};
use tokio::sync::oneshot;

fn pipeline(faults: FaultPlan) -> OrderPipeline {
    OrderPipeline::new(RecordingServices::new(faults)).unwrap()
}

fn ship_down() -> FaultPlan {
    FaultPlan::none().fail(ServiceCall::Ship, OrderError::Shipping("carrier unavailable".into()))
}

#[tokio::test]
async fn all_styles_agree_on_success() {
    let p = pipeline(FaultPlan::none());
    let req = demo_request();

    let direct = p.run(&req).await.unwrap().success().cloned().unwrap();
    let seq = sequential::process_order(&p, &req).await.unwrap();
    let def = deferred::process_order(p.clone(), req.clone()).await.unwrap();
    let eff = effect::process_order_recovered(&p, &req).await;

    let (tx, rx) = oneshot::channel();
    continuation::process_order(p.clone(), req.clone(), move |res| {
        let _ = tx.send(res);
    }).await
      .unwrap();
    let cont = rx.await.unwrap().unwrap().success().cloned().unwrap();

    assert_eq!(seq, direct);
    assert_eq!(def, direct);
    assert_eq!(eff, direct);
    assert_eq!(cont, direct);
}

#[tokio::test]
async fn all_styles_agree_on_failure_step() {
    let p = pipeline(FaultPlan::none().out_of_stock());
    let req = demo_request();

    let seq = sequential::process_order(&p, &req).await.unwrap_err();
    let def = deferred::process_order(p.clone(), req.clone()).await.unwrap_err();
    assert_eq!(seq, def);
    assert_eq!(seq.step_id(), Some(CHECK_STOCK));
    assert!(matches!(&seq, PipelineError::Step(f) if f.reason == OrderError::out_of_stock()));

    let (tx, rx) = oneshot::channel();
    continuation::process_order(p.clone(), req, move |res| {
        let _ = tx.send(res);
    }).await
      .unwrap();
    let outcome = rx.await.unwrap().unwrap();
    assert_eq!(outcome.failed_step(), Some(CHECK_STOCK));
}

#[tokio::test]
async fn continuation_handler_runs_exactly_once() {
    let hits = Arc::new(AtomicUsize::new(0));
    for faults in [FaultPlan::none(), FaultPlan::none().no_orders(), ship_down()] {
        let counter = hits.clone();
        continuation::process_order(pipeline(faults), demo_request(), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }).await
          .unwrap();
    }
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn deferred_value_is_lazy_until_polled() {
    let services = RecordingServices::new(FaultPlan::none());
    let p = OrderPipeline::new(services.clone()).unwrap();
    let fut = deferred::process_order(p, demo_request());
    assert!(services.calls().is_empty());
    assert!(fut.await.is_ok());
    assert_eq!(services.calls().len(), 9);
}

#[tokio::test]
async fn effect_boundary_recovers_every_failure_into_a_summary() {
    let req = demo_request();
    let stock = effect::process_order_recovered(&pipeline(FaultPlan::none().out_of_stock()), &req).await;
    assert_eq!(stock, "Order was not placed: out of stock");

    let none = effect::process_order_recovered(&pipeline(FaultPlan::none().no_orders()), &req).await;
    assert_eq!(none, "Order was not placed: no orders found");

    let ship = effect::process_order_recovered(&pipeline(ship_down()), &req).await;
    assert!(ship.starts_with("Order is paid but shipping failed"));
    assert!(ship.contains("carrier unavailable"));
}

#[test]
fn sequential_style_on_a_blocking_runtime() {
    let p = pipeline(ship_down());
    let err = tokio_test::block_on(sequential::process_order(&p, &demo_request())).unwrap_err();
    assert_eq!(err.step_id(), Some(SHIP_ORDER));
    assert!(err.to_string().contains("ship_order"));
}
