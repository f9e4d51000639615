use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use flow_core::{Artifact, BoxedStep, CoreEngineError, ExecutionContext, FlowDefinition, FlowEngine, Outcome, RunState,
                StepDefinition, StepKind, StepRunResult, StepStatus};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("probe '{0}' failed")]
struct ProbeError(String);

type CallLog = Arc<Mutex<Vec<String>>>;

/// Step instrumentado: registra su invocación y las claves de contexto que ve.
struct Probe {
    id: String,
    fail: bool,
    delay: Duration,
    calls: CallLog,
    seen: Arc<Mutex<Vec<Vec<String>>>>,
}

#[async_trait]
impl StepDefinition for Probe {
    type Error = ProbeError;

    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StepKind {
        StepKind::Effect
    }

    async fn run(&self, ctx: &ExecutionContext) -> StepRunResult<ProbeError> {
        self.calls.lock().unwrap().push(self.id.clone());
        self.seen.lock().unwrap().push(ctx.keys().map(String::from).collect());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            StepRunResult::Failure { error: ProbeError(self.id.clone()) }
        } else {
            StepRunResult::Success { output: Artifact::new(json!({ "step": self.id })) }
        }
    }
}

struct Harness {
    calls: CallLog,
    seen: Arc<Mutex<Vec<Vec<String>>>>,
    definition: FlowDefinition<ProbeError>,
}

fn harness(n: usize, fail_at: Option<usize>, delay: Duration) -> Harness {
    let calls: CallLog = Arc::default();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let steps: Vec<BoxedStep<ProbeError>> = (0..n).map(|i| {
                                                      Box::new(Probe { id: format!("s{i}"),
                                                                       fail: fail_at == Some(i),
                                                                       delay,
                                                                       calls: calls.clone(),
                                                                       seen: seen.clone() })
                                                      as BoxedStep<ProbeError>
                                                  })
                                                  .collect();
    Harness { calls,
              seen,
              definition: FlowDefinition::new(steps).expect("valid definition") }
}

#[tokio::test]
async fn failure_at_any_index_stops_the_remaining_steps() {
    let n = 6;
    for fail_at in 0..n {
        let h = harness(n, Some(fail_at), Duration::ZERO);
        let mut engine = FlowEngine::new(h.definition.clone());
        let outcome = engine.run(&json!({"run": fail_at}), |_| Ok(())).await.expect("engine");

        let failure = outcome.failure().expect("should fail");
        assert_eq!(failure.step_index, fail_at);
        assert_eq!(failure.step_id, format!("s{fail_at}"));
        assert_eq!(failure.reason, ProbeError(format!("s{fail_at}")));

        let expected: Vec<String> = (0..=fail_at).map(|i| format!("s{i}")).collect();
        assert_eq!(*h.calls.lock().unwrap(), expected, "steps after s{fail_at} must never run");
    }
}

#[tokio::test]
async fn every_step_sees_exactly_the_prior_outputs() {
    let h = harness(4, None, Duration::ZERO);
    let mut engine = FlowEngine::new(h.definition.clone());
    let outcome = engine.run(&json!({}), |ctx| Ok(ctx.len())).await.expect("engine");
    assert_eq!(outcome, Outcome::Succeeded(5));

    let seen = h.seen.lock().unwrap().clone();
    assert_eq!(seen,
               vec![vec!["input".to_string()],
                    vec!["input".into(), "s0".into()],
                    vec!["input".into(), "s0".into(), "s1".into()],
                    vec!["input".into(), "s0".into(), "s1".into(), "s2".into()]]);
    assert_eq!(h.calls.lock().unwrap().len(), 4, "no step skipped or repeated");
}

#[tokio::test]
async fn state_machine_never_reenters_running_after_a_terminal_state() {
    let h = harness(3, Some(1), Duration::ZERO);
    let mut engine = FlowEngine::new(h.definition.clone());
    let mut run = engine.start(Artifact::new(json!(null)));

    assert_eq!(run.state(), RunState::NotStarted);
    assert_eq!(run.step().await.expect("s0"), RunState::Running { step_index: 1 });
    assert_eq!(run.step().await.expect("s1"), RunState::Failed { step_index: 1 });
    assert_eq!(run.step().await.unwrap_err(), CoreEngineError::FlowHasFailed);
    assert_eq!(run.run_to_completion().await.expect("already terminal"), RunState::Failed { step_index: 1 });
    assert_eq!(h.calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn completed_flow_rejects_further_steps_and_finish_requires_terminal_state() {
    let h = harness(2, None, Duration::ZERO);
    let mut engine = FlowEngine::new(h.definition.clone());

    let mut run = engine.start(Artifact::new(json!(null)));
    assert_eq!(run.run_n(1).await.expect("one step"), RunState::Running { step_index: 1 });
    assert_eq!(run.run_n(5).await.expect("rest"), RunState::Succeeded);
    assert_eq!(run.step().await.unwrap_err(), CoreEngineError::FlowCompleted);

    let pending = engine.start(Artifact::new(json!(null)));
    assert_eq!(pending.finish(|_| Ok(())).unwrap_err(), CoreEngineError::FlowNotFinished);
}

#[tokio::test]
async fn journal_and_replay_reflect_the_short_circuit() {
    let h = harness(4, Some(2), Duration::ZERO);
    let mut engine = FlowEngine::new(h.definition.clone());
    let mut run = engine.start(Artifact::new(json!({"order": 1})));
    let flow_id = run.flow_id();
    run.run_to_completion().await.expect("engine");

    assert_eq!(engine.event_variants(flow_id), vec!["I", "S", "F", "S", "F", "S", "X"]);
    assert!(engine.flow_fingerprint(flow_id).is_none());

    let instance = engine.instance(flow_id);
    let statuses: Vec<StepStatus> = instance.steps.iter().map(|s| s.status).collect();
    assert_eq!(statuses,
               vec![StepStatus::FinishedOk, StepStatus::FinishedOk, StepStatus::Failed, StepStatus::Pending]);
    assert_eq!(instance.cursor, 3);
    assert!(!instance.completed);
    let failed = instance.failed_step().expect("failed slot");
    assert_eq!(failed.step_id, "s2");
    assert_eq!(failed.failure.as_deref(), Some("probe 's2' failed"));
    assert_eq!(instance.steps[3].attempts, 0);
}

#[tokio::test]
async fn identical_runs_produce_identical_outcomes_and_fingerprints() {
    let h = harness(3, None, Duration::ZERO);
    let mut engine = FlowEngine::new(h.definition.clone());

    let mut fingerprints = Vec::new();
    let mut outcomes = Vec::new();
    for _ in 0..3 {
        let mut run = engine.start(Artifact::new(json!({"user": "u1"})));
        let flow_id = run.flow_id();
        run.run_to_completion().await.expect("engine");
        outcomes.push(run.finish(|ctx| Ok(ctx.hashes())).expect("finish"));
        fingerprints.push(engine.flow_fingerprint(flow_id).expect("completed"));
    }
    assert!(outcomes.windows(2).all(|w| w[0] == w[1]));
    assert!(fingerprints.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn independent_runs_interleave_without_interfering() {
    let a = harness(3, None, Duration::from_millis(5));
    let b = harness(3, Some(1), Duration::from_millis(3));
    let mut engine_a = FlowEngine::new(a.definition.clone());
    let mut engine_b = FlowEngine::new(b.definition.clone());

    let in_a = json!("a");
    let in_b = json!("b");
    let (out_a, out_b) = tokio::join!(engine_a.run(&in_a, |ctx| Ok(ctx.len())),
                                      engine_b.run(&in_b, |ctx| Ok(ctx.len())));

    assert_eq!(out_a.expect("engine a"), Outcome::Succeeded(4));
    assert_eq!(out_b.expect("engine b").failed_step(), Some("s1"));
    assert_eq!(*a.calls.lock().unwrap(), vec!["s0", "s1", "s2"]);
    assert_eq!(*b.calls.lock().unwrap(), vec!["s0", "s1"]);
}
