use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde_json::json;

use itemflow_core::{Collection, Context, ErrorKind, Handler, HandlerError, Level, LogRecord, MemorySink, Pipeline, PipelineError,
                    Slogger};

struct Numbers(Vec<i64>);

impl Collection<i64> for Numbers {
    fn sequence<'a>(&'a self, _ctx: &'a Context) -> BoxStream<'a, i64> {
        stream::iter(self.0.iter().copied()).boxed()
    }
}

async fn double_up_to_five(_ctx: Arc<Context>, item: i64) -> Result<i64, HandlerError> {
    if item > 5 {
        return Err(HandlerError::rejected(format!("value {item} is greater than 5")));
    }
    Ok(item * 2)
}

async fn add_three(_ctx: Arc<Context>, item: i64) -> Result<i64, HandlerError> {
    Ok(item + 3)
}

/// Cuenta invocaciones por valor de entrada.
#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<std::sync::Mutex<Vec<i64>>>,
}

#[async_trait]
impl Handler<i64> for Recorder {
    async fn handle(&self, _ctx: Arc<Context>, item: i64) -> Result<i64, HandlerError> {
        self.calls.lock().unwrap().push(item);
        Ok(item)
    }
}

fn slogger() -> (Arc<MemorySink>, Slogger) {
    let sink = Arc::new(MemorySink::new());
    (sink.clone(), Slogger::new(sink))
}

fn scenario_a(slogger: Slogger) -> Pipeline<i64> {
    Pipeline::builder("pipeline1", Context::new("uow", 1), slogger).collection(Numbers(vec![2, 3, 10, 4]))
                                                                  .step("step1", double_up_to_five)
                                                                  .step("step2", add_three)
                                                                  .build()
                                                                  .expect("pipeline builds")
}

#[tokio::test]
async fn scenario_a_drops_the_rejected_item() {
    let (_sink, slogger) = slogger();
    let pipeline = scenario_a(slogger);
    assert_eq!(pipeline.collect().await, vec![7, 9, 11]);
}

#[tokio::test]
async fn apply_folds_in_declared_order() {
    let (_sink, slogger) = slogger();
    let pipeline = scenario_a(slogger);
    // (2 * 2) + 3, not (2 + 3) * 2
    assert_eq!(pipeline.apply(2).await, Ok(7));
    assert_eq!(pipeline.apply(10).await, Err(HandlerError::rejected("value 10 is greater than 5")));
}

#[tokio::test]
async fn failing_item_never_reaches_later_steps() {
    let (_sink, slogger) = slogger();
    let recorder = Recorder::default();
    let pipeline = Pipeline::builder("p", Context::new("uow", 1), slogger).collection(Numbers(vec![1, 10, 2]))
                                                                         .step("gate", double_up_to_five)
                                                                         .step("record", recorder.clone())
                                                                         .build()
                                                                         .unwrap();

    assert_eq!(pipeline.collect().await, vec![2, 4]);
    let mut calls = recorder.calls.lock().unwrap().clone();
    calls.sort();
    assert_eq!(calls, vec![2, 4], "10 failed at `gate` and must not be recorded");
}

#[tokio::test]
async fn every_step_invocation_emits_one_starting_and_one_terminal() {
    let (sink, slogger) = slogger();
    scenario_a(slogger).collect().await;

    for step in ["step1", "step2"] {
        let events = sink.events_with("step", step);
        let starting = events.iter().filter(|r| r.status() == Some("starting")).count();
        let terminal = events.iter()
                             .filter(|r| matches!(r.status(), Some("success") | Some("error")))
                             .count();
        assert_eq!(starting, terminal, "{step}");
    }
    // step1: 4 items; step2: only the 3 survivors
    assert_eq!(sink.events_with("step", "step1").len(), 8);
    assert_eq!(sink.events_with("step", "step2").len(), 6);

    let errors: Vec<_> = sink.records().into_iter().filter(|r| r.level == Level::Error).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get("item"), Some(&json!(10)));
    assert_eq!(errors[0].get("result"), Some(&json!("Rejected")));
}

#[tokio::test]
async fn collection_emission_is_logged_without_starting() {
    let (sink, slogger) = slogger();
    scenario_a(slogger).collect().await;

    let emitted = sink.events_with("collection", "Numbers");
    assert_eq!(emitted.len(), 4);
    assert!(emitted.iter().all(|r| r.status() == Some("success")));
    let values: Vec<_> = emitted.iter().map(|r| r.get("result").cloned().unwrap()).collect();
    assert_eq!(values, vec![json!(2), json!(3), json!(10), json!(4)]);
}

#[tokio::test]
async fn run_is_bracketed_by_a_pipeline_scope() {
    let (sink, slogger) = slogger();
    scenario_a(slogger).collect().await;

    let records = sink.records();
    let first = records.first().unwrap();
    assert_eq!(first.get("pipeline"), Some(&json!("pipeline1")));
    assert_eq!(first.get("uow"), Some(&json!("uow")));
    assert_eq!(first.status(), Some("starting"));

    let last = records.last().unwrap();
    assert_eq!(last.get("pipeline"), Some(&json!("pipeline1")));
    assert_eq!(last.status(), Some("success"));
    assert_eq!(last.get("result"), Some(&json!({"succeeded": 3, "failed": 1})));
}

#[tokio::test]
async fn settle_reports_failing_step() {
    let (_sink, slogger) = slogger();
    let report = scenario_a(slogger).settle().await;

    assert_eq!(report.len(), 4);
    assert_eq!(report.succeeded(), 3);
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    let (index, failure) = failures[0];
    assert_eq!(index, 2);
    assert_eq!(failure.step, "step1");
    assert_eq!(failure.step_index, 0);
    assert_eq!(report.outcomes()[2].input, json!(10));
}

#[tokio::test]
async fn rerun_is_idempotent() {
    let (_sink, slogger) = slogger();
    let pipeline = scenario_a(slogger);
    let first = pipeline.collect().await;
    let second = pipeline.collect().await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn output_keeps_source_order_when_items_finish_out_of_order() {
    let (sink, slogger) = slogger();
    // Items más pequeños tardan más: terminan en orden inverso.
    let slow = |_ctx: Arc<Context>, item: i64| async move {
        tokio::time::sleep(Duration::from_millis(((5 - item) * 20) as u64)).await;
        Ok::<i64, HandlerError>(item * 10)
    };
    let pipeline = Pipeline::builder("p", Context::new("uow", 1), slogger).collection(Numbers(vec![1, 2, 3, 4]))
                                                                         .step("slow", slow)
                                                                         .build()
                                                                         .unwrap();

    assert_eq!(pipeline.collect().await, vec![10, 20, 30, 40]);

    let finished: Vec<_> = sink.events_with("step", "slow")
                               .into_iter()
                               .filter(|r| r.status() == Some("success"))
                               .map(|r| r.get("item").cloned().unwrap())
                               .collect();
    assert_eq!(finished, vec![json!(4), json!(3), json!(2), json!(1)]);
}

#[tokio::test]
async fn items_run_concurrently() {
    let (_sink, slogger) = slogger();
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let (f, p) = (in_flight.clone(), peak.clone());
    let track = move |_ctx: Arc<Context>, item: i64| {
        let (f, p) = (f.clone(), p.clone());
        async move {
            let now = f.fetch_add(1, Ordering::SeqCst) + 1;
            p.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            f.fetch_sub(1, Ordering::SeqCst);
            Ok::<i64, HandlerError>(item)
        }
    };
    let pipeline = Pipeline::builder("p", Context::new("uow", 1), slogger).collection(Numbers(vec![1, 2, 3]))
                                                                         .step("track", track)
                                                                         .build()
                                                                         .unwrap();

    assert_eq!(pipeline.collect().await, vec![1, 2, 3]);
    assert_eq!(peak.load(Ordering::SeqCst), 3);
}

async fn hundred_over(_ctx: Arc<Context>, item: i64) -> Result<i64, HandlerError> {
    Ok(100 / item)
}

fn divide_pipeline(slogger: Slogger) -> Pipeline<i64> {
    Pipeline::builder("p", Context::new("uow", 1), slogger).collection(Numbers(vec![1, 0, 2]))
                                                          .step("div", hundred_over)
                                                          .build()
                                                          .unwrap()
}

#[tokio::test]
async fn panicking_handler_fails_only_its_item() {
    let (sink, slogger) = slogger();
    assert_eq!(divide_pipeline(slogger).collect().await, vec![100, 50]);

    let records = sink.records();
    assert!(records.iter().all(|r| r.get("result") != Some(&json!("Cancelled"))));
    let errors: Vec<_> = records.iter().filter(|r| r.level == Level::Error).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get("item"), Some(&json!(0)));
    assert_eq!(errors[0].get("result"), Some(&json!("Panic")));
    assert_eq!(records.last().unwrap().get("result"), Some(&json!({"succeeded": 2, "failed": 1})));
}

#[tokio::test]
async fn settle_reports_a_panic_at_its_step() {
    let (_sink, slogger) = slogger();
    let report = divide_pipeline(slogger).settle().await;

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    let (index, failure) = failures[0];
    assert_eq!(index, 1);
    assert_eq!(failure.step, "div");
    assert_eq!(failure.error.kind(), "Panic");
}

#[tokio::test]
async fn steps_of_one_item_never_overlap() {
    let (sink, slogger) = slogger();
    let pause = |_ctx: Arc<Context>, item: i64| async move {
        tokio::time::sleep(Duration::from_millis((item * 7) as u64)).await;
        Ok::<i64, HandlerError>(item)
    };
    let pipeline = Pipeline::builder("p", Context::new("uow", 1), slogger).collection(Numbers(vec![3, 1, 2]))
                                                                         .step("s1", pause)
                                                                         .step("s2", pause)
                                                                         .step("s3", pause)
                                                                         .build()
                                                                         .unwrap();
    assert_eq!(pipeline.collect().await, vec![3, 1, 2]);

    let step_records: Vec<(usize, LogRecord)> = sink.records()
                                                    .into_iter()
                                                    .enumerate()
                                                    .filter(|(_, r)| r.get("step").is_some())
                                                    .collect();
    let expected = [("s1", "starting"),
                    ("s1", "success"),
                    ("s2", "starting"),
                    ("s2", "success"),
                    ("s3", "starting"),
                    ("s3", "success")];
    let mut spans = Vec::new();
    for item in [1, 2, 3] {
        let chain: Vec<&(usize, LogRecord)> = step_records.iter().filter(|(_, r)| r.get("item") == Some(&json!(item))).collect();
        let seen: Vec<(&str, &str)> = chain.iter()
                                           .map(|(_, r)| (r.get("step").and_then(|v| v.as_str()).unwrap(), r.status().unwrap()))
                                           .collect();
        assert_eq!(seen, expected, "item {item}");
        spans.push((chain[0].0, chain[chain.len() - 1].0));
    }

    // Las cadenas de items distintos se solapan en el stream de eventos.
    for (first, _) in &spans {
        for (_, last) in &spans {
            assert!(first < last);
        }
    }
}

#[tokio::test]
async fn empty_collection_yields_nothing() {
    let (sink, slogger) = slogger();
    let pipeline = Pipeline::builder("p", Context::new("uow", 1), slogger).collection(Numbers(vec![]))
                                                                         .step("step1", add_three)
                                                                         .build()
                                                                         .unwrap();
    assert!(pipeline.collect().await.is_empty());
    assert!(sink.events_with("step", "step1").is_empty());
}

#[tokio::test]
async fn pipeline_without_steps_returns_items_unchanged() {
    let (_sink, slogger) = slogger();
    let pipeline = Pipeline::builder("p", Context::new("uow", 1), slogger).collection(Numbers(vec![3, 1]))
                                                                         .build()
                                                                         .unwrap();
    assert_eq!(pipeline.step_count(), 0);
    assert_eq!(pipeline.collect().await, vec![3, 1]);
}

#[test]
fn build_requires_a_collection() {
    let (_sink, slogger) = slogger();
    let err = Pipeline::<i64>::builder("orphan", Context::new("uow", 1), slogger).step("step1", add_three)
                                                                                 .build()
                                                                                 .unwrap_err();
    assert_eq!(err, PipelineError::MissingCollection("orphan".into()));
}

#[test]
fn run_drives_on_a_plain_block_on() {
    let (_sink, slogger) = slogger();
    let pipeline = scenario_a(slogger);
    let out: Vec<i64> = tokio_test::block_on(pipeline.run().collect());
    assert_eq!(out, vec![7, 9, 11]);
}
