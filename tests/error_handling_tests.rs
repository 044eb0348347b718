// tests/error_handling_tests.rs
mod common;

use common::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use weir::{Context, Flow, Pipeline, WeirError};

#[tokio::test]
async fn test_middleware_error_propagates_verbatim() {
    setup_tracing();
    let later_invocations = Arc::new(AtomicUsize::new(0));

    let pipeline = Pipeline::<TestContext, String, String, TestError>::new()
        .using_middleware(&failing_middleware("bad_step", "exception"))
        .using_middleware(&counting_middleware(later_invocations.clone()));

    let ctx = Context::new(TestContext::default());
    let result = pipeline.run(ctx.clone(), "a".to_string()).await;

    assert_eq!(
        result.err().unwrap(),
        TestError::Middleware("exception".to_string())
    );
    // No directive is produced and the second middleware never runs.
    assert_eq!(later_invocations.load(Ordering::SeqCst), 0);
    assert_eq!(ctx.read().steps_executed, vec!["bad_step"]);
}

#[tokio::test]
async fn test_context_mutations_survive_a_failed_run() {
    setup_tracing();
    let pipeline = Pipeline::<TestContext, String, String, TestError>::new()
        .using_middleware(&appending_middleware("good_step", "b"))
        .using_middleware(&failing_middleware("bad_step", "boom"));

    let ctx = Context::new(TestContext::default());
    let result = pipeline.run(ctx.clone(), "a".to_string()).await;

    assert!(result.is_err());
    // No rollback: everything written before the failure stays visible.
    let guard = ctx.read();
    assert_eq!(guard.counter, 1);
    assert_eq!(guard.steps_executed, vec!["good_step", "bad_step"]);
}

// A pipeline whose error type IS WeirError, with a middleware surfacing an
// anyhow-sourced failure through the From<anyhow::Error> conversion.
#[tokio::test]
async fn test_pipeline_with_weir_error_type() {
    setup_tracing();
    let pipeline = Pipeline::<TestContext, String, String, WeirError>::new().using(
        |_ctx, _value: String| async move {
            Err::<Flow<String>, WeirError>(anyhow::anyhow!("io went sideways").into())
        },
    );

    let ctx = Context::new(TestContext::default());
    let result = pipeline.run(ctx, "a".to_string()).await;

    match result.err().unwrap() {
        WeirError::Middleware { source } => {
            assert_eq!(source.to_string(), "io went sideways");
        }
        other => panic!("Expected WeirError::Middleware, got {:?}", other),
    }
}

// A mid-chain directive whose payload is not the pipeline's final result
// type cannot be represented in the caller's Directive<R>; run reports the
// reclaim failure instead of panicking.
#[tokio::test]
async fn test_early_directive_with_foreign_payload_type_is_an_error() {
    setup_tracing();
    let pipeline = Pipeline::<TestContext, String, String, TestError>::new()
        .using(|_ctx, value: String| async move {
            Ok::<Flow<String>, TestError>(Flow::exit(value))
        })
        .using(|_ctx, value: String| async move {
            Ok::<Flow<i32>, TestError>(Flow::next(value.len() as i32))
        });

    let ctx = Context::new(TestContext::default());
    let result = pipeline.run(ctx, "a".to_string()).await;

    match result.err().unwrap() {
        TestError::Weir(s) => assert!(s.contains("ResultTypeMismatch")),
        other => panic!("Expected TestError::Weir(ResultTypeMismatch), got {:?}", other),
    }
}
