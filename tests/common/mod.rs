// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::Level;
use weir::{Context, Flow, Middleware, WeirError};

// --- Common Context Structs ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
    pub counter: i32,
    pub message: String,
    pub steps_executed: Vec<String>,
}

// Context whose fields are written by different middleware and read back by a
// final one; the union of everything the chain touches.
#[derive(Clone, Debug, Default)]
pub struct AccumContext {
    pub data: String,
    pub value: i32,
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)] // Clone, PartialEq, Eq for assertions
pub enum TestError {
    #[error("Weir framework error: {0:?}")] // Use :? for WeirError as it doesn't impl PartialEq
    Weir(String), // Store as String for Eq comparison

    #[error("Test middleware failed: {0}")]
    Middleware(String),
}

impl From<WeirError> for TestError {
    fn from(we: WeirError) -> Self {
        // Simple conversion for testing; stringifying keeps TestError Eq.
        TestError::Weir(format!("{:?}", we))
    }
}

// --- Common Middleware Creators ---

/// Appends `suffix` to the carried string, bumps the context counter, and
/// records the step name.
pub fn appending_middleware(
    step_name: &'static str,
    suffix: &'static str,
) -> Middleware<TestContext, String, String, TestError> {
    Middleware::new(move |ctx: Context<TestContext>, value: String| {
        let step_name_owned = step_name.to_string();
        async move {
            {
                let mut guard = ctx.write();
                guard.counter += 1;
                guard.steps_executed.push(step_name_owned.clone());
            }
            tracing::debug!(target: "test_middleware", step = %step_name_owned, "executed, value: '{}{}'", value, suffix);
            Ok(Flow::next(format!("{value}{suffix}")))
        }
    })
}

/// Fails with `TestError::Middleware(error_message)` after recording the
/// step name.
pub fn failing_middleware(
    step_name: &'static str,
    error_message: &'static str,
) -> Middleware<TestContext, String, String, TestError> {
    Middleware::new(move |ctx: Context<TestContext>, _value: String| {
        let step_name_owned = step_name.to_string();
        let error_message_owned = error_message.to_string();
        async move {
            ctx.write().steps_executed.push(step_name_owned.clone());
            tracing::warn!(target: "test_middleware", step = %step_name_owned, "failing with: '{}'", error_message_owned);
            Err(TestError::Middleware(error_message_owned))
        }
    })
}

/// Passes the value through untouched but bumps `invocations`, for asserting
/// that short-circuited or failed runs never reach later middleware.
pub fn counting_middleware(
    invocations: Arc<AtomicUsize>,
) -> Middleware<TestContext, String, String, TestError> {
    Middleware::new(move |_ctx: Context<TestContext>, value: String| {
        let invocations = invocations.clone();
        async move {
            invocations.fetch_add(1, Ordering::SeqCst);
            Ok(Flow::next(value))
        }
    })
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer() // Important for tests to capture output
        .try_init()
        .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
    Lazy::force(&TRACING_INIT);
}
