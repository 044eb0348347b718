// src/lib.rs

//! Weir: a minimal, type-safe, ASYNC middleware pipeline for Rust.
//!
//! Weir drives an ordered list of asynchronous middleware against a shared
//! mutable context and a carried value, with:
//!  - Sequential, awaited execution: middleware never overlap within a run.
//!  - A carried value that each step replaces, and whose type the pipeline
//!    tracks across chained registrations.
//!  - Typed short-circuiting: a step halts the run with an `End` or `Exit`
//!    directive carried through the same return channel as ordinary values.
//!  - Identity-based removal of registered middleware.
//!  - Verbatim error propagation from middleware to the caller of `run`.

pub mod core;
pub mod error;
pub mod pipeline;

// --- Re-exports for the Public API ---

// Core types that users will interact with frequently
pub use crate::core::context::Context;
pub use crate::core::directive::Directive;
pub use crate::core::flow::Flow;
pub use crate::core::middleware::Middleware;

// The main Pipeline struct
pub use crate::pipeline::definition::Pipeline;

pub use crate::error::{WeirError, WeirResult};

/*
    Core workflow:
    1. Define a context struct `MyCtx` holding everything your middleware
       share (the union of all fields any step reads or writes).
    2. Build a pipeline fluently:
           let pipeline = Pipeline::<MyCtx, String>::new()
               .using(|ctx, value| async move { Ok(Flow::next(...)) })
               .using(|ctx, value| async move { Ok(Flow::exit(...)) });
    3. Create `Context::new(MyCtx { .. })` and a seed value, then
       `pipeline.run(context, seed).await`.
    4. Match the returned `Directive` for `End` (normal completion) or
       `Exit` (a middleware short-circuited), and read accumulated state
       back out of the context.
*/
