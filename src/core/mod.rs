pub mod context;
pub mod directive;
pub mod flow;
pub mod middleware;

// Re-export key types for easier access from other weir modules (and lib.rs)
pub use context::Context;
pub use directive::Directive;
pub use flow::Flow;
pub use middleware::Middleware;
