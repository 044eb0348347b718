// weir/src/core/directive.rs

//! Defines the terminal signal of a pipeline run.

/// Tagged result of a pipeline run, distinguishing normal completion from a
/// forced early exit. Both variants carry the run's final value.
///
/// A `Directive` is produced in one of three ways:
///  - the pipeline wraps the last carried value in [`Directive::End`] once
///    every middleware has run;
///  - a middleware returns `Flow::end(value)` to terminate the chain early
///    while still signaling the normal path;
///  - a middleware returns `Flow::exit(value)` to short-circuit; the
///    directive is propagated to the caller unchanged and no further
///    middleware run.
///
/// Directives are immutable value objects: variant tag plus payload, no
/// behavior. The pipeline never inspects the payload, only the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<T> {
    /// Normal termination carrying the final value.
    End(T),
    /// Explicit early-exit signal carrying the final value.
    Exit(T),
}

impl<T> Directive<T> {
    /// Borrows the carried payload, whichever variant holds it.
    pub fn value(&self) -> &T {
        match self {
            Directive::End(value) | Directive::Exit(value) => value,
        }
    }

    /// Consumes the directive and returns the carried payload.
    pub fn into_value(self) -> T {
        match self {
            Directive::End(value) | Directive::Exit(value) => value,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Directive::End(_))
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Directive::Exit(_))
    }
}
