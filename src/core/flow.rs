// weir/src/core/flow.rs

//! The return channel of a middleware invocation: either a plain value for
//! the next middleware, or a [`Directive`] that halts the chain.

use crate::core::directive::Directive;
use std::any::Any;

/// Type-erased carried value, as threaded between middleware by the pipeline.
pub(crate) type AnyValue = Box<dyn Any + Send>;

/// What a middleware hands back to the pipeline.
///
/// A middleware body returns one type, so the original "plain value or
/// directive" contract is expressed as this sum. The variant tag is the
/// reliable is-this-a-directive check: a carried value that happens to be a
/// compound type can never be confused with a halt signal, because the two
/// travel in different variants rather than being told apart structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow<T> {
    /// Plain value; the chain continues and the next middleware receives it.
    Next(T),
    /// Terminating directive; the chain stops and the directive becomes the
    /// run's result.
    Halt(Directive<T>),
}

impl<T> Flow<T> {
    /// Continue the chain with `value`.
    pub fn next(value: T) -> Self {
        Flow::Next(value)
    }

    /// Stop the chain with the given directive.
    pub fn halt(directive: Directive<T>) -> Self {
        Flow::Halt(directive)
    }

    /// Stop the chain on the normal path, carrying `value` as the result.
    /// Equivalent to letting `value` flow through with no middleware left.
    pub fn end(value: T) -> Self {
        Flow::Halt(Directive::End(value))
    }

    /// Short-circuit the chain, carrying `value` as the early-exit result.
    pub fn exit(value: T) -> Self {
        Flow::Halt(Directive::Exit(value))
    }

    /// Whether this outcome carries a directive (and would halt a run).
    pub fn is_directive(&self) -> bool {
        matches!(self, Flow::Halt(_))
    }
}

impl<T: Send + 'static> Flow<T> {
    // Boxes the payload so the dispatch layer can thread values of changing
    // type through one list. The variant structure is preserved as-is.
    pub(crate) fn erase(self) -> Flow<AnyValue> {
        match self {
            Flow::Next(value) => Flow::Next(Box::new(value)),
            Flow::Halt(Directive::End(value)) => Flow::Halt(Directive::End(Box::new(value))),
            Flow::Halt(Directive::Exit(value)) => Flow::Halt(Directive::Exit(Box::new(value))),
        }
    }
}

impl<T> From<T> for Flow<T> {
    fn from(value: T) -> Self {
        Flow::Next(value)
    }
}

impl<T> From<Directive<T>> for Flow<T> {
    fn from(directive: Directive<T>) -> Self {
        Flow::Halt(directive)
    }
}
