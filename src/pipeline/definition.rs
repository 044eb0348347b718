// weir/src/pipeline/definition.rs

//! Contains the `Pipeline` struct definition and the methods for building and
//! modifying its middleware registration list.

use crate::core::context::Context;
use crate::core::flow::Flow;
use crate::core::middleware::{DispatchFn, Middleware};
use crate::error::WeirError;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// A sequential asynchronous middleware pipeline.
///
/// Generic over the context data type `C`, the seed value type `V`, the
/// current result type `R`, and the error type `Err` its middleware return.
///
/// `R` starts equal to `V` and is refined by every [`using`](Pipeline::using)
/// call to that middleware's output type, so the value type flowing between
/// consecutive steps is checked at compile time. Refinement happens at the
/// type level only: there is exactly one underlying registration list, which
/// moves through each `using` call, and nothing is copied.
///
/// `Err` must be `std::error::Error + Send + Sync + 'static` and additionally
/// `From<WeirError>`, so the pipeline can convert framework-originated
/// failures (type-erasure mismatches) into the caller's error type.
pub struct Pipeline<C, V = (), R = V, Err = WeirError>
where
    C: Send + Sync + 'static,
    Err: std::error::Error + From<WeirError> + Send + Sync + 'static,
{
    /// Ordered list of type-erased middleware entries; insertion order is
    /// execution order. Duplicates are permitted and are distinct entries.
    pub(crate) middlewares: Vec<DispatchFn<C, Err>>,

    pub(crate) _marker: PhantomData<fn(V) -> R>,
}

impl<C, V, Err> Pipeline<C, V, V, Err>
where
    C: Send + Sync + 'static,
    Err: std::error::Error + From<WeirError> + Send + Sync + 'static,
{
    /// Creates an empty `Pipeline`. Running it resolves to `End(seed)`.
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
            _marker: PhantomData,
        }
    }
}

impl<C, V, Err> Default for Pipeline<C, V, V, Err>
where
    C: Send + Sync + 'static,
    Err: std::error::Error + From<WeirError> + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, V, R, Err> Pipeline<C, V, R, Err>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
    R: Send + 'static,
    Err: std::error::Error + From<WeirError> + Send + Sync + 'static,
{
    /// Appends a middleware to the end of the pipeline.
    ///
    /// The closure receives the shared context handle and the previous
    /// step's value (of the pipeline's current result type `R`), and
    /// resolves to a [`Flow<Out>`]: a plain value for the next step, or a
    /// directive that halts the run. Returns the same pipeline with its
    /// result type refined to `Out`, so registrations chain fluently.
    ///
    /// No handle is kept; use [`Middleware::new`] plus
    /// [`using_middleware`](Pipeline::using_middleware) when the entry must
    /// be removable later.
    pub fn using<Out, F, Fut>(self, middleware_fn: F) -> Pipeline<C, V, Out, Err>
    where
        Out: Send + 'static,
        F: Fn(Context<C>, R) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Flow<Out>, Err>> + Send + 'static,
    {
        self.using_middleware(&Middleware::new(middleware_fn))
    }

    /// Appends an existing middleware handle to the end of the pipeline.
    ///
    /// The entry shares identity with `middleware`, so the same handle can
    /// later be passed to [`remove`](Pipeline::remove). Registering one
    /// handle twice produces two distinct list entries.
    pub fn using_middleware<Out>(
        mut self,
        middleware: &Middleware<C, R, Out, Err>,
    ) -> Pipeline<C, V, Out, Err>
    where
        Out: Send + 'static,
    {
        self.middlewares.push(Arc::clone(&middleware.dispatch));
        Pipeline {
            middlewares: self.middlewares,
            _marker: PhantomData,
        }
    }

    /// Removes the first list entry matching `middleware` by identity and
    /// returns it.
    ///
    /// Absence is a normal, silently handled case: the result is `None` and
    /// the list is left untouched. Only one entry is removed per call even
    /// when the same handle was registered several times.
    pub fn remove<In, Out>(
        &mut self,
        middleware: &Middleware<C, In, Out, Err>,
    ) -> Option<Middleware<C, In, Out, Err>> {
        let index = self
            .middlewares
            .iter()
            .position(|entry| Arc::ptr_eq(entry, &middleware.dispatch))?;
        let dispatch = self.middlewares.remove(index);
        Some(Middleware {
            dispatch,
            _types: PhantomData,
        })
    }

    /// Number of registered middleware entries.
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }
}
