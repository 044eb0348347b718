// weir/src/core/middleware.rs

//! Defines the `Middleware` handle and the type-erased dispatch shape the
//! pipeline stores and invokes.

use crate::core::context::Context;
use crate::core::flow::{AnyValue, Flow};
use crate::error::WeirError;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

/// Future produced by one erased middleware dispatch.
pub(crate) type DispatchFuture<Err> =
    Pin<Box<dyn Future<Output = Result<Flow<AnyValue>, Err>> + Send>>;

/// Type-erased middleware entry as stored in the pipeline's registration
/// list: takes the shared context handle and the boxed carried value, and
/// resolves to an erased [`Flow`].
///
/// `Arc` rather than `Box` so that an entry can be registered more than once
/// and matched by pointer identity for removal.
pub(crate) type DispatchFn<C, Err> =
    Arc<dyn Fn(Context<C>, AnyValue) -> DispatchFuture<Err> + Send + Sync>;

/// A registered pipeline step: an asynchronous function from the shared
/// context and the previous step's value to a new value or a halting
/// directive.
///
/// The handle is typed (`In` is the value it consumes, `Out` the value it
/// produces) but wraps a type-erased dispatch function, which is what lets
/// one pipeline hold steps whose value types differ. Cloning a handle clones
/// the `Arc`, so clones share identity: registering a clone and removing via
/// the original removes that same entry.
///
/// Middleware bodies must drop any [`Context`] lock guard before suspending
/// at an `.await` point.
pub struct Middleware<C, In, Out, Err = WeirError>
where
    C: Send + Sync + 'static,
{
    pub(crate) dispatch: DispatchFn<C, Err>,
    pub(crate) _types: PhantomData<fn(In) -> Out>,
}

impl<C, In, Out, Err> Middleware<C, In, Out, Err>
where
    C: Send + Sync + 'static,
    In: Send + 'static,
    Out: Send + 'static,
    Err: std::error::Error + From<WeirError> + Send + Sync + 'static,
{
    /// Wraps an async closure `(Context<C>, In) -> Result<Flow<Out>, Err>`
    /// into a registrable, identity-bearing middleware handle.
    pub fn new<F, Fut>(middleware_fn: F) -> Self
    where
        F: Fn(Context<C>, In) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Flow<Out>, Err>> + Send + 'static,
    {
        let dispatch: DispatchFn<C, Err> = Arc::new(move |context, value: AnyValue| {
            match value.downcast::<In>() {
                Ok(boxed_value) => {
                    let user_fut = middleware_fn(context, *boxed_value);
                    Box::pin(async move { user_fut.await.map(Flow::erase) })
                }
                // Only reachable when the typed registration API has been
                // bypassed; surfaced as the pipeline's Err, never a panic.
                Err(_) => {
                    let mismatch = Err::from(WeirError::ValueTypeMismatch {
                        expected_type: std::any::type_name::<In>(),
                    });
                    Box::pin(async move { Err(mismatch) })
                }
            }
        });

        Self {
            dispatch,
            _types: PhantomData,
        }
    }

    /// Whether `self` and `other` refer to the same registered entry.
    pub fn same_entry(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.dispatch, &other.dispatch)
    }
}

impl<C, In, Out, Err> Clone for Middleware<C, In, Out, Err>
where
    C: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            dispatch: Arc::clone(&self.dispatch),
            _types: PhantomData,
        }
    }
}

// Closures don't implement Debug; report the value types instead.
impl<C, In, Out, Err> std::fmt::Debug for Middleware<C, In, Out, Err>
where
    C: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Middleware")
            .field("in", &std::any::type_name::<In>())
            .field("out", &std::any::type_name::<Out>())
            .finish()
    }
}
