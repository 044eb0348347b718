// weir/src/pipeline/execution.rs

//! Contains the `Pipeline::run()` method, responsible for driving the
//! middleware list against a shared context and a seed value.

use crate::core::context::Context;
use crate::core::directive::Directive;
use crate::core::flow::{AnyValue, Flow};
use crate::error::WeirError;
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, span, Instrument, Level};

impl<C, V, R, Err> Pipeline<C, V, R, Err>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
    R: Send + 'static,
    Err: std::error::Error + From<WeirError> + Send + Sync + 'static,
{
    /// Executes the pipeline against the given shared context and seed value.
    ///
    /// Middleware run strictly in registration order; each invocation is
    /// awaited to completion before the next begins. A middleware returning
    /// a directive stops dispatch immediately and that directive becomes the
    /// run's result; otherwise its value is carried into the next step. When
    /// the list is exhausted the carried value is normalized into
    /// `Directive::End`.
    ///
    /// A middleware error is returned verbatim: it is not caught, wrapped,
    /// or retried, no further middleware execute, and context mutations made
    /// up to the failure remain visible through the caller's `Context`
    /// handle.
    ///
    /// Concurrent runs on the same pipeline are fine (`run` borrows
    /// `&self`); each should normally get its own `Context`, since the
    /// pipeline performs no synchronization of caller state beyond the
    /// context's own lock.
    #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            context_type = %std::any::type_name::<C>(),
            error_type = %std::any::type_name::<Err>(),
            num_middlewares = self.middlewares.len(),
        ),
        err(Display)
    )]
    pub async fn run(&self, context: Context<C>, value: V) -> Result<Directive<R>, Err> {
        event!(Level::DEBUG, "Pipeline run starting.");

        let mut carried: AnyValue = Box::new(value);

        for (index, dispatch) in self.middlewares.iter().enumerate() {
            let dispatch_span = span!(Level::DEBUG, "middleware_dispatch", middleware_index = index);

            match dispatch(context.clone(), carried)
                .instrument(dispatch_span)
                .await
            {
                Ok(Flow::Next(next_value)) => {
                    carried = next_value;
                }
                Ok(Flow::Halt(directive)) => {
                    event!(
                        Level::INFO,
                        middleware_index = index,
                        early_exit = directive.is_exit(),
                        "Pipeline short-circuited by a directive."
                    );
                    return reclaim_directive(directive);
                }
                Err(e) => {
                    event!(Level::ERROR, middleware_index = index, error = %e, "Middleware failed.");
                    return Err(e);
                }
            }
        }

        event!(Level::DEBUG, "Pipeline run completed; normalizing final value.");
        match carried.downcast::<R>() {
            Ok(final_value) => Ok(Directive::End(*final_value)),
            Err(_) => Err(Err::from(WeirError::ResultTypeMismatch {
                expected_type: std::any::type_name::<R>(),
            })),
        }
    }
}

// Downcasts an erased directive's payload back to the pipeline's result
// type. Fails only when a middleware halted early with a payload of some
// other type, which the caller's Directive<R> cannot represent.
fn reclaim_directive<R, Err>(directive: Directive<AnyValue>) -> Result<Directive<R>, Err>
where
    R: Send + 'static,
    Err: From<WeirError>,
{
    let reclaim = |value: AnyValue| {
        value.downcast::<R>().map(|boxed| *boxed).map_err(|_| {
            Err::from(WeirError::ResultTypeMismatch {
                expected_type: std::any::type_name::<R>(),
            })
        })
    };

    Ok(match directive {
        Directive::End(value) => Directive::End(reclaim(value)?),
        Directive::Exit(value) => Directive::Exit(reclaim(value)?),
    })
}
