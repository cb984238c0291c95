//! `Effect` - an asynchronous, fallible computation.
//!
//! [`Effect<E, A>`] owns one `AsyncTask<Result<A, E>>`: a task that
//! eventually yields either a success value `A` or a domain error `E`, and
//! that may additionally fault. Effects are descriptions. Every combinator
//! consumes its receiver and returns a new effect; nothing runs until the
//! effect is materialized with [`Effect::run`] (or awaited), except for the
//! parents of the concurrent combinators, which are started as soon as the
//! combined effect is built.
//!
//! # Laws
//!
//! On the success path `Effect` behaves like a monad:
//!
//! ```text
//! pure(a).flat_map(f)            == f(a)
//! m.flat_map(pure)               == m
//! m.flat_map(f).flat_map(g)      == m.flat_map(|x| f(x).flat_map(g))
//! m.map(|x| x)                   == m
//! m.map(f).map(g)                == m.map(|x| g(f(x)))
//! raise_error(e).flat_map(f)     == raise_error(e)   (f never invoked)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use futeither::effect::{AsyncTask, FutEither, Scheduler};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let monad = FutEither::<String>::new(Scheduler::from_handle(runtime.handle().clone()));
//!
//! let name = monad
//!     .lift(AsyncTask::successful(Ok(("Juan", 35))))
//!     .map(|(name, _age)| name.to_uppercase());
//!
//! assert_eq!(runtime.block_on(name.run()), Ok(Ok("JUAN".to_string())));
//! ```

use std::fmt;
use std::future::IntoFuture;

use tracing::Instrument;

use super::{AsyncTask, Fault, Scheduler};

/// An asynchronous computation that yields `Ok(A)` or a domain error `Err(E)`.
///
/// Besides the two `Result` variants, the underlying task can resolve to a
/// [`Fault`]. Faults are a separate channel: `map`, `flat_map` and the
/// domain-error hooks pass them through untouched.
#[must_use = "effects do nothing unless run or awaited"]
pub struct Effect<E, A> {
    scheduler: Scheduler,
    task: AsyncTask<Result<A, E>>,
}

impl<E, A> Effect<E, A> {
    pub(crate) const fn from_parts(scheduler: Scheduler, task: AsyncTask<Result<A, E>>) -> Self {
        Self { scheduler, task }
    }

    pub(crate) fn into_parts(self) -> (Scheduler, AsyncTask<Result<A, E>>) {
        (self.scheduler, self.task)
    }

    /// Returns the scheduler this effect dispatches work on.
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}

// =============================================================================
// Functor / Monad
// =============================================================================

impl<E, A> Effect<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    /// Transforms the success value.
    ///
    /// Domain errors and faults pass through without invoking `function`.
    /// `function` is a pure transform: if it panics, the panic surfaces as a
    /// [`Fault`], never as `Err(E)`. Use [`flat_map`](Self::flat_map) for
    /// transforms that can fail.
    pub fn map<B, F>(self, function: F) -> Effect<E, B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        let (scheduler, task) = self.into_parts();
        Effect::from_parts(scheduler, task.map(|result| result.map(function)))
    }

    /// Chains a dependent effect.
    ///
    /// `function` runs only after this effect resolves to `Ok`, so the next
    /// computation may use the value (for example a foreign key fetched by
    /// the first lookup). A domain error or a fault short-circuits without
    /// invoking `function`.
    pub fn flat_map<B, F>(self, function: F) -> Effect<E, B>
    where
        F: FnOnce(A) -> Effect<E, B> + Send + 'static,
        B: Send + 'static,
    {
        let (scheduler, task) = self.into_parts();
        Effect::from_parts(
            scheduler,
            AsyncTask::new(async move {
                match task.await? {
                    Ok(value) => function(value).task.await,
                    Err(error) => Ok(Err(error)),
                }
            }),
        )
    }

    /// Alias for [`flat_map`](Self::flat_map).
    pub fn and_then<B, F>(self, function: F) -> Effect<E, B>
    where
        F: FnOnce(A) -> Effect<E, B> + Send + 'static,
        B: Send + 'static,
    {
        self.flat_map(function)
    }

    /// Transforms the domain error, leaving values and faults untouched.
    pub fn map_error<E2, F>(self, function: F) -> Effect<E2, A>
    where
        F: FnOnce(E) -> E2 + Send + 'static,
        E2: Send + 'static,
    {
        let (scheduler, task) = self.into_parts();
        Effect::from_parts(scheduler, task.map(|result| result.map_err(function)))
    }

    /// Runs this effect inside `span` whenever it is polled.
    pub fn instrument(self, span: tracing::Span) -> Self {
        let (scheduler, task) = self.into_parts();
        Self::from_parts(scheduler, AsyncTask::new(task.instrument(span)))
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Materializes the effect into a single awaitable task.
    ///
    /// This is the terminal operation of a composition. Panics raised by any
    /// combinator callback along the chain resolve the task to a [`Fault`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futeither::effect::{FutEither, Scheduler};
    ///
    /// let runtime = tokio::runtime::Runtime::new().unwrap();
    /// let monad = FutEither::<String>::new(Scheduler::from_handle(runtime.handle().clone()));
    ///
    /// let task = monad.raise_error::<i32>("User not found!".to_string()).run();
    /// assert_eq!(runtime.block_on(task), Ok(Err("User not found!".to_string())));
    /// ```
    pub fn run(self) -> AsyncTask<Result<A, E>> {
        self.task.catch_faults()
    }

    /// Spawns the effect's task on its scheduler right away.
    pub(crate) fn start(self) -> AsyncTask<Result<A, E>> {
        let (scheduler, task) = self.into_parts();
        scheduler.spawn(task)
    }
}

impl<E, A> IntoFuture for Effect<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    type Output = Result<Result<A, E>, Fault>;
    type IntoFuture = AsyncTask<Result<A, E>>;

    fn into_future(self) -> Self::IntoFuture {
        self.run()
    }
}

impl<E, A> fmt::Debug for Effect<E, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Effect")
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
