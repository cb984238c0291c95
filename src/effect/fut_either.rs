//! `FutEither` - the entry point of the effect core.
//!
//! A [`FutEither<E>`] is built once with the [`Scheduler`] the application
//! wants effects to run on and is then used to bring values into the effect
//! world: lifting service calls, raising domain errors, and sequencing
//! collections of effects. Every [`Effect`] created through it carries the
//! same scheduler.
//!
//! # Examples
//!
//! ```rust
//! use futeither::effect::{AsyncTask, FutEither, Scheduler};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let monad = FutEither::<String>::new(Scheduler::from_handle(runtime.handle().clone()));
//!
//! let friends = vec!["Juan", "Miguel", "Eva"]
//!     .into_iter()
//!     .map(|name| monad.lift(AsyncTask::successful(Ok(name))));
//!
//! let names = monad.sequence(friends);
//! assert_eq!(
//!     runtime.block_on(names.run()),
//!     Ok(Ok(vec!["Juan", "Miguel", "Eva"]))
//! );
//! ```

use std::fmt;
use std::marker::PhantomData;

use super::parallel::sequence_on;
use super::{AsyncTask, Effect, Scheduler};

/// Builds effects with domain error type `E` on a fixed scheduler.
pub struct FutEither<E> {
    scheduler: Scheduler,
    _marker: PhantomData<fn() -> E>,
}

impl<E> FutEither<E> {
    /// Creates the effect core bound to `scheduler`.
    pub const fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            _marker: PhantomData,
        }
    }

    /// Returns the scheduler every effect built here runs on.
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}

impl<E> Clone for FutEither<E> {
    fn clone(&self) -> Self {
        Self::new(self.scheduler.clone())
    }
}

impl<E> fmt::Debug for FutEither<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FutEither")
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl<E: Send + 'static> FutEither<E> {
    /// Wraps a fallible task as an effect, verbatim.
    ///
    /// No normalization happens here: if `task` faults, the effect faults,
    /// and only a fault hook such as [`Effect::recover`] will see it.
    pub fn lift<A>(&self, task: AsyncTask<Result<A, E>>) -> Effect<E, A>
    where
        A: Send + 'static,
    {
        Effect::from_parts(self.scheduler.clone(), task)
    }

    /// Wraps a task that has no domain error channel.
    ///
    /// The task's value becomes `Ok(value)`; its faults stay faults.
    pub fn lift_infallible<A>(&self, task: AsyncTask<A>) -> Effect<E, A>
    where
        A: Send + 'static,
    {
        self.lift(task.map(Ok))
    }

    /// Creates an effect that is already resolved to `Ok(value)`.
    pub fn pure<A>(&self, value: A) -> Effect<E, A>
    where
        A: Send + 'static,
    {
        self.lift(AsyncTask::successful(Ok(value)))
    }

    /// Creates an effect that is already resolved to `Err(error)`.
    ///
    /// No work is scheduled for it.
    pub fn raise_error<A>(&self, error: E) -> Effect<E, A>
    where
        A: Send + 'static,
    {
        self.lift(AsyncTask::successful(Err(error)))
    }

    /// Creates an effect that is already resolved to `result`.
    pub fn from_result<A>(&self, result: Result<A, E>) -> Effect<E, A>
    where
        A: Send + 'static,
    {
        self.lift(AsyncTask::successful(result))
    }

    /// Runs every effect concurrently and collects the values in input order.
    ///
    /// All elements start immediately. If any element fails, the result is
    /// the failure of the lowest-indexed failing element, regardless of which
    /// one finished first. An empty input resolves to `Ok(vec![])`.
    pub fn sequence<A, I>(&self, effects: I) -> Effect<E, Vec<A>>
    where
        A: Send + 'static,
        I: IntoIterator<Item = Effect<E, A>>,
    {
        sequence_on(&self.scheduler, effects)
    }

    /// Maps every item to an effect and sequences the results.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futeither::effect::{FutEither, Scheduler};
    ///
    /// let runtime = tokio::runtime::Runtime::new().unwrap();
    /// let monad = FutEither::<String>::new(Scheduler::from_handle(runtime.handle().clone()));
    ///
    /// let chapters = monad.traverse(vec![1, 2, 3], |id| monad.pure(format!("chapter {id}")));
    /// assert_eq!(
    ///     runtime.block_on(chapters.run()),
    ///     Ok(Ok(vec![
    ///         "chapter 1".to_string(),
    ///         "chapter 2".to_string(),
    ///         "chapter 3".to_string(),
    ///     ]))
    /// );
    /// ```
    pub fn traverse<T, A, I, F>(&self, items: I, function: F) -> Effect<E, Vec<A>>
    where
        A: Send + 'static,
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> Effect<E, A>,
    {
        self.sequence(items.into_iter().map(function))
    }
}
