//! `SharedEffect` - one computation, many consumers.
//!
//! An [`Effect`] can be consumed only once. When several dependent effects
//! need the result of the same lookup (a book feeding both its author and
//! its chapters), convert it with [`Effect::shared`] and hand each consumer
//! its own [`SharedEffect::effect`]. The underlying task runs once, driven by
//! whichever consumer polls it first; every consumer observes a clone of the
//! same outcome, fault included.

use std::fmt;

use futures::FutureExt;
use futures::future::Shared;

use super::{AsyncTask, Effect, Scheduler};

/// A cloneable handle to a memoized effect.
pub struct SharedEffect<E, A>
where
    E: Clone,
    A: Clone,
{
    scheduler: Scheduler,
    shared: Shared<AsyncTask<Result<A, E>>>,
}

impl<E, A> Effect<E, A>
where
    E: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
{
    /// Memoizes this effect so that several consumers can depend on it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futeither::effect::{FutEither, Scheduler};
    ///
    /// let runtime = tokio::runtime::Runtime::new().unwrap();
    /// let monad = FutEither::<String>::new(Scheduler::from_handle(runtime.handle().clone()));
    ///
    /// let book = monad.pure(("Dune", 7)).shared();
    /// let title = book.effect().map(|(title, _)| title);
    /// let author_id = book.effect().map(|(_, author)| author);
    ///
    /// let both = title.zip(author_id);
    /// assert_eq!(runtime.block_on(both.run()), Ok(Ok(("Dune", 7))));
    /// ```
    pub fn shared(self) -> SharedEffect<E, A> {
        let (scheduler, task) = self.into_parts();
        SharedEffect {
            scheduler,
            shared: task.catch_faults().shared(),
        }
    }
}

impl<E, A> SharedEffect<E, A>
where
    E: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
{
    /// Returns a new effect observing the shared computation.
    pub fn effect(&self) -> Effect<E, A> {
        Effect::from_parts(self.scheduler.clone(), AsyncTask::new(self.shared.clone()))
    }
}

impl<E, A> Clone for SharedEffect<E, A>
where
    E: Clone,
    A: Clone,
{
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            shared: self.shared.clone(),
        }
    }
}

impl<E, A> fmt::Debug for SharedEffect<E, A>
where
    E: Clone,
    A: Clone,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SharedEffect")
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
