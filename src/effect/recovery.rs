//! Recovery hooks, one per error channel.
//!
//! | hook                   | intercepts | replaces with      |
//! |------------------------|------------|--------------------|
//! | `recover`              | `Fault`    | a value            |
//! | `recover_fault_with`   | `Fault`    | a new effect       |
//! | `handle_error`         | `Err(E)`   | a value            |
//! | `recover_with`         | `Err(E)`   | a new effect       |
//! | `mask_failures`        | both       | `Err(E)` from text |
//!
//! A hook for one channel never sees failures of the other, so funnelling
//! everything into a single user-visible error takes one hook per channel
//! (or `mask_failures`). All hooks are no-ops on the success path.

use std::fmt::Debug;

use super::{AsyncTask, Effect, Fault, FromMessage};

impl<E, A> Effect<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    /// Replaces a fault with a synthesized success value.
    ///
    /// Panics raised anywhere upstream count as faults here. Domain errors
    /// pass through untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futeither::effect::{AsyncTask, Fault, FutEither, Scheduler};
    ///
    /// let runtime = tokio::runtime::Runtime::new().unwrap();
    /// let monad = FutEither::<String>::new(Scheduler::from_handle(runtime.handle().clone()));
    ///
    /// let effect = monad
    ///     .lift::<i32>(AsyncTask::failed(Fault::external("connection refused")))
    ///     .recover(|_fault| -1);
    /// assert_eq!(runtime.block_on(effect.run()), Ok(Ok(-1)));
    /// ```
    pub fn recover<F>(self, function: F) -> Self
    where
        F: FnOnce(Fault) -> A + Send + 'static,
    {
        let (scheduler, task) = self.into_parts();
        Self::from_parts(
            scheduler,
            AsyncTask::new(async move {
                match task.catch_faults().await {
                    Err(fault) => {
                        tracing::debug!(%fault, "recovering from fault");
                        Ok(Ok(function(fault)))
                    }
                    outcome => outcome,
                }
            }),
        )
    }

    /// Replaces a fault with the outcome of another effect.
    ///
    /// Useful for turning a fault into a domain error:
    /// `effect.recover_fault_with(move |_| monad.raise_error(..))`.
    pub fn recover_fault_with<F>(self, function: F) -> Self
    where
        F: FnOnce(Fault) -> Self + Send + 'static,
    {
        let (scheduler, task) = self.into_parts();
        Self::from_parts(
            scheduler,
            AsyncTask::new(async move {
                match task.catch_faults().await {
                    Err(fault) => {
                        tracing::debug!(%fault, "replacing fault with fallback effect");
                        function(fault).into_parts().1.await
                    }
                    outcome => outcome,
                }
            }),
        )
    }

    /// Replaces a domain error with a success value.
    ///
    /// Faults pass through untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futeither::effect::{FutEither, Scheduler};
    ///
    /// let runtime = tokio::runtime::Runtime::new().unwrap();
    /// let monad = FutEither::<String>::new(Scheduler::from_handle(runtime.handle().clone()));
    ///
    /// let name = monad
    ///     .raise_error::<String>("User not found!".to_string())
    ///     .handle_error(|_error| "DEFAULT_VALUE".to_string());
    /// assert_eq!(runtime.block_on(name.run()), Ok(Ok("DEFAULT_VALUE".to_string())));
    /// ```
    pub fn handle_error<F>(self, function: F) -> Self
    where
        F: FnOnce(E) -> A + Send + 'static,
    {
        let (scheduler, task) = self.into_parts();
        Self::from_parts(
            scheduler,
            task.map(|result| {
                result.or_else(|error| {
                    tracing::debug!("handling domain error with fallback value");
                    Ok(function(error))
                })
            }),
        )
    }

    /// Replaces a domain error with the outcome of another effect.
    ///
    /// The fallback can itself fail, which allows chains such as swapping a
    /// fine-grained error for a coarser one. Faults pass through untouched.
    pub fn recover_with<F>(self, function: F) -> Self
    where
        F: FnOnce(E) -> Self + Send + 'static,
    {
        let (scheduler, task) = self.into_parts();
        Self::from_parts(
            scheduler,
            AsyncTask::new(async move {
                match task.await? {
                    Err(error) => {
                        tracing::debug!("replacing domain error with fallback effect");
                        function(error).into_parts().1.await
                    }
                    success => Ok(success),
                }
            }),
        )
    }

    /// Replaces every failure, fault or domain error, with
    /// `E::from_message(message)`.
    ///
    /// This is the explicit point where both channels are unified. The
    /// replaced cause is logged at `warn` level and then dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futeither::effect::{AsyncTask, Fault, FutEither, Scheduler};
    ///
    /// let runtime = tokio::runtime::Runtime::new().unwrap();
    /// let monad = FutEither::<String>::new(Scheduler::from_handle(runtime.handle().clone()));
    ///
    /// let summary = monad
    ///     .lift::<i32>(AsyncTask::failed(Fault::external("connection reset")))
    ///     .mask_failures("aggregate unavailable");
    /// assert_eq!(
    ///     runtime.block_on(summary.run()),
    ///     Ok(Err("aggregate unavailable".to_string()))
    /// );
    /// ```
    pub fn mask_failures(self, message: impl Into<String>) -> Self
    where
        E: FromMessage + Debug,
    {
        let message = message.into();
        let (scheduler, task) = self.into_parts();
        Self::from_parts(
            scheduler,
            AsyncTask::new(async move {
                match task.catch_faults().await {
                    Ok(Ok(value)) => Ok(Ok(value)),
                    Ok(Err(error)) => {
                        tracing::warn!(?error, %message, "masking domain error");
                        Ok(Err(E::from_message(message)))
                    }
                    Err(fault) => {
                        tracing::warn!(%fault, %message, "masking fault");
                        Ok(Err(E::from_message(message)))
                    }
                }
            }),
        )
    }
}
