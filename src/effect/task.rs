//! `AsyncTask` - a unit of asynchronous work that may fault.
//!
//! An [`AsyncTask<A>`] eventually resolves to exactly one of:
//!
//! - `Ok(value)` - the work completed, or
//! - `Err(fault)` - the work failed outside any `Result` it was meant to produce.
//!
//! It is the currency the execution environment hands to the effect core:
//! services return `AsyncTask<Result<V, E>>`, [`FutEither::lift`](super::FutEither::lift)
//! wraps it, and [`Effect::run`](super::Effect::run) hands one back.
//!
//! # Examples
//!
//! ```rust
//! use futeither::effect::{AsyncTask, Fault};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//!
//! let task = AsyncTask::successful(21).map(|x| x * 2);
//! assert_eq!(runtime.block_on(task), Ok(42));
//!
//! let failed: AsyncTask<i32> = AsyncTask::failed(Fault::external("offline"));
//! assert!(runtime.block_on(failed).is_err());
//! ```

use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::BoxFuture;
use pin_project_lite::pin_project;

use super::Fault;

/// An asynchronous computation resolving to a value or a [`Fault`].
///
/// `AsyncTask` is a boxed, `Send` future. It does nothing until it is polled
/// (awaited or spawned), and it can be polled to completion only once.
#[must_use = "tasks do nothing unless awaited or spawned"]
pub struct AsyncTask<A> {
    future: BoxFuture<'static, Result<A, Fault>>,
}

impl<A: 'static> AsyncTask<A> {
    /// Creates a task from a future that already reports faults.
    pub fn new<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<A, Fault>> + Send + 'static,
    {
        Self {
            future: Box::pin(future),
        }
    }

    /// Creates a task from an infallible future.
    ///
    /// A panic while polling `future` resolves the task to a
    /// [`FaultKind::Panicked`](super::FaultKind::Panicked) fault.
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::new(CatchFault::new(async move { Ok(future.await) }))
    }

    /// Creates a task from a future that fails with an external error type.
    ///
    /// The error is converted with [`Fault::from_error`]; it does **not**
    /// become a domain error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futeither::effect::{AsyncTask, FaultKind};
    /// use std::io;
    ///
    /// let runtime = tokio::runtime::Runtime::new().unwrap();
    /// let task: AsyncTask<i32> = AsyncTask::from_fallible(async {
    ///     Err(io::Error::new(io::ErrorKind::ConnectionRefused, "Connection error!!!!!"))
    /// });
    /// let fault = runtime.block_on(task).unwrap_err();
    /// assert_eq!(fault.kind(), FaultKind::External);
    /// ```
    pub fn from_fallible<Fut, Error>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<A, Error>> + Send + 'static,
        Error: std::error::Error,
    {
        Self::new(CatchFault::new(async move {
            future.await.map_err(|error| Fault::from_error(&error))
        }))
    }

    /// Transforms the value of a successful task.
    pub fn map<B, F>(self, function: F) -> AsyncTask<B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: 'static,
    {
        AsyncTask::new(async move { self.await.map(function) })
    }

    /// Resolves to a [`FaultKind::TimedOut`](super::FaultKind::TimedOut)
    /// fault if the task does not finish within `duration`.
    ///
    /// Must be polled inside a tokio runtime with the time driver enabled.
    pub fn with_timeout(self, duration: Duration) -> Self {
        Self::new(async move {
            tokio::time::timeout(duration, self)
                .await
                .unwrap_or_else(|_| Err(Fault::timed_out(duration)))
        })
    }

    /// Captures panics raised while polling this task as faults.
    pub(crate) fn catch_faults(self) -> Self {
        Self::new(CatchFault::new(self.future))
    }
}

impl<A: Send + 'static> AsyncTask<A> {
    /// Creates a task that is already resolved to `value`.
    pub fn successful(value: A) -> Self {
        Self::new(futures::future::ready(Ok(value)))
    }

    /// Creates a task that is already resolved to `fault`.
    pub fn failed(fault: Fault) -> Self {
        Self::new(futures::future::ready(Err(fault)))
    }
}

impl<A> Future for AsyncTask<A> {
    type Output = Result<A, Fault>;

    fn poll(mut self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.as_mut().poll(context)
    }
}

impl<A> std::fmt::Debug for AsyncTask<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("AsyncTask(<pending>)")
    }
}

pin_project! {
    /// Future adapter that turns a panic during `poll` into a [`Fault`].
    #[must_use = "futures do nothing unless polled"]
    pub(crate) struct CatchFault<F> {
        #[pin]
        inner: F,
    }
}

impl<F> CatchFault<F> {
    pub(crate) const fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F, A> Future for CatchFault<F>
where
    F: Future<Output = Result<A, Fault>>,
{
    type Output = Result<A, Fault>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match catch_unwind(AssertUnwindSafe(|| this.inner.poll(context))) {
            Ok(poll) => poll,
            Err(payload) => Poll::Ready(Err(Fault::from_panic(payload))),
        }
    }
}
