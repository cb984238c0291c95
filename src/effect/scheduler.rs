//! The execution context every effect runs on.
//!
//! A [`Scheduler`] is a cheap, cloneable wrapper around a tokio runtime
//! [`Handle`]. It is handed to [`FutEither::new`](super::FutEither::new) once
//! and threaded through every effect built from it; combinators never reach
//! for ambient global state.
//!
//! # Obtaining a Scheduler
//!
//! 1. **From an existing runtime**: [`Scheduler::from_handle`] or, inside
//!    async code, [`Scheduler::current`].
//! 2. **From configuration**: build a runtime with [`SchedulerConfig`], keep
//!    it alive, and pass its handle to [`Scheduler::from_handle`].
//! 3. **Shared default**: [`Scheduler::global`] lazily builds one
//!    multi-thread runtime for the whole process and never drops it.
//!
//! # Examples
//!
//! ```rust
//! use futeither::effect::{AsyncTask, Scheduler, SchedulerConfig};
//!
//! let runtime = SchedulerConfig::default()
//!     .with_worker_threads(2)
//!     .build_runtime()
//!     .unwrap();
//! let scheduler = Scheduler::from_handle(runtime.handle().clone());
//!
//! let task = scheduler.spawn(async { Ok(40 + 2) });
//! assert_eq!(scheduler.block_on(task), Ok(Ok(42)));
//! ```

use std::future::Future;
use std::sync::LazyLock;

use tokio::runtime::{Builder, Handle, Runtime, RuntimeFlavor};

use super::{AsyncTask, Fault};

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while obtaining or building a [`Scheduler`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    /// [`Scheduler::current`] was called outside a tokio runtime.
    #[error("no tokio runtime is running on this thread")]
    NoRuntime,

    /// A [`SchedulerConfig`] asked for zero worker threads.
    #[error("worker thread count must be greater than 0")]
    InvalidWorkerThreads,

    /// The underlying runtime could not be built.
    #[error("failed to build runtime: {0}")]
    RuntimeBuild(String),
}

/// Errors raised by [`Scheduler::block_on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BlockingError {
    /// `block_in_place` is only supported in multi-thread runtimes.
    #[error(
        "cannot execute blocking operation in current-thread runtime: \
         block_in_place is only supported in multi-thread runtimes"
    )]
    CurrentThreadRuntime,

    /// The calling runtime has a flavor this crate does not know about.
    #[error(
        "cannot execute blocking operation: \
         the runtime flavor is not supported for blocking execution"
    )]
    UnsupportedRuntimeFlavor,
}

// =============================================================================
// Configuration
// =============================================================================

/// Settings for a runtime built by this crate.
///
/// # Examples
///
/// ```rust
/// use futeither::effect::SchedulerConfig;
///
/// let config = SchedulerConfig::default()
///     .with_worker_threads(4)
///     .with_thread_name("bookstore-worker");
/// assert_eq!(config.worker_threads(), 4);
/// assert_eq!(config.thread_name(), "bookstore-worker");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    worker_threads: usize,
    thread_name: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            worker_threads: num_cpus::get(),
            thread_name: "futeither-worker".to_string(),
        }
    }
}

impl SchedulerConfig {
    /// Sets the number of worker threads.
    #[must_use]
    pub const fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    /// Sets the name given to worker threads.
    #[must_use]
    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    /// Returns the configured number of worker threads.
    pub const fn worker_threads(&self) -> usize {
        self.worker_threads
    }

    /// Returns the configured worker thread name.
    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// Builds a multi-thread runtime with time and I/O drivers enabled.
    ///
    /// The caller owns the runtime and must keep it alive for as long as any
    /// [`Scheduler`] created from its handle is in use.
    ///
    /// # Errors
    ///
    /// - [`SchedulerError::InvalidWorkerThreads`] if `worker_threads` is 0.
    /// - [`SchedulerError::RuntimeBuild`] if tokio fails to start the runtime.
    pub fn build_runtime(&self) -> Result<Runtime, SchedulerError> {
        if self.worker_threads == 0 {
            return Err(SchedulerError::InvalidWorkerThreads);
        }
        Builder::new_multi_thread()
            .worker_threads(self.worker_threads)
            .thread_name(self.thread_name.clone())
            .enable_all()
            .build()
            .map_err(|error| SchedulerError::RuntimeBuild(error.to_string()))
    }
}

// =============================================================================
// Global Runtime
// =============================================================================

/// Process-wide runtime built on first use of [`Scheduler::global`].
static GLOBAL_RUNTIME: LazyLock<Result<Runtime, SchedulerError>> =
    LazyLock::new(|| SchedulerConfig::default().build_runtime());

// =============================================================================
// Scheduler
// =============================================================================

/// Dispatches effect work onto a tokio runtime.
#[derive(Debug, Clone)]
pub struct Scheduler {
    handle: Handle,
}

impl Scheduler {
    /// Creates a scheduler that dispatches onto `handle`'s runtime.
    pub const fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }

    /// Creates a scheduler for the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::NoRuntime`] outside a tokio runtime.
    pub fn current() -> Result<Self, SchedulerError> {
        Handle::try_current()
            .map(Self::from_handle)
            .map_err(|_| SchedulerError::NoRuntime)
    }

    /// Returns a scheduler for the process-wide shared runtime.
    ///
    /// The runtime uses [`SchedulerConfig::default`], is created once, and is
    /// never dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::RuntimeBuild`] if the shared runtime could
    /// not be started.
    pub fn global() -> Result<Self, SchedulerError> {
        GLOBAL_RUNTIME
            .as_ref()
            .map(|runtime| Self::from_handle(runtime.handle().clone()))
            .map_err(Clone::clone)
    }

    /// Returns the underlying runtime handle.
    pub const fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Starts `future` on the runtime immediately and returns a task for its
    /// result.
    ///
    /// The spawned work keeps running even if the returned task is dropped.
    /// A panic inside `future`, or cancellation of the runtime task, resolves
    /// the returned task to a [`Fault`].
    pub fn spawn<A, Fut>(&self, future: Fut) -> AsyncTask<A>
    where
        Fut: Future<Output = Result<A, Fault>> + Send + 'static,
        A: Send + 'static,
    {
        let join_handle = self.handle.spawn(future);
        tracing::trace!("spawned effect task");
        AsyncTask::new(async move {
            match join_handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(Fault::from(join_error)),
            }
        })
    }

    /// Drives `task` to completion, blocking the current thread.
    ///
    /// - **Outside a runtime**: blocks on this scheduler's runtime.
    /// - **Inside a multi-thread runtime**: uses `block_in_place`.
    /// - **Inside a current-thread runtime**: returns an error instead of
    ///   panicking.
    ///
    /// Blocking from outside only drives timers and I/O when this scheduler's
    /// runtime is multi-threaded (as [`SchedulerConfig::build_runtime`] and
    /// [`Scheduler::global`] are).
    ///
    /// # Errors
    ///
    /// Returns [`BlockingError`] when blocking is not possible on the calling
    /// thread.
    pub fn block_on<A>(&self, task: AsyncTask<A>) -> Result<Result<A, Fault>, BlockingError>
    where
        A: 'static,
    {
        let Ok(current) = Handle::try_current() else {
            return Ok(self.handle.block_on(task));
        };
        match current.runtime_flavor() {
            RuntimeFlavor::MultiThread => Ok(tokio::task::block_in_place(|| {
                self.handle.block_on(task)
            })),
            RuntimeFlavor::CurrentThread => Err(BlockingError::CurrentThreadRuntime),
            _ => Err(BlockingError::UnsupportedRuntimeFlavor),
        }
    }
}
