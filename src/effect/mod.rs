//! Asynchronous, fallible effects.
//!
//! This module provides [`Effect<E, A>`], a wrapper around an
//! [`AsyncTask<Result<A, E>>`](AsyncTask), and the combinators that compose
//! effects into larger ones.
//!
//! # Building Blocks
//!
//! - [`AsyncTask`]: a boxed future resolving to a value or a [`Fault`]
//! - [`Fault`]: an uncaught failure of the asynchronous machinery
//! - [`Scheduler`]: the tokio runtime handle all work is dispatched on
//! - [`FutEither`]: the entry point, bound to one scheduler
//! - [`Effect`]: the composable computation
//!
//! # Two Error Channels
//!
//! ```text
//!                    map / flat_map / mapN / sequence
//! Ok(A)      ─────────────────────────────────────────▶  continues
//! Err(E)     ── skips callbacks ──▶ handle_error / recover_with
//! Fault      ── skips callbacks ──▶ recover / recover_fault_with
//!                       both ─────▶ mask_failures
//! ```
//!
//! # Examples
//!
//! ```rust
//! use futeither::effect::{AsyncTask, Fault, FutEither, Scheduler};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let monad = FutEither::<String>::new(Scheduler::from_handle(runtime.handle().clone()));
//!
//! // A fault in one parent is recovered with a fallback value.
//! let me = monad.lift::<i32>(AsyncTask::failed(Fault::external("Ahhhhhhhhhh!!!!!")));
//! let friend = monad.pure(28);
//! let sum = me.map2(friend, |a, b| a + b).recover(|_| -1);
//! assert_eq!(runtime.block_on(sum.run()), Ok(Ok(-1)));
//!
//! // A domain error is not a fault: `recover` lets it through.
//! let me = monad.raise_error::<i32>("Invalid user".to_string());
//! let sum = me.map2(monad.pure(28), |a, b| a + b).recover(|_| -1);
//! assert_eq!(runtime.block_on(sum.run()), Ok(Err("Invalid user".to_string())));
//! ```

// =============================================================================
// Task Layer
// =============================================================================

mod fault;
mod scheduler;
mod task;

pub use fault::{Fault, FaultKind};
pub use scheduler::{BlockingError, Scheduler, SchedulerConfig, SchedulerError};
pub use task::AsyncTask;

// =============================================================================
// Effect Core
// =============================================================================

mod composition;
mod error;
mod fut_either;
mod parallel;
mod recovery;
mod shared;

pub use composition::Effect;
pub use error::FromMessage;
pub use fut_either::FutEither;
pub use shared::SharedEffect;

// =============================================================================
// Do-Notation Macro
// =============================================================================

mod effect_macro;
