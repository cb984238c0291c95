//! # futeither
//!
//! Composable asynchronous, fallible computations for Rust.
//!
//! ## Overview
//!
//! This library wraps "a future that eventually yields a `Result`" in a single
//! effect type and gives it a small composition algebra:
//!
//! - **Lifting**: [`FutEither::lift`](effect::FutEither::lift),
//!   [`FutEither::raise_error`](effect::FutEither::raise_error)
//! - **Sequential composition**: `map`, `flat_map`
//! - **Concurrent composition**: `map2`, `map3`, `map4`, `sequence`, `traverse`
//! - **Recovery**: `recover` (faults), `handle_error` / `recover_with` (domain errors)
//! - **Materialization**: `run`
//!
//! Two error channels are kept apart. A domain failure is an
//! `Err(E)` inside the `Result`; a [`Fault`](effect::Fault) is something that
//! went wrong in the asynchronous machinery itself (a failed task, a panic, a
//! timeout). Each channel has its own recovery hooks.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Fault`](effect::Fault)
//!
//! ## Example
//!
//! ```rust
//! use futeither::prelude::*;
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let monad = FutEither::<String>::new(Scheduler::from_handle(runtime.handle().clone()));
//!
//! let me = monad.lift(AsyncTask::successful(Ok(35)));
//! let friend = monad.lift(AsyncTask::successful(Ok(28)));
//! let total = me.map2(friend, |a, b| a + b);
//!
//! assert_eq!(runtime.block_on(total.run()), Ok(Ok(63)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use futeither::prelude::*;
/// ```
pub mod prelude {
    pub use crate::effect::*;
}

pub mod effect;
