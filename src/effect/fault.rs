//! Asynchronous faults - the second error channel.
//!
//! A [`Fault`] is a failure that happened in the asynchronous machinery rather
//! than inside the `Result` a computation produces, such as a panic in a
//! callback or a task that was cancelled or timed out. Faults never
//! turn into domain errors on their own; they travel past `map`, `flat_map`
//! and `handle_error` until a fault hook such as
//! [`Effect::recover`](super::Effect::recover) intercepts them.
//!
//! # Examples
//!
//! ```rust
//! use futeither::effect::{Fault, FaultKind};
//!
//! let fault = Fault::external("connection refused");
//! assert_eq!(fault.kind(), FaultKind::External);
//! assert_eq!(fault.to_string(), "external fault: connection refused");
//! ```

use std::any::Any;
use std::fmt;
use std::time::Duration;

use tokio::task::JoinError;

/// Classifies where a [`Fault`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaultKind {
    /// A task or callback panicked.
    Panicked,
    /// A spawned task was cancelled before it produced a value.
    Cancelled,
    /// A task did not finish within its deadline.
    TimedOut,
    /// The task provider reported a failure of its own.
    External,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Panicked => "panicked",
            Self::Cancelled => "cancelled",
            Self::TimedOut => "timed out",
            Self::External => "external",
        };
        formatter.write_str(label)
    }
}

/// An uncaught failure at the async-task layer.
///
/// `Fault` is not generic over the domain error type. It can appear in any
/// effect regardless of `E` and only becomes a value or a domain error at an
/// explicit recovery point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} fault: {message}")]
pub struct Fault {
    kind: FaultKind,
    message: String,
}

impl Fault {
    /// Creates a fault of the given kind.
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a fault reported by an external task provider.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futeither::effect::Fault;
    ///
    /// let fault = Fault::external("Ahhhhhhhh!!!!");
    /// assert_eq!(fault.message(), "Ahhhhhhhh!!!!");
    /// ```
    pub fn external(message: impl Into<String>) -> Self {
        Self::new(FaultKind::External, message)
    }

    /// Creates an external fault from any error value, keeping its display text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futeither::effect::{Fault, FaultKind};
    /// use std::io;
    ///
    /// let error = io::Error::new(io::ErrorKind::ConnectionRefused, "Connection error!!!!!");
    /// let fault = Fault::from_error(&error);
    /// assert_eq!(fault.kind(), FaultKind::External);
    /// assert_eq!(fault.message(), "Connection error!!!!!");
    /// ```
    pub fn from_error<Error>(error: &Error) -> Self
    where
        Error: std::error::Error + ?Sized,
    {
        Self::external(error.to_string())
    }

    /// Creates a fault from a panic payload as returned by `catch_unwind`.
    ///
    /// `&str` and `String` payloads keep their text; anything else is
    /// reported as an unknown panic.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::debug!(%message, "captured panic as fault");
        Self::new(FaultKind::Panicked, message)
    }

    /// Creates a fault for a task that exceeded `duration`.
    pub fn timed_out(duration: Duration) -> Self {
        Self::new(
            FaultKind::TimedOut,
            format!("operation timed out after {duration:?}"),
        )
    }

    /// Returns the kind of this fault.
    pub const fn kind(&self) -> FaultKind {
        self.kind
    }

    /// Returns the human-readable description of this fault.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if the fault was caused by a panic.
    pub const fn is_panic(&self) -> bool {
        matches!(self.kind, FaultKind::Panicked)
    }
}

impl From<JoinError> for Fault {
    fn from(error: JoinError) -> Self {
        if error.is_panic() {
            Self::from_panic(error.into_panic())
        } else {
            Self::new(FaultKind::Cancelled, error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FaultKind::Panicked, "panicked")]
    #[case(FaultKind::Cancelled, "cancelled")]
    #[case(FaultKind::TimedOut, "timed out")]
    #[case(FaultKind::External, "external")]
    fn test_fault_kind_display(#[case] kind: FaultKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[rstest]
    fn test_fault_display_includes_kind_and_message() {
        let fault = Fault::new(FaultKind::Cancelled, "task 7 was cancelled");
        assert_eq!(fault.to_string(), "cancelled fault: task 7 was cancelled");
    }

    #[rstest]
    fn test_from_panic_with_str_payload() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        let fault = Fault::from_panic(payload);
        assert!(fault.is_panic());
        assert_eq!(fault.message(), "boom");
    }

    #[rstest]
    fn test_from_panic_with_string_payload() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("formatted boom"));
        assert_eq!(Fault::from_panic(payload).message(), "formatted boom");
    }

    #[rstest]
    fn test_from_panic_with_opaque_payload() {
        let payload: Box<dyn Any + Send> = Box::new(17_u8);
        assert_eq!(Fault::from_panic(payload).message(), "unknown panic");
    }

    #[rstest]
    fn test_timed_out_mentions_duration() {
        let fault = Fault::timed_out(Duration::from_millis(250));
        assert_eq!(fault.kind(), FaultKind::TimedOut);
        assert_eq!(fault.message(), "operation timed out after 250ms");
    }

    #[tokio::test]
    async fn test_from_join_error_for_panicking_task() {
        let join_error = tokio::spawn(async { panic!("spawned boom") })
            .await
            .unwrap_err();
        let fault = Fault::from(join_error);
        assert!(fault.is_panic());
        assert_eq!(fault.message(), "spawned boom");
    }

    #[tokio::test]
    async fn test_from_join_error_for_aborted_task() {
        let handle = tokio::spawn(std::future::pending::<()>());
        handle.abort();
        let fault = Fault::from(handle.await.unwrap_err());
        assert_eq!(fault.kind(), FaultKind::Cancelled);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_fault_serde_round_trip() {
        let fault = Fault::external("offline");
        let json = serde_json::to_string(&fault).unwrap();
        assert_eq!(serde_json::from_str::<Fault>(&json).unwrap(), fault);
    }
}
