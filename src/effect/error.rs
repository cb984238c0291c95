//! Capabilities required of domain error types.
//!
//! The effect core is generic over the domain error `E` and asks almost
//! nothing of it. The one exception is normalization: when
//! [`Effect::mask_failures`](super::Effect::mask_failures) replaces every
//! underlying failure with a single user-facing error, it has to build that
//! error from a message.

/// Domain errors that can be built from a human-readable message.
///
/// # Examples
///
/// ```rust
/// use futeither::effect::FromMessage;
///
/// #[derive(Debug, PartialEq)]
/// struct LookupError(String);
///
/// impl FromMessage for LookupError {
///     fn from_message(message: impl Into<String>) -> Self {
///         Self(message.into())
///     }
/// }
///
/// assert_eq!(
///     LookupError::from_message("aggregate unavailable"),
///     LookupError("aggregate unavailable".to_string())
/// );
/// ```
pub trait FromMessage {
    /// Builds an error carrying `message`.
    fn from_message(message: impl Into<String>) -> Self;
}

impl FromMessage for String {
    fn from_message(message: impl Into<String>) -> Self {
        message.into()
    }
}

impl FromMessage for Box<dyn std::error::Error + Send + Sync> {
    fn from_message(message: impl Into<String>) -> Self {
        Self::from(message.into())
    }
}
