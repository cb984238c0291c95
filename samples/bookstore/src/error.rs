//! Bookstore error types.

use std::fmt;

use futeither::effect::FromMessage;
use thiserror::Error;

/// The kind of record a lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Book,
    Author,
    Chapter,
    Sales,
}

impl fmt::Display for Resource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Book => "book",
            Self::Author => "author",
            Self::Chapter => "chapter",
            Self::Sales => "sales",
        };
        formatter.write_str(label)
    }
}

/// Domain errors reported by the bookstore services.
///
/// # Examples
///
/// ```
/// use bookstore::{BookstoreError, Resource};
///
/// let error = BookstoreError::NotFound { resource: Resource::Author, id: 9 };
/// assert_eq!(error.to_string(), "author 9 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookstoreError {
    #[error("{resource} {id} not found")]
    NotFound { resource: Resource, id: u32 },

    /// A user-facing message that replaced the underlying cause.
    #[error("{0}")]
    Unavailable(String),
}

impl FromMessage for BookstoreError {
    fn from_message(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
