//! # Bookstore Sample Application
//!
//! Builds a book summary out of four independent back-end services using
//! futeither effects.
//!
//! ## Module Structure
//!
//! - `domain`: plain data types (`Book`, `Author`, `Chapter`, `Sales`, `Summary`)
//! - `error`: the domain error type shared by every service
//! - `services`: service traits and an in-memory implementation
//! - `summary`: the aggregate that combines all services into a `Summary`

#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod services;
pub mod summary;

pub use domain::{Author, Book, Chapter, Sales, Summary};
pub use error::{BookstoreError, Resource};
pub use summary::SummaryService;
