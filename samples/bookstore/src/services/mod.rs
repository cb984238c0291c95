//! Back-end service interfaces.
//!
//! Each service answers with an [`AsyncTask`] whose value is either the
//! record or a [`BookstoreError`]. Transport failures are faults of the task,
//! not domain errors.

mod in_memory;

pub use in_memory::InMemoryBookstore;

use futeither::effect::AsyncTask;

use crate::domain::{Author, Book, Chapter, Sales};
use crate::error::BookstoreError;

/// Looked-up record, or the domain error explaining why it is missing.
pub type Lookup<A> = AsyncTask<Result<A, BookstoreError>>;

pub trait BookService: Send + Sync {
    fn get_book(&self, id: u32) -> Lookup<Book>;
}

pub trait SalesService: Send + Sync {
    fn get_sales(&self, id_book: u32) -> Lookup<Sales>;
}

pub trait ChapterService: Send + Sync {
    fn get_chapter(&self, id: u32) -> Lookup<Chapter>;
}

pub trait AuthorService: Send + Sync {
    fn get_author(&self, id: u32) -> Lookup<Author>;
}
