//! In-memory implementation of every bookstore service.

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use futeither::effect::AsyncTask;

use super::{AuthorService, BookService, ChapterService, Lookup, SalesService};
use crate::domain::{Author, Book, Chapter, Sales};
use crate::error::{BookstoreError, Resource};

#[derive(Debug, Clone, Default)]
struct Catalog {
    books: HashMap<u32, Book>,
    authors: HashMap<u32, Author>,
    chapters: HashMap<u32, Chapter>,
    sales: HashMap<u32, Sales>,
}

/// Serves every lookup from memory after a fixed latency.
///
/// A resource can be marked as down with [`with_outage`](Self::with_outage);
/// lookups against it then fail with a connection error, which the effect
/// layer reports as a fault.
///
/// # Examples
///
/// ```
/// use bookstore::Author;
/// use bookstore::services::{AuthorService, InMemoryBookstore};
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let store = InMemoryBookstore::new().with_author(Author { id: 1, name: "Ursula".into() });
///
/// let author = runtime.block_on(store.get_author(1));
/// assert_eq!(author.unwrap().unwrap().name, "Ursula");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookstore {
    catalog: Arc<Catalog>,
    latency: Duration,
    outages: Arc<HashSet<Resource>>,
}

impl InMemoryBookstore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every answer by `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub fn with_book(mut self, book: Book) -> Self {
        Arc::make_mut(&mut self.catalog)
            .books
            .insert(book.id, book);
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: Author) -> Self {
        Arc::make_mut(&mut self.catalog)
            .authors
            .insert(author.id, author);
        self
    }

    #[must_use]
    pub fn with_chapter(mut self, chapter: Chapter) -> Self {
        Arc::make_mut(&mut self.catalog)
            .chapters
            .insert(chapter.id, chapter);
        self
    }

    #[must_use]
    pub fn with_sales(mut self, sales: Sales) -> Self {
        Arc::make_mut(&mut self.catalog)
            .sales
            .insert(sales.id_book, sales);
        self
    }

    /// Makes every lookup of `resource` fail with a connection error.
    #[must_use]
    pub fn with_outage(mut self, resource: Resource) -> Self {
        let mut outages = (*self.outages).clone();
        outages.insert(resource);
        self.outages = Arc::new(outages);
        self
    }

    fn lookup<A, F>(&self, resource: Resource, id: u32, select: F) -> Lookup<A>
    where
        A: Clone + Send + 'static,
        F: FnOnce(&Catalog) -> Option<&A>,
    {
        let latency = self.latency;
        let outage = self.outages.contains(&resource);
        let found = select(&self.catalog).cloned();

        AsyncTask::from_fallible(async move {
            tokio::time::sleep(latency).await;
            if outage {
                tracing::debug!(%resource, id, "lookup against unavailable service");
                return Err(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    format!("{resource} service unavailable"),
                ));
            }
            Ok(found.ok_or(BookstoreError::NotFound { resource, id }))
        })
    }
}

impl BookService for InMemoryBookstore {
    fn get_book(&self, id: u32) -> Lookup<Book> {
        self.lookup(Resource::Book, id, |catalog| catalog.books.get(&id))
    }
}

impl SalesService for InMemoryBookstore {
    fn get_sales(&self, id_book: u32) -> Lookup<Sales> {
        self.lookup(Resource::Sales, id_book, |catalog| catalog.sales.get(&id_book))
    }
}

impl ChapterService for InMemoryBookstore {
    fn get_chapter(&self, id: u32) -> Lookup<Chapter> {
        self.lookup(Resource::Chapter, id, |catalog| catalog.chapters.get(&id))
    }
}

impl AuthorService for InMemoryBookstore {
    fn get_author(&self, id: u32) -> Lookup<Author> {
        self.lookup(Resource::Author, id, |catalog| catalog.authors.get(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futeither::effect::FaultKind;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn test_missing_record_is_domain_error() {
        let store = InMemoryBookstore::new();
        let result = store.get_chapter(3).await;
        assert_eq!(
            result,
            Ok(Err(BookstoreError::NotFound {
                resource: Resource::Chapter,
                id: 3
            }))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_outage_is_fault() {
        let store = InMemoryBookstore::new()
            .with_sales(Sales { id_book: 1, units: 10 })
            .with_outage(Resource::Sales);
        let fault = store.get_sales(1).await.unwrap_err();
        assert_eq!(fault.kind(), FaultKind::External);
        assert_eq!(fault.message(), "sales service unavailable");
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn test_latency_delays_answer() {
        let store = InMemoryBookstore::new()
            .with_latency(Duration::from_millis(30))
            .with_sales(Sales { id_book: 1, units: 10 });
        let started = tokio::time::Instant::now();
        let _ = store.get_sales(1).await;
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
