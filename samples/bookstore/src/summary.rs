//! Book summary aggregate.
//!
//! A summary needs four lookups. Sales only depend on the book id, so they
//! start right away; the author and the chapters need fields of the book and
//! therefore wait for it. The book itself is fetched once and shared.
//!
//! ```text
//!   get_book ──┬──▶ get_author(book.id_author) ──┐
//!              ├──▶ get_chapter(id) for each id ─┤
//!              └─────────────────────────────────┼──▶ map4 ──▶ Summary
//!   get_sales ─▶ Some(sales) | None ─────────────┘
//! ```
//!
//! Sales are optional: a missing record and an unreachable sales service both
//! leave `sales` empty. Any other failure, fault or domain error alike, is
//! reported as a single opaque [`BookstoreError::Unavailable`].

use std::sync::Arc;

use futeither::effect::{AsyncTask, FutEither};

use crate::domain::Summary;
use crate::error::BookstoreError;
use crate::services::{AuthorService, BookService, ChapterService, SalesService};

/// The message every failed summary is reported with.
pub const SUMMARY_UNAVAILABLE: &str = "It is impossible to get book summary";

/// Combines the four bookstore services into book summaries.
pub struct SummaryService {
    books: Arc<dyn BookService>,
    sales: Arc<dyn SalesService>,
    chapters: Arc<dyn ChapterService>,
    authors: Arc<dyn AuthorService>,
    monad: FutEither<BookstoreError>,
}

impl SummaryService {
    pub fn new(
        books: Arc<dyn BookService>,
        sales: Arc<dyn SalesService>,
        chapters: Arc<dyn ChapterService>,
        authors: Arc<dyn AuthorService>,
        monad: FutEither<BookstoreError>,
    ) -> Self {
        Self {
            books,
            sales,
            chapters,
            authors,
            monad,
        }
    }

    /// Builds the summary of book `id_book`.
    ///
    /// Missing or unreachable sales figures do not fail the summary; they
    /// show up as `sales: None`.
    pub fn get_summary(&self, id_book: u32) -> AsyncTask<Result<Summary, BookstoreError>> {
        let monad = &self.monad;

        let book = monad.lift(self.books.get_book(id_book)).shared();

        let sales = monad
            .lift(self.sales.get_sales(id_book))
            .map(Some)
            .handle_error(|_| None)
            .recover(|_| None);

        let authors = Arc::clone(&self.authors);
        let lookups = monad.clone();
        let author = book
            .effect()
            .flat_map(move |book| lookups.lift(authors.get_author(book.id_author)));

        let chapters = Arc::clone(&self.chapters);
        let lookups = monad.clone();
        let chapters = book.effect().flat_map(move |book| {
            lookups.traverse(book.chapters, |id| lookups.lift(chapters.get_chapter(id)))
        });

        book.effect()
            .map4(chapters, sales, author, |book, chapters, sales, author| Summary {
                book,
                chapters,
                sales,
                author,
            })
            .mask_failures(SUMMARY_UNAVAILABLE)
            .instrument(tracing::info_span!("get_summary", id_book))
            .run()
    }
}

impl std::fmt::Debug for SummaryService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SummaryService")
            .field("monad", &self.monad)
            .finish_non_exhaustive()
    }
}
