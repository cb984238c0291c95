//! Bookstore data types.
//!
//! Everything here is plain data. Books reference their author and chapters
//! by id, so building a [`Summary`] needs follow-up lookups.

/// A book as stored by the book service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub id_author: u32,
    pub chapters: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub id: u32,
    pub title: String,
}

/// Sales figures for one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sales {
    pub id_book: u32,
    pub units: u64,
}

/// Everything known about a book, gathered from all services.
///
/// `sales` is `None` when the sales service had no figures for the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub book: Book,
    pub chapters: Vec<Chapter>,
    pub sales: Option<Sales>,
    pub author: Author,
}
