//! bookstore
//!
//! Prints book summaries assembled from an in-memory catalog.
//!
//! ```bash
//! RUST_LOG=bookstore=debug,futeither=debug cargo run --bin bookstore
//! ```

use std::sync::Arc;
use std::time::Duration;

use futeither::effect::{FutEither, Scheduler, SchedulerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookstore::services::InMemoryBookstore;
use bookstore::{Author, Book, Chapter, Resource, Sales, SummaryService};

fn seed() -> InMemoryBookstore {
    InMemoryBookstore::new()
        .with_latency(Duration::from_millis(20))
        .with_book(Book {
            id: 1,
            title: "A Wizard of Earthsea".to_string(),
            id_author: 10,
            chapters: vec![100, 101, 102],
        })
        .with_book(Book {
            id: 2,
            title: "The Tombs of Atuan".to_string(),
            id_author: 10,
            chapters: vec![200, 201],
        })
        .with_book(Book {
            id: 3,
            title: "Untitled Draft".to_string(),
            id_author: 99,
            chapters: vec![],
        })
        .with_author(Author {
            id: 10,
            name: "Ursula K. Le Guin".to_string(),
        })
        .with_chapter(Chapter {
            id: 100,
            title: "Warriors in the Mist".to_string(),
        })
        .with_chapter(Chapter {
            id: 101,
            title: "The Shadow".to_string(),
        })
        .with_chapter(Chapter {
            id: 102,
            title: "The School for Wizards".to_string(),
        })
        .with_chapter(Chapter {
            id: 200,
            title: "The Eaten One".to_string(),
        })
        .with_chapter(Chapter {
            id: 201,
            title: "The Wall Around the Place".to_string(),
        })
        .with_sales(Sales {
            id_book: 1,
            units: 1_250_000,
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookstore=info,futeither=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let runtime = SchedulerConfig::default()
        .with_thread_name("bookstore-worker")
        .build_runtime()?;
    let scheduler = Scheduler::from_handle(runtime.handle().clone());

    for (label, store) in [
        ("healthy", seed()),
        ("chapters down", seed().with_outage(Resource::Chapter)),
    ] {
        let store = Arc::new(store);
        let service = SummaryService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            FutEither::new(scheduler.clone()),
        );

        for id_book in [1, 2, 3, 4] {
            match scheduler.block_on(service.get_summary(id_book))?? {
                Ok(summary) => tracing::info!(
                    catalog = label,
                    id_book,
                    title = %summary.book.title,
                    author = %summary.author.name,
                    chapters = summary.chapters.len(),
                    units_sold = ?summary.sales.map(|sales| sales.units),
                    "summary ready"
                ),
                Err(error) => tracing::warn!(catalog = label, id_book, %error, "no summary"),
            }
        }
    }

    Ok(())
}
