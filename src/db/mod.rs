//! Persistence module split across logical submodules.

mod books;
mod connection;

pub use books::{
    create_book, delete_books_by_title, fetch_all_books, fetch_statistics, search_books,
};
pub use connection::{ensure_schema, ConnectionProvider};

use crate::config::DbConfig;
use crate::error::Result;
use crate::models::{Book, LibraryStats, NewBook, SearchField};

/// The five operations the UI performs against the library. The terminal UI
/// only talks to this trait, one call per user action.
pub trait Catalog {
    fn create(&self, book: &NewBook) -> Result<Book>;
    fn delete_by_title(&self, title: &str) -> Result<u64>;
    fn search(&self, field: SearchField, pattern: &str) -> Result<Vec<Book>>;
    fn list_all(&self) -> Result<Vec<Book>>;
    fn statistics(&self) -> Result<LibraryStats>;
}

/// [`Catalog`] backed by the MySQL store.
pub struct BookRepository {
    provider: ConnectionProvider,
}

impl BookRepository {
    pub fn new(config: DbConfig) -> Result<Self> {
        Ok(Self {
            provider: ConnectionProvider::new(config)?,
        })
    }

    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }

    pub fn ensure_schema(&self) -> Result<()> {
        ensure_schema(&self.provider)
    }
}

impl Catalog for BookRepository {
    fn create(&self, book: &NewBook) -> Result<Book> {
        create_book(&self.provider, book)
    }

    fn delete_by_title(&self, title: &str) -> Result<u64> {
        delete_books_by_title(&self.provider, title)
    }

    fn search(&self, field: SearchField, pattern: &str) -> Result<Vec<Book>> {
        search_books(&self.provider, field, pattern)
    }

    fn list_all(&self) -> Result<Vec<Book>> {
        fetch_all_books(&self.provider)
    }

    fn statistics(&self) -> Result<LibraryStats> {
        fetch_statistics(&self.provider)
    }
}
