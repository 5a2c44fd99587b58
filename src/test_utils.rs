//! In-memory [`Catalog`] used to drive the UI in unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::db::Catalog;
use crate::error::{LibraryError, Result};
use crate::models::{Book, LibraryStats, NewBook, SearchField};

#[derive(Default)]
struct State {
    books: Vec<Book>,
    next_id: i32,
    offline: bool,
    calls: usize,
}

/// Shares its state between clones so a test can keep a handle after boxing
/// one copy into the `App`.
#[derive(Clone, Default)]
pub(crate) struct MemoryCatalog {
    state: Rc<RefCell<State>>,
}

impl MemoryCatalog {
    pub(crate) fn with_books(books: &[NewBook]) -> Self {
        let catalog = Self::default();
        for book in books {
            catalog.create(book).expect("seeding memory catalog");
        }
        catalog.state.borrow_mut().calls = 0;
        catalog
    }

    /// Make every later call fail the way an unreachable store does.
    pub(crate) fn go_offline(&self) {
        self.state.borrow_mut().offline = true;
    }

    pub(crate) fn books(&self) -> Vec<Book> {
        self.state.borrow().books.clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.state.borrow().calls
    }

    fn begin(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls += 1;
        if state.offline {
            Err(LibraryError::Connection("store unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Catalog for MemoryCatalog {
    fn create(&self, book: &NewBook) -> Result<Book> {
        self.begin()?;
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let created = book.clone().into_book(state.next_id);
        state.books.push(created.clone());
        Ok(created)
    }

    fn delete_by_title(&self, title: &str) -> Result<u64> {
        self.begin()?;
        let mut state = self.state.borrow_mut();
        let before = state.books.len();
        state.books.retain(|book| book.title != title);
        Ok((before - state.books.len()) as u64)
    }

    fn search(&self, field: SearchField, pattern: &str) -> Result<Vec<Book>> {
        self.begin()?;
        let needle = pattern.to_lowercase();
        let state = self.state.borrow();
        Ok(state
            .books
            .iter()
            .filter(|book| {
                let haystack = match field {
                    SearchField::Title => &book.title,
                    SearchField::Author => &book.author,
                };
                haystack.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Book>> {
        self.begin()?;
        Ok(self.state.borrow().books.clone())
    }

    fn statistics(&self) -> Result<LibraryStats> {
        self.begin()?;
        let state = self.state.borrow();
        Ok(LibraryStats {
            total: state.books.len() as i64,
            read: state.books.iter().filter(|book| book.read_status).count() as i64,
        })
    }
}

pub(crate) fn new_book(title: &str, author: &str, year: i32, read_status: bool) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: author.to_string(),
        year,
        genre: None,
        read_status,
    }
}
