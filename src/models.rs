//! Domain models that mirror the `books` table and flow between the
//! persistence layer and the TUI.

use std::fmt;

use sqlx::FromRow;

/// One row of the `books` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    /// Assigned by the store on insert and never changed afterwards.
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: i32,
    /// Blank genres are stored as `NULL`.
    pub genre: Option<String>,
    pub read_status: bool,
}

impl Book {
    /// Yes/No rendering used by the result tables.
    pub fn read_label(&self) -> &'static str {
        if self.read_status {
            "Yes"
        } else {
            "No"
        }
    }

    /// Genre text for display; books without a genre render as an empty
    /// cell.
    pub fn genre_label(&self) -> &str {
        self.genre.as_deref().unwrap_or("")
    }
}

/// Validated payload for inserting a book. The form layer produces it, so by
/// the time one exists the year is in range and title/author are non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: Option<String>,
    pub read_status: bool,
}

impl NewBook {
    /// Attach the id handed back by the store.
    pub fn into_book(self, id: i32) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            year: self.year,
            genre: self.genre,
            read_status: self.read_status,
        }
    }
}

/// Column a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Title,
    Author,
}

impl SearchField {
    /// Column name used in SQL. Only these fixed names ever reach a statement.
    pub fn column(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
        }
    }

    /// The other column. Tab in the search form flips between the two.
    pub fn toggled(self) -> Self {
        match self {
            SearchField::Title => SearchField::Author,
            SearchField::Author => SearchField::Title,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchField::Title => write!(f, "Title"),
            SearchField::Author => write!(f, "Author"),
        }
    }
}

/// Aggregate counts shown on the statistics view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LibraryStats {
    /// Every row in the table.
    pub total: i64,
    /// Rows with `read_status` set.
    pub read: i64,
}

impl LibraryStats {
    /// Books not yet marked as read.
    pub fn unread(&self) -> i64 {
        self.total - self.read
    }

    /// Share of books marked as read, or `None` for an empty library.
    pub fn percentage_read(&self) -> Option<f64> {
        if self.total > 0 {
            Some(self.read as f64 / self.total as f64 * 100.0)
        } else {
            None
        }
    }
}
