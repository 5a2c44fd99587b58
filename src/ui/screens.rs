//! Selection state for the book tables. Rendering lives in `helpers`; this
//! module only tracks which row the cursor is on.

use crate::models::Book;

/// A scrollable list of books with a selection cursor. Backs both the search
/// results table and the full library view.
pub(crate) struct BookListScreen {
    pub(crate) books: Vec<Book>,
    pub(crate) selected: usize,
}

impl BookListScreen {
    /// Build a list with the cursor on the first row.
    pub(crate) fn new(books: Vec<Book>) -> Self {
        let mut screen = Self { books, selected: 0 };
        screen.ensure_in_bounds();
        screen
    }

    /// Replace the rows, keeping the cursor on the same book id if it is still
    /// present.
    pub(crate) fn set_books(&mut self, books: Vec<Book>) {
        let focus_id = self.current_book().map(|book| book.id);
        self.books = books;
        if let Some(id) = focus_id {
            if let Some(idx) = self.books.iter().position(|book| book.id == id) {
                self.selected = idx;
                return;
            }
        }
        self.ensure_in_bounds();
    }

    /// True when there is nothing to select.
    pub(crate) fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// The book under the cursor, or `None` for an empty list.
    pub(crate) fn current_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    /// Move the cursor by `offset` rows. The cursor stops at the first and
    /// last rows instead of wrapping around.
    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.books.is_empty() {
            return;
        }
        let len = self.books.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    /// Jump to the top row (Home).
    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Jump to the bottom row (End).
    pub(crate) fn select_last(&mut self) {
        self.selected = self.books.len().saturating_sub(1);
    }

    /// Pull the cursor back onto a valid row after the list shrank.
    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.books.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.books.len() {
            self.selected = self.books.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i32, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "Author".to_string(),
            year: 2000,
            genre: None,
            read_status: false,
        }
    }

    #[test]
    fn selection_is_clamped() {
        let mut screen = BookListScreen::new(vec![book(1, "A"), book(2, "B"), book(3, "C")]);
        screen.move_selection(-3);
        assert_eq!(screen.selected, 0);
        screen.move_selection(10);
        assert_eq!(screen.selected, 2);
        screen.select_first();
        assert_eq!(screen.current_book().map(|b| b.id), Some(1));
        screen.select_last();
        assert_eq!(screen.current_book().map(|b| b.id), Some(3));
    }

    #[test]
    fn reload_keeps_cursor_on_same_book() {
        let mut screen = BookListScreen::new(vec![book(1, "A"), book(2, "B"), book(3, "C")]);
        screen.move_selection(1);
        screen.set_books(vec![book(2, "B"), book(3, "C")]);
        assert_eq!(screen.current_book().map(|b| b.id), Some(2));
    }

    #[test]
    fn reload_clamps_when_book_disappears() {
        let mut screen = BookListScreen::new(vec![book(1, "A"), book(2, "B")]);
        screen.select_last();
        screen.set_books(vec![book(1, "A")]);
        assert_eq!(screen.selected, 0);

        screen.set_books(Vec::new());
        assert!(screen.is_empty());
        assert!(screen.current_book().is_none());
        screen.move_selection(1);
        assert_eq!(screen.selected, 0);
    }
}
