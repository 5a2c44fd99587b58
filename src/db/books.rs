//! Statements against the `books` table.
//!
//! Every function opens its own connection through [`ConnectionProvider`],
//! releases it before inspecting the outcome, and converts driver failures
//! into [`LibraryError`] so callers never see `sqlx` types.

use sqlx::mysql::MySqlConnection;
use tracing::{debug, info};

use crate::error::{LibraryError, Result};
use crate::models::{Book, LibraryStats, NewBook, SearchField};

use super::connection::ConnectionProvider;

/// Column list shared by every query that hydrates a [`Book`].
const SELECT_BOOKS: &str = "SELECT id, title, author, year, genre, read_status FROM books";

/// Insert a book and return it with the id the store assigned.
///
/// The payload is expected to be validated already; the store only enforces
/// `NOT NULL` on title, author and year. An id that does not fit the `INT`
/// column type is reported as a query error.
pub fn create_book(provider: &ConnectionProvider, book: &NewBook) -> Result<Book> {
    provider.run(async {
        let mut conn = provider.acquire().await?;
        let result = sqlx::query(
            "INSERT INTO books (title, author, year, genre, read_status) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year)
        .bind(book.genre.as_deref())
        .bind(book.read_status)
        .execute(&mut conn)
        .await
        .map_err(LibraryError::from_statement);
        ConnectionProvider::release(conn).await;

        let id = i32::try_from(result?.last_insert_id()).map_err(|_| {
            LibraryError::Query("store returned an id outside the INT range".to_string())
        })?;
        info!(id, title = %book.title, "book added");
        Ok::<_, LibraryError>(book.clone().into_book(id))
    })
}

/// Delete every book whose title matches exactly. Returns the number of rows
/// removed; zero matches is still a success.
///
/// Case sensitivity follows the column collation of the server.
pub fn delete_books_by_title(provider: &ConnectionProvider, title: &str) -> Result<u64> {
    provider.run(async {
        let mut conn = provider.acquire().await?;
        let result = sqlx::query("DELETE FROM books WHERE title = ?")
            .bind(title)
            .execute(&mut conn)
            .await
            .map_err(LibraryError::from_statement);
        ConnectionProvider::release(conn).await;

        let removed = result?.rows_affected();
        info!(title, removed, "books removed by title");
        Ok::<_, LibraryError>(removed)
    })
}

/// Substring search against a single column. An empty pattern matches every
/// row.
///
/// The column name comes from [`SearchField::column`] and the pattern is
/// bound as a parameter, so user input never becomes SQL text. Results are
/// ordered by id.
pub fn search_books(
    provider: &ConnectionProvider,
    field: SearchField,
    pattern: &str,
) -> Result<Vec<Book>> {
    let sql = format!("{SELECT_BOOKS} WHERE {} LIKE ? ORDER BY id", field.column());
    let like = like_pattern(pattern);

    provider.run(async {
        let mut conn = provider.acquire().await?;
        let result = sqlx::query_as::<_, Book>(&sql)
            .bind(&like)
            .fetch_all(&mut conn)
            .await
            .map_err(LibraryError::from_statement);
        ConnectionProvider::release(conn).await;

        let books = result?;
        debug!(%field, pattern, matches = books.len(), "search finished");
        Ok::<_, LibraryError>(books)
    })
}

/// Every book in insertion order.
pub fn fetch_all_books(provider: &ConnectionProvider) -> Result<Vec<Book>> {
    let sql = format!("{SELECT_BOOKS} ORDER BY id");

    provider.run(async {
        let mut conn = provider.acquire().await?;
        let result = sqlx::query_as::<_, Book>(&sql)
            .fetch_all(&mut conn)
            .await
            .map_err(LibraryError::from_statement);
        ConnectionProvider::release(conn).await;
        result
    })
}

/// Total and read counts, computed with two counting queries on one
/// connection.
pub fn fetch_statistics(provider: &ConnectionProvider) -> Result<LibraryStats> {
    provider.run(async {
        let mut conn = provider.acquire().await?;
        let result = count_books(&mut conn).await;
        ConnectionProvider::release(conn).await;
        result
    })
}

/// Run both counting queries on an already open connection.
async fn count_books(conn: &mut MySqlConnection) -> Result<LibraryStats> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&mut *conn)
        .await
        .map_err(LibraryError::from_statement)?;
    let read: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE read_status = TRUE")
        .fetch_one(&mut *conn)
        .await
        .map_err(LibraryError::from_statement)?;
    Ok(LibraryStats { total, read })
}

/// Wrap user input in `%...%` for a substring `LIKE`, escaping the wildcard
/// characters so they match literally.
pub(crate) fn like_pattern(raw: &str) -> String {
    let mut pattern = String::with_capacity(raw.len() + 2);
    pattern.push('%');
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
