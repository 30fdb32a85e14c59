//! Books repository for database operations.
//!
//! Identifiers arrive as `i64` from the request path; anything outside the
//! `i32` range of the serial column is treated as an unassigned id rather
//! than an error.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::book::{Book, BookDraft}};

const BOOK_COLUMNS: &str = "id, title, author, genre, year, created_at, updated_at";

/// Wrap a search term for substring matching, escaping LIKE
/// metacharacters so they match literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn narrow_id(id: i64) -> Option<i32> {
    i32::try_from(id).ok()
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All books in insertion order
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// A time-ordered window of books, most recently added first
    pub async fn page(&self, limit: i64, offset: i64) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Total number of books
    pub async fn count(&self) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Look up a book by id. Never errors for a missing record.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let Some(id) = narrow_id(id) else {
            return Ok(None);
        };

        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Persist a validated draft and return the stored row
    pub async fn insert(&self, draft: &BookDraft) -> AppResult<Book> {
        let now = Utc::now();

        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (title, author, genre, year, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.genre)
        .bind(draft.year)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    /// Apply a validated draft to an existing book.
    /// Returns `None` when the id does not resolve.
    pub async fn update(&self, id: i64, draft: &BookDraft) -> AppResult<Option<Book>> {
        let Some(id) = narrow_id(id) else {
            return Ok(None);
        };

        let now = Utc::now();

        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET title = $1, author = $2, genre = $3, year = $4, updated_at = $5
            WHERE id = $6
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.genre)
        .bind(draft.year)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Permanently remove a book. Returns `false` when the id does not resolve.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let Some(id) = narrow_id(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Substring search across title, author, genre, and the textual form
    /// of year, OR-combined. Each matching record appears once.
    pub async fn search(&self, term: &str, case_insensitive: bool) -> AppResult<Vec<Book>> {
        let op = if case_insensitive { "ILIKE" } else { "LIKE" };

        let query = format!(
            r#"
            SELECT {BOOK_COLUMNS} FROM books
            WHERE title {op} $1 ESCAPE '\'
               OR author {op} $1 ESCAPE '\'
               OR genre {op} $1 ESCAPE '\'
               OR year::text {op} $1 ESCAPE '\'
            ORDER BY id
            "#
        );

        let books = sqlx::query_as::<_, Book>(&query)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_term() {
        assert_eq!(like_pattern("Tolkien"), "%Tolkien%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%"), r"%100\%%");
        assert_eq!(like_pattern("a_b"), r"%a\_b%");
        assert_eq!(like_pattern(r"back\slash"), r"%back\\slash%");
    }

    #[test]
    fn test_narrow_id_rejects_out_of_range() {
        assert_eq!(narrow_id(42), Some(42));
        assert_eq!(narrow_id(i64::from(i32::MAX)), Some(i32::MAX));
        assert_eq!(narrow_id(i64::from(i32::MAX) + 1), None);
        assert_eq!(narrow_id(-1), Some(-1));
    }
}
