//! Catalog management service

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::book::{Book, BookForm, SaveOutcome},
    repository::Repository,
};

/// One window of the catalog listing
#[derive(Debug)]
pub struct BookPage {
    pub books: Vec<Book>,
    /// 1-based page number
    pub page: i64,
    /// Total number of pages
    pub pages: i64,
    /// Total number of books
    pub total: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    /// First listing page. An empty catalog renders as an empty listing,
    /// not a 404.
    pub async fn first_page(&self) -> AppResult<BookPage> {
        let total = self.repository.books.count().await?;
        let books = self.repository.books.page(self.config.page_size, 0).await?;

        Ok(BookPage {
            books,
            page: 1,
            pages: page_count(total, self.config.page_size),
            total,
        })
    }

    /// A specific listing page, 1-based. Requesting a page beyond the last
    /// one is not-found.
    pub async fn list_page(&self, page: i64) -> AppResult<BookPage> {
        let total = self.repository.books.count().await?;
        let pages = page_count(total, self.config.page_size);

        if page < 1 || page > pages {
            return Err(AppError::NotFound(format!("Page {} is out of range", page)));
        }

        let offset = (page - 1) * self.config.page_size;
        let books = self.repository.books.page(self.config.page_size, offset).await?;

        Ok(BookPage { books, page, pages, total })
    }

    /// Substring search across title, author, genre, and year.
    /// An empty term is the unfiltered listing.
    pub async fn search_books(&self, term: &str) -> AppResult<Vec<Book>> {
        if term.is_empty() {
            return self.repository.books.list_all().await;
        }

        self.repository
            .books
            .search(term, self.config.case_insensitive_search)
            .await
    }

    /// Get a book by id
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Validate and persist a new book. A rejected form persists nothing.
    pub async fn create_book(&self, form: BookForm) -> AppResult<SaveOutcome> {
        let form = form.normalized();

        match form.to_draft() {
            Ok(draft) => {
                let book = self.repository.books.insert(&draft).await?;
                tracing::info!(id = book.id, title = %book.title, "book created");
                Ok(SaveOutcome::Saved(book))
            }
            Err(errors) => Ok(SaveOutcome::Rejected { form, errors }),
        }
    }

    /// Validate and apply changes to an existing book.
    ///
    /// A missing record is not-found even when the submission is also
    /// invalid; a rejected form leaves the stored record unchanged.
    pub async fn update_book(&self, id: i64, form: BookForm) -> AppResult<SaveOutcome> {
        self.get_book(id).await?;

        let form = form.normalized();

        match form.to_draft() {
            Ok(draft) => {
                let book = self
                    .repository
                    .books
                    .update(id, &draft)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
                tracing::info!(id = book.id, "book updated");
                Ok(SaveOutcome::Saved(book))
            }
            Err(errors) => Ok(SaveOutcome::Rejected { form, errors }),
        }
    }

    /// Permanently delete a book
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        if !self.repository.books.delete(id).await? {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        tracing::info!(id, "book deleted");
        Ok(())
    }

    /// Database connectivity probe for the readiness endpoint
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

fn page_count(total: i64, per_page: i64) -> i64 {
    (total + per_page - 1) / per_page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 10), 3);
    }
}
