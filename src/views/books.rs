//! Book listing, creation, and detail pages

use maud::{html, Markup};

use super::{error_list, layout};
use crate::models::book::{Book, BookForm};

/// Pagination context for the listing page
#[derive(Debug, Clone, Copy)]
pub struct PageNav {
    /// 1-based current page
    pub current: i64,
    /// Total number of pages
    pub pages: i64,
}

/// Catalog listing: search box, book table, and optional pagination links
pub fn index(books: &[Book], nav: Option<PageNav>, search: &str) -> Markup {
    layout("Books", html! {
        h1 { "Books" }
        form method="post" action="/books" class="search" {
            input type="text" name="search" value=(search) placeholder="Search the catalog";
            button type="submit" { "Search" }
        }
        p { a href="/books/new" { "Create New Book" } }
        @if books.is_empty() {
            p { "No books found." }
        } @else {
            table {
                thead {
                    tr {
                        th { "Title" }
                        th { "Author" }
                        th { "Genre" }
                        th { "Year" }
                    }
                }
                tbody {
                    @for book in books {
                        tr {
                            td { a href=(format!("/books/{}", book.id)) { (book.title) } }
                            td { (book.author) }
                            td { (book.genre.as_deref().unwrap_or("")) }
                            td {
                                @if let Some(year) = book.year { (year) }
                            }
                        }
                    }
                }
            }
        }
        @if let Some(nav) = nav {
            @if nav.pages > 1 {
                nav class="pagination" {
                    @for page in 1..=nav.pages {
                        @if page == nav.current {
                            span class="current" { (page) }
                        } @else {
                            a href=(format!("/books/page/{}", page)) { (page) }
                        }
                    }
                }
            }
        }
    })
}

/// Creation form, also used to redisplay a rejected submission
pub fn new_book(form: &BookForm, errors: &[String]) -> Markup {
    layout("New Book", html! {
        h1 { "New Book" }
        (error_list(errors))
        form method="post" action="/books" {
            (book_fields(form))
            button type="submit" { "Create New Book" }
        }
        p { a href="/books" { "Cancel" } }
    })
}

/// Detail/edit view for one book, with its delete action
pub fn book_detail(id: i64, form: &BookForm, errors: &[String]) -> Markup {
    layout("Update Book", html! {
        h1 { "Update Book" }
        (error_list(errors))
        form method="post" action=(format!("/books/{}", id)) {
            (book_fields(form))
            button type="submit" { "Update Book" }
        }
        form method="post" action=(format!("/books/{}/delete", id)) {
            button type="submit" { "Delete Book" }
        }
        p { a href="/books" { "Cancel" } }
    })
}

fn book_fields(form: &BookForm) -> Markup {
    html! {
        p {
            label for="title" { "Title" }
            input id="title" type="text" name="title" value=(form.title);
        }
        p {
            label for="author" { "Author" }
            input id="author" type="text" name="author" value=(form.author);
        }
        p {
            label for="genre" { "Genre" }
            input id="genre" type="text" name="genre" value=(form.genre.as_deref().unwrap_or(""));
        }
        p {
            label for="year" { "Year" }
            input id="year" type="text" name="year" value=(form.year.as_deref().unwrap_or(""));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn book(id: i32, title: &str, author: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            genre: Some("Fantasy".to_string()),
            year: Some(1937),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_index_lists_books_with_detail_links() {
        let books = vec![book(1, "The Hobbit", "J.R.R. Tolkien")];
        let page = index(&books, None, "").into_string();

        assert!(page.contains(r#"<a href="/books/1">The Hobbit</a>"#));
        assert!(page.contains("J.R.R. Tolkien"));
        assert!(page.contains("1937"));
    }

    #[test]
    fn test_index_empty_catalog() {
        let page = index(&[], None, "").into_string();
        assert!(page.contains("No books found."));
    }

    #[test]
    fn test_index_preserves_search_term() {
        let page = index(&[], None, "Tolkien").into_string();
        assert!(page.contains(r#"name="search" value="Tolkien""#));
    }

    #[test]
    fn test_index_pagination_links_skip_current_page() {
        let books = vec![book(1, "A", "B")];
        let page = index(&books, Some(PageNav { current: 2, pages: 3 }), "").into_string();

        assert!(page.contains(r#"<a href="/books/page/1">1</a>"#));
        assert!(page.contains(r#"<span class="current">2</span>"#));
        assert!(page.contains(r#"<a href="/books/page/3">3</a>"#));
    }

    #[test]
    fn test_index_single_page_hides_pagination() {
        let books = vec![book(1, "A", "B")];
        let page = index(&books, Some(PageNav { current: 1, pages: 1 }), "").into_string();
        assert!(!page.contains("pagination"));
    }

    #[test]
    fn test_new_book_redisplays_rejected_values() {
        let form = BookForm {
            title: String::new(),
            author: "Jane Austen".to_string(),
            genre: None,
            year: None,
        };
        let errors = vec!["Please provide a value for \"Title\"".to_string()];
        let page = new_book(&form, &errors).into_string();

        assert!(page.contains("Please provide a value for &quot;Title&quot;"));
        assert!(page.contains(r#"name="author" value="Jane Austen""#));
    }

    #[test]
    fn test_book_detail_posts_to_original_id() {
        let form = BookForm::from(&book(7, "Dune", "Frank Herbert"));
        let page = book_detail(7, &form, &[]).into_string();

        assert!(page.contains(r#"action="/books/7""#));
        assert!(page.contains(r#"action="/books/7/delete""#));
        assert!(page.contains(r#"value="Dune""#));
    }

    #[test]
    fn test_book_detail_escapes_user_values() {
        let form = BookForm {
            title: "\"><script>".to_string(),
            author: String::new(),
            genre: None,
            year: None,
        };
        let page = book_detail(1, &form, &[]).into_string();
        assert!(!page.contains("<script>"));
    }
}
