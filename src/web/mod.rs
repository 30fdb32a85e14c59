//! HTTP handlers for the Shelfmark pages

pub mod books;
pub mod health;

use axum::response::Redirect;

/// Site root redirects to the book listing
pub async fn root() -> Redirect {
    Redirect::to("/books")
}
