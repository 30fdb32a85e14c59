//! Book resource handlers.
//!
//! Handlers marshal form bodies into the catalog service and records into
//! rendered pages. Every handler returns `AppResult`, so anything other
//! than a validation failure propagates to the shared `AppError` response
//! conversion; validation failures are consumed here by branching on
//! `SaveOutcome` and re-rendering the form with HTTP 200.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::book::{BookForm, SaveOutcome},
    views,
    views::books::PageNav,
    AppState,
};

/// POST /books carries either a search submission or a creation form; the
/// handler branches on the presence of the `search` field.
#[derive(Debug, Deserialize)]
pub struct ListSubmission {
    pub search: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

impl ListSubmission {
    fn into_form(self) -> BookForm {
        BookForm {
            title: self.title,
            author: self.author,
            genre: self.genre,
            year: self.year,
        }
    }
}

/// GET /books - first page of the catalog
pub async fn list_books(State(state): State<AppState>) -> AppResult<Markup> {
    let page = state.services.catalog.first_page().await?;

    Ok(views::books::index(
        &page.books,
        Some(PageNav { current: page.page, pages: page.pages }),
        "",
    ))
}

/// GET /books/page/:page - a specific catalog page, 1-based
pub async fn book_page(
    State(state): State<AppState>,
    Path(page): Path<i64>,
) -> AppResult<Markup> {
    let page = state.services.catalog.list_page(page).await?;

    Ok(views::books::index(
        &page.books,
        Some(PageNav { current: page.page, pages: page.pages }),
        "",
    ))
}

/// POST /books - search when the form carries a `search` field,
/// otherwise validate and create
pub async fn submit_books(
    State(state): State<AppState>,
    Form(submission): Form<ListSubmission>,
) -> AppResult<Response> {
    if let Some(term) = submission.search {
        let books = state.services.catalog.search_books(&term).await?;
        return Ok(views::books::index(&books, None, &term).into_response());
    }

    match state.services.catalog.create_book(submission.into_form()).await? {
        SaveOutcome::Saved(_) => Ok(Redirect::to("/books").into_response()),
        SaveOutcome::Rejected { form, errors } => {
            Ok(views::books::new_book(&form, &errors).into_response())
        }
    }
}

/// GET /books/new - empty creation form
pub async fn new_book_form() -> Markup {
    views::books::new_book(&BookForm::default(), &[])
}

/// GET /books/:id - detail/edit view
pub async fn show_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Markup> {
    let book = state.services.catalog.get_book(id).await?;

    Ok(views::books::book_detail(id, &BookForm::from(&book), &[]))
}

/// POST /books/:id - validate and apply changes
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.catalog.update_book(id, form).await? {
        SaveOutcome::Saved(_) => Ok(Redirect::to("/books").into_response()),
        SaveOutcome::Rejected { form, errors } => {
            // Original id preserved so the corrected form still updates
            // the same record
            Ok(views::books::book_detail(id, &form, &errors).into_response())
        }
    }
}

/// POST /books/:id/delete - permanently remove a book
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    state.services.catalog.delete_book(id).await?;

    Ok(Redirect::to("/books"))
}
