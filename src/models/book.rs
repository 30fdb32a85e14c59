//! Book model and form types.
//!
//! `Book` is the stored row. `BookForm` is the raw form submission as the
//! browser sends it (every value a string); it is normalized and checked
//! before anything touches the database, producing either a `BookDraft`
//! ready for persistence or the list of validation messages to re-render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A catalog record as stored in the `books` table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A submitted book form, kept as strings so rejected input can be
/// redisplayed exactly as the user typed it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide a value for \"Title\""))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide a value for \"Author\""))]
    pub author: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

/// Validated fields ready for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

/// Outcome of a create or update attempt.
///
/// Unexpected failures still propagate through `AppResult`; this enum only
/// distinguishes a persisted record from a rejected submission.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved(Book),
    Rejected { form: BookForm, errors: Vec<String> },
}

impl BookForm {
    /// Trim every field and drop optional fields that came in empty.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.author = self.author.trim().to_string();
        self.genre = self.genre.and_then(non_empty);
        self.year = self.year.and_then(non_empty);
        self
    }

    /// Check required fields and parse the year.
    ///
    /// Expects a normalized form. Collects every message rather than
    /// stopping at the first so the whole form can be corrected at once.
    pub fn to_draft(&self) -> Result<BookDraft, Vec<String>> {
        let mut errors = Vec::new();

        if let Err(validation) = self.validate() {
            errors.extend(field_messages(&validation));
        }

        let year = match self.year.as_deref() {
            None => None,
            Some(raw) => match raw.parse::<i32>() {
                Ok(year) => Some(year),
                Err(_) => {
                    errors.push("\"Year\" must be a whole number".to_string());
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            year,
        })
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            year: book.year.map(|y| y.to_string()),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Flatten validator output into display messages, in field order so the
/// rendered list is stable.
fn field_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let by_field = errors.field_errors();
    ["title", "author"]
        .iter()
        .filter_map(|field| by_field.get(*field))
        .flat_map(|list| list.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, author: &str, genre: Option<&str>, year: Option<&str>) -> BookForm {
        BookForm {
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.map(str::to_string),
            year: year.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_form_produces_draft() {
        let draft = form("The Hobbit", "J.R.R. Tolkien", Some("Fantasy"), Some("1937"))
            .normalized()
            .to_draft()
            .unwrap();

        assert_eq!(draft.title, "The Hobbit");
        assert_eq!(draft.author, "J.R.R. Tolkien");
        assert_eq!(draft.genre.as_deref(), Some("Fantasy"));
        assert_eq!(draft.year, Some(1937));
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let draft = form("Emma", "Jane Austen", Some(""), Some(""))
            .normalized()
            .to_draft()
            .unwrap();

        assert_eq!(draft.genre, None);
        assert_eq!(draft.year, None);
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let errors = form("", "Jane Austen", None, None)
            .normalized()
            .to_draft()
            .unwrap_err();

        assert_eq!(errors, vec!["Please provide a value for \"Title\""]);
    }

    #[test]
    fn test_whitespace_only_fields_are_rejected() {
        let errors = form("   ", "\t", None, None)
            .normalized()
            .to_draft()
            .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Title"));
        assert!(errors[1].contains("Author"));
    }

    #[test]
    fn test_non_numeric_year_is_rejected() {
        let errors = form("Dune", "Frank Herbert", None, Some("nineteen sixty-five"))
            .normalized()
            .to_draft()
            .unwrap_err();

        assert_eq!(errors, vec!["\"Year\" must be a whole number"]);
    }

    #[test]
    fn test_all_messages_collected_at_once() {
        let errors = form("", "", None, Some("abc"))
            .normalized()
            .to_draft()
            .unwrap_err();

        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_form_from_book_round_trips_display_values() {
        let book = Book {
            id: 7,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: None,
            year: Some(1965),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let form = BookForm::from(&book);
        assert_eq!(form.title, "Dune");
        assert_eq!(form.genre, None);
        assert_eq!(form.year.as_deref(), Some("1965"));
    }
}
