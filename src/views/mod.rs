//! HTML page rendering.
//!
//! Pages are generated with Maud markup: a view function takes its data
//! context and returns the complete document. All interpolation is
//! auto-escaped.

pub mod books;

use maud::{html, Markup, DOCTYPE};

/// Common page shell
pub fn layout(page_title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page_title) " | Shelfmark" }
            }
            body {
                main { (content) }
            }
        }
    }
}

/// Validation messages shown above a re-rendered form.
/// Renders nothing when the list is empty.
pub fn error_list(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            div class="validation-errors" {
                h2 { "Validation errors" }
                ul {
                    @for error in errors {
                        li { (error) }
                    }
                }
            }
        }
    }
}
