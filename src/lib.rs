//! Shelfmark Library Catalog
//!
//! A server-rendered web application for managing a catalog of books:
//! list, search, paginate, create, edit, and delete records through
//! HTML form submissions.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;
pub mod web;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
