//! Library catalog server
//!
//! Request handling for the catalog pages: genres and physical book copies,
//! backed by PostgreSQL. Pages answer with view payloads for the rendering
//! layer or with redirects to canonical record paths.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
