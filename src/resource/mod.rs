//! HTTP resource for book records
//!
//! Maps the `/books` routes onto [`BookStore`] operations with fixed status
//! codes. Request bodies are JSON; a body that fails to deserialize is
//! rejected by the `Json` extractor before any handler runs.

pub mod books;
pub mod error;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::store::BookStore;

pub use error::ApiError;

/// Build the `/books` router around a shared store
pub fn router(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/books", get(books::list).post(books::create))
        .route(
            "/books/{isbn}",
            get(books::get).post(books::update).delete(books::remove),
        )
        .with_state(store)
}
