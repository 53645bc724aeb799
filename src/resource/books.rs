use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use crate::book::Book;
use crate::resource::error::ApiError;
use crate::store::BookStore;

/// GET /books
pub async fn list(State(store): State<Arc<BookStore>>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(store.find_all()?))
}

/// GET /books/{isbn}
pub async fn get(
    State(store): State<Arc<BookStore>>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, ApiError> {
    store.find(&isbn)?.map(Json).ok_or(ApiError::NotFound)
}

/// POST /books
pub async fn create(
    State(store): State<Arc<BookStore>>,
    Json(book): Json<Book>,
) -> Result<StatusCode, ApiError> {
    let isbn = book.isbn.clone();
    if store.save(book)? {
        info!("Created book {}", isbn);
        Ok(StatusCode::CREATED)
    } else {
        Err(ApiError::IsbnTaken)
    }
}

/// POST /books/{isbn}
pub async fn update(
    State(store): State<Arc<BookStore>>,
    Path(isbn): Path<String>,
    Json(book): Json<Book>,
) -> Result<StatusCode, ApiError> {
    if store.update(&isbn, book)? {
        info!("Updated book {}", isbn);
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound)
    }
}

/// DELETE /books/{isbn}
pub async fn remove(
    State(store): State<Arc<BookStore>>,
    Path(isbn): Path<String>,
) -> Result<StatusCode, ApiError> {
    if store.remove(&isbn)? {
        info!("Removed book {}", isbn);
    }
    Ok(StatusCode::NO_CONTENT)
}
