use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use booklend_catalog::Book;
use booklend_core::BookId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::RequesterContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/:id", get(get_book).put(update_book).delete(delete_book))
}

pub async fn list_books(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let books: Vec<_> = services.books.list().iter().map(dto::book_to_json).collect();
    (StatusCode::OK, Json(books)).into_response()
}

pub async fn get_book(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BookId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid book id"),
    };

    match services.books.get(&id) {
        Some(book) => (StatusCode::OK, Json(dto::book_to_json(&book))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "book not found"),
    }
}

pub async fn create_book(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Json(body): Json<dto::BookPayload>,
) -> axum::response::Response {
    if let Err(e) = booklend_auth::require_staff(requester.principal()) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let book = match Book::new(BookId::new(), body.into_new_book()) {
        Ok(book) => book,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.books.insert(book.clone());

    (StatusCode::CREATED, Json(dto::book_to_json(&book))).into_response()
}

pub async fn update_book(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::BookPayload>,
) -> axum::response::Response {
    if let Err(e) = booklend_auth::require_staff(requester.principal()) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let id: BookId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid book id"),
    };

    match services.books.update(&id, body.into_new_book()) {
        Ok(book) => (StatusCode::OK, Json(dto::book_to_json(&book))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_book(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = booklend_auth::require_staff(requester.principal()) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let id: BookId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid book id"),
    };

    match services.books.remove(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
