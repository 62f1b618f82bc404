use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use booklend_borrowing::{BorrowRequest, ListBorrowings};
use booklend_core::{BookId, BorrowingId, DomainError, UserId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::RequesterContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_borrowings).post(create_borrowing))
        .route("/:id", get(get_borrowing))
        // Return is reachable via GET for compatibility with existing
        // clients; POST is the conventional alias, same semantics.
        .route("/:id/return", get(return_borrowing).post(return_borrowing))
}

pub async fn create_borrowing(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Json(body): Json<dto::CreateBorrowingRequest>,
) -> axum::response::Response {
    let book_id: BookId = match body.book_id.parse() {
        Ok(v) => v,
        Err(_) => return unknown_book_response(),
    };

    let request = BorrowRequest {
        borrow_date: body.borrow_date,
        expected_return_date: body.expected_return_date,
        book_id,
    };

    match services.borrowing.borrow(requester.user_id(), request) {
        Ok(record) => {
            (StatusCode::CREATED, Json(dto::borrowing_to_json(&record))).into_response()
        }
        // A dangling book reference is a validation failure on this route,
        // not a missing resource.
        Err(DomainError::NotFound) => unknown_book_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_borrowings(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Query(query): Query<dto::ListBorrowingsQuery>,
) -> axum::response::Response {
    // The cross-user filter only means anything for staff; for everyone else
    // the scoping discards it before it is ever parsed.
    let user_id: Option<UserId> = if requester.is_staff() {
        match query.user_id.as_deref().map(str::parse::<UserId>).transpose() {
            Ok(v) => v,
            Err(_) => {
                return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id");
            }
        }
    } else {
        None
    };

    let params = ListBorrowings {
        user_id,
        is_active: query.is_active,
    };

    let records = services
        .borrowing
        .list(requester.user_id(), requester.is_staff(), &params);

    let items: Vec<_> = records
        .iter()
        .map(|record| dto::borrowing_list_item_to_json(record, services.books.get(&record.book_id)))
        .collect();

    (StatusCode::OK, Json(items)).into_response()
}

pub async fn get_borrowing(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BorrowingId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid borrowing id");
        }
    };

    match services
        .borrowing
        .get(requester.user_id(), requester.is_staff(), &id)
    {
        Ok(record) => (StatusCode::OK, Json(dto::borrowing_to_json(&record))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn return_borrowing(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Path(id): Path<String>,
    body: Option<Json<dto::ReturnBorrowingRequest>>,
) -> axum::response::Response {
    let id: BorrowingId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid borrowing id");
        }
    };

    let returned_on = body.and_then(|Json(b)| b.actual_return_date);

    match services.borrowing.return_borrowing(
        requester.user_id(),
        requester.is_staff(),
        &id,
        returned_on,
    ) {
        Ok(record) => (StatusCode::CREATED, Json(dto::borrowing_to_json(&record))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

fn unknown_book_response() -> axum::response::Response {
    errors::json_field_error(
        StatusCode::BAD_REQUEST,
        "invalid_book",
        "book_id",
        "book does not exist",
    )
}
