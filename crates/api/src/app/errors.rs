use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use booklend_core::DomainError;

/// Map a domain error to the canonical JSON error response.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::OutOfStock => json_field_error(
            StatusCode::BAD_REQUEST,
            "out_of_stock",
            "book_id",
            DomainError::OutOfStock.to_string(),
        ),
        DomainError::AlreadyReturned => json_error(
            StatusCode::BAD_REQUEST,
            "already_returned",
            DomainError::AlreadyReturned.to_string(),
        ),
        DomainError::Unauthorized => json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden"),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Field-level variant for validation failures tied to one request field.
pub fn json_field_error(
    status: StatusCode,
    code: &'static str,
    field: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "field": field,
            "message": message.into(),
        })),
    )
        .into_response()
}
