use axum::Router;

pub mod books;
pub mod borrowings;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/books", books::router())
        .nest("/borrowings", borrowings::router())
}
