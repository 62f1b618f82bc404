use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use booklend_borrowing::Borrowing;
use booklend_catalog::{Book, CoverType, NewBook};

// -------------------------
// Request DTOs
// -------------------------

/// Catalog write payload (create and full update share the shape).
#[derive(Debug, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub cover: CoverType,
    pub inventory: u32,
    pub daily_fee_cents: u64,
}

impl BookPayload {
    pub fn into_new_book(self) -> NewBook {
        NewBook {
            title: self.title,
            author: self.author,
            cover: self.cover,
            inventory: self.inventory,
            daily_fee_cents: self.daily_fee_cents,
        }
    }
}

/// Borrow payload. A `user_id` member, if a client sends one, is simply
/// ignored: ownership always comes from the authenticated requester.
#[derive(Debug, Deserialize)]
pub struct CreateBorrowingRequest {
    pub borrow_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub book_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReturnBorrowingRequest {
    pub actual_return_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ListBorrowingsQuery {
    pub user_id: Option<String>,
    pub is_active: Option<String>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn book_to_json(book: &Book) -> serde_json::Value {
    json!({
        "id": book.id.to_string(),
        "title": book.title,
        "author": book.author,
        "cover": book.cover,
        "inventory": book.inventory,
        "daily_fee_cents": book.daily_fee_cents,
    })
}

pub fn borrowing_to_json(record: &Borrowing) -> serde_json::Value {
    json!({
        "id": record.id.to_string(),
        "borrow_date": record.borrow_date,
        "expected_return_date": record.expected_return_date,
        "actual_return_date": record.actual_return_date,
        "book_id": record.book_id.to_string(),
        "user_id": record.user_id.to_string(),
    })
}

/// List view: the book reference expanded to the full record. Falls back to
/// the plain id when the book has since left the catalog.
pub fn borrowing_list_item_to_json(record: &Borrowing, book: Option<Book>) -> serde_json::Value {
    let mut value = borrowing_to_json(record);
    if let Some(book) = book {
        value["book_id"] = book_to_json(&book);
    }
    value
}
