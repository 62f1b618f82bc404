//! Tracing-only notifier for deployments without bot credentials.

use booklend_borrowing::BorrowingNotifier;
use booklend_catalog::Book;
use booklend_core::UserId;

/// Logs the notification instead of delivering it anywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl BorrowingNotifier for LogNotifier {
    fn notify(&self, book: &Book, user_id: UserId) {
        tracing::info!(book = %book.title, user_id = %user_id, "borrow notification");
    }
}
