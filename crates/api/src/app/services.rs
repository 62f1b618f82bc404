//! Store/service wiring shared by all handlers.

use std::sync::Arc;

use booklend_borrowing::{
    BorrowingLedger, BorrowingNotifier, BorrowingService, InMemoryBorrowingLedger,
};
use booklend_catalog::{BookStore, InMemoryBookStore};

/// Shared application services, injected into handlers via `Extension`.
pub struct AppServices {
    /// Catalog reads and admin writes; inventory mutation goes through the
    /// lifecycle service only.
    pub books: Arc<dyn BookStore>,
    pub borrowing: BorrowingService,
}

/// In-memory wiring (single-process deployments and tests).
pub fn build_services(notifier: Arc<dyn BorrowingNotifier>) -> AppServices {
    let books: Arc<dyn BookStore> = Arc::new(InMemoryBookStore::new());
    let ledger: Arc<dyn BorrowingLedger> = Arc::new(InMemoryBorrowingLedger::new());

    let borrowing = BorrowingService::new(books.clone(), ledger, notifier);

    AppServices { books, borrowing }
}
