//! `booklend-borrowing` — the borrowing ledger and lifecycle.
//!
//! A borrowing is the fact entity of a rental: who took which book and when,
//! plus the one-way Open → Closed state machine driven by the return
//! operation. The lifecycle service owns every inventory mutation.

pub mod ledger;
pub mod notifier;
pub mod query;
pub mod record;
pub mod service;

pub use ledger::{BorrowingLedger, InMemoryBorrowingLedger};
pub use notifier::BorrowingNotifier;
pub use query::{BorrowingFilter, ListBorrowings};
pub use record::{Borrowing, NewBorrowing};
pub use service::{BorrowRequest, BorrowingService};
