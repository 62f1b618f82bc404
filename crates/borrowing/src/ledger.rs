//! Borrowing ledger storage.

use std::sync::RwLock;

use chrono::NaiveDate;

use booklend_core::{BorrowingId, DomainError, DomainResult};

use crate::query::BorrowingFilter;
use crate::record::{Borrowing, NewBorrowing};

/// Ledger storage abstraction.
///
/// `append` is fallible at the trait level so persistent implementations can
/// refuse a write; the lifecycle service relies on that to roll its inventory
/// decrement back.
pub trait BorrowingLedger: Send + Sync {
    /// Create a new open record (id assigned by the ledger) and return it.
    fn append(&self, new: NewBorrowing) -> DomainResult<Borrowing>;

    fn get(&self, id: &BorrowingId) -> DomainResult<Borrowing>;

    /// Atomically set the actual return date.
    ///
    /// Fails with `AlreadyReturned` if the record is closed; the check and the
    /// write happen under one lock so concurrent returns cannot both win.
    fn close(&self, id: &BorrowingId, returned_on: NaiveDate) -> DomainResult<Borrowing>;

    /// Matching records in insertion order.
    fn list(&self, filter: &BorrowingFilter) -> Vec<Borrowing>;
}

/// In-memory ledger for dev/test deployments.
///
/// Records live in a `Vec` so insertion order falls out of the representation.
#[derive(Debug, Default)]
pub struct InMemoryBorrowingLedger {
    inner: RwLock<Vec<Borrowing>>,
}

impl InMemoryBorrowingLedger {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl BorrowingLedger for InMemoryBorrowingLedger {
    fn append(&self, new: NewBorrowing) -> DomainResult<Borrowing> {
        let record = Borrowing {
            id: BorrowingId::new(),
            borrow_date: new.borrow_date,
            expected_return_date: new.expected_return_date,
            actual_return_date: None,
            book_id: new.book_id,
            user_id: new.user_id,
        };

        let mut records = self.inner.write().unwrap();
        records.push(record.clone());
        Ok(record)
    }

    fn get(&self, id: &BorrowingId) -> DomainResult<Borrowing> {
        let records = self.inner.read().unwrap();
        records
            .iter()
            .find(|r| r.id == *id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    fn close(&self, id: &BorrowingId, returned_on: NaiveDate) -> DomainResult<Borrowing> {
        let mut records = self.inner.write().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or(DomainError::NotFound)?;
        record.close(returned_on)?;
        Ok(record.clone())
    }

    fn list(&self, filter: &BorrowingFilter) -> Vec<Borrowing> {
        let records = self.inner.read().unwrap();
        records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }
}
