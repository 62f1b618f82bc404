use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use booklend_core::{BookId, BorrowingId, DomainError, DomainResult, Entity, UserId};

/// A single rental event.
///
/// # Invariants
/// - `book_id` and `user_id` are immutable after creation.
/// - `actual_return_date`, once set, is immutable: a borrowing closes exactly
///   once and never reopens through the public surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrowing {
    pub id: BorrowingId,
    pub borrow_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    /// `None` while the book is still out.
    pub actual_return_date: Option<NaiveDate>,
    pub book_id: BookId,
    pub user_id: UserId,
}

impl Borrowing {
    /// An open borrowing is one whose book has not been returned yet.
    pub fn is_active(&self) -> bool {
        self.actual_return_date.is_none()
    }

    /// Transition Open → Closed.
    ///
    /// The ledger calls this under its lock; callers outside the crate go
    /// through [`crate::BorrowingLedger::close`].
    pub(crate) fn close(&mut self, returned_on: NaiveDate) -> DomainResult<()> {
        if self.actual_return_date.is_some() {
            return Err(DomainError::AlreadyReturned);
        }
        self.actual_return_date = Some(returned_on);
        Ok(())
    }
}

impl Entity for Borrowing {
    type Id = BorrowingId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Ledger input for a new (open) borrowing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBorrowing {
    pub borrow_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub book_id: BookId,
    /// The requester, assigned by the lifecycle service. Never client input.
    pub user_id: UserId,
}
