//! Borrowing lifecycle orchestration.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use booklend_catalog::BookStore;
use booklend_core::{BookId, BorrowingId, DomainError, DomainResult, UserId};

use crate::ledger::BorrowingLedger;
use crate::notifier::BorrowingNotifier;
use crate::query::ListBorrowings;
use crate::record::{Borrowing, NewBorrowing};

/// Input for the create operation. The owning user is deliberately absent:
/// it always comes from the authenticated requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorrowRequest {
    pub borrow_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub book_id: BookId,
}

impl BorrowRequest {
    fn validate(&self) -> DomainResult<()> {
        if self.expected_return_date < self.borrow_date {
            return Err(DomainError::validation(
                "expected_return_date cannot precede borrow_date",
            ));
        }
        Ok(())
    }
}

/// Orchestrates create/return against the inventory store and the ledger and
/// triggers the outbound notification.
///
/// All collaborators are injected capabilities; nothing here reaches for
/// globals, so tests swap in doubles freely.
pub struct BorrowingService {
    books: Arc<dyn BookStore>,
    ledger: Arc<dyn BorrowingLedger>,
    notifier: Arc<dyn BorrowingNotifier>,
}

impl BorrowingService {
    pub fn new(
        books: Arc<dyn BookStore>,
        ledger: Arc<dyn BorrowingLedger>,
        notifier: Arc<dyn BorrowingNotifier>,
    ) -> Self {
        Self {
            books,
            ledger,
            notifier,
        }
    }

    /// Create a borrowing owned by `requester`.
    ///
    /// Stock is checked and taken in one atomic step, so a book with one copy
    /// left can only be borrowed once. If the ledger refuses the append, the
    /// taken copy goes back; no partial effect stays visible.
    pub fn borrow(&self, requester: UserId, request: BorrowRequest) -> DomainResult<Borrowing> {
        request.validate()?;

        let book = self.books.decrement_inventory(&request.book_id)?;

        let record = match self.ledger.append(NewBorrowing {
            borrow_date: request.borrow_date,
            expected_return_date: request.expected_return_date,
            book_id: request.book_id,
            user_id: requester,
        }) {
            Ok(record) => record,
            Err(e) => {
                let _ = self.books.increment_inventory(&request.book_id);
                return Err(e);
            }
        };

        tracing::info!(
            borrowing_id = %record.id,
            book_id = %book.id,
            user_id = %requester,
            "borrowing created"
        );

        // Post-commit, best-effort; the adapter absorbs delivery failures.
        self.notifier.notify(&book, requester);

        Ok(record)
    }

    /// Close a borrowing and put the copy back on the shelf.
    ///
    /// `returned_on` defaults to today. Closing is a one-way transition; a
    /// second return observes `AlreadyReturned` with nothing mutated. If the
    /// atomic close loses a race to a concurrent return, the increment is
    /// rolled back.
    pub fn return_borrowing(
        &self,
        requester: UserId,
        is_staff: bool,
        id: &BorrowingId,
        returned_on: Option<NaiveDate>,
    ) -> DomainResult<Borrowing> {
        let record = self.scoped_get(requester, is_staff, id)?;

        if !record.is_active() {
            return Err(DomainError::AlreadyReturned);
        }

        self.books.increment_inventory(&record.book_id)?;

        let returned_on = returned_on.unwrap_or_else(|| Utc::now().date_naive());
        match self.ledger.close(id, returned_on) {
            Ok(updated) => {
                tracing::info!(
                    borrowing_id = %updated.id,
                    book_id = %updated.book_id,
                    "borrowing returned"
                );
                Ok(updated)
            }
            Err(e) => {
                let _ = self.books.decrement_inventory(&record.book_id);
                Err(e)
            }
        }
    }

    /// Fetch a single record, scoped to the requester.
    pub fn get(
        &self,
        requester: UserId,
        is_staff: bool,
        id: &BorrowingId,
    ) -> DomainResult<Borrowing> {
        self.scoped_get(requester, is_staff, id)
    }

    /// List records visible to the requester (see [`ListBorrowings::scope`]).
    pub fn list(
        &self,
        requester: UserId,
        is_staff: bool,
        params: &ListBorrowings,
    ) -> Vec<Borrowing> {
        self.ledger.list(&params.scope(requester, is_staff))
    }

    /// Non-staff requesters observe other users' records as absent, the same
    /// way the list scoping hides them.
    fn scoped_get(
        &self,
        requester: UserId,
        is_staff: bool,
        id: &BorrowingId,
    ) -> DomainResult<Borrowing> {
        let record = self.ledger.get(id)?;
        if !is_staff && record.user_id != requester {
            return Err(DomainError::NotFound);
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryBorrowingLedger;
    use booklend_catalog::{Book, CoverType, InMemoryBookStore, NewBook};
    use proptest::prelude::*;
    use std::sync::Mutex;

    /// Records every invocation so tests can assert on the exact payload.
    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<(BookId, UserId)>>,
    }

    impl BorrowingNotifier for RecordingNotifier {
        fn notify(&self, book: &Book, user_id: UserId) {
            self.seen.lock().unwrap().push((book.id, user_id));
        }
    }

    /// Refuses every append, to exercise the create rollback path.
    struct RejectingLedger;

    impl BorrowingLedger for RejectingLedger {
        fn append(&self, _new: NewBorrowing) -> DomainResult<Borrowing> {
            Err(DomainError::validation("ledger unavailable"))
        }

        fn get(&self, _id: &BorrowingId) -> DomainResult<Borrowing> {
            Err(DomainError::NotFound)
        }

        fn close(&self, _id: &BorrowingId, _on: NaiveDate) -> DomainResult<Borrowing> {
            Err(DomainError::NotFound)
        }

        fn list(&self, _filter: &crate::query::BorrowingFilter) -> Vec<Borrowing> {
            Vec::new()
        }
    }

    struct Fixture {
        books: Arc<InMemoryBookStore>,
        notifier: Arc<RecordingNotifier>,
        service: BorrowingService,
    }

    fn fixture() -> Fixture {
        let books = Arc::new(InMemoryBookStore::new());
        let ledger = Arc::new(InMemoryBorrowingLedger::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = BorrowingService::new(books.clone(), ledger, notifier.clone());
        Fixture {
            books,
            notifier,
            service,
        }
    }

    fn seed_book(books: &InMemoryBookStore, inventory: u32) -> BookId {
        let id = BookId::new();
        books.insert(
            Book::new(
                id,
                NewBook {
                    title: "Roadside Picnic".to_string(),
                    author: "Arkady Strugatsky".to_string(),
                    cover: CoverType::Soft,
                    inventory,
                    daily_fee_cents: 99,
                },
            )
            .unwrap(),
        );
        id
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn request(book_id: BookId) -> BorrowRequest {
        BorrowRequest {
            borrow_date: date(1),
            expected_return_date: date(8),
            book_id,
        }
    }

    #[test]
    fn borrow_takes_a_copy_and_appends_an_open_record() {
        let f = fixture();
        let requester = UserId::new();
        let book_id = seed_book(&f.books, 3);

        let record = f.service.borrow(requester, request(book_id)).unwrap();

        assert!(record.is_active());
        assert_eq!(record.user_id, requester);
        assert_eq!(record.book_id, book_id);
        assert_eq!(f.books.get(&book_id).unwrap().inventory, 2);
    }

    #[test]
    fn borrow_notifies_with_book_and_requester() {
        let f = fixture();
        let requester = UserId::new();
        let book_id = seed_book(&f.books, 1);

        f.service.borrow(requester, request(book_id)).unwrap();

        let seen = f.notifier.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[(book_id, requester)]);
    }

    #[test]
    fn borrow_out_of_stock_mutates_nothing() {
        let f = fixture();
        let requester = UserId::new();
        let book_id = seed_book(&f.books, 0);

        let result = f.service.borrow(requester, request(book_id));

        assert_eq!(result, Err(DomainError::OutOfStock));
        assert_eq!(f.books.get(&book_id).unwrap().inventory, 0);
        assert!(
            f.service
                .list(requester, false, &ListBorrowings::default())
                .is_empty()
        );
        assert!(f.notifier.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn borrow_unknown_book_fails() {
        let f = fixture();
        let result = f.service.borrow(UserId::new(), request(BookId::new()));
        assert_eq!(result, Err(DomainError::NotFound));
    }

    #[test]
    fn borrow_with_inverted_dates_is_rejected_before_any_mutation() {
        let f = fixture();
        let book_id = seed_book(&f.books, 1);

        let result = f.service.borrow(
            UserId::new(),
            BorrowRequest {
                borrow_date: date(8),
                expected_return_date: date(1),
                book_id,
            },
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(f.books.get(&book_id).unwrap().inventory, 1);
    }

    #[test]
    fn failed_append_rolls_the_decrement_back() {
        let books = Arc::new(InMemoryBookStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let service =
            BorrowingService::new(books.clone(), Arc::new(RejectingLedger), notifier.clone());
        let book_id = seed_book(&books, 2);

        let result = service.borrow(UserId::new(), request(book_id));

        assert!(result.is_err());
        assert_eq!(books.get(&book_id).unwrap().inventory, 2);
        assert!(notifier.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn return_closes_the_record_and_restocks() {
        let f = fixture();
        let requester = UserId::new();
        let book_id = seed_book(&f.books, 1);

        let record = f.service.borrow(requester, request(book_id)).unwrap();
        let returned = f
            .service
            .return_borrowing(requester, false, &record.id, Some(date(5)))
            .unwrap();

        assert_eq!(returned.actual_return_date, Some(date(5)));
        assert_eq!(f.books.get(&book_id).unwrap().inventory, 1);
    }

    #[test]
    fn second_return_fails_without_mutation() {
        let f = fixture();
        let requester = UserId::new();
        let book_id = seed_book(&f.books, 1);

        let record = f.service.borrow(requester, request(book_id)).unwrap();
        f.service
            .return_borrowing(requester, false, &record.id, Some(date(5)))
            .unwrap();

        let result = f
            .service
            .return_borrowing(requester, false, &record.id, Some(date(6)));

        assert_eq!(result, Err(DomainError::AlreadyReturned));
        // Inventory not incremented a second time; the return date is intact.
        assert_eq!(f.books.get(&book_id).unwrap().inventory, 1);
        let record = f.service.get(requester, false, &record.id).unwrap();
        assert_eq!(record.actual_return_date, Some(date(5)));
    }

    #[test]
    fn return_defaults_to_today() {
        let f = fixture();
        let requester = UserId::new();
        let book_id = seed_book(&f.books, 1);

        let record = f.service.borrow(requester, request(book_id)).unwrap();

        let before = Utc::now().date_naive();
        let returned = f
            .service
            .return_borrowing(requester, false, &record.id, None)
            .unwrap();
        let after = Utc::now().date_naive();

        let actual = returned.actual_return_date.unwrap();
        assert!(actual >= before && actual <= after);
    }

    #[test]
    fn return_of_unknown_borrowing_fails() {
        let f = fixture();
        let result = f
            .service
            .return_borrowing(UserId::new(), false, &BorrowingId::new(), None);
        assert_eq!(result, Err(DomainError::NotFound));
    }

    #[test]
    fn non_staff_cannot_see_or_return_foreign_records() {
        let f = fixture();
        let owner = UserId::new();
        let stranger = UserId::new();
        let book_id = seed_book(&f.books, 1);

        let record = f.service.borrow(owner, request(book_id)).unwrap();

        assert_eq!(
            f.service.get(stranger, false, &record.id),
            Err(DomainError::NotFound)
        );
        assert_eq!(
            f.service.return_borrowing(stranger, false, &record.id, None),
            Err(DomainError::NotFound)
        );

        // Staff reach across users.
        assert!(f.service.get(stranger, true, &record.id).is_ok());
    }

    #[test]
    fn return_fails_when_the_book_is_gone_from_the_catalog() {
        let f = fixture();
        let requester = UserId::new();
        let book_id = seed_book(&f.books, 1);

        let record = f.service.borrow(requester, request(book_id)).unwrap();
        f.books.remove(&book_id).unwrap();

        let result = f
            .service
            .return_borrowing(requester, false, &record.id, None);

        assert_eq!(result, Err(DomainError::NotFound));
        // The record stays open; nothing was half-applied.
        assert!(f.service.get(requester, false, &record.id).unwrap().is_active());
    }

    #[test]
    fn list_scopes_and_filters() {
        let f = fixture();
        let alice = UserId::new();
        let bob = UserId::new();
        let book_id = seed_book(&f.books, 4);

        let open = f.service.borrow(alice, request(book_id)).unwrap();
        let closed = f.service.borrow(alice, request(book_id)).unwrap();
        f.service
            .return_borrowing(alice, false, &closed.id, Some(date(5)))
            .unwrap();
        f.service.borrow(bob, request(book_id)).unwrap();

        // Non-staff alice asking for bob's records still sees only her own.
        let params = ListBorrowings {
            user_id: Some(bob),
            is_active: None,
        };
        let records = f.service.list(alice, false, &params);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.user_id == alice));

        // Active filter narrows to the open record.
        let params = ListBorrowings {
            user_id: None,
            is_active: Some("true".to_string()),
        };
        let records = f.service.list(alice, false, &params);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, open.id);

        // Staff without filters see all three.
        let records = f.service.list(bob, true, &ListBorrowings::default());
        assert_eq!(records.len(), 3);
    }

    proptest! {
        #[test]
        fn borrow_then_return_restores_inventory(stock in 1u32..50) {
            let f = fixture();
            let requester = UserId::new();
            let book_id = seed_book(&f.books, stock);

            let record = f.service.borrow(requester, request(book_id)).unwrap();
            prop_assert_eq!(f.books.get(&book_id).unwrap().inventory, stock - 1);

            f.service
                .return_borrowing(requester, false, &record.id, Some(date(9)))
                .unwrap();
            prop_assert_eq!(f.books.get(&book_id).unwrap().inventory, stock);
        }
    }
}
