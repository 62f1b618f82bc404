//! Book inventory storage.
//!
//! The store owns the only mutation path for available-copy counts:
//! `decrement_inventory`/`increment_inventory` are single atomic
//! read-modify-writes under the store lock, so two concurrent borrows of the
//! last copy cannot both succeed.

use std::collections::HashMap;
use std::sync::RwLock;

use booklend_core::{BookId, DomainError, DomainResult};

use crate::book::{Book, NewBook};

/// Catalog storage abstraction.
///
/// Object-safe so services can hold `Arc<dyn BookStore>`.
pub trait BookStore: Send + Sync {
    fn insert(&self, book: Book);

    fn get(&self, id: &BookId) -> Option<Book>;

    /// All catalog records, ordered by id (UUIDv7, i.e. creation order).
    fn list(&self) -> Vec<Book>;

    /// Replace the catalog fields of an existing record.
    fn update(&self, id: &BookId, input: NewBook) -> DomainResult<Book>;

    fn remove(&self, id: &BookId) -> DomainResult<()>;

    /// Take one copy off the shelf.
    ///
    /// Fails with `NotFound` if the book is absent and with `OutOfStock` if no
    /// copies are available; the check and the write happen under one lock.
    fn decrement_inventory(&self, id: &BookId) -> DomainResult<Book>;

    /// Put one copy back on the shelf.
    ///
    /// No upper bound: a return is always accepted even if it pushes the count
    /// past the original stock.
    fn increment_inventory(&self, id: &BookId) -> DomainResult<Book>;
}

/// In-memory store for dev/test deployments.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    inner: RwLock<HashMap<BookId, Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl BookStore for InMemoryBookStore {
    fn insert(&self, book: Book) {
        let mut map = self.inner.write().unwrap();
        map.insert(book.id, book);
    }

    fn get(&self, id: &BookId) -> Option<Book> {
        let map = self.inner.read().unwrap();
        map.get(id).cloned()
    }

    fn list(&self) -> Vec<Book> {
        let map = self.inner.read().unwrap();
        let mut books: Vec<Book> = map.values().cloned().collect();
        books.sort_by(|a, b| a.id.as_uuid().cmp(b.id.as_uuid()));
        books
    }

    fn update(&self, id: &BookId, input: NewBook) -> DomainResult<Book> {
        input.validate()?;
        let mut map = self.inner.write().unwrap();
        let book = map.get_mut(id).ok_or(DomainError::NotFound)?;
        book.title = input.title.trim().to_string();
        book.author = input.author.trim().to_string();
        book.cover = input.cover;
        book.inventory = input.inventory;
        book.daily_fee_cents = input.daily_fee_cents;
        Ok(book.clone())
    }

    fn remove(&self, id: &BookId) -> DomainResult<()> {
        let mut map = self.inner.write().unwrap();
        map.remove(id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    fn decrement_inventory(&self, id: &BookId) -> DomainResult<Book> {
        let mut map = self.inner.write().unwrap();
        let book = map.get_mut(id).ok_or(DomainError::NotFound)?;
        if book.inventory == 0 {
            return Err(DomainError::OutOfStock);
        }
        book.inventory -= 1;
        Ok(book.clone())
    }

    fn increment_inventory(&self, id: &BookId) -> DomainResult<Book> {
        let mut map = self.inner.write().unwrap();
        let book = map.get_mut(id).ok_or(DomainError::NotFound)?;
        book.inventory += 1;
        Ok(book.clone())
    }
}
