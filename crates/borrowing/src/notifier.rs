//! Outbound notification port.

use booklend_core::UserId;
use booklend_catalog::Book;

/// Fire-and-forget notification capability.
///
/// Implementations must never block the borrow flow or surface failures to it;
/// whatever delivery does is invisible to the caller. Injected into the
/// lifecycle service so tests can substitute a recording double.
pub trait BorrowingNotifier: Send + Sync {
    fn notify(&self, book: &Book, user_id: UserId);
}
